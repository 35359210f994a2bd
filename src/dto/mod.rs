pub mod activity;
pub mod health;
pub mod leaderboard;
pub mod save;
pub mod session;
