use axum::Router;

use crate::state::SharedState;

pub mod activity;
pub mod docs;
pub mod health;
pub mod leaderboard;
pub mod save;
pub mod session;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(save::router())
        .merge(activity::router())
        .merge(leaderboard::router())
        .merge(session::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
