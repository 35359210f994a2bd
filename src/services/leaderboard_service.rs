use std::sync::Arc;

use tracing::warn;

use crate::dao::{models::LeaderboardEntry, progress_store::ProgressStore};

/// Upper bound on rows a single leaderboard request may ask for.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Read-only view over the remote leaderboard.
#[derive(Clone)]
pub struct LeaderboardService {
    remote: Arc<dyn ProgressStore>,
    default_limit: usize,
}

impl LeaderboardService {
    pub fn new(remote: Arc<dyn ProgressStore>, default_limit: usize) -> Self {
        Self {
            remote,
            default_limit: default_limit.clamp(1, MAX_LEADERBOARD_LIMIT),
        }
    }

    /// Top rows of the leaderboard; empty when the remote store is unavailable.
    pub async fn top(&self, limit: Option<usize>) -> Vec<LeaderboardEntry> {
        let limit = limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_LEADERBOARD_LIMIT);
        match self.remote.leaderboard(limit).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(limit, error = %err, "failed to load leaderboard");
                Vec::new()
            }
        }
    }
}
