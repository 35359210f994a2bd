use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters of the leaderboard listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Number of rows to return; the configured default when omitted.
    pub limit: Option<usize>,
}
