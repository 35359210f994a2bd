use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{dao::models::LeaderboardEntry, dto::leaderboard::LeaderboardQuery, state::SharedState};

/// Read-only leaderboard routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

/// List the top players; empty when the remote store is unavailable.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "progress",
    params(LeaderboardQuery),
    responses((status = 200, description = "Top leaderboard rows"))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    Json(state.leaderboard().top(query.limit).await)
}
