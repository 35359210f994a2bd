use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{dao::models::GameState, dto::save::SaveOutcome, state::SharedState};

/// Routes saving and restoring player progress.
pub fn router() -> Router<SharedState> {
    Router::new().route("/save", get(load_progress).put(save_progress))
}

/// Restore the last saved progress for the current player.
#[utoipa::path(
    get,
    path = "/save",
    tag = "progress",
    responses(
        (status = 200, description = "Saved progress", body = GameState),
        (status = 204, description = "No saved progress; start a new game")
    )
)]
pub async fn load_progress(State(state): State<SharedState>) -> Response {
    match state.coordinator().load().await {
        Some(game) => Json(game).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Persist progress, to the cloud when possible and to the local snapshot otherwise.
#[utoipa::path(
    put,
    path = "/save",
    tag = "progress",
    request_body = GameState,
    responses(
        (status = 200, description = "Progress saved (check `local`)", body = SaveOutcome),
        (status = 500, description = "Progress could not be saved anywhere", body = SaveOutcome)
    )
)]
pub async fn save_progress(
    State(state): State<SharedState>,
    Json(game): Json<GameState>,
) -> (StatusCode, Json<SaveOutcome>) {
    let outcome = state.coordinator().save(&game).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome))
}
