use axum::{Json, Router, extract::State, http::StatusCode, routing::put};

use crate::{
    dto::session::SessionRequest, error::AppError, services::session_service, state::SharedState,
};

/// Session handoff routes used by the identity provider integration.
pub fn router() -> Router<SharedState> {
    Router::new().route("/session", put(sign_in).delete(sign_out))
}

/// Install the access token of the signed-in player.
#[utoipa::path(
    put,
    path = "/session",
    tag = "session",
    request_body = SessionRequest,
    responses(
        (status = 204, description = "Token installed"),
        (status = 400, description = "Empty token")
    )
)]
pub async fn sign_in(
    State(state): State<SharedState>,
    Json(payload): Json<SessionRequest>,
) -> Result<StatusCode, AppError> {
    session_service::sign_in(&state, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drop the current access token.
#[utoipa::path(
    delete,
    path = "/session",
    tag = "session",
    responses((status = 204, description = "Token cleared"))
)]
pub async fn sign_out(State(state): State<SharedState>) -> StatusCode {
    session_service::sign_out(&state).await;
    StatusCode::NO_CONTENT
}
