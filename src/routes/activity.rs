use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use validator::Validate;

use crate::{
    dto::activity::ActivityRequest,
    error::{AppError, ServiceError},
    state::SharedState,
};

/// Routes feeding the activity audit trail.
pub fn router() -> Router<SharedState> {
    Router::new().route("/activity", post(record_activity))
}

/// Queue an activity entry for the current player; never waits on the remote store.
#[utoipa::path(
    post,
    path = "/activity",
    tag = "activity",
    request_body = ActivityRequest,
    responses(
        (status = 202, description = "Activity queued"),
        (status = 400, description = "Invalid activity payload")
    )
)]
pub async fn record_activity(
    State(state): State<SharedState>,
    Json(payload): Json<ActivityRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(ServiceError::from)?;
    state.notifier().notify(payload.action, payload.details);
    Ok(StatusCode::ACCEPTED)
}
