use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the remote store; degraded means saves currently land in the local snapshot.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.remote().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "remote store health check failed");
            HealthResponse::degraded()
        }
    }
}
