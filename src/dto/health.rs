use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// The remote store answered; saves go to the cloud.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The remote store is unreachable; saves will land in the local snapshot.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
