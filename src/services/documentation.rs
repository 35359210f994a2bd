use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the progress sync daemon.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::save::load_progress,
        crate::routes::save::save_progress,
        crate::routes::activity::record_activity,
        crate::routes::leaderboard::leaderboard,
        crate::routes::session::sign_in,
        crate::routes::session::sign_out,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::save::SaveOutcome,
            crate::dto::activity::ActivityRequest,
            crate::dto::session::SessionRequest,
            crate::dao::models::GameState,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "progress", description = "Save and load player progress"),
        (name = "activity", description = "Audit trail of player actions"),
        (name = "session", description = "Session handoff from the identity provider"),
    )
)]
pub struct ApiDoc;
