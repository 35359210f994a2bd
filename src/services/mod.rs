/// Best-effort activity audit trail.
pub mod activity_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Remote store health probe.
pub mod health_service;
/// Leaderboard read path.
pub mod leaderboard_service;
/// Save/load coordination with local fallback.
pub mod persistence_service;
/// Session token handoff.
pub mod session_service;
