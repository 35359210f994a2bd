use std::time::Duration;

use super::error::{PostgrestError, PostgrestResult};

const DEFAULT_SAVES_TABLE: &str = "game_saves";
const DEFAULT_ACTIVITY_TABLE: &str = "activity_logs";
const DEFAULT_LEADERBOARD_VIEW: &str = "leaderboard";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration describing how to reach the PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    pub base_url: String,
    pub anon_key: String,
    pub saves_table: String,
    pub activity_table: String,
    pub leaderboard_view: String,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
}

impl PostgrestConfig {
    /// Construct a configuration with the default table names.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            saves_table: DEFAULT_SAVES_TABLE.into(),
            activity_table: DEFAULT_ACTIVITY_TABLE.into(),
            leaderboard_view: DEFAULT_LEADERBOARD_VIEW.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> PostgrestResult<Self> {
        let base_url = std::env::var("SUPABASE_URL").map_err(|_| PostgrestError::MissingEnvVar {
            var: "SUPABASE_URL",
        })?;
        let anon_key =
            std::env::var("SUPABASE_ANON_KEY").map_err(|_| PostgrestError::MissingEnvVar {
                var: "SUPABASE_ANON_KEY",
            })?;

        let mut config = Self::new(base_url, anon_key);
        if let Ok(table) = std::env::var("SUPABASE_SAVES_TABLE") {
            config.saves_table = table;
        }
        if let Ok(table) = std::env::var("SUPABASE_ACTIVITY_TABLE") {
            config.activity_table = table;
        }
        if let Ok(view) = std::env::var("SUPABASE_LEADERBOARD_VIEW") {
            config.leaderboard_view = view;
        }
        if let Some(secs) = std::env::var("SUPABASE_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
