//! Daemon configuration loaded from a JSON file, with built-in defaults.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::local_store::DEFAULT_SAVE_KEY;

/// Default location on disk where the daemon looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/sync.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PROGRESS_SYNC_CONFIG_PATH";
const DEFAULT_FALLBACK_DIR: &str = ".progress-sync";
const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the local fallback snapshot.
    pub fallback_dir: PathBuf,
    /// Key the snapshot is stored under.
    pub save_key: String,
    /// Serialize concurrent saves for the same identity.
    pub serialize_saves: bool,
    /// Rows returned by the leaderboard when the caller does not ask for a count.
    pub leaderboard_limit: usize,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded sync configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
            save_key: DEFAULT_SAVE_KEY.to_string(),
            serialize_saves: true,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
