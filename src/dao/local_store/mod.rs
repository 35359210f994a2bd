//! Local, always-available fallback tier.

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::dao::models::GameState;

pub use file::FileLocalStore;
pub use memory::MemoryLocalStore;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_SAVE_KEY: &str = "breadClickerSave";

/// Failures of the local key-value store.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    /// Reading or writing the backing file failed.
    #[error("local store I/O failed for key `{key}`")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Synchronous string key-value store that works offline.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;
}

/// Failures while writing the fallback snapshot.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("failed to serialize game state snapshot")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] LocalStoreError),
}

/// Reads and writes the JSON snapshot of a [`GameState`] under a single fixed key.
#[derive(Clone)]
pub struct FallbackStore {
    store: Arc<dyn LocalStore>,
    key: Arc<str>,
}

impl FallbackStore {
    /// Wrap `store`, keeping the snapshot under `key`.
    pub fn new(store: Arc<dyn LocalStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Wrap `store` using [`DEFAULT_SAVE_KEY`].
    pub fn with_default_key(store: Arc<dyn LocalStore>) -> Self {
        Self::new(store, DEFAULT_SAVE_KEY)
    }

    /// Overwrite the snapshot with `state`.
    pub fn write(&self, state: &GameState) -> Result<(), FallbackError> {
        let payload = serde_json::to_string(state).map_err(FallbackError::Serialize)?;
        self.store.set(&self.key, &payload)?;
        debug!(key = %self.key, bytes = payload.len(), "wrote local snapshot");
        Ok(())
    }

    /// Return the last snapshot, or `None` when there is none or it cannot be used.
    pub fn read(&self) -> Option<GameState> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read local snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring unparsable local snapshot");
                None
            }
        }
    }
}
