use std::error::Error;

use thiserror::Error;

/// Result alias for remote storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by remote storage backends regardless of the underlying service.
///
/// "No rows" is never an error: lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The remote store could not be reached or answered with a server failure.
    #[error("remote store unreachable: {message}")]
    Transport {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The remote store rejected the query (bad filter, constraint violation, ...).
    #[error("remote query rejected: {message}")]
    Query { message: String },
}

impl StorageError {
    /// Construct a transport error from any backend failure.
    pub fn transport(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Transport {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a query rejection.
    pub fn query(message: impl Into<String>) -> Self {
        StorageError::Query {
            message: message.into(),
        }
    }
}
