use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a save request.
///
/// `success` is only false when even the local snapshot could not be written.
/// `local` is set whenever the progress went to the fallback store instead of
/// the remote one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaveOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveOutcome {
    /// Progress reached the remote store.
    pub fn remote() -> Self {
        Self {
            success: true,
            local: false,
            error: None,
        }
    }

    /// Progress went to the local snapshot, optionally because of `cause`.
    pub fn local(cause: Option<String>) -> Self {
        Self {
            success: true,
            local: true,
            error: cause,
        }
    }

    /// Neither tier accepted the progress.
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            local: true,
            error: Some(error),
        }
    }
}
