use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    dao::{models::ActivityEntry, progress_store::ProgressStore},
    session::SessionProvider,
};

/// Best-effort audit trail of player actions.
///
/// Nothing here ever reports an error to the caller.
#[derive(Clone)]
pub struct ActivityNotifier {
    session: Arc<dyn SessionProvider>,
    remote: Arc<dyn ProgressStore>,
}

impl ActivityNotifier {
    pub fn new(session: Arc<dyn SessionProvider>, remote: Arc<dyn ProgressStore>) -> Self {
        Self { session, remote }
    }

    /// Record `action` for the current player; silently skipped when signed out.
    pub async fn record(&self, action: &str, details: Map<String, Value>) {
        let Some(user_id) = self.session.current_identity().await else {
            debug!(action, "no identity; skipping activity log");
            return;
        };

        let entry = ActivityEntry {
            user_id,
            action: action.to_owned(),
            details,
        };
        if let Err(err) = self.remote.record_activity(entry).await {
            warn!(action, error = %err, "failed to record activity");
        }
    }

    /// Spawn [`Self::record`] in the background and return immediately.
    pub fn notify(&self, action: impl Into<String>, details: Map<String, Value>) {
        let notifier = self.clone();
        let action = action.into();
        tokio::spawn(async move {
            notifier.record(&action, details).await;
        });
    }
}
