//! Save/load coordination between the remote store and the local snapshot.
//!
//! Saves never fail because the cloud is unreachable: any remote failure
//! degrades to the local snapshot and is reported through
//! [`SaveOutcome::local`]. Loads fall back to the snapshot only on remote
//! failures; an identity with no remote row is a new game.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    dao::{
        codec,
        local_store::FallbackStore,
        models::{GameState, Identity},
        progress_store::ProgressStore,
        storage::StorageResult,
    },
    dto::save::SaveOutcome,
    session::SessionProvider,
};

/// Which remote write a save ended up issuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteWrite {
    Insert,
    Update,
}

/// Orchestrates saves and loads across the remote store and the local fallback.
pub struct PersistenceCoordinator {
    session: Arc<dyn SessionProvider>,
    remote: Arc<dyn ProgressStore>,
    fallback: FallbackStore,
    save_gates: Option<DashMap<Identity, Arc<Mutex<()>>>>,
}

impl PersistenceCoordinator {
    /// Build a coordinator that serializes concurrent saves per identity.
    pub fn new(
        session: Arc<dyn SessionProvider>,
        remote: Arc<dyn ProgressStore>,
        fallback: FallbackStore,
    ) -> Self {
        Self {
            session,
            remote,
            fallback,
            save_gates: Some(DashMap::new()),
        }
    }

    /// Toggle per-identity serialization of saves.
    ///
    /// Without it, two concurrent first saves for one identity can both probe
    /// "absent" and both insert; the loser degrades to the local snapshot.
    pub fn with_save_serialization(mut self, enabled: bool) -> Self {
        self.save_gates = enabled.then(DashMap::new);
        self
    }

    /// Persist `state`, remotely when signed in, locally otherwise or on failure.
    pub async fn save(&self, state: &GameState) -> SaveOutcome {
        let Some(identity) = self.session.current_identity().await else {
            debug!("no identity; saving to local snapshot");
            return self.save_locally(state, None);
        };

        let gate = self
            .save_gates
            .as_ref()
            .map(|gates| gates.entry(identity.clone()).or_default().clone());

        let outcome = {
            let _guard = match &gate {
                Some(gate) => Some(gate.lock().await),
                None => None,
            };
            match self.save_remote(&identity, state).await {
                Ok(write) => {
                    info!(%identity, ?write, "saved progress to remote store");
                    SaveOutcome::remote()
                }
                Err(err) => {
                    warn!(%identity, error = %err, "remote save failed; degrading to local snapshot");
                    self.save_locally(state, Some(err.to_string()))
                }
            }
        };

        drop(gate);
        if let Some(gates) = &self.save_gates {
            // Only the map holds the gate once no save is running or queued for this identity.
            gates.remove_if(&identity, |_, gate| Arc::strong_count(gate) == 1);
        }
        outcome
    }

    /// Restore the last saved progress; `None` means "start a new game".
    pub async fn load(&self) -> Option<GameState> {
        let Some(identity) = self.session.current_identity().await else {
            debug!("no identity; loading local snapshot");
            return self.fallback.read();
        };

        match self.remote.fetch(&identity).await {
            Ok(Some(record)) => match codec::to_state(record) {
                Ok(state) => {
                    info!(%identity, "loaded progress from remote store");
                    Some(state)
                }
                Err(err) => {
                    warn!(%identity, error = %err, "discarding malformed remote save");
                    None
                }
            },
            // TODO: offer to migrate a local snapshot when a signed-in player has no remote save yet.
            Ok(None) => {
                info!(%identity, "no remote save; treating as new game");
                None
            }
            Err(err) => {
                warn!(%identity, error = %err, "remote load failed; reading local snapshot");
                self.fallback.read()
            }
        }
    }

    async fn save_remote(&self, identity: &Identity, state: &GameState) -> StorageResult<RemoteWrite> {
        let record = codec::to_record(state, identity);
        let exists = self.remote.exists(identity).await?;
        self.remote.upsert(record, exists).await?;
        Ok(if exists {
            RemoteWrite::Update
        } else {
            RemoteWrite::Insert
        })
    }

    fn save_locally(&self, state: &GameState, cause: Option<String>) -> SaveOutcome {
        match self.fallback.write(state) {
            Ok(()) => SaveOutcome::local(cause),
            Err(err) => {
                error!(error = %err, remote_error = ?cause, "failed to write local snapshot");
                let message = match cause {
                    Some(cause) => format!("{cause}; local snapshot failed: {err}"),
                    None => format!("local snapshot failed: {err}"),
                };
                SaveOutcome::failed(message)
            }
        }
    }
}
