#[cfg(feature = "postgrest-store")]
pub mod postgrest;

use futures::future::BoxFuture;

use crate::dao::models::{ActivityEntry, Identity, LeaderboardEntry, StorageRecord};
use crate::dao::storage::StorageResult;

/// Abstraction over the authoritative remote store holding one save per identity.
pub trait ProgressStore: Send + Sync {
    /// Whether a save row already exists for `identity`.
    fn exists(&self, identity: &Identity) -> BoxFuture<'static, StorageResult<bool>>;
    fn insert(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite the row keyed by `record.user_id`.
    fn update(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch the row for `identity`; `Ok(None)` means no rows, not a failure.
    fn fetch(
        &self,
        identity: &Identity,
    ) -> BoxFuture<'static, StorageResult<Option<StorageRecord>>>;
    fn record_activity(&self, entry: ActivityEntry) -> BoxFuture<'static, StorageResult<()>>;
    fn leaderboard(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntry>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;

    /// Update when a prior probe found a row, insert otherwise.
    fn upsert(
        &self,
        record: StorageRecord,
        exists: bool,
    ) -> BoxFuture<'static, StorageResult<()>> {
        if exists {
            self.update(record)
        } else {
            self.insert(record)
        }
    }
}
