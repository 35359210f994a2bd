#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use futures::future::BoxFuture;
use progress_sync::{
    dao::{
        local_store::{FallbackStore, LocalStore, LocalStoreError, MemoryLocalStore},
        models::{ActivityEntry, GameState, Identity, LeaderboardEntry, StorageRecord},
        progress_store::ProgressStore,
        storage::{StorageError, StorageResult},
    },
    services::persistence_service::PersistenceCoordinator,
    session::StaticSession,
};

/// Remote call observed by [`FakeStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Exists(Identity),
    Insert(StorageRecord),
    Update(StorageRecord),
    Fetch(Identity),
    Activity(ActivityEntry),
    Leaderboard(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Transport,
    Query,
}

impl Failure {
    fn into_error(self, what: &str) -> StorageError {
        match self {
            Failure::Transport => StorageError::transport(
                format!("{what}: connection reset"),
                std::io::Error::other("connection reset"),
            ),
            Failure::Query => StorageError::query(format!("{what}: rejected")),
        }
    }
}

#[derive(Default)]
struct FakeInner {
    rows: HashMap<Identity, StorageRecord>,
    calls: Vec<Call>,
    fail_exists: Option<Failure>,
    fail_writes: Option<Failure>,
    fail_fetch: Option<Failure>,
    fail_activity: Option<Failure>,
    leaderboard: Vec<LeaderboardEntry>,
}

/// In-memory remote store enforcing one row per identity and recording every call.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn row(&self, identity: &Identity) -> Option<StorageRecord> {
        self.inner.lock().unwrap().rows.get(identity).cloned()
    }

    pub fn put_row(&self, record: StorageRecord) {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.insert(record.user_id.clone(), record);
    }

    pub fn fail_exists(&self, failure: Failure) {
        self.inner.lock().unwrap().fail_exists = Some(failure);
    }

    pub fn fail_writes(&self, failure: Failure) {
        self.inner.lock().unwrap().fail_writes = Some(failure);
    }

    pub fn fail_fetch(&self, failure: Failure) {
        self.inner.lock().unwrap().fail_fetch = Some(failure);
    }

    pub fn fail_activity(&self, failure: Failure) {
        self.inner.lock().unwrap().fail_activity = Some(failure);
    }

    pub fn set_leaderboard(&self, rows: Vec<LeaderboardEntry>) {
        self.inner.lock().unwrap().leaderboard = rows;
    }

    pub fn inserts(&self) -> Vec<StorageRecord> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Insert(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<StorageRecord> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

impl ProgressStore for FakeStore {
    fn exists(&self, identity: &Identity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let identity = identity.clone();
        Box::pin(async move {
            store.log(Call::Exists(identity.clone()));
            let result = {
                let inner = store.inner.lock().unwrap();
                match inner.fail_exists {
                    Some(failure) => Err(failure.into_error("exists")),
                    None => Ok(inner.rows.contains_key(&identity)),
                }
            };
            // Let concurrent saves interleave between the probe and the write.
            tokio::task::yield_now().await;
            result
        })
    }

    fn insert(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.log(Call::Insert(record.clone()));
            let mut inner = store.inner.lock().unwrap();
            if let Some(failure) = inner.fail_writes {
                return Err(failure.into_error("insert"));
            }
            if inner.rows.contains_key(&record.user_id) {
                return Err(StorageError::query("duplicate key value violates unique constraint"));
            }
            inner.rows.insert(record.user_id.clone(), record);
            Ok(())
        })
    }

    fn update(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.log(Call::Update(record.clone()));
            let mut inner = store.inner.lock().unwrap();
            if let Some(failure) = inner.fail_writes {
                return Err(failure.into_error("update"));
            }
            if let Some(row) = inner.rows.get_mut(&record.user_id) {
                *row = record;
            }
            Ok(())
        })
    }

    fn fetch(
        &self,
        identity: &Identity,
    ) -> BoxFuture<'static, StorageResult<Option<StorageRecord>>> {
        let store = self.clone();
        let identity = identity.clone();
        Box::pin(async move {
            store.log(Call::Fetch(identity.clone()));
            let inner = store.inner.lock().unwrap();
            if let Some(failure) = inner.fail_fetch {
                return Err(failure.into_error("fetch"));
            }
            Ok(inner.rows.get(&identity).cloned())
        })
    }

    fn record_activity(&self, entry: ActivityEntry) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.log(Call::Activity(entry));
            match store.inner.lock().unwrap().fail_activity {
                Some(failure) => Err(failure.into_error("activity")),
                None => Ok(()),
            }
        })
    }

    fn leaderboard(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntry>>> {
        let store = self.clone();
        Box::pin(async move {
            store.log(Call::Leaderboard(limit));
            let inner = store.inner.lock().unwrap();
            if let Some(failure) = inner.fail_fetch {
                return Err(failure.into_error("leaderboard"));
            }
            Ok(inner.leaderboard.iter().take(limit).cloned().collect())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Local store whose every operation fails.
pub struct BrokenLocalStore;

impl LocalStore for BrokenLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        Err(LocalStoreError::Io {
            key: key.into(),
            source: std::io::Error::other("read-only filesystem"),
        })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), LocalStoreError> {
        Err(LocalStoreError::Io {
            key: key.into(),
            source: std::io::Error::other("read-only filesystem"),
        })
    }
}

/// Coordinator plus handles to inspect both tiers.
pub struct Harness {
    pub coordinator: PersistenceCoordinator,
    pub remote: FakeStore,
    pub local: Arc<MemoryLocalStore>,
    pub fallback: FallbackStore,
}

pub fn harness(session: StaticSession) -> Harness {
    let remote = FakeStore::new();
    let local = Arc::new(MemoryLocalStore::new());
    let fallback = FallbackStore::with_default_key(local.clone());
    let coordinator = PersistenceCoordinator::new(
        Arc::new(session),
        Arc::new(remote.clone()),
        fallback.clone(),
    );
    Harness {
        coordinator,
        remote,
        local,
        fallback,
    }
}

pub fn player() -> Identity {
    Identity::new("9b2f6a0e-player")
}

pub fn game_state(bread: f64) -> GameState {
    GameState {
        bread,
        total_bread: 500.0,
        bread_per_click: 2.0,
        bread_per_second: 0.0,
        prestige_level: 0,
        prestige_multiplier: 1.0,
        player_level: 1,
        experience: 0.0,
        achievements: ["first_loaf".to_string()].into_iter().collect(),
        ..GameState::default()
    }
}
