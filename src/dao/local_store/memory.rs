use dashmap::DashMap;

use super::{LocalStore, LocalStoreError};

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: DashMap<String, String>,
}

impl MemoryLocalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
