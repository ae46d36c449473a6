/// Application-facing store: persistent when possible, in-memory otherwise.
use std::path::Path;

use crate::{KeyValueStore, MemoryStore, RedbStore, StoreResult};

#[derive(Debug)]
pub enum LocalStore {
    Persistent(RedbStore),
    Memory(MemoryStore),
}

impl LocalStore {
    /// Opens the redb store at `path`, falling back to an in-memory store
    /// if the database cannot be opened.
    pub fn open(path: &Path) -> Self {
        match RedbStore::open(path) {
            Ok(store) => {
                tracing::debug!("Opened persistent store at {}", path.display());
                Self::Persistent(store)
            }
            Err(e) => {
                tracing::warn!("Persistent storage unavailable, using in-memory store: {e}");
                Self::Memory(MemoryStore::new())
            }
        }
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Whether writes go to disk.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            Self::Persistent(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Self::Persistent(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match self {
            Self::Persistent(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}
