/// String key/value storage with a persistent backend and an in-memory fallback.
///
/// `KeyValueStore` is the seam consumers depend on. `LocalStore` is what an
/// application opens at startup: a redb database when the file can be opened,
/// otherwise a process-scoped map with the same semantics.
pub mod error;
pub mod local;
pub mod memory;
pub mod persistent;

pub use error::{StoreError, StoreResult};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use persistent::RedbStore;

/// A synchronous string-keyed, string-valued store.
///
/// Failures are returned, never swallowed. Whether a failure is fatal is up
/// to the caller.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
