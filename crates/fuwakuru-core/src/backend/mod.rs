//! Key-value backends.
//!
//! All tracker state is flat string keys and string values, the way a
//! browser's storage holds it. Everything above this module talks to a
//! [`KeyValueStore`], so the same stores run against memory in tests, a JSON
//! file in the terminal front end, or anything else that can get/set/delete.

mod file;
mod memory;
mod observed;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use observed::{ChangeKind, ObservedStore, StoreChange};

use crate::error::StoreError;

/// Flat string key-value storage.
///
/// Writes are synchronous: a successful `set` is visible to the very next
/// `get` on the same store.
pub trait KeyValueStore {
    /// Read a value. Backends that cannot read report `None`.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key succeeds.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

/// Storage that is switched off: every operation fails.
#[derive(Debug, Clone, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage is disabled".into()))
    }

    fn delete(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage is disabled".into()))
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable("storage is disabled".into()))
    }
}
