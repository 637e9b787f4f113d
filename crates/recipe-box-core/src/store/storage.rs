use crate::{CoreResult, RecipeError};

use std::{collections::HashMap, io, panic::Location};

use error_location::ErrorLocation;

/// A durable, string-keyed slot store.
///
/// Implementations hold one string value per key. The recipe store keeps its
/// whole collection under a single key.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> CoreResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> CoreResult<()>;
}

/// In-process store, used for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self {
            slots,
            fail_writes: false,
        }
    }

    /// Make every subsequent write fail, as a full or unavailable store would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Peek at a stored value without going through the trait.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStorage {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    #[track_caller]
    fn save(&mut self, key: &str, value: &str) -> CoreResult<()> {
        if self.fail_writes {
            return Err(RecipeError::Storage {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::StorageFull, "storage quota exceeded"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> CoreResult<()> {
        (**self).save(key, value)
    }
}
