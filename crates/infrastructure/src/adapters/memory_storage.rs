//! In-memory key/value storage

use std::collections::HashMap;

use parking_lot::RwLock;

use courier_application::ports::TokenStorage;

/// Thread-safe in-memory key/value store.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one item.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set_item(key, value);
        storage
    }

    /// Stores `value` under `key`.
    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items.write().insert(key.into(), value.into());
    }

    /// Removes `key`, returning its value.
    pub fn remove_item(&self, key: &str) -> Option<String> {
        self.items.write().remove(key)
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.items.write().clear();
    }
}

impl TokenStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = InMemoryStorage::with_item("userToken", "abc");
        assert_eq!(storage.get_item("userToken").as_deref(), Some("abc"));

        storage.set_item("userToken", "def");
        assert_eq!(storage.remove_item("userToken").as_deref(), Some("def"));
        assert_eq!(storage.get_item("userToken"), None);
    }

    #[test]
    fn test_clear() {
        let storage = InMemoryStorage::with_item("a", "1");
        storage.clear();
        assert_eq!(storage.get_item("a"), None);
    }
}
