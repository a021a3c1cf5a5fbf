//! Persistent key/value storage port

/// Read access to the persistent key/value store holding the auth token.
pub trait TokenStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;
}
