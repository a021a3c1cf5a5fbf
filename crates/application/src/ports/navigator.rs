//! Navigation port

/// Port for application routing.
pub trait Navigator: Send + Sync {
    /// Navigates to `path`.
    fn navigate_to(&self, path: &str);
}
