//! Loading indicator port

/// A visible loading indicator.
pub trait LoadingHandle: Send {
    /// Dismisses the indicator.
    fn close(self: Box<Self>);
}

/// Port for the blocking loading indicator.
pub trait LoadingIndicator: Send + Sync {
    /// Shows an indicator with `text` and returns its handle.
    fn show(&self, text: &str) -> Box<dyn LoadingHandle>;
}
