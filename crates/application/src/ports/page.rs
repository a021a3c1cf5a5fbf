//! Pagination port

use serde_json::Value;

use courier_domain::Payload;

/// A pagination state shared between a caller and its calls.
///
/// Implementations use interior mutability: the pipeline holds the state
/// behind an `Arc` while the caller keeps reading it.
pub trait PageState: Send + Sync {
    /// Returns the parameters selecting the current page.
    fn config(&self) -> Payload;

    /// Updates the state from a paginated response envelope.
    fn update(&self, envelope: &Value);
}
