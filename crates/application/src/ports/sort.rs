//! Sort serialization port

use courier_domain::SortSpec;

/// Renders a sort specification as a query-string fragment.
///
/// The fragment format belongs to the backend; the pipeline appends it to
/// the synthesized path as-is.
pub trait SortSerializer: Send + Sync {
    /// Serializes `sort` without a leading `?`.
    fn serialize(&self, sort: &SortSpec) -> String;
}
