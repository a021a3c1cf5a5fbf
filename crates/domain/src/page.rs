//! Pagination state exchanged with paginated list endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::request::Payload;

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Position and totals of a paginated listing.
///
/// The query side sends `page` and `size`. Paginated responses arrive as an
/// envelope `{content, number, size, totalElements, totalPages}`; the totals
/// are copied back here by [`Pagination::apply_envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Total number of elements reported by the server.
    pub total_elements: u64,
    /// Total number of pages reported by the server.
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates a pagination state at `page` with `size` entries per page.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Returns the query parameters selecting the current page.
    #[must_use]
    pub fn to_query(&self) -> Payload {
        let mut query = Payload::new();
        query.insert("page".to_string(), json!(self.page));
        query.insert("size".to_string(), json!(self.size));
        query
    }

    /// Copies position and totals from a response envelope.
    ///
    /// Fields missing from the envelope leave the current value untouched.
    pub fn apply_envelope(&mut self, envelope: &Value) {
        let read_u32 = |field: &str| {
            envelope
                .get(field)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
        };
        if let Some(page) = read_u32("number") {
            self.page = page;
        }
        if let Some(size) = read_u32("size") {
            self.size = size;
        }
        if let Some(pages) = read_u32("totalPages") {
            self.total_pages = pages;
        }
        if let Some(total) = envelope.get("totalElements").and_then(Value::as_u64) {
            self.total_elements = total;
        }
    }

    /// Returns true if another page follows the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }
}

/// Returns the `content` of a paginated envelope, if `response` is one.
///
/// A `content` of `null`, `false`, `""` or `0` does not make an envelope.
#[must_use]
pub fn envelope_content(response: &Value) -> Option<&Value> {
    response.get("content").filter(|content| is_present(content))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
