//! Shared pagination state

use parking_lot::Mutex;
use serde_json::Value;

use courier_domain::{Pagination, Payload};

use crate::ports::PageState;

/// [`Pagination`] behind a lock, usable as a call's [`PageState`].
#[derive(Debug, Default)]
pub struct SharedPage {
    inner: Mutex<Pagination>,
}

impl SharedPage {
    /// Wraps a pagination state.
    #[must_use]
    pub const fn new(pagination: Pagination) -> Self {
        Self {
            inner: Mutex::new(pagination),
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Pagination {
        *self.inner.lock()
    }
}

impl PageState for SharedPage {
    fn config(&self) -> Payload {
        self.inner.lock().to_query()
    }

    fn update(&self, envelope: &Value) {
        self.inner.lock().apply_envelope(envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_shared_page_round() {
        let page = SharedPage::new(Pagination::new(3, 20));
        assert_eq!(Value::Object(page.config()), json!({"page": 3, "size": 20}));

        page.update(&json!({"content": [], "number": 3, "totalElements": 61, "totalPages": 4}));
        let snapshot = page.snapshot();
        assert_eq!(snapshot.total_elements, 61);
        assert!(!snapshot.has_next());
    }
}
