//! Request header composition

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ports::TokenStorage;

/// Header set of one call.
pub type Headers = BTreeMap<String, String>;

/// Merges caller headers with the stored auth token.
///
/// The token header is inserted first and caller headers are merged over
/// it, so a caller header with the same name wins. Content negotiation
/// headers belong to the transport and are not added here.
#[derive(Clone)]
pub struct HeaderComposer {
    storage: Arc<dyn TokenStorage>,
    storage_key: String,
    header_name: String,
}

impl HeaderComposer {
    /// Creates a composer reading the token stored under `storage_key` and
    /// sending it as `header_name`.
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStorage>,
        storage_key: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            header_name: header_name.into(),
        }
    }

    /// Returns the headers for one call.
    #[must_use]
    pub fn compose(&self, caller: Option<&Headers>) -> Headers {
        let token = self
            .storage
            .get_item(&self.storage_key)
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            return caller.cloned().unwrap_or_default();
        };

        let mut headers = Headers::new();
        headers.insert(self.header_name.clone(), token);
        if let Some(caller) = caller {
            headers.extend(caller.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        headers
    }
}
