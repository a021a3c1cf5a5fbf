//! Endpoint catalogs
//!
//! A catalog is a named table of [`EndpointDescriptor`]s for one backend
//! feature area. Catalogs are plain data; the pipeline only ever sees the
//! descriptor a caller looked up.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::request::{EndpointDescriptor, HttpMethod};

/// Named table of endpoint descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCatalog {
    entries: BTreeMap<String, EndpointDescriptor>,
}

impl EndpointCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a catalog whose entries share one service and controller.
    #[must_use]
    pub fn for_controller(
        service: &str,
        controller: &str,
        actions: &[(&str, HttpMethod)],
    ) -> Self {
        actions
            .iter()
            .map(|(action, method)| {
                (
                    (*action).to_string(),
                    EndpointDescriptor::new(service, controller, *action).with_method(*method),
                )
            })
            .collect()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: EndpointDescriptor) {
        self.entries.insert(name.into(), descriptor);
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.entries.get(name)
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointDescriptor)> {
        self.entries.iter().map(|(name, d)| (name.as_str(), d))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, EndpointDescriptor)> for EndpointCatalog {
    fn from_iter<T: IntoIterator<Item = (String, EndpointDescriptor)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// File upload and download endpoints of `file-service`.
#[must_use]
pub fn file_service() -> EndpointCatalog {
    EndpointCatalog::for_controller(
        "file-service",
        "fileUploadController",
        &[
            ("upload", HttpMethod::Post),
            ("unZipCaseFile", HttpMethod::Post),
            ("uploadFileGrid", HttpMethod::Post),
            ("file", HttpMethod::Get),
            ("view", HttpMethod::Get),
        ],
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::synthesize_url;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_service_catalog() {
        let catalog = file_service();
        assert_eq!(catalog.len(), 5);
        let upload = catalog.get("upload").unwrap();
        assert_eq!(upload.method(), HttpMethod::Post);
        assert_eq!(catalog.get("view").unwrap().method(), HttpMethod::Get);
        let url = synthesize_url(upload, &[] as &[&str], None).unwrap();
        assert_eq!(url, "file-service/api/fileUploadController/upload");
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{"list":{"service":"case-service","controller":"caseController","action":"list"}}"#;
        let catalog: EndpointCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.get("list").unwrap().method(), HttpMethod::Get);
        assert!(catalog.get("missing").is_none());
    }
}
