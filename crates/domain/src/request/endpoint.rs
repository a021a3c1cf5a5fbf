//! Endpoint descriptors and URL synthesis

use serde::{Deserialize, Serialize};

use super::method::HttpMethod;
use crate::error::{DomainError, DomainResult};

/// Path segment inserted between the service and the controller.
const API_SEGMENT: &str = "api";

/// Static declaration of one remote operation.
///
/// Descriptors are declared once per endpoint (see [`crate::catalog`]) and
/// passed by value into each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Backend service name, the first path segment.
    pub service: String,
    /// Controller name. Required unless `url` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    /// Action name inside the controller.
    pub action: String,
    /// Explicit URL, bypasses synthesis entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Declared verb; `GET` when omitted.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

impl EndpointDescriptor {
    /// Creates a controller-based descriptor with no declared verb.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            controller: Some(controller.into()),
            action: action.into(),
            url: None,
            method: None,
        }
    }

    /// Creates a descriptor that always resolves to `url`.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            service: String::new(),
            controller: None,
            action: String::new(),
            url: Some(url.into()),
            method: None,
        }
    }

    /// Sets the declared verb.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Returns the verb used to dispatch this endpoint.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }
}

/// Builds the request path for `descriptor`.
///
/// An explicit `url` is returned verbatim. Otherwise the path is
/// `service/api/controller/action/append...` with empty segments dropped,
/// followed by `?sort_query` when a non-empty sort fragment is given.
///
/// # Errors
///
/// Returns [`DomainError::MissingController`] when the descriptor has
/// neither a URL nor a controller.
pub fn synthesize_url<S: AsRef<str>>(
    descriptor: &EndpointDescriptor,
    append: &[S],
    sort_query: Option<&str>,
) -> DomainResult<String> {
    if let Some(url) = descriptor.url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(url.to_string());
    }

    let Some(controller) = descriptor.controller.as_deref().filter(|c| !c.is_empty()) else {
        return Err(DomainError::MissingController {
            service: descriptor.service.clone(),
            action: descriptor.action.clone(),
        });
    };

    let head = [
        descriptor.service.as_str(),
        API_SEGMENT,
        controller,
        descriptor.action.as_str(),
    ];
    let mut path = head
        .into_iter()
        .chain(append.iter().map(|segment| segment.as_ref()))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if let Some(sort) = sort_query.filter(|s| !s.is_empty()) {
        path.push('?');
        path.push_str(sort);
    }

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_APPEND: &[&str] = &[];

    #[test]
    fn test_explicit_url_wins() {
        let mut descriptor = EndpointDescriptor::new("a", "b", "c");
        descriptor.url = Some("https://cdn.example.com/x".to_string());
        let url = synthesize_url(&descriptor, &["d"], Some("sort=x,asc")).unwrap();
        assert_eq!(url, "https://cdn.example.com/x");
    }

    #[test]
    fn test_explicit_url_without_controller() {
        let descriptor = EndpointDescriptor::from_url("/health");
        assert_eq!(synthesize_url(&descriptor, NO_APPEND, None).unwrap(), "/health");
    }

    #[test]
    fn test_joins_segments() {
        let descriptor = EndpointDescriptor::new("a", "b", "c");
        assert_eq!(synthesize_url(&descriptor, &["d"], None).unwrap(), "a/api/b/c/d");
    }

    #[test]
    fn test_drops_empty_segments() {
        let descriptor = EndpointDescriptor::new("", "ctl", "");
        let url = synthesize_url(&descriptor, &["", "7", ""], None).unwrap();
        assert_eq!(url, "api/ctl/7");
    }

    #[test]
    fn test_appends_sort_fragment() {
        let descriptor = EndpointDescriptor::new("svc", "ctl", "list");
        let url = synthesize_url(&descriptor, NO_APPEND, Some("sort=name,asc")).unwrap();
        assert_eq!(url, "svc/api/ctl/list?sort=name,asc");
    }

    #[test]
    fn test_empty_sort_fragment_is_ignored() {
        let descriptor = EndpointDescriptor::new("svc", "ctl", "list");
        let url = synthesize_url(&descriptor, NO_APPEND, Some("")).unwrap();
        assert_eq!(url, "svc/api/ctl/list");
    }

    #[test]
    fn test_missing_controller_is_configuration_error() {
        let mut descriptor = EndpointDescriptor::new("svc", "", "list");
        let err = synthesize_url(&descriptor, NO_APPEND, None).unwrap_err();
        assert!(matches!(err, DomainError::MissingController { .. }));

        descriptor.controller = None;
        descriptor.url = Some(String::new());
        assert!(synthesize_url(&descriptor, NO_APPEND, None).is_err());
    }

    #[test]
    fn test_method_defaults_to_get() {
        let descriptor = EndpointDescriptor::new("a", "b", "c");
        assert_eq!(descriptor.method(), HttpMethod::Get);
        assert_eq!(
            descriptor.with_method(HttpMethod::Post).method(),
            HttpMethod::Post
        );
    }

    #[test]
    fn test_descriptor_deserializes_type_field() {
        let json = r#"{"service":"file-service","controller":"fileUploadController","action":"upload","type":"POST"}"#;
        let descriptor: EndpointDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.method, Some(HttpMethod::Post));
        assert_eq!(descriptor.url, None);
    }
}
