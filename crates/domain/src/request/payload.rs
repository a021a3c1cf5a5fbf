//! Payload routing between the query string and the request body

use serde_json::{Map, Value};

use super::method::HttpMethod;

/// Flat key/value payload supplied by the caller.
pub type Payload = Map<String, Value>;

/// A payload split by verb into its query or body destination.
///
/// Exactly one side is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedPayload {
    /// Parameters to encode into the query string.
    pub query: Option<Payload>,
    /// JSON body to send.
    pub body: Option<Payload>,
}

/// Splits `data` by verb.
///
/// Read-style verbs receive the filtered payload as query parameters.
/// Every other verb receives the payload verbatim as the body, empty
/// strings included.
#[must_use]
pub fn route(method: HttpMethod, data: Payload) -> RoutedPayload {
    if method.is_read_style() {
        RoutedPayload {
            query: Some(filter_empty(data)),
            body: None,
        }
    } else {
        RoutedPayload {
            query: None,
            body: Some(data),
        }
    }
}

/// Removes keys whose value is empty.
///
/// Empty means the empty string, or an array whose elements are all empty
/// strings (the empty array included). `0`, `false` and `null` are kept.
/// Absent keys need no handling since a JSON map cannot hold them.
#[must_use]
pub fn filter_empty(mut data: Payload) -> Payload {
    data.retain(|_, value| !is_empty_value(value));
    data
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items
            .iter()
            .all(|item| matches!(item, Value::String(s) if s.is_empty())),
        _ => false,
    }
}
