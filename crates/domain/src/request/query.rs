//! Query string encoding

use serde_json::Value;

use super::payload::Payload;
use crate::error::{DomainError, DomainResult};

/// Encodes query parameters as `application/x-www-form-urlencoded`.
///
/// - arrays repeat the key: `id=1&id=2`
/// - `null` values are skipped
/// - nested objects use dotted keys: `filter.name=x`
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if the pairs cannot be encoded.
pub fn encode_query(params: &Payload) -> DomainResult<String> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key, value, &mut pairs);
    }
    serde_urlencoded::to_string(&pairs).map_err(|e| DomainError::InvalidUrl(e.to_string()))
}

fn flatten(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key.to_string(), b.to_string())),
        Value::Number(n) => pairs.push((key.to_string(), n.to_string())),
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten(key, item, pairs);
            }
        }
        Value::Object(fields) => {
            for (field, nested) in fields {
                flatten(&format!("{key}.{field}"), nested, pairs);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encode(value: Value) -> String {
        encode_query(value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_arrays_repeat_the_key() {
        assert_eq!(encode(json!({"id": [1, 2, 3]})), "id=1&id=2&id=3");
    }

    #[test]
    fn test_nulls_are_skipped() {
        assert_eq!(encode(json!({"a": null, "b": 1, "c": [null, "x"]})), "b=1&c=x");
    }

    #[test]
    fn test_nested_objects_use_dots() {
        assert_eq!(
            encode(json!({"filter": {"name": "bob", "range": {"min": 1}}})),
            "filter.name=bob&filter.range.min=1"
        );
    }

    #[test]
    fn test_scalars_and_escaping() {
        assert_eq!(
            encode(json!({"active": false, "page": 0, "q": "a&b c"})),
            "active=false&page=0&q=a%26b+c"
        );
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(encode(json!({})), "");
    }
}
