//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port using the reqwest library.
//! It is the only place where reqwest errors exist; every failure leaves
//! here as a `TransportFailure`.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::trace;

use courier_application::ports::{Transport, TransportRequest};
use courier_domain::{ClientSettings, HttpMethod, TransportFailure};

const JSON: &str = "application/json";

/// Errors raised while setting up the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportSetupError {
    /// The base URL could not be parsed.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP transport backed by `reqwest::Client`.
///
/// Content negotiation (`application/json` for both `Content-Type` and
/// `Accept`) and the timeout are fixed when the client is built.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Creates a transport for `settings.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportSetupError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));

        let client = Client::builder()
            .user_agent(concat!("Courier/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Self::with_client(client, &settings.base_url)
    }

    /// Creates a transport from a preconfigured reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, TransportSetupError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Joins `path` to the base URL and appends `query`.
    ///
    /// Absolute paths are used unchanged. A path that already carries a
    /// query (the sort fragment) gets `&query` instead of `?query`.
    fn resolve_url(&self, path: &str, query: Option<&str>) -> Result<Url, url::ParseError> {
        let mut full = match Url::parse(path) {
            Ok(absolute) if matches!(absolute.scheme(), "http" | "https") => absolute.to_string(),
            _ => format!(
                "{}/{}",
                self.base_url.as_str().trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
        };

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            full.push(if full.contains('?') { '&' } else { '?' });
            full.push_str(query);
        }

        Url::parse(&full)
    }
}

/// Decodes a response body: JSON when possible, otherwise a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Renders an error with its source chain.
fn error_chain(error: &dyn StdError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

fn no_request(error: &dyn StdError) -> TransportFailure {
    TransportFailure::NoRequest {
        message: error.to_string(),
        detail: error_chain(error),
    }
}

fn no_response(error: &reqwest::Error) -> TransportFailure {
    TransportFailure::NoResponse {
        message: error_chain(error),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        let url = self
            .resolve_url(&request.url, request.query.as_deref())
            .map_err(|e| no_request(&e))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let prepared = builder.build().map_err(|e| no_request(&e))?;

        trace!(url = %prepared.url(), "executing request");
        let response = self
            .client
            .execute(prepared)
            .await
            .map_err(|e| no_response(&e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| no_response(&e))?;
        let body = decode_body(&bytes);

        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportFailure::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&ClientSettings {
            base_url: "http://localhost:8080/gateway/".to_string(),
            ..ClientSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let url = transport()
            .resolve_url("svc/api/ctl/list", Some("page=0&size=10"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/gateway/svc/api/ctl/list?page=0&size=10"
        );
    }

    #[test]
    fn test_resolve_path_with_sort_query() {
        let url = transport()
            .resolve_url("/svc/api/ctl/list?sort=name,asc", Some("page=1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/gateway/svc/api/ctl/list?sort=name,asc&page=1"
        );
    }

    #[test]
    fn test_resolve_absolute_url() {
        let url = transport()
            .resolve_url("https://files.example.com/view/1", None)
            .unwrap();
        assert_eq!(url.as_str(), "https://files.example.com/view/1");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ReqwestTransport::with_client(Client::new(), "not a url");
        assert!(matches!(
            result,
            Err(TransportSetupError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
    }
}
