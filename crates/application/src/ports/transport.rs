//! Transport port

use async_trait::async_trait;
use serde_json::Value;

use courier_domain::{HttpMethod, Payload, TransportFailure};

use crate::headers::Headers;

/// A fully resolved request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Verb to send.
    pub method: HttpMethod,
    /// Synthesized path (relative to the base URL) or an explicit URL.
    pub url: String,
    /// Headers composed for this call.
    pub headers: Headers,
    /// JSON body, present for write-style verbs.
    pub body: Option<Payload>,
    /// Encoded query string without the leading `?`.
    pub query: Option<String>,
}

/// Port for the HTTP client.
///
/// Implementations classify every failure into a [`TransportFailure`] at
/// this boundary; nothing downstream inspects client-specific errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns the failure shape when the request could not be built, got
    /// no response, or got a non-success status.
    async fn request(&self, request: TransportRequest) -> Result<Value, TransportFailure>;
}
