//! Transport failures and the normalized error surfaced to callers
//!
//! A failed call is described once, at the transport boundary, as a
//! [`TransportFailure`]. The error classifier turns it into a
//! [`NormalizedError`], the only error shape callers ever see.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shape of a failed transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request was never sent: it could not be constructed.
    NoRequest {
        /// Description of the construction fault.
        message: String,
        /// Diagnostic trail (error source chain).
        detail: String,
    },
    /// The request was sent but no response arrived.
    NoResponse {
        /// Description of the connectivity fault.
        message: String,
    },
    /// The server answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, JSON when it parsed as JSON.
        body: Value,
    },
}

impl TransportFailure {
    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure categories, keyed by the shape and status of the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request built but never sent.
    System,
    /// Request sent, no response.
    Network,
    /// HTTP 400 with structured field errors.
    Validation,
    /// HTTP 403, the session has expired.
    AuthExpired,
    /// HTTP 500 and every unclassified status.
    Server,
}

impl ErrorCategory {
    /// Classifies a transport failure.
    #[must_use]
    pub const fn of(failure: &TransportFailure) -> Self {
        match failure {
            TransportFailure::NoRequest { .. } => Self::System,
            TransportFailure::NoResponse { .. } => Self::Network,
            TransportFailure::Http { status: 400, .. } => Self::Validation,
            TransportFailure::Http { status: 403, .. } => Self::AuthExpired,
            TransportFailure::Http { .. } => Self::Server,
        }
    }

    /// Returns the category name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Network => "network",
            Self::Validation => "validation",
            Self::AuthExpired => "auth_expired",
            Self::Server => "server",
        }
    }
}

/// The stable error record delivered to callers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("{msg}")]
pub struct NormalizedError {
    /// User-facing message; empty for validation failures.
    pub msg: String,
    /// Extra detail: joined field errors, or a diagnostic trail.
    pub params: String,
    /// Raw response body, `null` when no response arrived.
    pub data: Value,
}

impl NormalizedError {
    /// Creates an error with only a message.
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            params: String::new(),
            data: Value::Null,
        }
    }

    /// Attaches the raw response body.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Attaches detail parameters.
    #[must_use]
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }
}
