//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building a request.
///
/// These are static misconfigurations. They are returned synchronously to
/// the caller and never travel through a result channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The endpoint has neither an explicit URL nor a controller.
    #[error("server configuration error: endpoint `{service}/{action}` has no controller, check its descriptor")]
    MissingController {
        /// Service the descriptor belongs to.
        service: String,
        /// Action the descriptor names.
        action: String,
    },

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A settings value is out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A sort expression could not be parsed.
    #[error("invalid sort expression: {0}")]
    InvalidSort(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
