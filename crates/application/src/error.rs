//! Application error types

use courier_domain::DomainError;
use thiserror::Error;

/// Errors returned synchronously by [`crate::Dispatcher::send`].
///
/// Transport faults are never reported here; they travel through the
/// call's result channel.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The request could not be built from its options.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// No async runtime is available to run the call.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
