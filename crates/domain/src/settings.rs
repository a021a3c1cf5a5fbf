//! Client Settings Domain Model
//!
//! Defines the configuration consumed by the request pipeline.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// User-facing texts shown by the error classifier and loading indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown when a request could not even be constructed.
    pub system_error: String,
    /// Shown on HTTP 500.
    pub server_error: String,
    /// Carried by errors for requests that got no response.
    pub network_error: String,
    /// Default message of every error that carries a response.
    pub server_side_error: String,
    /// Body of the session-expired dialog.
    pub session_expired: String,
    /// Title of the session-expired dialog.
    pub session_expired_title: String,
    /// Label of the dialog's acknowledgement button.
    pub confirm_text: String,
    /// Text of the blocking loading indicator.
    pub loading: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            system_error: "System error, please try again later.".to_string(),
            server_error: "Server error, please try again later.".to_string(),
            network_error: "Unable to reach the server, please check the server status."
                .to_string(),
            server_side_error: "The server could not process the request.".to_string(),
            session_expired: "Your session has expired, please log in again.".to_string(),
            session_expired_title: "Notice".to_string(),
            confirm_text: "OK".to_string(),
            loading: "Processing, please wait...".to_string(),
        }
    }
}

/// Settings of one pipeline instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL every relative request path is joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Storage key under which the auth token is kept.
    #[serde(default = "default_auth_storage_key")]
    pub auth_storage_key: String,

    /// Header carrying the auth token.
    #[serde(default = "default_auth_header")]
    pub auth_header: String,

    /// Route opened after the session-expired dialog is acknowledged.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Delay before a loading indicator is dismissed.
    #[serde(default = "default_loading_dismiss_delay_ms")]
    pub loading_dismiss_delay_ms: u64,

    /// User-facing texts.
    #[serde(default)]
    pub messages: Messages,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_auth_storage_key() -> String {
    "userToken".to_string()
}

fn default_auth_header() -> String {
    "X-UserToken".to_string()
}

fn default_login_path() -> String {
    "/".to_string()
}

const fn default_loading_dismiss_delay_ms() -> u64 {
    500
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            auth_storage_key: default_auth_storage_key(),
            auth_header: default_auth_header(),
            login_path: default_login_path(),
            loading_dismiss_delay_ms: default_loading_dismiss_delay_ms(),
            messages: Messages::default(),
        }
    }
}

impl ClientSettings {
    /// Checks that the settings describe a usable pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSettings`] for a base URL that is not an
    /// absolute http(s) URL, a zero timeout, or an empty auth header name.
    pub fn validate(&self) -> DomainResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidSettings(format!("base_url `{}`: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidSettings(format!(
                "base_url `{}` must use http or https",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(DomainError::InvalidSettings(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.auth_header.trim().is_empty() {
            return Err(DomainError::InvalidSettings(
                "auth_header must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
