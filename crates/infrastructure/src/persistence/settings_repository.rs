//! Client settings loading.
//!
//! Settings are read from a JSON file, by default in the platform-specific
//! config directory:
//! - Linux/macOS: ~/.config/courier/settings.json
//! - Windows: %APPDATA%/courier/settings.json
//!
//! `COURIER_BASE_URL` and `COURIER_TIMEOUT_MS` override the file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use courier_domain::{ClientSettings, DomainError};

use crate::serialization::{SerializationError, from_json_bytes};

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "COURIER_BASE_URL";

/// Environment variable overriding `timeout_ms`.
pub const TIMEOUT_ENV: &str = "COURIER_TIMEOUT_MS";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The loaded settings failed validation.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] DomainError),

    /// An environment override could not be parsed.
    #[error("Invalid value `{value}` for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Loads `ClientSettings` from disk and the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    path: Option<PathBuf>,
}

impl SettingsLoader {
    /// Creates a loader reading the default settings file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Creates a loader reading `path`.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the path to the default settings file.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("courier").join("settings.json"))
    }

    /// Returns the file this loader reads, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings from the file and the process environment.
    ///
    /// Returns defaults (plus overrides) if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed, an override is
    /// malformed, or the result fails validation.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        self.load_with(|name| std::env::var(name).ok()).await
    }

    /// Loads settings, resolving overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`SettingsLoader::load`].
    pub async fn load_with<F>(&self, lookup: F) -> Result<ClientSettings, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = match &self.path {
            Some(path) if fs::try_exists(path).await? => {
                debug!(path = %path.display(), "loading settings");
                from_json_bytes(&fs::read(path).await?)?
            }
            _ => ClientSettings::default(),
        };

        let settings = apply_overrides(settings, lookup)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Applies environment overrides on top of `settings`.
///
/// # Errors
///
/// Returns an error if the timeout override isn't a number.
pub fn apply_overrides<F>(
    mut settings: ClientSettings,
    lookup: F,
) -> Result<ClientSettings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV) {
        settings.base_url = base_url;
    }
    if let Some(raw) = lookup(TIMEOUT_ENV) {
        settings.timeout_ms = raw.trim().parse().map_err(|_| SettingsError::InvalidEnv {
            name: TIMEOUT_ENV,
            value: raw.clone(),
        })?;
    }
    Ok(settings)
}
