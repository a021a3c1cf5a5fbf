//! File-backed persistence.
//!
//! This module provides:
//! - A JSON key/value file standing in for browser local storage
//! - Settings loading with environment overrides

mod file_storage;
mod settings_repository;

pub use file_storage::{JsonFileStorage, StorageError};
pub use settings_repository::{SettingsError, SettingsLoader};
