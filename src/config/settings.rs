//! Application settings loaded from `config.toml`.
//!
//! The file is optional. It currently only describes the administrator account
//! seeded on first start; the password for that account is read from the
//! `BOOTSTRAP_ADMIN_PASSWORD` environment variable so it never sits in the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding the settings file location
pub const CONFIG_PATH_ENV: &str = "CARE_RECORDS_CONFIG";

/// Environment variable holding the bootstrap administrator password
pub const BOOTSTRAP_PASSWORD_ENV: &str = "BOOTSTRAP_ADMIN_PASSWORD";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Administrator account created when no user with its username exists
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Profile of the administrator seeded on first start
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdmin {
    /// Login name; seeding is skipped if it already exists
    pub username: String,
    /// Contact address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })
}

/// Loads settings from `$CARE_RECORDS_CONFIG` or `./config.toml`, falling back to
/// defaults when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::info!("No settings file at {path}, using defaults");
        return Ok(Settings::default());
    }
    load_settings(path)
}
