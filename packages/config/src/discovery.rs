//! Configuration file discovery.
//!
//! Looks for a config file in this order: an explicit path, the
//! `FASTCOPY_CONFIG` environment variable, then the user config directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "FASTCOPY_CONFIG";

/// Config file name inside the user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Find the config file to use.
///
/// Returns `None` when no config file applies and defaults should be used.
///
/// # Arguments
///
/// * `explicit` - Path given on the command line, if any
///
/// # Errors
///
/// * If an explicit or environment-provided path does not exist
pub fn discover_config(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    resolve_config_path(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR),
        dirs::config_dir(),
    )
}

/// Pick a config path from the candidate sources.
///
/// Paths that were asked for explicitly must exist. The user config directory
/// is only used when its file is present.
///
/// # Errors
///
/// * If an explicit or environment-provided path does not exist
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    user_config_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>, ConfigError> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from));

    if let Some(path) = requested {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        log::debug!("Using config {}", path.display());
        return Ok(Some(path));
    }

    let default = user_config_dir
        .map(|dir| dir.join("fastcopy").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file());

    match &default {
        Some(path) => log::debug!("Using config {}", path.display()),
        None => log::debug!("No config file found, using defaults"),
    }

    Ok(default)
}
