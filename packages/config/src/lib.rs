//! Configuration loading for fastcopy.
//!
//! Copy tunables (worker count, buffer size, progress interval, preallocation)
//! come from a TOML file when one is found, with every missing key falling back
//! to its default.
//!
//! # Example
//!
//! ```rust,ignore
//! use fastcopy_config::load_config;
//!
//! let loaded = load_config(None)?;
//! println!("{} workers", loaded.config.workers);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, discover_config, resolve_config_path};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::{Config, LoadedConfig, MAX_WORKERS};

use std::path::Path;

/// Discover, load and validate the configuration.
///
/// # Arguments
///
/// * `explicit` - Config path given on the command line, if any
///
/// # Errors
///
/// * If an explicitly requested file does not exist
/// * If the file cannot be read or parsed
/// * If a setting is invalid
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let loaded = match discover_config(explicit)? {
        Some(path) => LoadedConfig {
            config: load_toml_config(&path)?,
            config_path: Some(path),
        },
        None => LoadedConfig::default(),
    };

    loaded.config.validate()?;

    Ok(loaded)
}
