//! Configuration types for fastcopy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest accepted worker count.
pub const MAX_WORKERS: usize = 1024;

const fn default_workers() -> usize {
    4
}

const fn default_buffer_size() -> usize {
    4 * 1024 * 1024
}

const fn default_progress_interval_ms() -> u64 {
    1000
}

const fn default_preallocate() -> bool {
    true
}

/// Copy tuning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Number of parallel workers.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-worker buffer size in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Milliseconds between progress updates.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Size the destination file before copying.
    #[serde(default = "default_preallocate")]
    pub preallocate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            buffer_size: default_buffer_size(),
            progress_interval_ms: default_progress_interval_ms(),
            preallocate: default_preallocate(),
        }
    }
}

impl Config {
    /// Progress interval as a [`Duration`].
    #[must_use]
    pub const fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Reject settings that would make a copy impossible.
    ///
    /// # Errors
    ///
    /// * If `workers` is zero or above [`MAX_WORKERS`]
    /// * If `buffer_size` or `progress_interval_ms` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                message: format!("must be between 1 and {MAX_WORKERS}"),
            });
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bufferSize",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.progress_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "progressIntervalMs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// A loaded configuration with metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// File the configuration came from, `None` for built-in defaults.
    pub config_path: Option<PathBuf>,
}
