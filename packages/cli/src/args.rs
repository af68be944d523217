//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use fastcopy_config::Config;

/// CLI arguments for fastcopy.
#[derive(Debug, Parser)]
#[command(
    name = "fastcopy",
    about = "Copy a large file using parallel chunked I/O",
    version
)]
pub struct Args {
    /// File to copy.
    #[arg(index = 1)]
    pub source: PathBuf,

    /// Directory to place the copy in.
    #[arg(index = 2)]
    pub destination: PathBuf,

    /// Number of parallel workers [default: 4].
    #[arg(index = 3, value_parser = parse_positive::<usize>)]
    pub workers: Option<usize>,

    /// Per-worker buffer size in bytes.
    #[arg(long, value_parser = parse_positive::<usize>)]
    pub buffer_size: Option<usize>,

    /// Milliseconds between progress updates.
    #[arg(long = "interval-ms", value_parser = parse_positive::<u64>)]
    pub interval_ms: Option<u64>,

    /// Config file to load instead of the discovered one.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Don't size the destination file before copying.
    #[arg(long = "no-preallocate")]
    pub no_preallocate: bool,

    /// Disable the progress bar (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Overlay command-line settings onto a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(buffer_size) = self.buffer_size {
            config.buffer_size = buffer_size;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.progress_interval_ms = interval_ms;
        }
        if self.no_preallocate {
            config.preallocate = false;
        }
    }

    /// Determine if we should show the progress bar.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

/// Parse a strictly positive integer.
fn parse_positive<T>(value: &str) -> Result<T, String>
where
    T: FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(format!("`{value}` is not a positive integer")),
    }
}
