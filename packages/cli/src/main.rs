//! fastcopy CLI entry point.
//!
//! Copies a single large file into a directory with parallel chunked I/O.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::env;

use clap::Parser;

use args::Args;
use fastcopy_config::{Config, load_config};
use fastcopy_copy::{
    CopyError, CopyOptions, CopySummary, copy_file_fast_with_progress, destination_path,
};
use progress::ProgressManager;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<CopySummary, Box<dyn std::error::Error>> {
    let loaded = load_config(args.config.as_deref())?;
    if let Some(path) = &loaded.config_path {
        log::debug!("Loaded config from {}", path.display());
    }

    let mut config = loaded.config;
    args.apply_overrides(&mut config);
    config.validate()?;
    let options = copy_options(&config);

    let target = destination_path(&args.source, &args.destination)?;
    output::print_plan(&args.source, &target, options.workers);

    let progress_mgr = ProgressManager::new(args.should_show_progress());
    let label = target
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().to_string());
    let bar = progress_mgr.create_byte_bar(&label);
    let render_bar = bar.clone();

    let result = copy_file_fast_with_progress(&args.source, &args.destination, &options, move |p| {
        ProgressManager::render(&render_bar, p);
    });

    match result {
        Ok(summary) => {
            bar.finish();
            output::print_success(&summary);
            Ok(summary)
        }
        Err(e) => {
            bar.abandon();
            if matches!(e, CopyError::ChunkIo { .. }) {
                output::print_warning(&format!(
                    "Partial output left at {}",
                    target.display()
                ));
            }
            Err(e.into())
        }
    }
}

/// Translate loaded settings into engine options.
const fn copy_options(config: &Config) -> CopyOptions {
    CopyOptions {
        workers: config.workers,
        buffer_size: config.buffer_size,
        progress_interval: config.progress_interval(),
        preallocate: config.preallocate,
    }
}
