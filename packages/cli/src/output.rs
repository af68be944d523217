//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use fastcopy_copy::CopySummary;
use indicatif::HumanBytes;

/// Print what is about to be copied.
pub fn print_plan(source: &Path, target: &Path, workers: usize) {
    println!(
        "Copying {} -> {} with {} worker{}",
        source.display().to_string().cyan(),
        target.display().to_string().cyan(),
        workers,
        if workers == 1 { "" } else { "s" }
    );
}

/// Print success message.
pub fn print_success(summary: &CopySummary) {
    let secs = summary.elapsed.as_secs_f64();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rate = if secs > 0.0 {
        (summary.bytes_copied as f64 / secs) as u64
    } else {
        summary.bytes_copied
    };

    println!(
        "{} Copy complete! {} in {:.2}s ({}/s)",
        "✅",
        HumanBytes(summary.bytes_copied),
        secs,
        HumanBytes(rate)
    );
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
