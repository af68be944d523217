//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use fastcopy_copy::CopyProgress;
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar manager for a single-file copy.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a byte progress bar drawn on stdout.
    ///
    /// The length is filled in by the first [`render`](Self::render) call.
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_byte_bar(&self, label: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:<30} [{bar:25.green/dim}] {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        pb.set_prefix(label.to_string());
        pb
    }

    /// Push a progress snapshot into the bar.
    pub fn render(bar: &ProgressBar, progress: &CopyProgress) {
        bar.set_length(progress.bytes_total);
        bar.set_position(progress.bytes_copied);
        bar.set_message(format_status(progress));
    }
}

/// Status text shown next to the bar: percentage, bytes and throughput.
#[must_use]
pub fn format_status(progress: &CopyProgress) -> String {
    let mut status = format!(
        "{:>3}% {}/{}",
        progress.percent(),
        HumanBytes(progress.bytes_copied),
        HumanBytes(progress.bytes_total)
    );

    if let Some(rate) = progress.bytes_per_sec {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rate = rate as u64;
        status.push_str(&format!(" {}/s", HumanBytes(rate)));
    }

    status
}
