//! Progress tracking for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Whole-number percentage of `copied` over `total`, floored.
///
/// An empty copy is reported as complete.
const fn percent_of(copied: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (copied as u128 * 100) / total as u128;
    if pct >= 100 { 100 } else { pct as u8 }
}

/// Progress information for a copy operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyProgress {
    /// Total number of bytes to copy.
    pub bytes_total: u64,
    /// Number of bytes copied so far.
    pub bytes_copied: u64,
    /// Throughput since the previous report, if measured.
    pub bytes_per_sec: Option<f64>,
}

impl CopyProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(bytes_total: u64, bytes_copied: u64) -> Self {
        Self {
            bytes_total,
            bytes_copied,
            bytes_per_sec: None,
        }
    }

    /// Attach a throughput measurement.
    #[must_use]
    pub const fn with_throughput(mut self, bytes_per_sec: f64) -> Self {
        self.bytes_per_sec = Some(bytes_per_sec);
        self
    }

    /// Progress as a floored percentage (0 to 100).
    #[must_use]
    pub const fn percent(&self) -> u8 {
        percent_of(self.bytes_copied, self.bytes_total)
    }

    /// Whether every byte has been copied.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bytes_copied >= self.bytes_total
    }
}

/// Thread-safe byte counter shared by all workers of one copy.
#[derive(Debug)]
pub struct ProgressTracker {
    bytes_total: u64,
    bytes_copied: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker for a copy of `bytes_total` bytes.
    #[must_use]
    pub fn new(bytes_total: u64) -> Arc<Self> {
        Arc::new(Self {
            bytes_total,
            bytes_copied: AtomicU64::new(0),
        })
    }

    /// Record `bytes` more copied bytes and return the new total.
    pub fn add_copied(&self, bytes: u64) -> u64 {
        self.bytes_copied.fetch_add(bytes, Ordering::SeqCst) + bytes
    }

    /// Get the total byte count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.bytes_total
    }

    /// Get the current copied byte count.
    #[must_use]
    pub fn copied(&self) -> u64 {
        self.bytes_copied.load(Ordering::SeqCst)
    }

    /// Current progress as a floored percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.copied(), self.bytes_total)
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CopyProgress {
        CopyProgress::new(self.bytes_total, self.copied())
    }
}
