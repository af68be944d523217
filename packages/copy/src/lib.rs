//! Chunked parallel single-file copying with progress tracking.
//!
//! A source file is split into one contiguous byte range per worker. Workers
//! copy their ranges concurrently through offset-addressed I/O on a shared
//! pair of file handles, so no file cursor is ever shared.
//!
//! * Range partitioning with [`partition`]
//! * A pool of `rayon` workers draining a sealed [`TaskQueue`]
//! * Lock-free progress counting with [`ProgressTracker`]
//! * Periodic rendering on a background thread with [`ProgressReporter`]
//!
//! # Example
//!
//! ```rust,ignore
//! use fastcopy_copy::{CopyOptions, copy_file_fast_with_progress};
//!
//! copy_file_fast_with_progress(source, dest_dir, &CopyOptions::default(), |p| {
//!     print!("\rCopying... {}%", p.percent());
//! })?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod engine;
mod error;
mod progress;
mod reporter;
mod tasks;

pub use copy::{
    CopyOptions, CopySummary, copy_file_fast, copy_file_fast_with_progress, destination_path,
};
pub use engine::{DEFAULT_BUFFER_SIZE, DEFAULT_WORKERS, MAX_WORKERS, copy_range, run_workers};
pub use error::{ChunkError, CopyError};
pub use progress::{CopyProgress, ProgressTracker};
pub use reporter::ProgressReporter;
pub use tasks::{CopyTask, TaskQueue, partition};
