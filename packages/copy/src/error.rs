//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use fastcopy_io::OffsetIoError;

/// Errors raised inside a worker while copying one task.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    /// Reading from the source failed.
    #[error("Failed to read source chunk: {0}")]
    Read(#[source] OffsetIoError),

    /// Writing to the destination failed.
    #[error("Failed to write destination chunk: {0}")]
    Write(#[source] OffsetIoError),

    /// The source ended before the recorded file size was reached.
    #[error("Source ended early at offset {offset} with {remaining} bytes still expected")]
    UnexpectedEof {
        /// Offset where the read returned no data.
        offset: u64,
        /// Bytes of the task that were never copied.
        remaining: u64,
    },
}

/// Errors that can occur during a copy operation.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Worker count must be between one and [`MAX_WORKERS`](crate::MAX_WORKERS).
    #[error("Invalid worker count {0}: must be between 1 and {max}", max = crate::MAX_WORKERS)]
    InvalidWorkerCount(usize),

    /// Buffer size must be at least one byte.
    #[error("Invalid buffer size {0}: must be greater than zero")]
    InvalidBufferSize(usize),

    /// Failed to open the source file.
    #[error("Failed to open source file {}: {io_error}", path.display())]
    SourceOpenError {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to determine the source file size.
    #[error("Failed to get source file info for {}: {io_error}", path.display())]
    StatError {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Source exists but is not a regular file.
    #[error("Source {} is not a regular file", .0.display())]
    SourceNotAFile(PathBuf),

    /// Source path has no file name to reuse for the destination.
    #[error("Source path {} has no file name", .0.display())]
    InvalidSourceName(PathBuf),

    /// Destination resolves to the source file itself.
    #[error("Destination {} is the source file", .0.display())]
    SameFile(PathBuf),

    /// Failed to create the destination file.
    #[error("Failed to create destination file {}: {io_error}", path.display())]
    DestinationCreateError {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// The worker thread pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPoolError(String),

    /// The progress reporting thread could not be started.
    #[error("Failed to start progress reporter: {0}")]
    ReporterError(#[source] std::io::Error),

    /// One or more workers failed while copying their range.
    #[error("Copy failed in {failed_workers} worker(s): {source}")]
    ChunkIo {
        /// Number of workers that reported an error.
        failed_workers: usize,
        /// Error from the lowest-numbered failing worker.
        #[source]
        source: ChunkError,
    },
}
