//! Error types for offset I/O.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur during an offset read or write.
#[derive(Debug, Error)]
pub enum OffsetIoError {
    /// The platform read failed.
    #[error("Read failed at offset {offset}: {source}")]
    Read {
        /// Absolute offset of the failed read.
        offset: u64,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The platform write failed.
    #[error("Write failed at offset {offset}: {source}")]
    Write {
        /// Absolute offset of the failed write.
        offset: u64,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The handle stopped accepting bytes before the whole buffer was written.
    #[error("Short write at offset {offset}: wrote {written} of {expected} bytes")]
    ShortWrite {
        /// Absolute offset the write started at.
        offset: u64,
        /// Bytes written before the handle stalled.
        written: usize,
        /// Bytes requested.
        expected: usize,
    },
}

impl OffsetIoError {
    /// Offset the failing operation started at.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        match self {
            Self::Read { offset, .. }
            | Self::Write { offset, .. }
            | Self::ShortWrite { offset, .. } => *offset,
        }
    }
}
