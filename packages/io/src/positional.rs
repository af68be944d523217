//! Capability traits for positioned reads and writes.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io;

/// A handle that can be read at an absolute offset.
///
/// Implementations must not depend on a shared cursor: two threads calling
/// [`pread`](Self::pread) on the same handle with different offsets must each
/// see the bytes at their own offset.
pub trait PositionalRead: Sync {
    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read. `0` means end-of-file.
    ///
    /// # Errors
    ///
    /// * If the platform read fails
    fn pread(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// A handle that can be written at an absolute offset.
pub trait PositionalWrite: Sync {
    /// Write up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes accepted, which may be fewer than requested.
    ///
    /// # Errors
    ///
    /// * If the platform write fails
    fn pwrite(&self, buf: &[u8], offset: u64) -> io::Result<usize>;
}

#[cfg(unix)]
impl PositionalRead for File {
    fn pread(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }
}

#[cfg(unix)]
impl PositionalWrite for File {
    fn pwrite(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }
}

// seek_read/seek_write move the handle cursor on Windows, but each call carries
// its own offset so concurrent callers never observe it.
#[cfg(windows)]
impl PositionalRead for File {
    fn pread(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

#[cfg(windows)]
impl PositionalWrite for File {
    fn pwrite(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }
}
