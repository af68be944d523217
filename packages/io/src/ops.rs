//! Full-buffer read and write helpers on top of the capability traits.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::ErrorKind;

use crate::error::OffsetIoError;
use crate::positional::{PositionalRead, PositionalWrite};

/// Read up to `buf.len()` bytes from `handle` starting at `offset`.
///
/// Partial reads are continued until the buffer is full or the handle reports
/// end-of-file. Reaching end-of-file is not an error: it shows up as a count
/// smaller than `buf.len()`, possibly zero.
///
/// # Arguments
///
/// * `handle` - Source handle, shared freely between threads
/// * `buf` - Destination buffer
/// * `offset` - Absolute offset of the first byte to read
///
/// # Errors
///
/// * If the platform read fails with anything other than an interruption
pub fn read_at<R>(handle: &R, buf: &mut [u8], offset: u64) -> Result<usize, OffsetIoError>
where
    R: PositionalRead + ?Sized,
{
    let mut filled = 0;

    while filled < buf.len() {
        let at = offset + filled as u64;
        match handle.pread(&mut buf[filled..], at) {
            Ok(0) => {
                log::trace!("End of file at offset {at}");
                break;
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(OffsetIoError::Read { offset: at, source: e }),
        }
    }

    Ok(filled)
}

/// Write all of `buf` to `handle` starting at `offset`.
///
/// Returns `buf.len()` on success. A handle that stops accepting bytes before
/// the buffer is exhausted produces [`OffsetIoError::ShortWrite`].
///
/// # Arguments
///
/// * `handle` - Destination handle, shared freely between threads
/// * `buf` - Bytes to write
/// * `offset` - Absolute offset of the first byte to write
///
/// # Errors
///
/// * If the platform write fails with anything other than an interruption
/// * If the handle accepts zero bytes while data remains
pub fn write_at<W>(handle: &W, buf: &[u8], offset: u64) -> Result<usize, OffsetIoError>
where
    W: PositionalWrite + ?Sized,
{
    let mut written = 0;

    while written < buf.len() {
        let at = offset + written as u64;
        match handle.pwrite(&buf[written..], at) {
            Ok(0) => {
                return Err(OffsetIoError::ShortWrite {
                    offset,
                    written,
                    expected: buf.len(),
                });
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(OffsetIoError::Write { offset: at, source: e }),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory handle that serves at most `max_step` bytes per call and
    /// fails the first `interrupts` calls with `Interrupted`.
    struct Trickle {
        data: Mutex<Vec<u8>>,
        max_step: usize,
        interrupts: Mutex<usize>,
    }

    impl Trickle {
        fn new(data: Vec<u8>, max_step: usize, interrupts: usize) -> Self {
            Self {
                data: Mutex::new(data),
                max_step,
                interrupts: Mutex::new(interrupts),
            }
        }

        fn interrupted(&self) -> bool {
            let mut left = self.interrupts.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                true
            } else {
                false
            }
        }
    }

    impl PositionalRead for Trickle {
        fn pread(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
            if self.interrupted() {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            let data = self.data.lock().unwrap();
            let start = usize::try_from(offset).unwrap().min(data.len());
            let n = buf.len().min(self.max_step).min(data.len() - start);
            buf[..n].copy_from_slice(&data[start..start + n]);
            Ok(n)
        }
    }

    impl PositionalWrite for Trickle {
        fn pwrite(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
            if self.interrupted() {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            let mut data = self.data.lock().unwrap();
            let start = usize::try_from(offset).unwrap();
            let n = buf.len().min(self.max_step);
            if data.len() < start + n {
                data.resize(start + n, 0);
            }
            data[start..start + n].copy_from_slice(&buf[..n]);
            Ok(n)
        }
    }

    /// Handle that never accepts bytes.
    struct Full;

    impl PositionalWrite for Full {
        fn pwrite(&self, _buf: &[u8], _offset: u64) -> io::Result<usize> {
            Ok(0)
        }
    }

    /// Handle whose every call fails.
    struct Broken;

    impl PositionalRead for Broken {
        fn pread(&self, _buf: &mut [u8], _offset: u64) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    impl PositionalWrite for Broken {
        fn pwrite(&self, _buf: &[u8], _offset: u64) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_at_continues_partial_reads() {
        let handle = Trickle::new((0..100u8).collect(), 7, 2);
        let mut buf = [0u8; 40];

        let n = read_at(&handle, &mut buf, 10).unwrap();

        assert_eq!(n, 40);
        assert_eq!(buf.to_vec(), (10..50u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_read_at_short_at_end_of_file() {
        let handle = Trickle::new(b"hello".to_vec(), 2, 0);
        let mut buf = [0u8; 16];

        assert_eq!(read_at(&handle, &mut buf, 3).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
        assert_eq!(read_at(&handle, &mut buf, 5).unwrap(), 0);
        assert_eq!(read_at(&handle, &mut buf, 99).unwrap(), 0);
    }

    #[test]
    fn test_read_at_reports_offset_of_failure() {
        let mut buf = [0u8; 4];
        let err = read_at(&Broken, &mut buf, 4096).unwrap_err();

        assert!(matches!(err, OffsetIoError::Read { offset: 4096, .. }));
        assert_eq!(err.offset(), 4096);
    }

    #[test]
    fn test_write_at_continues_partial_writes() {
        let handle = Trickle::new(Vec::new(), 3, 1);

        let n = write_at(&handle, b"abcdefghij", 5).unwrap();

        assert_eq!(n, 10);
        let data = handle.data.lock().unwrap();
        assert_eq!(&data[5..], b"abcdefghij");
        assert_eq!(&data[..5], &[0u8; 5]);
    }

    #[test]
    fn test_write_at_zero_progress_is_short_write() {
        let err = write_at(&Full, b"abc", 8).unwrap_err();

        assert!(matches!(
            err,
            OffsetIoError::ShortWrite {
                offset: 8,
                written: 0,
                expected: 3,
            }
        ));
    }

    #[test]
    fn test_write_at_platform_error() {
        let err = write_at(&Broken, b"abc", 0).unwrap_err();
        assert!(matches!(err, OffsetIoError::Write { offset: 0, .. }));
    }

    #[test]
    fn test_empty_buffers_are_noops() {
        assert_eq!(read_at(&Broken, &mut [], 0).unwrap(), 0);
        assert_eq!(write_at(&Broken, &[], 0).unwrap(), 0);
    }

    #[test]
    fn test_file_round_trip_at_offsets() {
        let dir = TempDir::new().unwrap();
        let src_path = dir.path().join("src.bin");
        let dst_path = dir.path().join("dst.bin");
        fs::write(&src_path, b"the quick brown fox").unwrap();

        let src = File::open(&src_path).unwrap();
        let dst = File::create(&dst_path).unwrap();
        let mut buf = [0u8; 8];

        // Copy the tail first to exercise writes past the current end.
        let n = read_at(&src, &mut buf, 16).unwrap();
        assert_eq!(n, 3);
        write_at(&dst, &buf[..n], 16).unwrap();

        let mut offset = 0;
        while offset < 16 {
            let n = read_at(&src, &mut buf, offset).unwrap();
            write_at(&dst, &buf[..n], offset).unwrap();
            offset += n as u64;
        }

        assert_eq!(fs::read(&dst_path).unwrap(), b"the quick brown fox");
    }
}
