//! Single-file chunked copy: opens the files and wires the engine together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File, Metadata};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::engine::{DEFAULT_BUFFER_SIZE, DEFAULT_WORKERS, MAX_WORKERS, run_workers};
use crate::error::CopyError;
use crate::progress::{CopyProgress, ProgressTracker};
use crate::reporter::ProgressReporter;
use crate::tasks::partition;

/// Tunables for a single copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Number of parallel workers (and byte ranges).
    pub workers: usize,
    /// Per-worker scratch buffer size in bytes.
    pub buffer_size: usize,
    /// Time between progress renders.
    pub progress_interval: Duration,
    /// Size the destination up front before copying.
    pub preallocate: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            progress_interval: Duration::from_secs(1),
            preallocate: true,
        }
    }
}

impl CopyOptions {
    /// Check the options before any file is touched.
    ///
    /// # Errors
    ///
    /// * If `workers` is zero or above [`MAX_WORKERS`]
    /// * If `buffer_size` is zero
    pub fn validate(&self) -> Result<(), CopyError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(CopyError::InvalidWorkerCount(self.workers));
        }
        if self.buffer_size == 0 {
            return Err(CopyError::InvalidBufferSize(self.buffer_size));
        }
        Ok(())
    }
}

/// Result of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySummary {
    /// Path of the written file.
    pub destination: PathBuf,
    /// Bytes copied; always the source size.
    pub bytes_copied: u64,
    /// Number of workers used.
    pub workers: usize,
    /// Wall-clock time spent copying.
    pub elapsed: Duration,
}

/// Copy `source` into `dest_dir` using parallel offset I/O.
///
/// The destination keeps the source's file name and is overwritten if it
/// exists.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `dest_dir` - Directory to place the copy in
/// * `options` - Worker count, buffer size and progress settings
///
/// # Errors
///
/// * If the options are invalid
/// * If the source cannot be opened or inspected
/// * If the destination cannot be created
/// * If any worker fails
pub fn copy_file_fast(
    source: &Path,
    dest_dir: &Path,
    options: &CopyOptions,
) -> Result<CopySummary, CopyError> {
    copy_file_fast_with_progress(source, dest_dir, options, |_| {})
}

/// Copy `source` into `dest_dir`, rendering progress periodically.
///
/// `on_progress` runs on a background thread every
/// [`CopyOptions::progress_interval`] and once more after the last worker has
/// finished. A partially written destination is left in place on failure.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `dest_dir` - Directory to place the copy in
/// * `options` - Worker count, buffer size and progress settings
/// * `on_progress` - Callback for progress updates
///
/// # Errors
///
/// * If the options are invalid
/// * If the source cannot be opened or inspected
/// * If the destination cannot be created
/// * If any worker fails
pub fn copy_file_fast_with_progress<F>(
    source: &Path,
    dest_dir: &Path,
    options: &CopyOptions,
    on_progress: F,
) -> Result<CopySummary, CopyError>
where
    F: FnMut(&CopyProgress) + Send + 'static,
{
    options.validate()?;

    let (src, src_metadata) = open_source(source)?;
    let file_size = src_metadata.len();
    log::debug!("Opened {} ({file_size} bytes)", source.display());

    let target = destination_path(source, dest_dir)?;
    ensure_distinct(source, &src_metadata, &target)?;

    let dst = create_destination(&target, file_size, options.preallocate)?;
    log::debug!("Created {}", target.display());

    let tasks = partition(file_size, options.workers)?;
    let tracker = ProgressTracker::new(file_size);
    let reporter =
        ProgressReporter::start(Arc::clone(&tracker), options.progress_interval, on_progress)
            .map_err(CopyError::ReporterError)?;

    let started = Instant::now();
    let result = run_workers(
        &src,
        &dst,
        tasks,
        options.workers,
        options.buffer_size,
        &tracker,
    );
    let elapsed = started.elapsed();

    // Final render happens even when a worker failed.
    reporter.stop();

    let bytes_copied = result?;
    log::debug!(
        "Copied {bytes_copied} bytes to {} in {:.2?}",
        target.display(),
        elapsed
    );

    Ok(CopySummary {
        destination: target,
        bytes_copied,
        workers: options.workers,
        elapsed,
    })
}

/// Path the copy of `source` will be written to inside `dest_dir`.
///
/// # Errors
///
/// * If `source` has no file name component
pub fn destination_path(source: &Path, dest_dir: &Path) -> Result<PathBuf, CopyError> {
    source
        .file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| CopyError::InvalidSourceName(source.to_path_buf()))
}

fn open_source(path: &Path) -> Result<(File, Metadata), CopyError> {
    let file = File::open(path).map_err(|e| CopyError::SourceOpenError {
        path: path.to_path_buf(),
        io_error: e,
    })?;

    let metadata = file.metadata().map_err(|e| CopyError::StatError {
        path: path.to_path_buf(),
        io_error: e,
    })?;

    if !metadata.is_file() {
        return Err(CopyError::SourceNotAFile(path.to_path_buf()));
    }

    Ok((file, metadata))
}

/// Refuse to write over the source: creating the destination would truncate it.
///
/// Symlinks are followed and hard links are caught by comparing file identity.
fn ensure_distinct(
    source: &Path,
    source_metadata: &Metadata,
    target: &Path,
) -> Result<(), CopyError> {
    let Ok(target_metadata) = fs::metadata(target) else {
        return Ok(());
    };

    if is_same_file(source, source_metadata, target, &target_metadata) {
        return Err(CopyError::SameFile(target.to_path_buf()));
    }

    Ok(())
}

#[cfg(unix)]
fn is_same_file(
    _source_path: &Path,
    source: &Metadata,
    _target_path: &Path,
    target: &Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;

    source.dev() == target.dev() && source.ino() == target.ino()
}

#[cfg(not(unix))]
fn is_same_file(
    source_path: &Path,
    _source: &Metadata,
    target_path: &Path,
    _target: &Metadata,
) -> bool {
    matches!(
        (fs::canonicalize(source_path), fs::canonicalize(target_path)),
        (Ok(a), Ok(b)) if a == b
    )
}

fn create_destination(path: &Path, size: u64, preallocate: bool) -> Result<File, CopyError> {
    let to_error = |e| CopyError::DestinationCreateError {
        path: path.to_path_buf(),
        io_error: e,
    };

    let file = File::create(path).map_err(to_error)?;
    if preallocate {
        file.set_len(size).map_err(to_error)?;
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write_pattern(path: &Path, len: usize) -> Vec<u8> {
        let data: Vec<u8> = (0..len).map(|i| (i * 7 % 253) as u8).collect();
        fs::write(path, &data).unwrap();
        data
    }

    fn small_options(workers: usize) -> CopyOptions {
        CopyOptions {
            workers,
            buffer_size: 1024,
            progress_interval: Duration::from_millis(10),
            preallocate: true,
        }
    }

    #[test]
    fn test_copy_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("big.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        let data = write_pattern(&source, 100_003);

        let summary = copy_file_fast(&source, &dest_dir, &small_options(4)).unwrap();

        assert_eq!(summary.destination, dest_dir.join("big.bin"));
        assert_eq!(summary.bytes_copied, 100_003);
        assert_eq!(summary.workers, 4);
        assert_eq!(fs::read(&summary.destination).unwrap(), data);
    }

    #[test]
    fn test_copy_ten_mib_default_options() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("ten.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        let data = write_pattern(&source, 10 * 1024 * 1024);

        let summary = copy_file_fast(&source, &dest_dir, &CopyOptions::default()).unwrap();

        assert_eq!(fs::read(&summary.destination).unwrap(), data);
    }

    #[test]
    fn test_copy_empty_file_reports_complete() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("empty.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, b"").unwrap();

        let last = Arc::new(Mutex::new(None));
        let last_clone = Arc::clone(&last);
        let summary =
            copy_file_fast_with_progress(&source, &dest_dir, &small_options(4), move |p| {
                *last_clone.lock().unwrap() = Some(p.percent());
            })
            .unwrap();

        assert_eq!(summary.bytes_copied, 0);
        assert_eq!(fs::metadata(&summary.destination).unwrap().len(), 0);
        assert_eq!(*last.lock().unwrap(), Some(100));
    }

    #[test]
    fn test_copy_more_workers_than_bytes() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("tiny.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, b"abc").unwrap();

        let summary = copy_file_fast(&source, &dest_dir, &small_options(10)).unwrap();

        assert_eq!(fs::read(&summary.destination).unwrap(), b"abc");
    }

    #[test]
    fn test_final_progress_render_is_last_state() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        write_pattern(&source, 50_000);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        copy_file_fast_with_progress(&source, &dest_dir, &small_options(3), move |p| {
            seen_clone.lock().unwrap().push(p.bytes_copied);
        })
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&50_000));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_overwrites_existing_destination() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("file.txt");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, "new").unwrap();
        fs::write(dest_dir.join("file.txt"), "much older content").unwrap();

        let summary = copy_file_fast(&source, &dest_dir, &small_options(2)).unwrap();

        assert_eq!(fs::read_to_string(&summary.destination).unwrap(), "new");
    }

    #[test]
    fn test_missing_destination_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("file.txt");
        fs::write(&source, "content").unwrap();

        let result = copy_file_fast(&source, &dir.path().join("missing"), &small_options(4));

        assert!(matches!(result, Err(CopyError::DestinationCreateError { .. })));
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();

        let result = copy_file_fast(&dir.path().join("nope"), dir.path(), &small_options(4));

        assert!(matches!(result, Err(CopyError::SourceOpenError { .. })));
    }

    #[test]
    fn test_directory_source_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("subdir");
        fs::create_dir(&source).unwrap();
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();

        let result = copy_file_fast(&source, &dest_dir, &small_options(4));

        // Some platforms refuse to open a directory as a file at all.
        assert!(matches!(
            result,
            Err(CopyError::SourceNotAFile(_) | CopyError::SourceOpenError { .. })
        ));
        assert!(!dest_dir.join("subdir").exists());
    }

    #[test]
    fn test_copy_into_own_directory_is_refused() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("self.txt");
        fs::write(&source, "keep me").unwrap();

        let result = copy_file_fast(&source, dir.path(), &small_options(2));

        assert!(matches!(result, Err(CopyError::SameFile(_))));
        assert_eq!(fs::read_to_string(&source).unwrap(), "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_link_to_source_is_refused() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, vec![7u8; 10_000]).unwrap();
        fs::hard_link(&source, dest_dir.join("data.bin")).unwrap();

        let result = copy_file_fast(&source, &dest_dir, &CopyOptions::default());

        assert!(matches!(result, Err(CopyError::SameFile(_))));
        assert_eq!(fs::read(&source).unwrap(), vec![7u8; 10_000]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_source_is_refused() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, "original").unwrap();
        std::os::unix::fs::symlink(&source, dest_dir.join("data.bin")).unwrap();

        let result = copy_file_fast(&source, &dest_dir, &small_options(2));

        assert!(matches!(result, Err(CopyError::SameFile(_))));
        assert_eq!(fs::read_to_string(&source).unwrap(), "original");
    }

    #[test]
    fn test_too_many_workers_touch_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("file.txt");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, "content").unwrap();

        let result = copy_file_fast(&source, &dest_dir, &small_options(usize::MAX));

        assert!(matches!(result, Err(CopyError::InvalidWorkerCount(usize::MAX))));
        assert!(!dest_dir.join("file.txt").exists());
    }

    #[test]
    fn test_invalid_options_touch_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("file.txt");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&source, "content").unwrap();

        let result = copy_file_fast(&source, &dest_dir, &small_options(0));

        assert!(matches!(result, Err(CopyError::InvalidWorkerCount(0))));
        assert!(!dest_dir.join("file.txt").exists());
    }

    #[test]
    fn test_without_preallocation() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("file.bin");
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        let data = write_pattern(&source, 9_999);

        let options = CopyOptions {
            preallocate: false,
            ..small_options(3)
        };
        let summary = copy_file_fast(&source, &dest_dir, &options).unwrap();

        assert_eq!(fs::read(&summary.destination).unwrap(), data);
    }
}
