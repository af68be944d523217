//! Worker pool that drains the task queue with offset I/O.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Mutex;

use fastcopy_io::{PositionalRead, PositionalWrite, read_at, write_at};

use crate::error::{ChunkError, CopyError};
use crate::progress::ProgressTracker;
use crate::tasks::{CopyTask, TaskQueue};

/// Default per-worker buffer size (4 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Default number of workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Largest accepted worker count.
pub const MAX_WORKERS: usize = 1024;

/// Copy one task from `src` to `dst` through `buffer`.
///
/// Returns the number of bytes copied, which equals `task.size()` on success.
///
/// # Errors
///
/// * If a read or write fails
/// * If the source runs out of data before the task is complete
pub fn copy_range<R, W>(
    src: &R,
    dst: &W,
    task: CopyTask,
    buffer: &mut [u8],
    tracker: &ProgressTracker,
) -> Result<u64, ChunkError>
where
    R: PositionalRead + ?Sized,
    W: PositionalWrite + ?Sized,
{
    let mut offset = task.offset();
    let mut remaining = task.size();

    while remaining > 0 {
        let to_read = usize::try_from(remaining).map_or(buffer.len(), |r| r.min(buffer.len()));

        let n = read_at(src, &mut buffer[..to_read], offset).map_err(ChunkError::Read)?;
        if n == 0 {
            return Err(ChunkError::UnexpectedEof { offset, remaining });
        }

        write_at(dst, &buffer[..n], offset).map_err(ChunkError::Write)?;
        log::trace!("Copied {n} bytes at offset {offset}");

        offset += n as u64;
        remaining -= n as u64;
        tracker.add_copied(n as u64);
    }

    Ok(task.size())
}

/// Grow `buffer` to what `task` can use, capped at `buffer_size`.
///
/// Empty tasks allocate nothing, and a small task only gets as many bytes as it
/// covers.
fn reserve_buffer(buffer: &mut Vec<u8>, buffer_size: usize, task: CopyTask) {
    let needed = usize::try_from(task.size()).map_or(buffer_size, |s| s.min(buffer_size));
    if buffer.len() < needed {
        buffer.resize(needed, 0);
    }
}

/// Copy every task with `workers` parallel workers.
///
/// All workers are started before the queue drains. A worker that hits an
/// error stops taking tasks; the others finish their own ranges. Returns the
/// total number of bytes copied.
///
/// # Arguments
///
/// * `src` - Source handle, read concurrently at disjoint offsets
/// * `dst` - Destination handle, written concurrently at disjoint offsets
/// * `tasks` - Ranges to copy
/// * `workers` - Number of worker threads
/// * `buffer_size` - Size of each worker's scratch buffer
/// * `tracker` - Counter fed after each chunk
///
/// # Errors
///
/// * If `workers` is zero or above [`MAX_WORKERS`]
/// * If `buffer_size` is zero
/// * If the thread pool cannot be built
/// * If any worker fails (fail-late: reported after all workers finish)
pub fn run_workers<R, W>(
    src: &R,
    dst: &W,
    tasks: Vec<CopyTask>,
    workers: usize,
    buffer_size: usize,
    tracker: &ProgressTracker,
) -> Result<u64, CopyError>
where
    R: PositionalRead + ?Sized,
    W: PositionalWrite + ?Sized,
{
    if workers == 0 || workers > MAX_WORKERS {
        return Err(CopyError::InvalidWorkerCount(workers));
    }
    if buffer_size == 0 {
        return Err(CopyError::InvalidBufferSize(buffer_size));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("fastcopy-worker-{i}"))
        .build()
        .map_err(|e| CopyError::WorkerPoolError(e.to_string()))?;

    let queue = TaskQueue::sealed(tasks);
    let failures: Mutex<Vec<(usize, ChunkError)>> = Mutex::new(Vec::new());
    let copied = std::sync::atomic::AtomicU64::new(0);

    log::debug!("Starting {workers} workers for {} tasks", queue.len());

    pool.scope(|s| {
        for id in 0..workers {
            let queue = &queue;
            let failures = &failures;
            let copied = &copied;
            s.spawn(move |_| {
                let mut buffer = Vec::new();
                while let Some(task) = queue.pop() {
                    reserve_buffer(&mut buffer, buffer_size, task);
                    log::debug!(
                        "Worker {id} copying [{}, {}) ({} bytes)",
                        task.offset(),
                        task.end(),
                        task.size()
                    );
                    match copy_range(src, dst, task, &mut buffer, tracker) {
                        Ok(n) => {
                            copied.fetch_add(n, std::sync::atomic::Ordering::SeqCst);
                        }
                        Err(e) => {
                            log::error!("Worker {id} failed: {e}");
                            if let Ok(mut failures) = failures.lock() {
                                failures.push((id, e));
                            }
                            return;
                        }
                    }
                }
                log::debug!("Worker {id} finished");
            });
        }
    });

    let mut failures = failures
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    if failures.is_empty() {
        return Ok(copied.into_inner());
    }

    failures.sort_by_key(|(id, _)| *id);
    let failed_workers = failures.len();
    let (_, first) = failures.swap_remove(0);

    Err(CopyError::ChunkIo {
        failed_workers,
        source: first,
    })
}
