//! Splitting a file into per-worker byte ranges.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crossbeam_channel::{Receiver, bounded};

use crate::engine::MAX_WORKERS;
use crate::error::CopyError;

/// A half-open byte range `[offset, offset + size)` assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyTask {
    offset: u64,
    size: u64,
}

impl CopyTask {
    /// First byte of the range.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes in the range.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// One past the last byte of the range.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset + self.size
    }

    /// Whether the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Divide `file_size` bytes into `workers` contiguous, non-overlapping tasks.
///
/// Every task gets `file_size / workers` bytes except the last, which absorbs
/// the remainder. When `workers > file_size` the leading tasks are empty.
///
/// # Errors
///
/// * If `workers` is zero or above [`MAX_WORKERS`]
pub fn partition(file_size: u64, workers: usize) -> Result<Vec<CopyTask>, CopyError> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(CopyError::InvalidWorkerCount(workers));
    }

    let count = workers as u64;
    let chunk = file_size / count;

    let tasks = (0..count)
        .map(|i| {
            let offset = i * chunk;
            let size = if i == count - 1 { file_size - offset } else { chunk };
            CopyTask { offset, size }
        })
        .collect();

    Ok(tasks)
}

/// Shared queue of tasks, sealed once filled.
///
/// Workers call [`pop`](Self::pop) until it returns `None`. No tasks can be
/// added after construction.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    receiver: Receiver<CopyTask>,
}

impl TaskQueue {
    /// Build a queue pre-populated with `tasks` and close it.
    #[must_use]
    pub fn sealed(tasks: Vec<CopyTask>) -> Self {
        let (sender, receiver) = bounded(tasks.len().max(1));
        for task in tasks {
            let queued = sender.try_send(task);
            debug_assert!(queued.is_ok(), "task queue is sized to hold every task");
        }
        drop(sender);
        Self { receiver }
    }

    /// Take the next task, or `None` once the queue is drained.
    #[must_use]
    pub fn pop(&self) -> Option<CopyTask> {
        self.receiver.recv().ok()
    }

    /// Number of tasks not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether every task has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
