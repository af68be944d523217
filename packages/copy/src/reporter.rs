//! Periodic progress rendering on a background thread.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::progress::{CopyProgress, ProgressTracker};

/// Background thread that renders a [`ProgressTracker`] on a fixed interval.
///
/// After [`stop`](Self::stop) is called the thread renders once more before
/// exiting, so the final state is always the last thing shown.
#[derive(Debug)]
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<CopyProgress>>,
}

impl ProgressReporter {
    /// Spawn the reporting thread.
    ///
    /// # Arguments
    ///
    /// * `tracker` - Counter shared with the copy workers
    /// * `interval` - Time between renders
    /// * `render` - Called with each snapshot, including the final one
    ///
    /// # Errors
    ///
    /// * If the thread cannot be spawned
    pub fn start<F>(
        tracker: Arc<ProgressTracker>,
        interval: Duration,
        mut render: F,
    ) -> std::io::Result<Self>
    where
        F: FnMut(&CopyProgress) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::Builder::new()
            .name("fastcopy-progress".to_string())
            .spawn(move || {
                let mut last_copied = tracker.copied();
                let mut last_tick = Instant::now();

                loop {
                    let stopping = match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => false,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
                    };

                    let now = Instant::now();
                    let snapshot = tracker.snapshot();
                    let elapsed = now.duration_since(last_tick).as_secs_f64();
                    let progress = if elapsed > 0.0 {
                        let delta = snapshot.bytes_copied.saturating_sub(last_copied);
                        #[allow(clippy::cast_precision_loss)]
                        let rate = delta as f64 / elapsed;
                        snapshot.with_throughput(rate)
                    } else {
                        snapshot
                    };

                    render(&progress);
                    last_copied = progress.bytes_copied;
                    last_tick = now;

                    if stopping {
                        log::debug!("Progress reporter stopped at {}%", progress.percent());
                        return progress;
                    }
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread to stop and wait for its final render.
    ///
    /// Returns the last progress that was rendered, or `None` if the reporting
    /// thread panicked.
    pub fn stop(mut self) -> Option<CopyProgress> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<CopyProgress> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.handle.take().and_then(|h| h.join().ok())
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
