//! Progress reporting for dataset runs.
//!
//! Attach a [`ProgressCallback`] through
//! [`TrimOptions::with_progress`](crate::TrimOptions::with_progress) to be told
//! each time a folder job finishes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use keytrim::{ProgressCallback, ProgressInfo, TrimOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{} done ({pct:.1}%)", info.folder_name);
//!         }
//!     }
//! }
//!
//! let options = TrimOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::{Duration, Instant};

/// A snapshot taken when one folder job completes.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Folder whose job just finished.
    pub folder_name: String,
    /// Jobs finished so far, including this one.
    pub current: u64,
    /// Jobs in the run.
    pub total: u64,
    /// Completion percentage (0.0 – 100.0). `None` for an empty run.
    pub percentage: Option<f32>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

/// Receives progress updates while folder jobs run.
///
/// Implementations must be [`Send`] and [`Sync`]: with a worker pool the
/// callback is invoked from worker threads, in completion order.
pub trait ProgressCallback: Send + Sync {
    /// Called once per finished folder job.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Counts finished jobs and forwards snapshots to the callback.
///
/// The counter is the only state touched by more than one worker; it never
/// feeds into the run's summary.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: u64,
    completed: AtomicU64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64) -> Self {
        Self {
            callback,
            total,
            completed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record one finished job and report it.
    pub(crate) fn advance(&self, folder_name: &str) {
        let current = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        let percentage = (self.total > 0).then(|| (current as f32 / self.total as f32) * 100.0);

        self.callback.on_progress(&ProgressInfo {
            folder_name: folder_name.to_string(),
            current,
            total: self.total,
            percentage,
            elapsed: self.start_time.elapsed(),
        });
    }
}
