//! Run configuration.
//!
//! [`TrimOptions`] is a builder that threads the padding offset, dry-run
//! switch, execution mode, and progress callback through the folder processor
//! and the dataset orchestrator without widening every signature.
//!
//! # Example
//!
//! ```
//! use keytrim::{ExecutionMode, TrimOptions, resolve_worker_count};
//!
//! let workers = resolve_worker_count(Some(4), 8);
//! let options = TrimOptions::new()
//!     .with_offset(15)
//!     .with_dry_run(true)
//!     .with_execution(ExecutionMode::Parallel { workers });
//! assert_eq!(options.offset(), 15);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::frame_range::DEFAULT_OFFSET;
use crate::progress::{NoOpProgress, ProgressCallback};

/// How folder jobs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One job after another on the calling thread. This is the default.
    #[default]
    Sequential,
    /// A dedicated pool of independent workers.
    Parallel {
        /// Pool size, already resolved with [`resolve_worker_count`].
        workers: usize,
    },
}

/// Resolve the worker-pool size once at startup.
///
/// The pool is capped at one less than the available cores (never below
/// one). A requested size is clamped into `1..=cap`; no request means `cap`.
pub fn resolve_worker_count(requested: Option<usize>, available_cores: usize) -> usize {
    let cap = available_cores.saturating_sub(1).max(1);
    requested.map_or(cap, |workers| workers.clamp(1, cap))
}

/// Configuration for folder and dataset processing.
///
/// A default-constructed value trims with a 10-frame offset, copies files,
/// runs sequentially, and reports no progress.
#[derive(Clone)]
pub struct TrimOptions {
    pub(crate) offset: u32,
    pub(crate) dry_run: bool,
    pub(crate) execution: ExecutionMode,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for TrimOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TrimOptions")
            .field("offset", &self.offset)
            .field("dry_run", &self.dry_run)
            .field("execution", &self.execution)
            .finish_non_exhaustive()
    }
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TrimOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            dry_run: false,
            execution: ExecutionMode::Sequential,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the padding, in frames, kept on both sides of the gesture.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// When `true`, compute statistics only: no directories, no copies.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Choose sequential or pooled execution.
    ///
    /// A `Parallel` mode with zero workers is raised to one.
    #[must_use]
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = match execution {
            ExecutionMode::Parallel { workers } => ExecutionMode::Parallel {
                workers: workers.max(1),
            },
            sequential => sequential,
        };
        self
    }

    /// Attach a progress callback, fired once per finished folder job.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Padding offset in frames.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Whether this is a dry run.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// The configured execution mode.
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }
}
