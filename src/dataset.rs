//! Whole-dataset orchestration.
//!
//! [`process_dataset`] discovers every Front-view capture under the data
//! root, runs one [`process_folder`] job per capture, and folds the outcomes
//! into a [`DatasetSummary`]. Jobs are independent: each reads its own input
//! folder and writes only its own output folder, so they can run in any
//! order, sequentially or on a worker pool, and the summary comes out the
//! same.
//!
//! # Example
//!
//! ```no_run
//! use keytrim::{ExecutionMode, TrimOptions, process_dataset};
//!
//! let options = TrimOptions::new().with_execution(ExecutionMode::Parallel { workers: 4 });
//! let summary = process_dataset("SignLanguageSets", "SignLanguageSets_Trimmed", &options)?;
//! print!("{summary}");
//! summary.write_error_log("preprocessing_errors.log")?;
//! # Ok::<(), keytrim::TrimError>(())
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    io::Write,
    path::Path,
};

use rayon::{
    ThreadPoolBuilder,
    iter::{IntoParallelRefIterator, ParallelIterator},
};

use crate::configuration::{ExecutionMode, TrimOptions};
use crate::error::TrimError;
use crate::folder::is_front_view;
use crate::layout::{metadata_root, numbered_folders, require_dataset_root, subdirectory_names};
use crate::processor::{FolderJob, ProcessingOutcome, process_folder};
use crate::progress::ProgressTracker;
use crate::utilities::format_count;

/// Title line of the error report.
pub const ERROR_LOG_TITLE: &str = "Korean Sign Language Data Preprocessing - Error Log";

/// Build one job per Front-view capture under the data root.
///
/// Numbered folders are visited in name order, captures within each in name
/// order. A numbered folder whose metadata counterpart is missing, or that
/// cannot be listed, is logged and skipped.
///
/// # Errors
///
/// Returns [`TrimError::Configuration`] if the data root or its WORD
/// directory is missing.
pub fn discover_jobs<P, Q>(data_root: P, output_root: Q) -> Result<Vec<FolderJob>, TrimError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let data_root = data_root.as_ref();
    let output_root = output_root.as_ref();
    let keypoint_root = require_dataset_root(data_root)?;
    let metadata_root = metadata_root(data_root);

    let numbered = numbered_folders(&keypoint_root)?;
    log::info!(
        "Found {} numbered folders to process: {}",
        numbered.len(),
        numbered.join(", ")
    );

    let mut jobs = Vec::new();
    for number in &numbered {
        let keypoint_folder = keypoint_root.join(number);
        let metadata_folder = metadata_root.join(number);

        if !metadata_folder.is_dir() {
            log::warn!("Morpheme folder not found for {number}");
            continue;
        }
        if !keypoint_folder.is_dir() {
            log::warn!("Keypoint folder not found: {}", keypoint_folder.display());
            continue;
        }

        let captures = match subdirectory_names(&keypoint_folder) {
            Ok(names) => names,
            Err(error) => {
                log::error!("Error listing folder {}: {error}", keypoint_folder.display());
                continue;
            }
        };

        let front: Vec<_> = captures.into_iter().filter(|name| is_front_view(name)).collect();
        log::info!("Folder {number}: {} F-view folders found", front.len());

        let output_base = output_root.join(number);
        jobs.extend(front.into_iter().map(|capture| {
            FolderJob::new(
                keypoint_folder.join(capture),
                metadata_folder.clone(),
                output_base.clone(),
            )
        }));
    }

    log::info!("Total {} F-view folders to process", jobs.len());
    Ok(jobs)
}

/// Run every job and return the outcomes in job order.
///
/// # Errors
///
/// Returns [`TrimError::IoError`] only if a worker pool was requested and
/// could not be built. Individual job failures are reported as
/// [`ProcessingOutcome::Error`] values.
pub fn run_jobs(jobs: &[FolderJob], options: &TrimOptions) -> Result<Vec<ProcessingOutcome>, TrimError> {
    let tracker = ProgressTracker::new(options.progress.clone(), jobs.len() as u64);
    let run_one = |job: &FolderJob| {
        let outcome = process_folder(job, options);
        tracker.advance(outcome.folder_name());
        outcome
    };

    match options.execution {
        ExecutionMode::Sequential => Ok(jobs.iter().map(run_one).collect()),
        ExecutionMode::Parallel { workers } => {
            log::info!("Using a worker pool with {workers} workers");
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("keytrim-worker-{index}"))
                .build()
                .map_err(|error| TrimError::IoError(std::io::Error::other(error)))?;
            Ok(pool.install(|| jobs.par_iter().map(run_one).collect()))
        }
    }
}

/// Discover, run, and summarise a whole dataset.
///
/// Per-folder errors are logged and collected, never fatal.
///
/// # Errors
///
/// Returns [`TrimError::Configuration`] if the data root layout is missing.
pub fn process_dataset<P, Q>(
    data_root: P,
    output_root: Q,
    options: &TrimOptions,
) -> Result<DatasetSummary, TrimError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let jobs = discover_jobs(data_root, output_root)?;
    let outcomes = run_jobs(&jobs, options)?;
    let summary = DatasetSummary::from_outcomes(&outcomes);

    for error in &summary.errors {
        log::error!("Error processing {error}");
    }
    Ok(summary)
}

/// Dataset-level totals folded from every [`ProcessingOutcome`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Folders trimmed.
    pub success_count: usize,
    /// Folders skipped as ineligible.
    pub skip_count: usize,
    /// Folders that failed.
    pub error_count: usize,
    /// Sum of `total_frames` over successes.
    pub total_frames: i64,
    /// Sum of `kept_frames` over successes. Inverted-range folders add a
    /// non-positive amount.
    pub kept_frames: i64,
    /// Sum of `trimmed_frames` over successes.
    pub trimmed_frames: i64,
    /// One `<folder_name>: <message>` line per error, in outcome order.
    pub errors: Vec<String>,
}

impl DatasetSummary {
    /// Fold a list of outcomes.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a ProcessingOutcome>,
    {
        outcomes.into_iter().fold(Self::default(), Self::record)
    }

    /// Add one outcome to the totals.
    #[must_use]
    pub fn record(mut self, outcome: &ProcessingOutcome) -> Self {
        match outcome {
            ProcessingOutcome::Skipped { .. } => self.skip_count += 1,
            ProcessingOutcome::Error {
                folder_name,
                message,
            } => {
                self.error_count += 1;
                self.errors.push(format!("{folder_name}: {message}"));
            }
            ProcessingOutcome::Success(stats) => {
                self.success_count += 1;
                self.total_frames += stats.total_frames as i64;
                self.kept_frames += stats.kept_frames;
                self.trimmed_frames += stats.trimmed_frames;
            }
        }
        self
    }

    /// Share of original frames removed, as a percentage.
    ///
    /// `None` when no frames were seen.
    pub fn reduction_percentage(&self) -> Option<f64> {
        (self.total_frames > 0)
            .then(|| self.trimmed_frames as f64 / self.total_frames as f64 * 100.0)
    }

    /// Write the error report to `path`.
    ///
    /// Does nothing and returns `Ok(false)` when there are no errors.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError::IoError`] if the report cannot be written.
    pub fn write_error_log<P: AsRef<Path>>(&self, path: P) -> Result<bool, TrimError> {
        if self.errors.is_empty() {
            return Ok(false);
        }

        let path = path.as_ref();
        let mut file = fs::File::create(path)?;
        writeln!(file, "{ERROR_LOG_TITLE}")?;
        writeln!(
            file,
            "Timestamp: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file, "{}", "=".repeat(80))?;
        writeln!(file, "Total errors: {}", self.errors.len())?;
        writeln!(file)?;
        for error in &self.errors {
            writeln!(file, "{error}")?;
        }

        log::info!("Error log saved to: {}", path.display());
        Ok(true)
    }
}

impl Display for DatasetSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Processing complete!")?;
        writeln!(f, "  Success: {}", self.success_count)?;
        writeln!(f, "  Skipped: {}", self.skip_count)?;
        writeln!(f, "  Errors:  {}", self.error_count)?;

        if self.success_count > 0 {
            writeln!(f)?;
            writeln!(f, "Total Statistics:")?;
            writeln!(f, "  Original frames: {}", format_count(self.total_frames))?;
            writeln!(f, "  Kept frames:     {}", format_count(self.kept_frames))?;
            writeln!(f, "  Trimmed frames:  {}", format_count(self.trimmed_frames))?;
            if let Some(reduction) = self.reduction_percentage() {
                writeln!(f, "  Reduction:       {reduction:.1}%")?;
            }
        }
        Ok(())
    }
}
