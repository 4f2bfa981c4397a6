//! Trimming of a single capture folder.
//!
//! [`process_folder`] is the unit of work the dataset orchestrator schedules.
//! It never fails: every problem with one folder is folded into the returned
//! [`ProcessingOutcome`] so that a bad capture cannot stop a run.
//!
//! # Example
//!
//! ```no_run
//! use keytrim::{FolderJob, ProcessingOutcome, TrimOptions, process_folder};
//!
//! let job = FolderJob::new(
//!     "WORD/01/NIA_SL_WORD0001_REAL01_F",
//!     "WORD/morpheme/01",
//!     "trimmed/01",
//! );
//! match process_folder(&job, &TrimOptions::new().with_dry_run(true)) {
//!     ProcessingOutcome::Success(stats) => println!("keep {} frames", stats.kept_frames),
//!     ProcessingOutcome::Skipped { reason, .. } => println!("skipped: {reason}"),
//!     ProcessingOutcome::Error { message, .. } => eprintln!("failed: {message}"),
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::configuration::TrimOptions;
use crate::error::TrimError;
use crate::folder::{FolderIdentifier, MetadataPattern, is_front_view};
use crate::frame_range::FrameRange;
use crate::frames::{FrameSet, renumbered_name};
use crate::metadata::TimingRecord;
use crate::utilities::copy_preserving_times;

/// Reason recorded for folders outside the Front view.
pub const NOT_FRONT_VIEW: &str = "not front view";

/// One capture folder to trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderJob {
    /// Folder holding the capture's frame files.
    pub keypoint_folder: PathBuf,
    /// Folder holding the morpheme files for the capture's batch.
    pub metadata_folder: PathBuf,
    /// Parent of the output folder; the capture is written to
    /// `output_base/<folder name>`.
    pub output_base: PathBuf,
}

impl FolderJob {
    /// Create a job.
    pub fn new(
        keypoint_folder: impl Into<PathBuf>,
        metadata_folder: impl Into<PathBuf>,
        output_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            keypoint_folder: keypoint_folder.into(),
            metadata_folder: metadata_folder.into(),
            output_base: output_base.into(),
        }
    }

    /// Last path component of the keypoint folder.
    pub fn folder_name(&self) -> String {
        self.keypoint_folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Where the trimmed frames are written.
    pub fn output_folder(&self) -> PathBuf {
        self.output_base.join(self.folder_name())
    }
}

/// Statistics for a successfully trimmed folder.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderStats {
    /// Capture folder name.
    pub folder_name: String,
    /// Frames in the source folder.
    pub total_frames: usize,
    /// First kept source frame (inclusive).
    pub start_frame: i64,
    /// Last kept source frame (inclusive).
    pub end_frame: i64,
    /// `end_frame - start_frame + 1`. Zero or negative when the range is
    /// inverted (see [`FrameRange`]), in which case no frames are copied.
    pub kept_frames: i64,
    /// `total_frames - kept_frames`. Exceeds `total_frames` for an inverted
    /// range.
    pub trimmed_frames: i64,
    /// Annotated gesture start, in seconds.
    pub start_time: f64,
    /// Annotated gesture end, in seconds.
    pub end_time: f64,
}

/// The result of processing one folder.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingOutcome {
    /// The folder is not eligible; nothing was read or written.
    Skipped {
        /// Capture folder name.
        folder_name: String,
        /// Why it was skipped.
        reason: String,
    },
    /// Processing failed; output for this folder may be partial.
    Error {
        /// Capture folder name.
        folder_name: String,
        /// Human-readable failure.
        message: String,
    },
    /// The folder was trimmed (or, in a dry run, would have been).
    Success(FolderStats),
}

impl ProcessingOutcome {
    /// The folder this outcome belongs to.
    pub fn folder_name(&self) -> &str {
        match self {
            ProcessingOutcome::Skipped { folder_name, .. }
            | ProcessingOutcome::Error { folder_name, .. } => folder_name,
            ProcessingOutcome::Success(stats) => &stats.folder_name,
        }
    }
}

/// Trim one capture folder.
///
/// Steps, in order: skip non-Front folders, parse the folder name, locate
/// the morpheme file, list the frames, load the timing, compute the frame
/// range, then copy the range into `output_base/<folder name>` renumbered
/// from zero. With [`TrimOptions::with_dry_run`] the last step only counts.
pub fn process_folder(job: &FolderJob, options: &TrimOptions) -> ProcessingOutcome {
    let folder_name = job.folder_name();

    if !is_front_view(&folder_name) {
        log::debug!("Skipping {folder_name}: {NOT_FRONT_VIEW}");
        return ProcessingOutcome::Skipped {
            folder_name,
            reason: NOT_FRONT_VIEW.to_string(),
        };
    }

    match trim_folder(job, &folder_name, options) {
        Ok(stats) => ProcessingOutcome::Success(stats),
        Err(error) => ProcessingOutcome::Error {
            folder_name,
            message: error.to_string(),
        },
    }
}

fn trim_folder(
    job: &FolderJob,
    folder_name: &str,
    options: &TrimOptions,
) -> Result<FolderStats, TrimError> {
    let identifier = FolderIdentifier::parse(folder_name)?;
    let metadata_file = find_metadata_file(&job.metadata_folder, &identifier.metadata_pattern())?;

    let frames = FrameSet::scan(&job.keypoint_folder)?;
    if frames.is_empty() {
        return Err(TrimError::EmptyFrameSet(job.keypoint_folder.clone()));
    }

    let timing = TimingRecord::load(&metadata_file)?;
    let range = FrameRange::for_timing(&timing, frames.len(), options.offset)?;

    log::debug!(
        "{folder_name}: keeping frames {}..={} of {}",
        range.start_frame,
        range.end_frame,
        frames.len()
    );

    if !options.dry_run {
        let output_folder = job.output_folder();
        fs::create_dir_all(&output_folder)?;
        copy_range(&frames, &range, &output_folder)?;
    }

    Ok(FolderStats {
        folder_name: folder_name.to_string(),
        total_frames: frames.len(),
        start_frame: range.start_frame,
        end_frame: range.end_frame,
        kept_frames: range.kept_frames(),
        trimmed_frames: range.trimmed_frames(frames.len()),
        start_time: timing.start_time,
        end_time: timing.end_time,
    })
}

/// Locate the morpheme file for a capture.
///
/// Candidates are sorted by file name and the first is taken
/// (lexicographic-first rule), so the choice does not depend on directory
/// listing order. An unreadable metadata folder counts as no match.
///
/// # Errors
///
/// Returns [`TrimError::MetadataNotFound`] if nothing matches.
pub fn find_metadata_file(
    metadata_folder: &Path,
    pattern: &MetadataPattern,
) -> Result<PathBuf, TrimError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(metadata_folder)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|entry| entry.file_name().to_str().is_some_and(|name| pattern.matches(name)))
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect()
        })
        .unwrap_or_default();

    candidates.sort();

    if candidates.len() > 1 {
        log::debug!(
            "{} morpheme files match {pattern}; using {}",
            candidates.len(),
            candidates[0].display()
        );
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| TrimError::MetadataNotFound {
            pattern: metadata_folder.join(pattern.to_string()).display().to_string(),
        })
}

/// Copy the selected frames into `output_folder` with sequential indices.
fn copy_range(frames: &FrameSet, range: &FrameRange, output_folder: &Path) -> Result<(), TrimError> {
    for (sequence, source) in frames.selected(range).iter().enumerate() {
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let destination = output_folder.join(renumbered_name(&file_name, sequence));

        copy_preserving_times(source, &destination).map_err(|error| TrimError::CopyFailure {
            source_path: source.clone(),
            destination: destination.clone(),
            reason: error.to_string(),
        })?;
    }
    Ok(())
}
