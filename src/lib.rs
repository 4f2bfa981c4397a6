//! # keytrim
//!
//! Trim sign-language keypoint captures to the annotated gesture window.
//!
//! A capture is a folder of per-frame keypoint files. A companion morpheme
//! file records when the gesture starts and ends. `keytrim` keeps the frames
//! inside that window plus a padding offset on each side, copies them into a
//! mirrored output tree, and renumbers them from zero.
//!
//! ## Quick Start
//!
//! ### Trim a Whole Dataset
//!
//! ```no_run
//! use keytrim::{TrimOptions, process_dataset};
//!
//! let summary = process_dataset(
//!     "SignLanguageSets",
//!     "SignLanguageSets_Trimmed",
//!     &TrimOptions::new(),
//! )?;
//! print!("{summary}");
//! # Ok::<(), keytrim::TrimError>(())
//! ```
//!
//! ### Preview a Single Capture
//!
//! ```no_run
//! use keytrim::{FolderJob, ProcessingOutcome, TrimOptions, process_folder};
//!
//! let job = FolderJob::new(
//!     "SignLanguageSets/Training/Labeled/REAL/WORD/01/NIA_SL_WORD0001_REAL01_F",
//!     "SignLanguageSets/Training/Labeled/REAL/WORD/morpheme/01",
//!     "SignLanguageSets_Trimmed/01",
//! );
//! if let ProcessingOutcome::Success(stats) = process_folder(&job, &TrimOptions::new().with_dry_run(true)) {
//!     println!("frames {}..={} of {}", stats.start_frame, stats.end_frame, stats.total_frames);
//! }
//! ```
//!
//! ### Compute a Frame Range
//!
//! ```
//! use keytrim::FrameRange;
//!
//! let range = FrameRange::compute(1.0, 3.0, 5.0, 100, 10)?;
//! assert_eq!((range.start_frame, range.end_frame), (10, 70));
//! # Ok::<(), keytrim::TrimError>(())
//! ```
//!
//! ## Features
//!
//! - **Frame range computation**: seconds-based gesture timing mapped onto
//!   frame indices, padded and clamped
//! - **Front-view filtering**: other camera views are skipped, never errors
//! - **Deterministic metadata lookup**: lexicographic-first match wins
//! - **Dry runs**: full statistics with zero filesystem writes
//! - **Worker pool**: independent folder jobs on a sized `rayon` pool
//! - **Summaries**: success/skip/error counts, frame totals, and an error report
//! - **Layout check**: pre-flight inspection of the dataset tree

pub mod configuration;
pub mod dataset;
pub mod error;
pub mod folder;
pub mod frame_range;
pub mod frames;
pub mod layout;
pub mod metadata;
pub mod processor;
pub mod progress;
mod utilities;
pub mod validation;

pub use configuration::{ExecutionMode, TrimOptions, resolve_worker_count};
pub use dataset::{DatasetSummary, discover_jobs, process_dataset, run_jobs};
pub use error::TrimError;
pub use folder::{FolderIdentifier, MetadataPattern, ViewDirection, is_front_view};
pub use frame_range::{DEFAULT_OFFSET, FrameRange};
pub use frames::{FrameSet, renumbered_name};
pub use metadata::TimingRecord;
pub use processor::{FolderJob, FolderStats, ProcessingOutcome, find_metadata_file, process_folder};
pub use progress::{ProgressCallback, ProgressInfo};
pub use validation::{ValidationReport, check_layout};
