//! Error types for the `keytrim` crate.
//!
//! This module defines [`TrimError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry the paths, folder names and
//! glob patterns needed to diagnose a failure from the error log alone.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `keytrim` operations.
///
/// Only [`TrimError::Configuration`] is fatal to a whole run. Every other
/// variant is caught by the folder processor and turned into a
/// [`ProcessingOutcome::Error`](crate::ProcessingOutcome::Error) for the one
/// folder it concerns.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrimError {
    /// A required root directory is absent.
    #[error("Configuration error at {path}: {reason}")]
    Configuration {
        /// The directory that was expected to exist.
        path: PathBuf,
        /// Why the directory was required.
        reason: String,
    },

    /// A folder claims the Front view but has no recognisable item code.
    #[error("Cannot parse folder name: {0}")]
    UnparseableFolderName(String),

    /// No metadata file matched the folder's item code and view.
    #[error("Morpheme file not found with pattern: {pattern}")]
    MetadataNotFound {
        /// The glob-style pattern that was searched for.
        pattern: String,
    },

    /// A metadata file could not be read or lacks a required field.
    #[error("Error loading morpheme data from {path}: {reason}")]
    MetadataParse {
        /// The metadata file that failed to parse.
        path: PathBuf,
        /// Underlying reason the parse failed.
        reason: String,
    },

    /// A keypoint folder contains no frame files.
    #[error("No keypoint files found in {0}")]
    EmptyFrameSet(PathBuf),

    /// A frame file could not be copied into the output tree.
    #[error("Failed to copy {source_path} to {destination}: {reason}")]
    CopyFailure {
        /// The frame file being copied.
        source_path: PathBuf,
        /// The renumbered destination path.
        destination: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// Frame rate cannot be derived from a recording of zero (or negative) length.
    #[error("Recording duration must be greater than zero")]
    ZeroDuration,

    /// A gesture time maps to a frame position no index can hold.
    #[error("Gesture time {time}s lies outside the frame index range")]
    TimingOutOfRange {
        /// The offending start or end time, in seconds.
        time: f64,
    },

    /// An I/O error occurred while listing or creating directories.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}
