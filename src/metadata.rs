//! Timing metadata for a single capture.
//!
//! Each capture folder has a companion morpheme file recording when the
//! gesture starts and ends and how long the whole recording runs. Only three
//! fields of that document are consumed:
//!
//! ```json
//! {
//!   "data": [{ "start": 1.2, "end": 3.4 }],
//!   "metaData": { "duration": 5.0 }
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use keytrim::TimingRecord;
//!
//! let timing = TimingRecord::load("NIA_SL_WORD0001_REAL01_F_morpheme.json")?;
//! println!("gesture runs {:.2}s -> {:.2}s", timing.start_time, timing.end_time);
//! # Ok::<(), keytrim::TrimError>(())
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::TrimError;

/// Gesture timing for one capture, in seconds.
///
/// `start_time <= end_time <= duration` is expected of the source data but
/// only `duration > 0` is enforced on load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct TimingRecord {
    /// When the annotated gesture begins.
    pub start_time: f64,
    /// When the annotated gesture ends.
    pub end_time: f64,
    /// Total length of the recording.
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
struct MorphemeDocument {
    data: Vec<MorphemeSegment>,
    #[serde(rename = "metaData")]
    meta_data: MorphemeMetaData,
}

#[derive(Debug, Deserialize)]
struct MorphemeSegment {
    start: f64,
    end: f64,
}

#[derive(Debug, Deserialize)]
struct MorphemeMetaData {
    duration: f64,
}

impl TimingRecord {
    /// Read and parse a morpheme metadata file.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError::MetadataParse`] if the file cannot be read, is
    /// not valid JSON, has no segments, lacks `start`/`end`/`duration`, or
    /// declares a non-positive duration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrimError> {
        let path = path.as_ref();
        let parse_error = |reason: String| TrimError::MetadataParse {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|error| parse_error(error.to_string()))?;
        let record = Self::from_json(&raw).map_err(parse_error)?;

        log::debug!(
            "Loaded timing {:.3}s..{:.3}s of {:.3}s from {}",
            record.start_time,
            record.end_time,
            record.duration,
            path.display()
        );
        Ok(record)
    }

    /// Parse a morpheme document already held in memory.
    ///
    /// Only the first segment of `data` is used.
    pub(crate) fn from_json(raw: &str) -> Result<Self, String> {
        let document: MorphemeDocument =
            serde_json::from_str(raw).map_err(|error| error.to_string())?;

        let segment = document
            .data
            .first()
            .ok_or_else(|| "`data` contains no segments".to_string())?;

        let duration = document.meta_data.duration;
        if duration <= 0.0 {
            return Err(format!("`metaData.duration` must be positive, got {duration}"));
        }

        Ok(Self {
            start_time: segment.start,
            end_time: segment.end,
            duration,
        })
    }
}
