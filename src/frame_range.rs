//! Time-to-frame range computation.
//!
//! Gesture timing is annotated in seconds while a capture is a discrete
//! sequence of frame files. [`FrameRange::compute`] maps one onto the other
//! by assuming frames are evenly spread over the recording:
//!
//! ```text
//! fps         = total_frames / duration
//! start_frame = max(0, floor(start_time * fps) - offset)
//! end_frame   = min(total_frames - 1, floor(end_time * fps) + offset)
//! ```
//!
//! # Example
//!
//! ```
//! use keytrim::FrameRange;
//!
//! let range = FrameRange::compute(1.0, 3.0, 5.0, 100, 10)?;
//! assert_eq!((range.start_frame, range.end_frame), (10, 70));
//! assert_eq!(range.kept_frames(), 61);
//! # Ok::<(), keytrim::TrimError>(())
//! ```

use crate::error::TrimError;
use crate::metadata::TimingRecord;

/// Frames of padding kept on either side of the annotated gesture.
pub const DEFAULT_OFFSET: u32 = 10;

/// An inclusive range of frame indices to retain.
///
/// Indices are signed because the clamped range can come out inverted
/// (`start_frame > end_frame`) when the timing data places the gesture past
/// the end of the recording. Such a range selects no frames and reports a
/// non-positive [`kept_frames`](FrameRange::kept_frames); it is left as
/// computed rather than swapped or floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FrameRange {
    /// First retained frame (inclusive).
    pub start_frame: i64,
    /// Last retained frame (inclusive).
    pub end_frame: i64,
}

impl FrameRange {
    /// Compute the padded, clamped frame range for a gesture.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError::ZeroDuration`] if `duration` is not positive, and
    /// [`TrimError::TimingOutOfRange`] if a time is not finite or lands
    /// beyond what an `i64` frame index can represent.
    pub fn compute(
        start_time: f64,
        end_time: f64,
        duration: f64,
        total_frames: usize,
        offset: u32,
    ) -> Result<Self, TrimError> {
        if duration <= 0.0 {
            return Err(TrimError::ZeroDuration);
        }

        let total_frames = total_frames as i64;
        let frames_per_second = total_frames as f64 / duration;
        let offset = i64::from(offset);

        let start_frame = frame_position(start_time, frames_per_second)?.saturating_sub(offset);
        let end_frame = frame_position(end_time, frames_per_second)?.saturating_add(offset);

        Ok(Self {
            start_frame: start_frame.max(0),
            end_frame: end_frame.min(total_frames - 1),
        })
    }

    /// Shorthand for [`compute`](FrameRange::compute) over a loaded [`TimingRecord`].
    pub fn for_timing(
        timing: &TimingRecord,
        total_frames: usize,
        offset: u32,
    ) -> Result<Self, TrimError> {
        Self::compute(
            timing.start_time,
            timing.end_time,
            timing.duration,
            total_frames,
            offset,
        )
    }

    /// `end_frame - start_frame + 1`. Zero or negative for an inverted range.
    pub fn kept_frames(&self) -> i64 {
        self.end_frame
            .saturating_sub(self.start_frame)
            .saturating_add(1)
    }

    /// Frames dropped out of `total_frames`.
    pub fn trimmed_frames(&self, total_frames: usize) -> i64 {
        (total_frames as i64).saturating_sub(self.kept_frames())
    }

    /// Whether the range selects no frames at all.
    pub fn is_empty(&self) -> bool {
        self.start_frame > self.end_frame
    }

    /// Frame indices in temporal order. Empty for an inverted range.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.start_frame..=self.end_frame).map(|index| index as usize)
    }
}

/// `floor(time * fps)` as a frame index.
fn frame_position(time: f64, frames_per_second: f64) -> Result<i64, TrimError> {
    let position = (time * frames_per_second).floor();
    // i64::MAX rounds up to 2^63 as an f64, so that bound is exclusive.
    if !position.is_finite() || position < i64::MIN as f64 || position >= i64::MAX as f64 {
        return Err(TrimError::TimingOutOfRange { time });
    }
    Ok(position as i64)
}
