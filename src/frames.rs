//! Per-frame keypoint files.
//!
//! A capture folder holds one `<...>_<index>_keypoints.json` file per frame,
//! where `<index>` is zero padded so that file-name order is capture order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::TrimError;
use crate::folder::NAME_DELIMITER;
use crate::frame_range::FrameRange;

/// File-name suffix shared by every frame file.
pub const FRAME_FILE_SUFFIX: &str = "_keypoints.json";

/// Width of the renumbered frame index.
pub const FRAME_INDEX_WIDTH: usize = 12;

/// The frame files of one capture, in temporal order.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    files: Vec<PathBuf>,
}

impl FrameSet {
    /// List the frame files directly inside `folder`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError::IoError`] if the folder cannot be listed.
    pub fn scan<P: AsRef<Path>>(folder: P) -> Result<Self, TrimError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(folder.as_ref())? {
            let entry = entry?;
            let is_frame = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(FRAME_FILE_SUFFIX));
            let path = entry.path();
            if is_frame && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(Self { files })
    }

    /// Number of frames in the capture.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the capture has no frames.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path of the frame at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    /// All frame paths in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The frames covered by `range`, in order.
    ///
    /// An inverted or out-of-bounds range selects nothing.
    pub fn selected(&self, range: &FrameRange) -> &[PathBuf] {
        if range.is_empty() || range.start_frame < 0 {
            return &[];
        }
        self.files
            .get(range.start_frame as usize..=range.end_frame as usize)
            .unwrap_or(&[])
    }
}

/// Rename a frame file so its index token reads `sequence`.
///
/// The index is the second-to-last `_`-separated token; everything around it
/// is kept as is.
///
/// ```
/// use keytrim::renumbered_name;
///
/// assert_eq!(
///     renumbered_name("NIA_SL_WORD0001_REAL01_F_000000000042_keypoints.json", 3),
///     "NIA_SL_WORD0001_REAL01_F_000000000003_keypoints.json",
/// );
/// ```
pub fn renumbered_name(file_name: &str, sequence: usize) -> String {
    let index = format!("{sequence:0width$}", width = FRAME_INDEX_WIDTH);
    let mut parts: Vec<&str> = file_name.split(NAME_DELIMITER).collect();

    match parts.len() {
        0 | 1 => index,
        count => {
            parts[count - 2] = &index;
            parts.join(NAME_DELIMITER.to_string().as_str())
        }
    }
}
