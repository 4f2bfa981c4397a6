//! Dataset directory layout.
//!
//! ```text
//! <data_root>/Training/Labeled/REAL/WORD/<NN>/<capture>/<...>_keypoints.json
//! <data_root>/Training/Labeled/REAL/WORD/morpheme/<NN>/<...>_morpheme.json
//! <output_root>/<NN>/<capture>/<...>_keypoints.json
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::TrimError;

/// Path segments from the data root to the keypoint tree.
pub const KEYPOINT_ROOT_SEGMENTS: [&str; 4] = ["Training", "Labeled", "REAL", "WORD"];

/// Name of the metadata tree inside the keypoint tree.
pub const METADATA_DIRECTORY: &str = "morpheme";

/// `<data_root>/Training/Labeled/REAL/WORD`.
pub fn keypoint_root(data_root: &Path) -> PathBuf {
    KEYPOINT_ROOT_SEGMENTS
        .iter()
        .fold(data_root.to_path_buf(), |path, segment| path.join(segment))
}

/// `<data_root>/Training/Labeled/REAL/WORD/morpheme`.
pub fn metadata_root(data_root: &Path) -> PathBuf {
    keypoint_root(data_root).join(METADATA_DIRECTORY)
}

/// Whether a directory name is a numbered batch partition (`01`, `16`, ...).
pub fn is_numbered(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|character| character.is_ascii_digit())
}

/// Sorted names of the immediate subdirectories of `directory`.
///
/// Names that are not valid UTF-8 are skipped.
pub(crate) fn subdirectory_names(directory: &Path) -> Result<Vec<String>, TrimError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Sorted numbered folders directly under the keypoint root.
pub fn numbered_folders(keypoint_root: &Path) -> Result<Vec<String>, TrimError> {
    Ok(subdirectory_names(keypoint_root)?
        .into_iter()
        .filter(|name| is_numbered(name))
        .collect())
}

/// Fail with [`TrimError::Configuration`] unless the data root and its
/// keypoint tree both exist.
pub fn require_dataset_root(data_root: &Path) -> Result<PathBuf, TrimError> {
    if !data_root.is_dir() {
        return Err(TrimError::Configuration {
            path: data_root.to_path_buf(),
            reason: "data root directory not found".to_string(),
        });
    }

    let keypoint_root = keypoint_root(data_root);
    if !keypoint_root.is_dir() {
        return Err(TrimError::Configuration {
            path: keypoint_root,
            reason: "WORD directory not found".to_string(),
        });
    }

    Ok(keypoint_root)
}
