//! Synthetic dataset trees for integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use keytrim::layout::{keypoint_root, metadata_root};
use tempfile::TempDir;

/// A dataset laid out the way the trimmer expects, inside a temp dir.
pub struct SyntheticDataset {
    directory: TempDir,
}

impl SyntheticDataset {
    pub fn new() -> Self {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(keypoint_root(&directory.path().join("data")))
            .expect("Failed to create WORD directory");
        Self { directory }
    }

    pub fn data_root(&self) -> PathBuf {
        self.directory.path().join("data")
    }

    pub fn output_root(&self) -> PathBuf {
        self.directory.path().join("out")
    }

    pub fn keypoint_folder(&self, number: &str, capture: &str) -> PathBuf {
        keypoint_root(&self.data_root()).join(number).join(capture)
    }

    pub fn metadata_folder(&self, number: &str) -> PathBuf {
        metadata_root(&self.data_root()).join(number)
    }

    /// Create a capture folder with `frames` numbered frame files. Each file
    /// holds its original index so copies can be traced back.
    pub fn add_capture(&self, number: &str, capture: &str, frames: usize) -> PathBuf {
        let folder = self.keypoint_folder(number, capture);
        fs::create_dir_all(&folder).expect("Failed to create capture folder");
        for index in 0..frames {
            fs::write(
                folder.join(frame_name(capture, index)),
                format!("{{\"frame\": {index}}}"),
            )
            .expect("Failed to write frame");
        }
        folder
    }

    /// Write a morpheme file with the given timing.
    pub fn add_morpheme(
        &self,
        number: &str,
        file_name: &str,
        start: f64,
        end: f64,
        duration: f64,
    ) -> PathBuf {
        let folder = self.metadata_folder(number);
        fs::create_dir_all(&folder).expect("Failed to create morpheme folder");
        let path = folder.join(file_name);
        let body = format!(
            r#"{{"metaData": {{"url": "clip.mp4", "duration": {duration}}}, "data": [{{"start": {start}, "end": {end}, "attributes": [{{"name": "sign"}}]}}]}}"#
        );
        fs::write(&path, body).expect("Failed to write morpheme file");
        path
    }

    /// Add a Front capture and its morpheme file in one go.
    pub fn add_front_capture(
        &self,
        number: &str,
        item_code: &str,
        frames: usize,
        timing: (f64, f64, f64),
    ) -> PathBuf {
        let capture = format!("NIA_SL_{item_code}_REAL01_F");
        self.add_morpheme(
            number,
            &format!("NIA_SL_{item_code}_REAL01_F_morpheme.json"),
            timing.0,
            timing.1,
            timing.2,
        );
        self.add_capture(number, &capture, frames)
    }
}

pub fn frame_name(capture: &str, index: usize) -> String {
    format!("{capture}_{index:012}_keypoints.json")
}

/// File names directly inside `folder`, sorted.
pub fn listed_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(folder)
        .expect("Failed to list folder")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Count every file and directory below `root`.
pub fn count_entries(root: &Path) -> usize {
    if !root.exists() {
        return 0;
    }
    fs::read_dir(root)
        .expect("Failed to list folder")
        .map(|entry| {
            let path = entry.unwrap().path();
            1 + if path.is_dir() { count_entries(&path) } else { 0 }
        })
        .sum()
}
