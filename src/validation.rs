//! Dataset layout pre-flight check.
//!
//! Provides [`check_layout`] which inspects the data and output roots before
//! a run and returns a [`ValidationReport`] describing what was found and
//! anything that would stop or weaken the run.
//!
//! # Example
//!
//! ```no_run
//! use keytrim::check_layout;
//!
//! let report = check_layout("SignLanguageSets", "SignLanguageSets_Trimmed");
//! print!("{report}");
//! if !report.is_valid() {
//!     std::process::exit(1);
//! }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::layout::{keypoint_root, metadata_root, numbered_folders};

/// Summary of a layout check.
///
/// Contains lists of informational notices, warnings, and errors.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that let a run proceed but lose some folders.
    pub warnings: Vec<String>,
    /// Issues that stop a run before any folder is processed.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Inspect the dataset and output roots without touching either.
pub fn check_layout<P, Q>(data_root: P, output_root: Q) -> ValidationReport
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let data_root = data_root.as_ref();
    let output_root = output_root.as_ref();
    let mut report = ValidationReport::default();

    // ── Input tree ─────────────────────────────────────────────────
    if data_root.is_dir() {
        report
            .info
            .push(format!("Data root directory: {}", data_root.display()));
    } else {
        report
            .errors
            .push(format!("Data root directory not found: {}", data_root.display()));
    }

    let word_directory = keypoint_root(data_root);
    let numbered = if word_directory.is_dir() {
        report
            .info
            .push(format!("WORD directory: {}", word_directory.display()));
        match numbered_folders(&word_directory) {
            Ok(numbered) => {
                report.info.push(format!(
                    "Found {} numbered folders: {}",
                    numbered.len(),
                    numbered.join(", ")
                ));
                numbered
            }
            Err(error) => {
                report
                    .warnings
                    .push(format!("Could not list numbered folders: {error}"));
                Vec::new()
            }
        }
    } else {
        report
            .errors
            .push(format!("WORD directory not found: {}", word_directory.display()));
        Vec::new()
    };

    let morpheme_directory = metadata_root(data_root);
    if morpheme_directory.is_dir() {
        report
            .info
            .push(format!("Morpheme directory: {}", morpheme_directory.display()));
        for number in &numbered {
            if !morpheme_directory.join(number).is_dir() {
                report.warnings.push(format!(
                    "Morpheme folder not found for {number}; it will be skipped"
                ));
            }
        }
    } else {
        report.errors.push(format!(
            "Morpheme directory not found: {}",
            morpheme_directory.display()
        ));
    }

    // ── Output tree ────────────────────────────────────────────────
    if output_root.is_dir() {
        report
            .info
            .push(format!("Output directory already exists: {}", output_root.display()));
    } else {
        let parent_exists = output_root
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty() || parent.is_dir());
        if parent_exists {
            report.info.push(format!(
                "Output directory will be created: {}",
                output_root.display()
            ));
        } else {
            report.warnings.push(format!(
                "Parent of output directory does not exist: {}",
                output_root.display()
            ));
        }
    }

    report
}
