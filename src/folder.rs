//! Capture folder names.
//!
//! A capture folder is named like `NIA_SL_WORD0001_REAL01_F`: underscore
//! separated tokens, one of which is the item code (`WORD0001`) and one of
//! which is the single-letter camera view (`F`). The matching morpheme file
//! lives in a sibling tree as `NIA_SL_WORD0001_REAL01_F_morpheme.json`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::TrimError;

/// Token separator inside folder and file names.
pub const NAME_DELIMITER: char = '_';

/// Prefix that marks the item-code token.
pub const ITEM_CODE_PREFIX: &str = "WORD";

/// Substring a folder name must contain to be treated as a Front capture.
pub const FRONT_VIEW_MARKER: &str = "_F";

/// Camera viewpoint of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewDirection {
    /// `F`, the only view this crate trims.
    Front,
    /// `D`
    Down,
    /// `L`
    Left,
    /// `R`
    Right,
    /// `U`
    Up,
}

impl ViewDirection {
    /// The single-letter code used in file names.
    pub fn code(self) -> &'static str {
        match self {
            ViewDirection::Front => "F",
            ViewDirection::Down => "D",
            ViewDirection::Left => "L",
            ViewDirection::Right => "R",
            ViewDirection::Up => "U",
        }
    }
}

impl FromStr for ViewDirection {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "F" => Ok(ViewDirection::Front),
            "D" => Ok(ViewDirection::Down),
            "L" => Ok(ViewDirection::Left),
            "R" => Ok(ViewDirection::Right),
            "U" => Ok(ViewDirection::Up),
            _ => Err(()),
        }
    }
}

impl Display for ViewDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

/// Whether a folder name carries the Front-view marker.
///
/// This is a plain substring test, applied before any token parsing.
pub fn is_front_view(folder_name: &str) -> bool {
    folder_name.contains(FRONT_VIEW_MARKER)
}

/// The identifying fields recovered from a capture folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct FolderIdentifier {
    /// Vocabulary entry, e.g. `WORD0001`.
    pub item_code: String,
    /// Camera viewpoint.
    pub view: ViewDirection,
}

impl FolderIdentifier {
    /// Parse a folder name.
    ///
    /// When several tokens qualify, the last one wins for both fields.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError::UnparseableFolderName`] if no item-code token or
    /// no view token is present.
    ///
    /// # Example
    ///
    /// ```
    /// use keytrim::{FolderIdentifier, ViewDirection};
    ///
    /// let identifier = FolderIdentifier::parse("NIA_SL_WORD0001_REAL01_F")?;
    /// assert_eq!(identifier.item_code, "WORD0001");
    /// assert_eq!(identifier.view, ViewDirection::Front);
    /// # Ok::<(), keytrim::TrimError>(())
    /// ```
    pub fn parse(folder_name: &str) -> Result<Self, TrimError> {
        let mut item_code = None;
        let mut view = None;

        for token in folder_name.split(NAME_DELIMITER) {
            if token.starts_with(ITEM_CODE_PREFIX) {
                item_code = Some(token);
            }
            if let Ok(direction) = token.parse::<ViewDirection>() {
                view = Some(direction);
            }
        }

        match (item_code, view) {
            (Some(item_code), Some(view)) => Ok(Self {
                item_code: item_code.to_string(),
                view,
            }),
            _ => Err(TrimError::UnparseableFolderName(folder_name.to_string())),
        }
    }

    /// The metadata file pattern for this capture.
    pub fn metadata_pattern(&self) -> MetadataPattern {
        MetadataPattern::new(&self.item_code, self.view)
    }
}

/// A single-wildcard file name pattern,
/// `NIA_SL_<ITEM>_REAL*_<VIEW>_morpheme.json`.
///
/// The wildcard matches any run of characters, including none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPattern {
    prefix: String,
    suffix: String,
}

impl MetadataPattern {
    /// Build the pattern for an item code and view.
    pub fn new(item_code: &str, view: ViewDirection) -> Self {
        Self {
            prefix: format!("NIA_SL_{item_code}_REAL"),
            suffix: format!("_{}_morpheme.json", view.code()),
        }
    }

    /// Whether a bare file name matches the pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

impl Display for MetadataPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}
