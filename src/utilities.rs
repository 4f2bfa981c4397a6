//! Internal utility functions.
//!
//! Helpers for timestamp-preserving copies and number formatting that do not
//! belong in any single public module.

use std::{
    fs::{self, File, FileTimes, OpenOptions},
    io::Result as IoResult,
    path::Path,
};

/// Copy a file's content and permissions, then carry over its access and
/// modification times.
///
/// Returns the number of bytes copied.
pub(crate) fn copy_preserving_times(source: &Path, destination: &Path) -> IoResult<u64> {
    let bytes = fs::copy(source, destination)?;

    let metadata = fs::metadata(source)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // A read-only handle is enough on Unix, and the copied permissions may
    // forbid a writable one. Windows needs write access to change times.
    match File::open(destination).and_then(|file| file.set_times(times)) {
        Ok(()) => {}
        Err(_) => OpenOptions::new()
            .write(true)
            .open(destination)?
            .set_times(times)?,
    }

    Ok(bytes)
}

/// Format an integer with `,` thousands separators.
pub(crate) fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
