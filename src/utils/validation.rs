//! Input validation primitives for CLI-provided values.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(
            field,
            message,
            Some(value.to_string()),
        ))
    } else {
        Ok(trimmed)
    }
}

/// Require a path to name an existing directory.
pub fn require_dir(path: &Path, field: &str) -> Result<PathBuf> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::validation_invalid_argument(
            field,
            "Path is not an existing directory",
            Some(path.display().to_string()),
        )
        .with_hint("Pass --root pointing at the source tree to rewrite"))
    }
}
