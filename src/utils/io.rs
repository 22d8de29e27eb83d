//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a file as UTF-8 text.
///
/// Read failures map to `internal.io_error`; content that is not valid UTF-8
/// maps to `rewrite.invalid_encoding`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        Error::rewrite_invalid_encoding(path.display().to_string(), e.utf8_error().valid_up_to())
    })
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}
