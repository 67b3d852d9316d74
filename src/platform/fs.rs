// platform-switch - platform/fs.rs
//
// Whole-file read and in-place write for target files. Files are read
// fully into memory before anything is written, so an interrupted run can
// only affect the final write.

use crate::util::error::{Result, SwitchError};
use std::path::Path;

/// Read a target file as UTF-8 text.
///
/// Invalid UTF-8 is an error rather than a lossy conversion: writing a
/// lossily-decoded file back would corrupt it.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| SwitchError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| SwitchError::InvalidEncoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite a target file in place. No backup is kept.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| SwitchError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source,
    })
}
