//! File system helpers shared by the writers.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{ExportError, Result};

/// True if `path` exists and is a directory.
pub fn is_valid_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Fail with [`ExportError::InvalidDir`] unless `path` is an existing directory.
pub fn require_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if is_valid_dir(path) {
        Ok(())
    } else {
        Err(ExportError::InvalidDir(path.to_path_buf()))
    }
}

/// Create a directory and its parents.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| ExportError::io(path, e))
}

/// Replace `path` with `contents`.
///
/// Writes a sibling temp file and renames it over the target, so readers
/// never observe a half-written resource file. The parent must exist.
pub fn write_file(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path).map_err(|e| ExportError::io(&temp_path, e))?;
        file.write_all(contents)
            .map_err(|e| ExportError::io(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExportError::io(path, e)
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
