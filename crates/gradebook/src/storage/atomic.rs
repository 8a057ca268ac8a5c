//! Whole-file replacement through a temporary file and rename.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// Write `contents` to `path` so readers never observe a partial file.
///
/// The bytes go to a temporary file in the target's directory, which is then
/// renamed over the target.
///
/// # Errors
///
/// Returns [`Error::DataFileWrite`] if the temporary file cannot be created,
/// written, or moved into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| Error::DataFileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Replaced {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Write `contents` to `path` in place, truncating whatever was there.
///
/// # Errors
///
/// Returns [`Error::DataFileWrite`] if the file cannot be written.
pub fn write_in_place(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::DataFileWrite {
        path: path.to_path_buf(),
        source,
    })
}
