//! Atomic output writes.
//!
//! Bytes go to a temp file in the target's own directory and are renamed over the
//! target only once fully written and synced. A failed or cancelled export leaves
//! no file behind, and never a truncated one.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::ExportError;

use super::worker::CancelFlag;

/// Writes `bytes` to `path` atomically. `cancel` is checked right before the rename.
pub fn write_atomic(path: &Path, bytes: &[u8], cancel: &CancelFlag) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ExportError::write_failed(path, e))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ExportError::write_failed(path, e))?;

    if cancel.is_cancelled() {
        // Dropping the temp file deletes it.
        return Err(ExportError::Cancelled);
    }

    temp.persist(path)
        .map_err(|e| ExportError::write_failed(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote export file");
    Ok(())
}
