use std::path::PathBuf;

use thiserror::Error;

/// Failures of the measure pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Layout did not settle after {passes} pass(es): bounds {width}x{height}")]
    Degenerate { passes: u32, width: f32, height: f32 },
}

/// Export failures surfaced to the caller. No output file exists after any of these.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render unavailable for {width}x{height} document: {reason}")]
    RenderUnavailable {
        reason: String,
        width: u32,
        height: u32,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export cancelled")]
    Cancelled,

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl ExportError {
    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}
