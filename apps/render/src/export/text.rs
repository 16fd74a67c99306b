//! Plain-text export: template formatting plus extension coercion.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::ExportError;
use crate::models::ResumeRecord;
use crate::text::{format_resume, TemplateKind};

use super::worker::CancelFlag;
use super::writer::write_atomic;

/// Document extensions that are swapped for `.txt` rather than extended.
const REPLACED_EXTENSIONS: [&str; 5] = ["doc", "docx", "odt", "rtf", "pdf"];

/// Forces a `.txt` extension onto `path`.
///
/// `.txt` (any case) is kept, a recognized document extension is replaced, and
/// anything else, including no extension at all, gets `.txt` appended.
pub fn coerce_text_path(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("txt") => path.to_path_buf(),
        Some(ext) if REPLACED_EXTENSIONS.contains(&ext) => path.with_extension("txt"),
        _ => {
            let mut raw = path.as_os_str().to_owned();
            raw.push(".txt");
            PathBuf::from(raw)
        }
    }
}

/// Formats `record` with `template` and writes it next to `path`, coerced to `.txt`.
/// Returns the path actually written.
pub fn write_text_export(
    record: &ResumeRecord,
    template: TemplateKind,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let target = coerce_text_path(path);
    let text = format_resume(record, template);
    write_atomic(&target, text.as_bytes(), &CancelFlag::new())?;
    info!(
        path = %target.display(),
        template = template.name(),
        bytes = text.len(),
        "Text export written"
    );
    Ok(target)
}
