//! The export pipeline: compose → measure → rasterize → convert → fit → write.
//!
//! These functions are synchronous and drive a caller-owned [`RasterSurface`]. They
//! are meant to run on the render worker thread (see `worker.rs`), which owns the
//! surface; tests call them directly with fake surfaces.

use std::path::{Path, PathBuf};

use resvg::tiny_skia::Pixmap;
use tracing::{debug, info};

use crate::compose::{compose_document, PLACEHOLDER_NAME};
use crate::config::ExportConfig;
use crate::errors::ExportError;
use crate::layout::{LayoutEngine, LayoutSettings, MeasuredDocument};
use crate::models::{ResumeRecord, StyleProfile};
use crate::render::{build_scene, ArgbBuffer, RasterSurface};

use super::page_fit::{PagePlacement, PageSize};
use super::pdf::{encode_single_page, PdfMetadata};
use super::worker::CancelFlag;
use super::writer::write_atomic;

/// What a successful PDF export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub page_size: PageSize,
    pub placement: PagePlacement,
    pub image_width: u32,
    pub image_height: u32,
    pub bytes_written: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Composes and measures a record without rendering it.
pub fn measure_document(
    record: &ResumeRecord,
    style: &StyleProfile,
    settings: &LayoutSettings,
) -> Result<MeasuredDocument, ExportError> {
    let document = compose_document(record, style);
    let engine = LayoutEngine::new(style, settings);
    let measured = engine.request(&document).settle()?;
    debug!(
        width = measured.width,
        height = measured.height,
        sections = measured.sections.len(),
        "Measured document"
    );
    Ok(measured)
}

fn rasterize<S: RasterSurface + ?Sized>(
    surface: &mut S,
    measured: &MeasuredDocument,
    scale: f32,
) -> Result<Pixmap, ExportError> {
    let scene = build_scene(measured, scale);
    match surface.rasterize(&scene) {
        Some(pixmap) if pixmap.width() > 0 && pixmap.height() > 0 => Ok(pixmap),
        _ => Err(ExportError::RenderUnavailable {
            reason: "rendering surface produced no pixel buffer".to_string(),
            width: scene.pixel_width,
            height: scene.pixel_height,
        }),
    }
}

/// Renders `record` under `style` and writes it as a single-page PDF at `path`.
///
/// On any error no file is left at `path`.
pub fn export_pdf<S: RasterSurface + ?Sized>(
    surface: &mut S,
    record: &ResumeRecord,
    style: &StyleProfile,
    path: &Path,
    config: &ExportConfig,
    cancel: &CancelFlag,
) -> Result<ExportOutcome, ExportError> {
    if cancel.is_cancelled() {
        return Err(ExportError::Cancelled);
    }

    let measured = measure_document(record, style, &config.layout_settings())?;
    let pixmap = rasterize(surface, &measured, config.raster_scale)?;
    let buffer = ArgbBuffer::from_source(&pixmap, cancel)?;
    if buffer.is_empty() {
        return Err(ExportError::RenderUnavailable {
            reason: "pixel buffer is empty".to_string(),
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let metadata = PdfMetadata::new(record.name().unwrap_or(PLACEHOLDER_NAME));
    let (bytes, placement) = encode_single_page(&buffer, config.page_size, &metadata);
    write_atomic(path, &bytes, cancel)?;

    info!(
        path = %path.display(),
        page = ?config.page_size,
        image_width = buffer.width(),
        image_height = buffer.height(),
        scale = placement.scale,
        "PDF export written"
    );

    Ok(ExportOutcome {
        path: path.to_path_buf(),
        page_size: config.page_size,
        placement,
        image_width: buffer.width(),
        image_height: buffer.height(),
        bytes_written: bytes.len(),
    })
}

/// Renders the same raster the PDF would embed and writes it as a PNG.
pub fn render_preview_png<S: RasterSurface + ?Sized>(
    surface: &mut S,
    record: &ResumeRecord,
    style: &StyleProfile,
    path: &Path,
    config: &ExportConfig,
    cancel: &CancelFlag,
) -> Result<PreviewOutcome, ExportError> {
    if cancel.is_cancelled() {
        return Err(ExportError::Cancelled);
    }

    let measured = measure_document(record, style, &config.layout_settings())?;
    let pixmap = rasterize(surface, &measured, config.raster_scale)?;
    let (width, height) = (pixmap.width(), pixmap.height());
    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::RenderUnavailable {
            reason: format!("PNG encoding failed: {e}"),
            width,
            height,
        })?;
    write_atomic(path, &png, cancel)?;

    info!(path = %path.display(), width, height, "Preview written");
    Ok(PreviewOutcome {
        path: path.to_path_buf(),
        width,
        height,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
