//! Theme-driven resume composition and page-fit export.
//!
//! Pipeline: [`ResumeRecord`] + [`StyleProfile`] → [`compose_document`] →
//! [`LayoutEngine`] → raster → single-page PDF. A separate text path formats the
//! record with [`format_resume`] and never touches layout.
//!
//! ```no_run
//! use resume_render::{CancelFlag, ExportConfig, RenderThread, ResumeRecord, StyleProfile};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ExportConfig::from_env()?;
//! resume_render::telemetry::init_tracing(&config);
//!
//! let thread = RenderThread::spawn(config)?;
//! let record = ResumeRecord {
//!     name: Some("Ada Lovelace".to_string()),
//!     ..Default::default()
//! };
//! thread
//!     .handle()
//!     .export_pdf(record, StyleProfile::default(), "cv.pdf".into(), CancelFlag::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod render;
pub mod telemetry;
pub mod text;

pub use compose::{compose_document, VisualDocument, VisualSection};
pub use config::ExportConfig;
pub use errors::{ExportError, LayoutError};
pub use export::{
    export_pdf, fit_to_page, render_preview_png, write_text_export, CancelFlag, ExportOutcome,
    PagePlacement, PageSize, PreviewOutcome, RenderHandle, RenderThread,
};
pub use layout::{LayoutEngine, LayoutSettings, MeasuredDocument};
pub use models::{BaseTheme, ResumeRecord, StyleProfile};
pub use text::{available_templates, format_resume, TemplateKind};
