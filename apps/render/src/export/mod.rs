// Export: page-fit PDF and PNG preview through the render worker, plus plain text.
// Every file write is atomic; a failed export leaves nothing at the target path.

pub mod page_fit;
pub mod pdf;
pub mod pipeline;
pub mod text;
pub mod worker;
pub mod writer;

pub use page_fit::{fit_to_page, fit_to_page_size, PagePlacement, PageSize};
pub use pdf::PdfMetadata;
pub use pipeline::{export_pdf, measure_document, render_preview_png, ExportOutcome, PreviewOutcome};
pub use text::{coerce_text_path, write_text_export};
pub use worker::{CancelFlag, RenderHandle, RenderThread};
