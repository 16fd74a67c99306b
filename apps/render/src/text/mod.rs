// Plain-text export formatting. Independent of composition, layout and rendering.

pub mod templates;

pub use templates::{available_templates, format_resume, TemplateKind};
