// Composition: resume record + style profile → ordered visual sections.
// Pure and thread-agnostic; may run off the rendering thread.

pub mod sections;

pub use sections::{
    compose_document, Divider, FontRole, HeaderBlock, PaperBorder, SectionBody, SectionKind,
    TagList, TextLine, TextSpan, VisualDocument, VisualSection, Weight, PLACEHOLDER_NAME,
};
