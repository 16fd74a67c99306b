//! Section composer: turns a resume record and a style profile into a visual tree.
//!
//! Composition is a pure function of its two inputs: no I/O, no clock, no randomness.
//! Absent fields drop their row; a section disappears only when its whole trigger set
//! is absent. The header block is always present.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BorderStyle, HexColor, ResumeRecord, StyleProfile};

/// Shown instead of the name when the record has none.
pub const PLACEHOLDER_NAME: &str = "YOUR NAME";

const EMAIL_ICON: &str = "✉";
const PHONE_ICON: &str = "📱";
const ADDRESS_ICON: &str = "📍";

/// Background of the skill pills.
const TAG_FILL: &str = "#ecf0f1";
const DIVIDER_THICKNESS: f32 = 3.0;

// ────────────────────────────────────────────────────────────────────────────
// Visual tree types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontRole {
    Header,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weight {
    Regular,
    Bold,
}

/// A run of text with a single font, size, weight and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub role: FontRole,
    pub size: u32,
    pub weight: Weight,
    pub color: HexColor,
}

/// One logical row. Without `wrap` spans sit side by side and only break when the row
/// overflows; with it every span is a paragraph of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    pub wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub color: HexColor,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: TextSpan,
    /// Contact items, icon prefix already applied.
    pub contact_items: Vec<String>,
    pub separator: String,
    pub contact_size: u32,
    pub contact_color: HexColor,
    pub divider: Divider,
}

impl HeaderBlock {
    /// All contact items on one line; layout breaks it between items when too wide.
    pub fn contact_line(&self) -> String {
        self.contact_items.join(&self.separator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<String>,
    pub size: u32,
    pub text_color: HexColor,
    pub fill: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectionBody {
    Lines(Vec<TextLine>),
    Tags(TagList),
}

/// One titled block of the document. Built once per composition, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSection {
    pub kind: SectionKind,
    pub title: String,
    pub title_size: u32,
    pub accent: HexColor,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperBorder {
    pub color: HexColor,
    pub dashed: bool,
}

/// The composed document: header, ordered body sections, paper decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualDocument {
    pub header: HeaderBlock,
    pub sections: Vec<VisualSection>,
    pub background: HexColor,
    pub border: Option<PaperBorder>,
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the visual tree for a record under a style profile. Never fails.
pub fn compose_document(record: &ResumeRecord, style: &StyleProfile) -> VisualDocument {
    let header = compose_header(record, style);

    let mut sections = Vec::with_capacity(3);
    if let Some(section) = compose_education(record, style) {
        sections.push(section);
    }
    if let Some(section) = compose_experience(record, style) {
        sections.push(section);
    }
    if let Some(section) = compose_skills(record, style) {
        sections.push(section);
    }

    if record.is_empty() {
        debug!("Composing placeholder document for empty resume record");
    }
    debug!(
        theme = ?style.base_theme(),
        sections = sections.len(),
        "Composed resume document"
    );

    let fields = &style.fields;
    let border = match (fields.use_borders, fields.border_style) {
        (false, _) | (true, BorderStyle::None) => None,
        (true, style_kind) => Some(PaperBorder {
            color: fields.divider_color.clone(),
            dashed: style_kind == BorderStyle::Dashed,
        }),
    };

    VisualDocument {
        header,
        sections,
        background: fields.background_color.clone(),
        border,
    }
}

fn compose_header(record: &ResumeRecord, style: &StyleProfile) -> HeaderBlock {
    let fields = &style.fields;

    let name_text = record
        .name()
        .map(str::to_uppercase)
        .unwrap_or_else(|| PLACEHOLDER_NAME.to_string());

    let with_icon = |icon: &str, value: &str| {
        if fields.use_icons {
            format!("{icon} {value}")
        } else {
            value.to_string()
        }
    };

    let contact_items = [
        (EMAIL_ICON, record.email()),
        (PHONE_ICON, record.phone()),
        (ADDRESS_ICON, record.address()),
    ]
    .into_iter()
    .filter_map(|(icon, value)| value.map(|v| with_icon(icon, v)))
    .collect();

    HeaderBlock {
        name: TextSpan {
            text: name_text,
            role: FontRole::Header,
            size: fields.header_font_size,
            weight: Weight::Bold,
            color: fields.header_text_color.clone(),
        },
        contact_items,
        separator: style.base_theme().contact_separator().to_string(),
        contact_size: fields.body_font_size,
        contact_color: fields.body_text_color.clone(),
        divider: Divider {
            color: fields.divider_color.clone(),
            thickness: DIVIDER_THICKNESS,
        },
    }
}

fn compose_education(record: &ResumeRecord, style: &StyleProfile) -> Option<VisualSection> {
    if !record.has_education() {
        return None;
    }
    let fields = &style.fields;

    let mut lines = Vec::with_capacity(3);
    if let Some(degree) = record.degree() {
        lines.push(single(
            span(degree, fields.section_font_size, Weight::Bold, &fields.header_text_color),
            false,
        ));
    }
    if let Some(institution) = record.institution() {
        lines.push(single(
            span(institution, fields.body_font_size, Weight::Regular, &fields.body_text_color),
            true,
        ));
    }
    if let Some(year) = record.year() {
        lines.push(single(
            span(year, smaller(fields.body_font_size), Weight::Regular, &fields.body_text_color),
            false,
        ));
    }

    Some(VisualSection {
        kind: SectionKind::Education,
        title: "EDUCATION".to_string(),
        title_size: fields.section_font_size,
        accent: style.accent(fields.section_accents.education).clone(),
        body: SectionBody::Lines(lines),
    })
}

fn compose_experience(record: &ResumeRecord, style: &StyleProfile) -> Option<VisualSection> {
    if !record.has_experience() {
        return None;
    }
    let fields = &style.fields;

    let mut lines = Vec::with_capacity(3);

    let mut title_spans = Vec::with_capacity(2);
    if let Some(title) = record.job_title() {
        title_spans.push(span(
            title,
            fields.section_font_size,
            Weight::Bold,
            &fields.header_text_color,
        ));
    }
    if let Some(duration) = record.duration() {
        title_spans.push(span(
            &format!("({duration})"),
            smaller(fields.body_font_size),
            Weight::Regular,
            &fields.body_text_color,
        ));
    }
    if !title_spans.is_empty() {
        lines.push(TextLine {
            spans: title_spans,
            wrap: false,
        });
    }

    if let Some(company) = record.company() {
        lines.push(single(
            span(company, fields.body_font_size, Weight::Regular, &fields.body_text_color),
            true,
        ));
    }
    if let Some(description) = record.description() {
        lines.push(single(
            span(
                description,
                smaller(fields.body_font_size),
                Weight::Regular,
                &fields.body_text_color,
            ),
            true,
        ));
    }

    Some(VisualSection {
        kind: SectionKind::Experience,
        title: style.base_theme().experience_title().to_string(),
        title_size: fields.section_font_size,
        accent: style.accent(fields.section_accents.experience).clone(),
        body: SectionBody::Lines(lines),
    })
}

fn compose_skills(record: &ResumeRecord, style: &StyleProfile) -> Option<VisualSection> {
    let tags: Vec<String> = record
        .skill_tags()
        .into_iter()
        .map(str::to_string)
        .collect();
    if tags.is_empty() {
        return None;
    }
    let fields = &style.fields;

    Some(VisualSection {
        kind: SectionKind::Skills,
        title: "SKILLS".to_string(),
        title_size: fields.section_font_size,
        accent: style.accent(fields.section_accents.skills).clone(),
        body: SectionBody::Tags(TagList {
            tags,
            size: smaller(fields.body_font_size),
            text_color: fields.header_text_color.clone(),
            fill: HexColor::from(TAG_FILL),
        }),
    })
}

fn span(text: &str, size: u32, weight: Weight, color: &HexColor) -> TextSpan {
    TextSpan {
        text: text.to_string(),
        role: FontRole::Body,
        size,
        weight,
        color: color.clone(),
    }
}

fn single(span: TextSpan, wrap: bool) -> TextLine {
    TextLine {
        spans: vec![span],
        wrap,
    }
}

/// One point below the given size, never below 1.
fn smaller(size: u32) -> u32 {
    size.saturating_sub(1).max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
