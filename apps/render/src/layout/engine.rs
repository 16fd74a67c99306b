//! Layout engine: measures a composed document into absolute paper geometry.
//!
//! Measurement is two-phase: [`LayoutEngine::request`] captures the document and the
//! resolved fonts, [`LayoutRequest::settle`] runs the deterministic measure pass and
//! checks the resulting bounds. No sleeping, no polling a live surface: if a pass
//! reads degenerate bounds it is re-run (bounded), first with the requested fonts,
//! then with the body font everywhere.
//!
//! Paper geometry (layout units, 1 unit = 1 px at raster scale 1):
//!
//! ```text
//!  ┌──────────────────────── paper_width ────────────────────────┐
//!  │ padding                                                     │
//!  │ (padding+10) NAME                                           │
//!  │              ✉ mail | 📱 phone | 📍 address                  │
//!  │              ═══════════ divider (content width) ═══════════ │
//!  │              section_spacing                                │
//!  │              ▌ TITLE                                        │
//!  │                   body lines / skill pills (indent 20)      │
//!  │ padding                                                     │
//!  └─────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compose::{
    FontRole, PaperBorder, SectionBody, SectionKind, TagList, TextLine, TextSpan,
    VisualDocument, Weight,
};
use crate::errors::LayoutError;
use crate::models::{HexColor, StyleProfile};

use super::font_metrics::{get_metrics, resolve_family, FontFamily};
use super::wrap::{wrap_items, wrap_words, WrappedLine};

/// Paper width never goes below this, whatever the profile asks for.
pub const MIN_PAPER_WIDTH: f32 = 400.0;
/// Padding is clamped so header and section content keep at least this much width.
pub const MIN_CONTENT_WIDTH: f32 = 200.0;
/// Line box height as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.25;
/// Baseline position inside the glyph box, as a fraction of font size.
const ASCENT_RATIO: f32 = 0.8;

/// Paper padding is `padding` vertically and `padding + 10` horizontally.
const HORIZONTAL_PADDING_EXTRA: f32 = 10.0;
const HEADER_SPACING: f32 = 5.0;
const CONTACT_PAD_TOP: f32 = 10.0;
const CONTACT_PAD_BOTTOM: f32 = 20.0;

const TITLE_BAR_WIDTH: f32 = 4.0;
const TITLE_BAR_HEIGHT: f32 = 20.0;
const TITLE_BAR_GAP: f32 = 10.0;
const BODY_PAD_TOP: f32 = 10.0;
const BODY_INDENT: f32 = 20.0;
const BODY_LINE_SPACING: f32 = 5.0;
/// Horizontal gap between spans of a non-wrapping row.
const SPAN_GAP: f32 = 10.0;

const TAG_PAD_X: f32 = 12.0;
const TAG_PAD_Y: f32 = 5.0;
pub const TAG_RADIUS: f32 = 15.0;
const TAG_GAP: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Settings and output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Floor for the final paper height.
    pub min_height: f32,
    /// Upper bound on measure passes during settle.
    pub settle_passes: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            min_height: 900.0,
            settle_passes: 3,
        }
    }
}

/// A positioned run of text. `top`/`line_height` describe the line box it sits in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub top: f32,
    pub baseline: f32,
    pub line_height: f32,
    pub width: f32,
    pub size: f32,
    pub family: FontFamily,
    pub weight: Weight,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacedElement {
    Text(PlacedText),
    /// Filled box: section color bars and skill pills.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: HexColor,
    },
    /// Horizontal stroke; `y` is the top edge.
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: HexColor,
    },
}

impl PlacedElement {
    /// Lowest y this element covers.
    pub fn bottom(&self) -> f32 {
        match self {
            PlacedElement::Text(text) => text.top + text.line_height,
            PlacedElement::Rect { y, height, .. } => y + height,
            PlacedElement::Rule { y, thickness, .. } => y + thickness,
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            PlacedElement::Text(t) => {
                t.x.is_finite() && t.top.is_finite() && t.width.is_finite() && t.size.is_finite()
            }
            PlacedElement::Rect {
                x, y, width, height, ..
            } => x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite(),
            PlacedElement::Rule {
                x, y, width, thickness, ..
            } => x.is_finite() && y.is_finite() && width.is_finite() && thickness.is_finite(),
        }
    }
}

/// Vertical extent of one body section, spacing above the title included.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredSection {
    pub kind: SectionKind,
    pub title: String,
    pub top: f32,
    pub height: f32,
}

/// The document after layout: fixed width, content-driven height, absolute elements.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredDocument {
    pub width: f32,
    pub height: f32,
    /// Sum of header, sections and vertical padding.
    pub natural_height: f32,
    /// Largest bottom edge over all placed elements.
    pub extent_y: f32,
    pub background: HexColor,
    pub border: Option<PaperBorder>,
    /// Family the rasterizer falls back to when a glyph run's own family is missing.
    pub body_family: FontFamily,
    pub elements: Vec<PlacedElement>,
    pub sections: Vec<MeasuredSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and fonts resolved from one style profile.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    paper_width: f32,
    padding: f32,
    section_spacing: f32,
    header_family: FontFamily,
    body_family: FontFamily,
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(style: &StyleProfile, settings: &LayoutSettings) -> Self {
        let fields = &style.fields;
        let body_family = resolve_family(&fields.body_font, &fields.body_font);
        let header_family = resolve_family(&fields.header_font, &fields.body_font);

        let paper_width = fields.paper_width.max(MIN_PAPER_WIDTH);
        if paper_width != fields.paper_width {
            debug!(
                requested = fields.paper_width,
                applied = paper_width,
                "Paper width raised to minimum"
            );
        }

        let padding = clamp_padding(fields.padding, paper_width);
        if padding != fields.padding && fields.padding.is_finite() {
            warn!(
                requested = fields.padding,
                applied = padding,
                "Padding out of range for paper width, clamped"
            );
        }

        LayoutEngine {
            paper_width,
            padding,
            section_spacing: fields.section_spacing,
            header_family,
            body_family,
            settings: *settings,
        }
    }

    pub fn paper_width(&self) -> f32 {
        self.paper_width
    }

    /// Width available to header and section content; also the divider length.
    pub fn content_width(&self) -> f32 {
        self.paper_width - 2.0 * self.horizontal_padding()
    }

    pub fn header_family(&self) -> FontFamily {
        self.header_family
    }

    pub fn body_family(&self) -> FontFamily {
        self.body_family
    }

    fn horizontal_padding(&self) -> f32 {
        self.padding + HORIZONTAL_PADDING_EXTRA
    }

    /// First phase: pin the document to this engine. Nothing is measured yet.
    pub fn request<'a>(&'a self, document: &'a VisualDocument) -> LayoutRequest<'a> {
        LayoutRequest {
            engine: self,
            document,
        }
    }
}

/// A pending measurement of one document.
pub struct LayoutRequest<'a> {
    engine: &'a LayoutEngine,
    document: &'a VisualDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontStrategy {
    Requested,
    BodyOnly,
}

impl LayoutRequest<'_> {
    /// Second phase: measure until the bounds are usable, at most `settle_passes` times.
    pub fn settle(self) -> Result<MeasuredDocument, LayoutError> {
        let passes = self.engine.settings.settle_passes.max(1);
        let mut last = (f32::NAN, f32::NAN);

        for pass in 0..passes {
            let strategy = if pass == 0 {
                FontStrategy::Requested
            } else {
                FontStrategy::BodyOnly
            };
            let measured = Measurer::new(self.engine, strategy).measure(self.document);

            if is_settled(&measured, self.engine.content_width()) {
                debug!(
                    pass,
                    width = measured.width,
                    height = measured.height,
                    elements = measured.elements.len(),
                    "Layout settled"
                );
                return Ok(measured);
            }

            warn!(
                pass,
                width = measured.width,
                height = measured.height,
                "Degenerate layout bounds, re-measuring"
            );
            last = (measured.width, measured.height);
        }

        Err(LayoutError::Degenerate {
            passes,
            width: last.0,
            height: last.1,
        })
    }
}

/// Keeps finite padding within `[0, max]`, where `max` leaves [`MIN_CONTENT_WIDTH`]
/// between the horizontal paddings. Non-finite padding passes through for settle to
/// reject.
fn clamp_padding(padding: f32, paper_width: f32) -> f32 {
    if !padding.is_finite() {
        return padding;
    }
    let max = ((paper_width - MIN_CONTENT_WIDTH) / 2.0 - HORIZONTAL_PADDING_EXTRA).max(0.0);
    padding.clamp(0.0, max)
}

fn is_settled(measured: &MeasuredDocument, content_width: f32) -> bool {
    let positive = |v: f32| v.is_finite() && v > 0.0;
    positive(measured.width)
        && positive(measured.height)
        && positive(content_width)
        && measured.elements.iter().all(PlacedElement::is_finite)
}

fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR
}

/// Distance from the top of a line box to the baseline.
fn baseline_offset(size: f32) -> f32 {
    size * (LINE_HEIGHT_FACTOR - 1.0) / 2.0 + size * ASCENT_RATIO
}

// ────────────────────────────────────────────────────────────────────────────
// Measure pass
// ────────────────────────────────────────────────────────────────────────────

struct Measurer<'a> {
    engine: &'a LayoutEngine,
    strategy: FontStrategy,
    elements: Vec<PlacedElement>,
    sections: Vec<MeasuredSection>,
}

impl<'a> Measurer<'a> {
    fn new(engine: &'a LayoutEngine, strategy: FontStrategy) -> Self {
        Measurer {
            engine,
            strategy,
            elements: Vec::new(),
            sections: Vec::new(),
        }
    }

    fn family(&self, role: FontRole) -> FontFamily {
        match (self.strategy, role) {
            (FontStrategy::Requested, FontRole::Header) => self.engine.header_family,
            _ => self.engine.body_family,
        }
    }

    fn measure(mut self, document: &VisualDocument) -> MeasuredDocument {
        let engine = self.engine;
        let left = engine.horizontal_padding();
        let content_width = engine.content_width();

        let mut y = engine.padding;
        y = self.place_header(document, left, y, content_width);

        for section in &document.sections {
            let top = y;
            y += engine.section_spacing;
            y = self.place_section_title(
                section.title.as_str(),
                section.title_size,
                &section.accent,
                left,
                y,
            );
            y += BODY_PAD_TOP;

            let body_x = left + BODY_INDENT;
            let body_width = content_width - BODY_INDENT;
            y += match &section.body {
                SectionBody::Lines(lines) => self.place_lines(lines, body_x, y, body_width),
                SectionBody::Tags(tags) => self.place_tags(tags, body_x, y, body_width),
            };

            self.sections.push(MeasuredSection {
                kind: section.kind,
                title: section.title.clone(),
                top,
                height: y - top,
            });
        }

        let natural_height = y + engine.padding;
        let extent_y = self
            .elements
            .iter()
            .map(PlacedElement::bottom)
            .fold(0.0_f32, f32::max);
        let height = natural_height
            .max(engine.settings.min_height)
            .max(extent_y);

        MeasuredDocument {
            width: engine.paper_width,
            height,
            natural_height,
            extent_y,
            background: document.background.clone(),
            border: document.border.clone(),
            body_family: engine.body_family,
            elements: self.elements,
            sections: self.sections,
        }
    }

    /// Name, contact row, divider. Returns the y below the divider.
    fn place_header(
        &mut self,
        document: &VisualDocument,
        left: f32,
        top: f32,
        width: f32,
    ) -> f32 {
        let header = &document.header;
        let mut y = top;

        y += self.place_row(std::slice::from_ref(&header.name), left, y, width);
        y += HEADER_SPACING;

        if !header.contact_items.is_empty() {
            y += CONTACT_PAD_TOP;
            let font = LineFont {
                size: header.contact_size as f32,
                family: self.family(FontRole::Body),
                weight: Weight::Regular,
                color: &header.contact_color,
            };
            let lines = wrap_items(
                &header.contact_items,
                &header.separator,
                get_metrics(font.family),
                font.size,
                font.weight,
                width,
            );
            for line in lines {
                y += self.push_line(line, left, y, font);
            }
            y += CONTACT_PAD_BOTTOM + HEADER_SPACING;
        }

        self.elements.push(PlacedElement::Rule {
            x: left,
            y,
            width,
            thickness: header.divider.thickness,
            color: header.divider.color.clone(),
        });
        y + header.divider.thickness
    }

    /// Accent bar plus bold title. Returns the y below the title row.
    fn place_section_title(
        &mut self,
        title: &str,
        size: u32,
        accent: &HexColor,
        left: f32,
        top: f32,
    ) -> f32 {
        let size = size as f32;
        let text_height = line_height(size);
        let row_height = text_height.max(TITLE_BAR_HEIGHT);

        self.elements.push(PlacedElement::Rect {
            x: left,
            y: top + (row_height - TITLE_BAR_HEIGHT) / 2.0,
            width: TITLE_BAR_WIDTH,
            height: TITLE_BAR_HEIGHT,
            radius: 0.0,
            fill: accent.clone(),
        });

        let family = self.family(FontRole::Header);
        let text_top = top + (row_height - text_height) / 2.0;
        self.elements.push(PlacedElement::Text(PlacedText {
            text: title.to_string(),
            x: left + TITLE_BAR_WIDTH + TITLE_BAR_GAP,
            top: text_top,
            baseline: text_top + baseline_offset(size),
            line_height: text_height,
            width: get_metrics(family).measure_px(title, size, Weight::Bold),
            size,
            family,
            weight: Weight::Bold,
            color: accent.clone(),
        }));

        top + row_height
    }

    /// Stacked body rows with fixed spacing between them. Returns the total height.
    fn place_lines(&mut self, lines: &[TextLine], x: f32, top: f32, width: f32) -> f32 {
        let mut y = top;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                y += BODY_LINE_SPACING;
            }
            y += if line.wrap {
                self.place_wrapped(&line.spans, x, y, width)
            } else {
                self.place_row(&line.spans, x, y, width)
            };
        }
        y - top
    }

    /// Spans side by side on a shared baseline. A span that does not fit after its
    /// neighbours moves to the next row; a span wider than the row on its own is
    /// word-wrapped. Returns the total height.
    fn place_row(&mut self, spans: &[TextSpan], x: f32, top: f32, width: f32) -> f32 {
        let mut rows: Vec<Vec<RowPiece>> = vec![Vec::new()];
        let mut cursor = 0.0_f32;

        for span in spans {
            let size = span.size as f32;
            let family = self.family(span.role);
            let metrics = get_metrics(family);
            let full = metrics.measure_px(&span.text, size, span.weight);

            let pieces = if full <= width {
                vec![WrappedLine {
                    text: span.text.clone(),
                    width: full,
                }]
            } else {
                wrap_words(&span.text, metrics, size, span.weight, width)
            };

            for (i, line) in pieces.into_iter().enumerate() {
                let row_is_empty = rows.last().map_or(true, Vec::is_empty);
                if !row_is_empty && (i > 0 || cursor + line.width > width) {
                    rows.push(Vec::new());
                    cursor = 0.0;
                }
                cursor += line.width + SPAN_GAP;
                if let Some(row) = rows.last_mut() {
                    row.push(RowPiece { span, family, line });
                }
            }
        }

        let mut y = top;
        for row in rows.iter().filter(|row| !row.is_empty()) {
            let max_size = row.iter().map(|p| p.span.size as f32).fold(0.0_f32, f32::max);
            let row_height = line_height(max_size);
            let baseline = y + baseline_offset(max_size);

            let mut cursor = x;
            for piece in row {
                self.elements.push(PlacedElement::Text(PlacedText {
                    text: piece.line.text.clone(),
                    x: cursor,
                    top: y,
                    baseline,
                    line_height: row_height,
                    width: piece.line.width,
                    size: piece.span.size as f32,
                    family: piece.family,
                    weight: piece.span.weight,
                    color: piece.span.color.clone(),
                }));
                cursor += piece.line.width + SPAN_GAP;
            }
            y += row_height;
        }
        y - top
    }

    /// Word-wrapped paragraph; each span wraps as its own block. Returns the height.
    fn place_wrapped(&mut self, spans: &[TextSpan], x: f32, top: f32, width: f32) -> f32 {
        let mut y = top;
        for span in spans {
            let font = LineFont {
                size: span.size as f32,
                family: self.family(span.role),
                weight: span.weight,
                color: &span.color,
            };
            let metrics = get_metrics(font.family);
            for line in wrap_words(&span.text, metrics, font.size, font.weight, width) {
                y += self.push_line(line, x, y, font);
            }
        }
        y - top
    }

    /// One already-wrapped line in its own line box. Returns the line height.
    fn push_line(&mut self, line: WrappedLine, x: f32, top: f32, font: LineFont<'_>) -> f32 {
        let height = line_height(font.size);
        self.elements.push(PlacedElement::Text(PlacedText {
            text: line.text,
            x,
            top,
            baseline: top + baseline_offset(font.size),
            line_height: height,
            width: line.width,
            size: font.size,
            family: font.family,
            weight: font.weight,
            color: font.color.clone(),
        }));
        height
    }

    /// Skill pills in a left-to-right flow that wraps at `width`. A tag too long for
    /// a row gets a taller pill with its text wrapped inside. Returns the height.
    fn place_tags(&mut self, tags: &TagList, x: f32, top: f32, width: f32) -> f32 {
        if tags.tags.is_empty() {
            return 0.0;
        }
        let font = LineFont {
            size: tags.size as f32,
            family: self.family(FontRole::Body),
            weight: Weight::Regular,
            color: &tags.text_color,
        };
        let size = font.size;
        let metrics = get_metrics(font.family);
        let text_height = line_height(size);
        let max_text_width = (width - 2.0 * TAG_PAD_X).max(0.0);

        let mut row_top = top;
        let mut row_height = 0.0_f32;
        let mut cursor = 0.0_f32;
        for tag in &tags.tags {
            let full = metrics.measure_px(tag, size, Weight::Regular);
            let lines = if full <= max_text_width {
                vec![WrappedLine {
                    text: tag.clone(),
                    width: full,
                }]
            } else {
                wrap_words(tag, metrics, size, Weight::Regular, max_text_width)
            };
            let text_width = lines.iter().map(|l| l.width).fold(0.0_f32, f32::max);
            let pill_width = text_width + 2.0 * TAG_PAD_X;
            let pill_height = text_height * lines.len() as f32 + 2.0 * TAG_PAD_Y;

            if cursor > 0.0 && cursor + pill_width > width {
                row_top += row_height + TAG_GAP;
                row_height = 0.0;
                cursor = 0.0;
            }

            self.elements.push(PlacedElement::Rect {
                x: x + cursor,
                y: row_top,
                width: pill_width,
                height: pill_height,
                radius: TAG_RADIUS,
                fill: tags.fill.clone(),
            });
            let mut text_top = row_top + TAG_PAD_Y;
            for line in lines {
                text_top += self.push_line(line, x + cursor + TAG_PAD_X, text_top, font);
            }
            cursor += pill_width + TAG_GAP;
            row_height = row_height.max(pill_height);
        }

        row_top + row_height - top
    }
}

#[derive(Clone, Copy)]
struct LineFont<'c> {
    size: f32,
    family: FontFamily,
    weight: Weight,
    color: &'c HexColor,
}

/// A span, or one wrapped piece of it, waiting for its row's baseline.
struct RowPiece<'s> {
    span: &'s TextSpan,
    family: FontFamily,
    line: WrappedLine,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_document;
    use crate::models::{BaseTheme, ResumeRecord};

    fn measure(record: &ResumeRecord, style: &StyleProfile) -> MeasuredDocument {
        let document = compose_document(record, style);
        let engine = LayoutEngine::new(style, &LayoutSettings::default());
        engine.request(&document).settle().unwrap()
    }

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            name: Some("Grace Hopper".to_string()),
            email: Some("grace@example.com".to_string()),
            phone: Some("555-0199".to_string()),
            institution: Some("Yale University".to_string()),
            degree: Some("PhD Mathematics".to_string()),
            year: Some("1934".to_string()),
            job_title: Some("Rear Admiral".to_string()),
            company: Some("US Navy".to_string()),
            duration: Some("1943-1986".to_string()),
            description: Some("Led development of COBOL. ".repeat(30)),
            skills: Some("Compilers, COBOL, FLOW-MATIC, Leadership, Teaching".to_string()),
            ..Default::default()
        }
    }

    fn texts(doc: &MeasuredDocument) -> Vec<&PlacedText> {
        doc.elements
            .iter()
            .filter_map(|e| match e {
                PlacedElement::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_width_comes_from_profile() {
        let doc = measure(&sample_record(), &StyleProfile::default());
        assert_eq!(doc.width, 650.0);
    }

    #[test]
    fn test_paper_width_floor() {
        let mut style = StyleProfile::default();
        style.fields.paper_width = 120.0;
        let engine = LayoutEngine::new(&style, &LayoutSettings::default());
        assert_eq!(engine.paper_width(), MIN_PAPER_WIDTH);
    }

    #[test]
    fn test_divider_spans_content_width() {
        let style = StyleProfile::default();
        let doc = measure(&ResumeRecord::default(), &style);
        let rule = doc
            .elements
            .iter()
            .find_map(|e| match e {
                PlacedElement::Rule { width, thickness, .. } => Some((*width, *thickness)),
                _ => None,
            })
            .unwrap();
        // 650 - 2 * (50 + 10)
        assert_eq!(rule, (530.0, 3.0));
    }

    #[test]
    fn test_empty_record_uses_minimum_height() {
        let doc = measure(&ResumeRecord::default(), &StyleProfile::default());
        assert!(doc.sections.is_empty());
        assert_eq!(doc.height, 900.0);
        assert!(doc.natural_height < 900.0);
    }

    #[test]
    fn test_height_covers_all_content() {
        let doc = measure(&sample_record(), &StyleProfile::default());
        assert!(doc.height >= doc.natural_height);
        assert!(doc.height >= doc.extent_y);
        for element in &doc.elements {
            assert!(element.bottom() <= doc.height, "{element:?} clipped");
        }
    }

    #[test]
    fn test_long_description_grows_past_minimum() {
        let mut record = sample_record();
        record.description = Some("Shipped the compiler toolchain. ".repeat(200));
        let doc = measure(&record, &StyleProfile::default());
        assert!(doc.height > 900.0);
        assert_eq!(doc.height, doc.natural_height.max(doc.extent_y));
    }

    #[test]
    fn test_narrower_paper_wraps_into_more_lines() {
        let record = sample_record();
        let mut wide = StyleProfile::default();
        wide.fields.paper_width = 900.0;
        let mut narrow = StyleProfile::default();
        narrow.fields.paper_width = 450.0;
        let wide_doc = measure(&record, &wide);
        let narrow_doc = measure(&record, &narrow);
        assert!(texts(&narrow_doc).len() > texts(&wide_doc).len());
        assert!(narrow_doc.natural_height > wide_doc.natural_height);
    }

    #[test]
    fn test_wrapped_lines_stay_inside_body_width() {
        let style = StyleProfile::default();
        let engine = LayoutEngine::new(&style, &LayoutSettings::default());
        let right_edge = engine.horizontal_padding() + engine.content_width();
        let doc = measure(&sample_record(), &style);
        for text in texts(&doc) {
            if text.text.starts_with("Led development") {
                assert!(text.x + text.width <= right_edge + 1e-3, "{text:?}");
            }
        }
    }

    #[test]
    fn test_sections_are_ordered_and_disjoint() {
        let doc = measure(&sample_record(), &StyleProfile::new(BaseTheme::Modern));
        let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Education, SectionKind::Experience, SectionKind::Skills]
        );
        for pair in doc.sections.windows(2) {
            assert!(pair[0].top + pair[0].height <= pair[1].top + 1e-3);
        }
    }

    #[test]
    fn test_skill_pills_wrap_in_narrow_paper() {
        let mut style = StyleProfile::default();
        style.fields.paper_width = 400.0;
        let record = ResumeRecord {
            skills: Some(
                "Distributed Systems, Compilers, Type Theory, Databases, Networking".to_string(),
            ),
            ..Default::default()
        };
        let doc = measure(&record, &style);
        let pill_tops: Vec<f32> = doc
            .elements
            .iter()
            .filter_map(|e| match e {
                PlacedElement::Rect { y, radius, .. } if *radius == TAG_RADIUS => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(pill_tops.len(), 5);
        assert!(pill_tops.iter().any(|y| *y > pill_tops[0]), "pills should wrap");
    }

    #[test]
    fn test_unknown_font_falls_back_to_body() {
        let mut style = StyleProfile::new(BaseTheme::Classic);
        style.fields.header_font = "Papyrus Deluxe".to_string();
        let engine = LayoutEngine::new(&style, &LayoutSettings::default());
        assert_eq!(engine.header_family(), FontFamily::TimesNewRoman);
        assert!(engine.request(&compose_document(&sample_record(), &style)).settle().is_ok());
    }

    #[test]
    fn test_degenerate_padding_fails_after_bounded_passes() {
        let mut style = StyleProfile::default();
        style.fields.padding = f32::NAN;
        let settings = LayoutSettings {
            min_height: 900.0,
            settle_passes: 2,
        };
        let document = compose_document(&sample_record(), &style);
        let engine = LayoutEngine::new(&style, &settings);
        match engine.request(&document).settle() {
            Err(LayoutError::Degenerate { passes, .. }) => assert_eq!(passes, 2),
            other => panic!("expected degenerate layout, got {other:?}"),
        }
    }

    #[test]
    fn test_padding_wider_than_paper_is_clamped() {
        let mut style = StyleProfile::default();
        style.fields.padding = 400.0;
        let engine = LayoutEngine::new(&style, &LayoutSettings::default());
        assert_eq!(engine.content_width(), MIN_CONTENT_WIDTH);

        let doc = engine
            .request(&compose_document(&sample_record(), &style))
            .settle()
            .unwrap();
        assert_eq!(doc.width, 650.0);
        let rule_width = doc.elements.iter().find_map(|e| match e {
            PlacedElement::Rule { width, .. } => Some(*width),
            _ => None,
        });
        assert_eq!(rule_width, Some(MIN_CONTENT_WIDTH));
    }

    #[test]
    fn test_negative_padding_is_clamped_to_zero() {
        let mut style = StyleProfile::default();
        style.fields.padding = -30.0;
        let engine = LayoutEngine::new(&style, &LayoutSettings::default());
        assert_eq!(engine.content_width(), 650.0 - 2.0 * HORIZONTAL_PADDING_EXTRA);
    }

    fn long_header_record() -> ResumeRecord {
        ResumeRecord {
            name: Some("Maximiliana Alexandrovna Konstantinopolskaya-Wellington".to_string()),
            email: Some("maximiliana.konstantinopolskaya@example.com".to_string()),
            phone: Some("+44 20 7946 0958".to_string()),
            address: Some("221B Baker Street, Marylebone, London".to_string()),
            degree: Some(
                "Doctor of Philosophy in Computational Linguistics and Formal Semantics"
                    .to_string(),
            ),
            institution: Some("University of Oxford".to_string()),
            job_title: Some(
                "Principal Engineer for Natural Language Infrastructure and Search".to_string(),
            ),
            duration: Some("January 2015 - December 2023".to_string()),
            company: Some("Example Corp".to_string()),
            skills: Some(
                "Statistical machine translation across low resource language pairs, Rust"
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_long_rows_stay_inside_paper() {
        for theme in BaseTheme::ALL {
            let style = StyleProfile::new(theme);
            let engine = LayoutEngine::new(&style, &LayoutSettings::default());
            let right_edge = engine.horizontal_padding() + engine.content_width();
            let doc = measure(&long_header_record(), &style);
            for text in texts(&doc) {
                assert!(
                    text.x + text.width <= right_edge + 1e-3,
                    "{theme:?}: text runs to x={}, content edge {right_edge}: {:?}",
                    text.x + text.width,
                    text.text
                );
                assert!(text.x + text.width <= doc.width);
            }
            for element in &doc.elements {
                if let PlacedElement::Rect { x, width, .. } = element {
                    assert!(x + width <= right_edge + 1e-3, "{theme:?}: {element:?}");
                }
            }
        }
    }

    #[test]
    fn test_long_name_wraps_onto_more_lines() {
        let style = StyleProfile::default();
        let doc = measure(&long_header_record(), &style);
        let name_size = style.fields.header_font_size as f32;
        let name_lines = texts(&doc)
            .into_iter()
            .filter(|t| t.size == name_size && t.weight == Weight::Bold)
            .count();
        assert!(name_lines > 1, "name should wrap");

        let short = measure(&sample_record(), &style);
        assert!(doc.sections[0].top > short.sections[0].top);
    }

    #[test]
    fn test_contact_row_breaks_between_items() {
        let style = StyleProfile::default();
        let doc = measure(&long_header_record(), &style);
        let contact_size = style.fields.body_font_size as f32;
        let divider_y = doc
            .elements
            .iter()
            .find_map(|e| match e {
                PlacedElement::Rule { y, .. } => Some(*y),
                _ => None,
            })
            .unwrap();
        let contact_lines: Vec<&PlacedText> = texts(&doc)
            .into_iter()
            .filter(|t| t.size == contact_size && t.top < divider_y)
            .collect();
        assert!(contact_lines.len() > 1);
        assert!(contact_lines.iter().any(|t| t.text.contains("Baker Street")));
        let separator = style.base_theme().contact_separator().trim();
        for line in contact_lines {
            assert!(!line.text.trim().starts_with(separator) || separator.is_empty());
        }
    }

    #[test]
    fn test_overflowing_duration_moves_below_title() {
        let style = StyleProfile::default();
        let doc = measure(&long_header_record(), &style);
        let all = texts(&doc);
        let title = all
            .iter()
            .find(|t| t.text.starts_with("Principal Engineer"))
            .unwrap();
        let duration = all.iter().find(|t| t.text.starts_with("(January")).unwrap();
        assert!(duration.top > title.top);
    }

    #[test]
    fn test_zero_minimum_height_uses_natural_height() {
        let style = StyleProfile::default();
        let settings = LayoutSettings {
            min_height: 0.0,
            settle_passes: 1,
        };
        let document = compose_document(&sample_record(), &style);
        let doc = LayoutEngine::new(&style, &settings)
            .request(&document)
            .settle()
            .unwrap();
        assert_eq!(doc.height, doc.natural_height.max(doc.extent_y));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let record = sample_record();
        let style = StyleProfile::new(BaseTheme::Creative);
        assert_eq!(measure(&record, &style), measure(&record, &style));
    }
}
