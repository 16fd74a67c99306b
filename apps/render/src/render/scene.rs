//! Serializes a measured document into an SVG scene for the rasterizer.
//!
//! Geometry is emitted in layout units under a `viewBox`; the outer `width`/`height`
//! carry the raster scale, so the rasterizer renders at pixel size directly.

use std::fmt::Write as _;

use crate::compose::Weight;
use crate::layout::{FontFamily, MeasuredDocument, PlacedElement, PlacedText};
use crate::models::{HexColor, Rgb};

const BORDER_WIDTH: f32 = 2.0;
const BORDER_DASH: &str = "8 4";

/// An SVG document plus the pixel size it rasterizes to.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgScene {
    pub markup: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Family handed to the rasterizer as its default.
    pub default_family: FontFamily,
}

/// Pixel size of a document at `scale`. Zero when the document has no area.
pub fn pixel_size(document: &MeasuredDocument, scale: f32) -> (u32, u32) {
    let px = |v: f32| {
        let scaled = (v * scale).ceil();
        if scaled.is_finite() && scaled > 0.0 {
            scaled as u32
        } else {
            0
        }
    };
    (px(document.width), px(document.height))
}

pub fn build_scene(document: &MeasuredDocument, scale: f32) -> SvgScene {
    let (pixel_width, pixel_height) = pixel_size(document, scale);
    let (w, h) = (document.width, document.height);

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{pixel_width}" height="{pixel_height}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        fill(&document.background, Rgb::WHITE)
    );

    for element in &document.elements {
        match element {
            PlacedElement::Text(text) => push_text(&mut svg, text, document.body_family),
            PlacedElement::Rect {
                x,
                y,
                width,
                height,
                radius,
                fill: color,
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" ry="{radius}" fill="{}"/>"#,
                    fill(color, Rgb::NEUTRAL)
                );
            }
            PlacedElement::Rule {
                x,
                y,
                width,
                thickness,
                color,
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{thickness}" fill="{}"/>"#,
                    fill(color, Rgb::NEUTRAL)
                );
            }
        }
    }

    if let Some(border) = &document.border {
        let inset = BORDER_WIDTH / 2.0;
        let dash = if border.dashed {
            format!(r#" stroke-dasharray="{BORDER_DASH}""#)
        } else {
            String::new()
        };
        let _ = write!(
            svg,
            r#"<rect x="{inset}" y="{inset}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{BORDER_WIDTH}"{dash}/>"#,
            w - BORDER_WIDTH,
            h - BORDER_WIDTH,
            fill(&border.color, Rgb::NEUTRAL)
        );
    }

    svg.push_str("</svg>");

    SvgScene {
        markup: svg,
        pixel_width,
        pixel_height,
        default_family: document.body_family,
    }
}

fn push_text(svg: &mut String, text: &PlacedText, body: FontFamily) {
    let weight = match text.weight {
        Weight::Regular => "normal",
        Weight::Bold => "bold",
    };
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{weight}" fill="{}" xml:space="preserve">{}</text>"#,
        text.x,
        text.baseline,
        family_chain(text.family, body),
        text.size,
        fill(&text.color, Rgb::NEUTRAL),
        escape_xml(&text.text)
    );
}

/// Requested family, then the body family, then the generic fallback.
fn family_chain(family: FontFamily, body: FontFamily) -> String {
    if family == body {
        format!("'{}', {}", family.css_name(), family.generic())
    } else {
        format!(
            "'{}', '{}', {}",
            family.css_name(),
            body.css_name(),
            family.generic()
        )
    }
}

fn fill(color: &HexColor, fallback: Rgb) -> String {
    color.resolve_or(fallback).to_hex()
}

/// Escapes markup characters and drops characters XML 1.0 does not allow at all
/// (C0 controls other than tab, newline and carriage return, U+FFFE and U+FFFF).
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(ch),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_document;
    use crate::layout::{LayoutEngine, LayoutSettings};
    use crate::models::{BorderStyle, ResumeRecord, StyleProfile};

    fn measured(record: &ResumeRecord, style: &StyleProfile) -> MeasuredDocument {
        let document = compose_document(record, style);
        LayoutEngine::new(style, &LayoutSettings::default())
            .request(&document)
            .settle()
            .unwrap()
    }

    #[test]
    fn test_pixel_size_follows_scale() {
        let doc = measured(&ResumeRecord::default(), &StyleProfile::default());
        assert_eq!(pixel_size(&doc, 1.0), (650, 900));
        assert_eq!(pixel_size(&doc, 2.0), (1300, 1800));
        assert_eq!(pixel_size(&doc, 0.0), (0, 0));
    }

    #[test]
    fn test_text_is_escaped() {
        let record = ResumeRecord {
            company: Some("Smith & <Sons>".to_string()),
            ..Default::default()
        };
        let scene = build_scene(&measured(&record, &StyleProfile::default()), 1.0);
        assert!(scene.markup.contains("Smith &amp; &lt;Sons&gt;"));
        assert!(!scene.markup.contains("<Sons>"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(escape_xml("Ada\u{1}Love\u{b}lace\u{1f}"), "AdaLovelace");
        assert_eq!(escape_xml("tab\there"), "tab\there");
        assert_eq!(escape_xml("\u{fffe}ok"), "ok");
    }

    #[test]
    fn test_pasted_control_character_still_rasterizes() {
        use crate::render::{RasterSurface, SvgSurface};

        let record = ResumeRecord {
            name: Some("Ada\u{1}Lovelace".to_string()),
            company: Some("Analytical\u{c}Engines".to_string()),
            ..Default::default()
        };
        let scene = build_scene(&measured(&record, &StyleProfile::default()), 1.0);
        assert!(scene.markup.contains("ADALOVELACE"));
        let pixmap = SvgSurface::without_fonts().rasterize(&scene);
        assert!(pixmap.is_some(), "scene with control characters failed to parse");
    }

    #[test]
    fn test_font_chain_ends_in_body_and_generic() {
        let scene = build_scene(
            &measured(&ResumeRecord::default(), &StyleProfile::default()),
            1.0,
        );
        assert!(scene.markup.contains("font-family=\"'Georgia', 'Segoe UI', serif\""));
        assert_eq!(scene.default_family, FontFamily::SegoeUi);
    }

    #[test]
    fn test_dashed_border_and_background() {
        let mut style = StyleProfile::default();
        style.fields.border_style = BorderStyle::Dashed;
        style.fields.background_color = "#fafafa".into();
        let scene = build_scene(&measured(&ResumeRecord::default(), &style), 1.0);
        assert!(scene.markup.contains("stroke-dasharray=\"8 4\""));
        assert!(scene.markup.contains("fill=\"#fafafa\""));

        style.fields.use_borders = false;
        let scene = build_scene(&measured(&ResumeRecord::default(), &style), 1.0);
        assert!(!scene.markup.contains("stroke="));
    }

    #[test]
    fn test_invalid_colors_fall_back() {
        let mut style = StyleProfile::default();
        style.fields.background_color = "paper".into();
        style.fields.header_text_color = "ink".into();
        let scene = build_scene(&measured(&ResumeRecord::default(), &style), 1.0);
        assert!(scene.markup.contains("fill=\"#ffffff\""));
        assert!(scene.markup.contains("fill=\"#555555\""));
    }
}
