//! Static font-metric tables for the resume font families.
//!
//! Character widths are in em units (relative to font size). Measuring from static
//! tables keeps layout deterministic: the same record and profile always produce the
//! same geometry, whatever fonts the rasterizer later finds on the host.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::compose::Weight;

/// Bold glyphs run wider than regular ones; applied on top of the regular table.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

/// Symbols and pictographs (icons, bullets) are measured as one full em.
const WIDE_SYMBOL_WIDTH: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Font families the layout engine has metrics for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Default body face of most themes.
    SegoeUi,
    /// Professional header face.
    Georgia,
    /// Classic header and body face.
    TimesNewRoman,
    /// Creative header face, very wide.
    ArialBlack,
}

impl FontFamily {
    /// Family used when neither the requested nor the body family is known.
    pub const DEFAULT: FontFamily = FontFamily::SegoeUi;

    /// Looks a family up by its display name, ignoring case and whitespace.
    pub fn from_name(name: &str) -> Option<FontFamily> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "segoeui" => Some(FontFamily::SegoeUi),
            "georgia" => Some(FontFamily::Georgia),
            "timesnewroman" | "times" => Some(FontFamily::TimesNewRoman),
            "arialblack" => Some(FontFamily::ArialBlack),
            _ => None,
        }
    }

    /// The family name handed to the rasterizer.
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::SegoeUi => "Segoe UI",
            FontFamily::Georgia => "Georgia",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::ArialBlack => "Arial Black",
        }
    }

    /// Generic CSS family used as the rasterizer's last resort.
    pub fn generic(self) -> &'static str {
        match self {
            FontFamily::Georgia | FontFamily::TimesNewRoman => "serif",
            FontFamily::SegoeUi | FontFamily::ArialBlack => "sans-serif",
        }
    }
}

/// Resolves a requested family, falling back to the body family and then the default.
///
/// A miss is a silent degradation: it is logged, never surfaced as an error.
pub fn resolve_family(requested: &str, body: &str) -> FontFamily {
    if let Some(family) = FontFamily::from_name(requested) {
        return family;
    }
    let fallback = FontFamily::from_name(body).unwrap_or(FontFamily::DEFAULT);
    warn!(
        requested = %requested,
        fallback = %fallback.css_name(),
        "Font family unavailable, falling back"
    );
    fallback
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII text characters.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures a string in pixels at the given size and weight.
    pub fn measure_px(&self, s: &str, size_px: f32, weight: Weight) -> f32 {
        self.measure_str(s) * size_px * weight_factor(weight)
    }

    /// Width of a single space in pixels.
    pub fn space_px(&self, size_px: f32, weight: Weight) -> f32 {
        self.space_width * size_px * weight_factor(weight)
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if code >= 0x2000 {
            WIDE_SYMBOL_WIDTH
        } else {
            self.average_char_width
        }
    }
}

fn weight_factor(weight: Weight) -> f32 {
    match weight {
        Weight::Regular => 1.0,
        Weight::Bold => BOLD_WIDTH_FACTOR,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Segoe UI, humanist sans-serif.
static SEGOE_UI_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::SegoeUi,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.24, 0.29, 0.37, 0.54, 0.54, 0.86, 0.65, 0.21, 0.32, 0.32, 0.38, 0.57, 0.27, 0.32, 0.27, 0.30,
        // 0     1     2     3     4     5     6     7     8     9
        0.54, 0.54, 0.54, 0.54, 0.54, 0.54, 0.54, 0.54, 0.54, 0.54,
        // :     ;     <     =     >     ?     @
        0.27, 0.27, 0.57, 0.57, 0.57, 0.48, 0.99,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.65, 0.59, 0.59, 0.65, 0.54, 0.48, 0.65, 0.65, 0.24, 0.38, 0.59, 0.51, 0.76,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.65, 0.70, 0.54, 0.70, 0.59, 0.48, 0.54, 0.65, 0.65, 0.86, 0.59, 0.59, 0.54,
        // [     \     ]     ^     _     `
        0.27, 0.30, 0.27, 0.46, 0.54, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.54, 0.54, 0.48, 0.54, 0.54, 0.30, 0.54, 0.54, 0.21, 0.21, 0.51, 0.21, 0.81,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.54, 0.54, 0.54, 0.54, 0.32, 0.43, 0.38, 0.54, 0.48, 0.70, 0.48, 0.48, 0.43,
        // {     |     }     ~
        0.32, 0.25, 0.32, 0.57,
    ],
    average_char_width: 0.50,
    space_width: 0.24,
};

/// Georgia, wide transitional serif.
static GEORGIA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Georgia,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.26, 0.31, 0.40, 0.58, 0.58, 0.93, 0.70, 0.23, 0.34, 0.34, 0.41, 0.61, 0.29, 0.34, 0.29, 0.32,
        // 0     1     2     3     4     5     6     7     8     9
        0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58,
        // :     ;     <     =     >     ?     @
        0.29, 0.29, 0.61, 0.61, 0.61, 0.52, 1.06,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.70, 0.63, 0.63, 0.70, 0.58, 0.52, 0.70, 0.70, 0.26, 0.41, 0.63, 0.55, 0.81,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.70, 0.75, 0.58, 0.75, 0.63, 0.52, 0.58, 0.70, 0.70, 0.93, 0.63, 0.63, 0.58,
        // [     \     ]     ^     _     `
        0.29, 0.32, 0.29, 0.49, 0.58, 0.35,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.58, 0.58, 0.52, 0.58, 0.58, 0.32, 0.58, 0.58, 0.23, 0.23, 0.55, 0.23, 0.86,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.58, 0.58, 0.58, 0.58, 0.34, 0.46, 0.41, 0.58, 0.52, 0.75, 0.52, 0.52, 0.46,
        // {     |     }     ~
        0.34, 0.27, 0.34, 0.61,
    ],
    average_char_width: 0.54,
    space_width: 0.26,
};

/// Times New Roman, narrow old-style serif.
static TIMES_NEW_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesNewRoman,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.22, 0.27, 0.34, 0.50, 0.50, 0.79, 0.60, 0.20, 0.29, 0.29, 0.35, 0.53, 0.25, 0.29, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.91,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.60, 0.54, 0.54, 0.60, 0.50, 0.45, 0.60, 0.60, 0.22, 0.35, 0.54, 0.47, 0.69,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.60, 0.64, 0.50, 0.64, 0.54, 0.45, 0.50, 0.60, 0.60, 0.79, 0.54, 0.54, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.47, 0.20, 0.74,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.29, 0.39, 0.35, 0.50, 0.45, 0.64, 0.45, 0.45, 0.39,
        // {     |     }     ~
        0.29, 0.23, 0.29, 0.53,
    ],
    average_char_width: 0.46,
    space_width: 0.22,
};

/// Arial Black, heavy display sans-serif.
static ARIAL_BLACK_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::ArialBlack,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.31, 0.37, 0.47, 0.69, 0.69, 1.10, 0.83, 0.27, 0.41, 0.41, 0.48, 0.73, 0.35, 0.41, 0.35, 0.38,
        // 0     1     2     3     4     5     6     7     8     9
        0.69, 0.69, 0.69, 0.69, 0.69, 0.69, 0.69, 0.69, 0.69, 0.69,
        // :     ;     <     =     >     ?     @
        0.35, 0.35, 0.73, 0.73, 0.73, 0.62, 1.26,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.83, 0.76, 0.76, 0.83, 0.69, 0.62, 0.83, 0.83, 0.31, 0.48, 0.76, 0.66, 0.97,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.83, 0.89, 0.69, 0.89, 0.76, 0.62, 0.69, 0.83, 0.83, 1.10, 0.76, 0.76, 0.69,
        // [     \     ]     ^     _     `
        0.35, 0.38, 0.35, 0.58, 0.69, 0.42,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.69, 0.69, 0.62, 0.69, 0.69, 0.38, 0.69, 0.69, 0.27, 0.27, 0.66, 0.27, 1.03,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.69, 0.69, 0.69, 0.69, 0.41, 0.55, 0.48, 0.69, 0.62, 0.89, 0.62, 0.62, 0.55,
        // {     |     }     ~
        0.41, 0.32, 0.41, 0.73,
    ],
    average_char_width: 0.64,
    space_width: 0.31,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::SegoeUi => &SEGOE_UI_TABLE,
        FontFamily::Georgia => &GEORGIA_TABLE,
        FontFamily::TimesNewRoman => &TIMES_NEW_ROMAN_TABLE,
        FontFamily::ArialBlack => &ARIAL_BLACK_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
