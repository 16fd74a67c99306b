//! Greedy word wrap in layout pixels.
//!
//! Breaks happen between words. A word is only split inside when it is wider than a
//! whole line on its own; it is then cut at character boundaries so no line overflows.

use crate::compose::Weight;

use super::font_metrics::FontMetricTable;

/// One output line of a wrapped paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    /// Measured width in pixels.
    pub width: f32,
}

/// Wraps `text` greedily into lines no wider than `max_width` pixels.
///
/// Runs of whitespace collapse to a single space. Empty input yields no lines.
pub fn wrap_words(
    text: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    weight: Weight,
    max_width: f32,
) -> Vec<WrappedLine> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let space_w = metrics.space_px(size_px, weight);
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_w = metrics.measure_px(word, size_px, weight);

        if word_w > max_width {
            if !current.is_empty() {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
            }
            let mut pieces = break_word(word, metrics, size_px, weight, max_width);
            // The tail stays open so following words can join it.
            if let Some(tail) = pieces.pop() {
                lines.extend(pieces);
                current = tail.text;
                current_width = tail.width;
            }
        } else if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            // Line is full; the word opens the next one.
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                width: current_width,
            });
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    lines.push(WrappedLine {
        text: current,
        width: current_width,
    });

    lines
}

/// Packs whole items onto lines, joined by `separator`.
///
/// Items never split across a separator; an item too wide for a line on its own is
/// word-wrapped onto lines of its own.
pub fn wrap_items(
    items: &[String],
    separator: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    weight: Weight,
    max_width: f32,
) -> Vec<WrappedLine> {
    let separator_w = metrics.measure_px(separator, size_px, weight);
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for item in items {
        let item_w = metrics.measure_px(item, size_px, weight);

        let fits = current.is_empty() || current_width + separator_w + item_w <= max_width;
        if !current.is_empty() && (!fits || item_w > max_width) {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                width: current_width,
            });
        }

        if item_w > max_width {
            lines.extend(wrap_words(item, metrics, size_px, weight, max_width));
        } else if current.is_empty() {
            current.push_str(item);
            current_width = item_w;
        } else {
            current.push_str(separator);
            current.push_str(item);
            current_width += separator_w + item_w;
        }
    }
    if !current.is_empty() {
        lines.push(WrappedLine {
            text: current,
            width: current_width,
        });
    }

    lines
}

/// Cuts one word into pieces no wider than `max_width`. Every piece holds at least
/// one character, so a glyph wider than the line still makes progress.
fn break_word(
    word: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    weight: Weight,
    max_width: f32,
) -> Vec<WrappedLine> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0_f32;
    let mut buf = [0u8; 4];

    for ch in word.chars() {
        let ch_w = metrics.measure_px(ch.encode_utf8(&mut buf), size_px, weight);
        if !piece.is_empty() && piece_width + ch_w > max_width {
            pieces.push(WrappedLine {
                text: std::mem::take(&mut piece),
                width: piece_width,
            });
            piece_width = 0.0;
        }
        piece.push(ch);
        piece_width += ch_w;
    }
    if !piece.is_empty() {
        pieces.push(WrappedLine {
            text: piece,
            width: piece_width,
        });
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
