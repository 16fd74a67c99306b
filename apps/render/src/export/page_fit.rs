//! Page-fit scaling: place a raster of arbitrary size on one fixed page.
//!
//! Width-fit is tried first. Only when the width-fitted image would run off the
//! bottom of the page does the scale switch to height-fit. The result is centered on
//! both axes and never exceeds the page, so nothing is ever cropped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target page sizes, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page size '{0}'")]
pub struct ParsePageSizeError(String);

impl FromStr for PageSize {
    type Err = ParsePageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(ParsePageSizeError(other.to_string())),
        }
    }
}

/// Where and how large the image lands on the page. Origin is the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Computes the placement of an `image_width` × `image_height` image on a page.
///
/// Both image dimensions must be positive; callers reject empty rasters before this.
pub fn fit_to_page(
    page_width: f32,
    page_height: f32,
    image_width: f32,
    image_height: f32,
) -> PagePlacement {
    let mut scale = page_width / image_width;
    let mut scaled_width = image_width * scale;
    let mut scaled_height = image_height * scale;

    if scaled_height > page_height {
        scale = page_height / image_height;
        scaled_width = image_width * scale;
        scaled_height = image_height * scale;
    }

    PagePlacement {
        scale,
        x: (page_width - scaled_width) / 2.0,
        y: (page_height - scaled_height) / 2.0,
        width: scaled_width,
        height: scaled_height,
    }
}

/// [`fit_to_page`] against a named page size.
pub fn fit_to_page_size(page: PageSize, image_width: u32, image_height: u32) -> PagePlacement {
    let (page_width, page_height) = page.dimensions();
    fit_to_page(page_width, page_height, image_width as f32, image_height as f32)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_tall_image_switches_to_height_fit() {
        // width-fit 595/650 ≈ 0.915 gives 1098 tall, which overflows 842
        let placement = fit_to_page(595.0, 842.0, 650.0, 1200.0);
        assert!(close(placement.scale, 842.0 / 1200.0, 1e-5));
        assert!(close(placement.width, 456.4, 0.1), "{placement:?}");
        assert!(close(placement.height, 842.0, 1e-3));
        assert!(close(placement.x, 69.3, 0.1), "{placement:?}");
        assert!(close(placement.y, 0.0, 1e-3));
    }

    #[test]
    fn test_short_image_uses_width_fit_and_centers_vertically() {
        let placement = fit_to_page(595.0, 842.0, 650.0, 300.0);
        assert!(close(placement.scale, 595.0 / 650.0, 1e-5));
        assert!(close(placement.x, 0.0, 1e-3));
        assert!(close(placement.y, (842.0 - placement.height) / 2.0, 1e-3));
    }

    #[test]
    fn test_small_image_is_scaled_up_to_page_width() {
        let placement = fit_to_page_size(PageSize::Letter, 100, 100);
        assert!(close(placement.width, 612.0, 1e-3));
        assert!(close(placement.y, (792.0 - 612.0) / 2.0, 1e-3));
    }

    #[test]
    fn test_placement_never_exceeds_page() {
        let pages = [PageSize::A4, PageSize::Letter];
        let images = [(650, 900), (650, 5000), (2000, 100), (1, 1), (400, 400), (650, 919)];
        for page in pages {
            let (pw, ph) = page.dimensions();
            for (w, h) in images {
                let p = fit_to_page_size(page, w, h);
                assert!(p.width <= pw + 1e-3 && p.height <= ph + 1e-3, "{page:?} {w}x{h}: {p:?}");
                assert!(p.x >= -1e-3 && p.y >= -1e-3, "{page:?} {w}x{h}: {p:?}");
                // aspect ratio preserved
                assert!(close(p.width / p.height, w as f32 / h as f32, 1e-3));
            }
        }
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
        assert_eq!(" letter ".parse::<PageSize>(), Ok(PageSize::Letter));
        assert!("legal".parse::<PageSize>().is_err());
    }
}
