//! Pixel-buffer conversion: rasterized surface → packed ARGB words.
//!
//! Every pixel is read as normalized [0, 1] channels and quantized with a truncating
//! `(v * 255.0) as u8`, then packed as `0xAARRGGBB`. This is the dominant cost of an
//! export (one pass over width × height), so the cancel flag is polled once per row.

use resvg::tiny_skia::Pixmap;

use crate::errors::ExportError;
use crate::export::CancelFlag;

/// A color with channels in [0, 1], straight (not premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl NormalizedColor {
    pub fn to_argb(self) -> u32 {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8 as u32;
        (q(self.a) << 24) | (q(self.r) << 16) | (q(self.g) << 8) | q(self.b)
    }
}

/// Anything that can be read back pixel by pixel.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn color_at(&self, x: u32, y: u32) -> NormalizedColor;
}

impl PixelSource for Pixmap {
    fn width(&self) -> u32 {
        Pixmap::width(self)
    }

    fn height(&self) -> u32 {
        Pixmap::height(self)
    }

    fn color_at(&self, x: u32, y: u32) -> NormalizedColor {
        match self.pixel(x, y) {
            Some(premultiplied) => {
                let c = premultiplied.demultiply();
                NormalizedColor {
                    r: c.red() as f32 / 255.0,
                    g: c.green() as f32 / 255.0,
                    b: c.blue() as f32 / 255.0,
                    a: c.alpha() as f32 / 255.0,
                }
            }
            None => NormalizedColor {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            },
        }
    }
}

/// Row-major ARGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ArgbBuffer {
    /// Converts a whole source. Returns `Cancelled` as soon as a row starts after cancellation.
    pub fn from_source(
        source: &impl PixelSource,
        cancel: &CancelFlag,
    ) -> Result<Self, ExportError> {
        let (width, height) = (source.width(), source.height());
        let mut pixels = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            if cancel.is_cancelled() {
                return Err(ExportError::Cancelled);
            }
            pixels.extend((0..width).map(|x| source.color_at(x, y).to_argb()));
        }

        Ok(ArgbBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Splits into a packed RGB plane and a separate 8-bit alpha plane.
    pub fn to_rgb_and_alpha(&self) -> (Vec<u8>, Vec<u8>) {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        let mut alpha = Vec::with_capacity(self.pixels.len());
        for &argb in &self.pixels {
            let [a, r, g, b] = argb.to_be_bytes();
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        (rgb, alpha)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
