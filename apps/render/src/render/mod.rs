// Rendering: measured document → SVG scene → pixmap → ARGB buffer.
// The surface is stateful (font database) and belongs to the render worker thread.

pub mod pixels;
pub mod scene;
pub mod surface;

pub use pixels::{ArgbBuffer, NormalizedColor, PixelSource};
pub use scene::{build_scene, pixel_size, SvgScene};
pub use surface::{RasterSurface, SvgSurface};
