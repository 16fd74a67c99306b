//! Raster surfaces: the stateful half of rendering.
//!
//! A surface owns its font database and is driven from one thread only (the render
//! worker). It returns `None` when it cannot produce pixels; the caller turns that
//! into a `RenderUnavailable` export error.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::{debug, warn};

use super::scene::SvgScene;

pub trait RasterSurface {
    fn rasterize(&mut self, scene: &SvgScene) -> Option<Pixmap>;
}

/// Rasterizes SVG scenes with resvg, using the host's system fonts.
pub struct SvgSurface {
    options: usvg::Options<'static>,
}

impl SvgSurface {
    /// Loads the system font database once; every later render reuses it.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!(faces = options.fontdb.len(), "Loaded system fonts");
        SvgSurface { options }
    }

    /// A surface without any fonts. Text renders as nothing; boxes still render.
    pub fn without_fonts() -> Self {
        SvgSurface {
            options: usvg::Options::default(),
        }
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        SvgSurface::new()
    }
}

impl RasterSurface for SvgSurface {
    fn rasterize(&mut self, scene: &SvgScene) -> Option<Pixmap> {
        if scene.pixel_width == 0 || scene.pixel_height == 0 {
            warn!(
                width = scene.pixel_width,
                height = scene.pixel_height,
                "Refusing to rasterize an empty scene"
            );
            return None;
        }

        self.options.font_family = scene.default_family.css_name().to_string();
        let tree = match usvg::Tree::from_str(&scene.markup, &self.options) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(error = %e, "Scene could not be parsed");
                return None;
            }
        };

        let size = tree.size().to_int_size();
        let Some(mut pixmap) = Pixmap::new(size.width(), size.height()) else {
            warn!(
                width = size.width(),
                height = size.height(),
                "Failed to allocate pixmap"
            );
            return None;
        };

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        Some(pixmap)
    }
}
