// Layout: deterministic text measurement, greedy word wrap, two-phase settle.
// Everything here is pure CPU work; the render worker calls it on its own thread.

pub mod engine;
pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by the renderer and the export pipeline.
pub use engine::{
    LayoutEngine, LayoutRequest, LayoutSettings, MeasuredDocument, MeasuredSection,
    PlacedElement, PlacedText, MIN_PAPER_WIDTH,
};
pub use font_metrics::{get_metrics, resolve_family, FontFamily, FontMetricTable};
