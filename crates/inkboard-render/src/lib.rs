//! Inkboard render: the brush engine and display-list scene building.
//!
//! Strokes become an ordered list of drawing commands retained in a
//! [`Scene`]; the embedding surface (GPU, 2D canvas, raster buffer)
//! replays that list to present pixels.

pub mod brush;
pub mod color;
pub mod painter;
pub mod scene;

pub use brush::{Brush, BrushCursor, EraserBrush, PenBrush, PressureCurve};
pub use painter::{GRID_SPACING, RenderContext, build_scene};
pub use scene::{BLEND_DEST_OUT, BLEND_OVER, DrawCommand, Scene};
