//! Drawing attributes shared by icons and render backends.

mod layer;
mod paint;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use paint::Paint;
pub use stroke::{
    DEFAULT_STROKE_WIDTH, StrokeDefinition, StrokeStyle, THICK_STROKE_WIDTH,
};
