//! Drawable components for diagram rendering.
//!
//! Every drawable implements [`Drawable`]: it reports its size and renders
//! itself at a position into a [`LayeredOutput`], which keeps z-order
//! independent from the order in which elements are drawn.

mod arrow;
mod layer;
mod shape;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDrawer};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{DiamondDefinition, RectangleDefinition, Shape, ShapeDefinition};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{FontWeight, Text, TextDefinition};

use crate::geometry::{Point, Size};

/// A trait for elements that can be rendered to layered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders this element centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size this element occupies.
    fn size(&self) -> Size;
}
