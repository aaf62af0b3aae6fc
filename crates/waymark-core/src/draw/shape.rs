//! Shape definitions and the [`Shape`] drawable.
//!
//! A [`ShapeDefinition`] is a stateless description of how a node outline
//! looks (stroke, fill, corner rounding). A [`Shape`] pairs a shared
//! definition with a concrete size so it can be positioned and drawn.

use std::rc::Rc;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

mod diamond;
mod rectangle;

pub use diamond::DiamondDefinition;
pub use rectangle::RectangleDefinition;

/// A trait for shape definitions that render node outlines.
pub trait ShapeDefinition: std::fmt::Debug {
    /// Renders this shape centered on `position` with the given size.
    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node>;

    /// Creates a boxed clone of this shape definition.
    fn clone_box(&self) -> Box<dyn ShapeDefinition>;

    /// Get the stroke definition for the shape.
    fn stroke(&self) -> &Rc<StrokeDefinition>;

    /// Set stroke definition using Rc.
    fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>);

    /// Returns the fill color, if any.
    fn fill_color(&self) -> Option<Color>;

    /// Set the fill color for the shape.
    fn set_fill_color(&mut self, color: Option<Color>);

    /// Set the corner rounding radius.
    fn set_rounded(&mut self, _radius: f32) -> Result<(), &'static str> {
        Err("rounded corners are not supported for this shape")
    }
}

/// Enable cloning of `Box<dyn ShapeDefinition>` by delegating to `clone_box`.
impl Clone for Box<dyn ShapeDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A shape definition with a concrete size.
#[derive(Debug, Clone)]
pub struct Shape {
    definition: Rc<Box<dyn ShapeDefinition>>,
    size: Size,
}

impl Shape {
    pub fn new(definition: Rc<Box<dyn ShapeDefinition>>, size: Size) -> Self {
        Self { definition, size }
    }

    pub fn definition(&self) -> &dyn ShapeDefinition {
        &**self.definition
    }
}

impl Drawable for Shape {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let node = self.definition.render_to_svg(self.size, position);
        output.add_to_layer(RenderLayer::Node, node);
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_renders_to_node_layer() {
        let definition: Box<dyn ShapeDefinition> = Box::new(RectangleDefinition::new());
        let shape = Shape::new(Rc::new(definition), Size::new(180.0, 60.0));

        assert_eq!(shape.size(), Size::new(180.0, 60.0));

        let output = shape.render_to_layers(Point::new(400.0, 80.0));
        assert_eq!(output.layer_len(RenderLayer::Node), 1);
    }

    #[test]
    fn test_boxed_definition_clone() {
        let mut definition: Box<dyn ShapeDefinition> = Box::new(RectangleDefinition::new());
        definition.set_fill_color(Some(Color::new("white").unwrap()));

        let cloned = definition.clone();
        assert_eq!(cloned.fill_color(), definition.fill_color());
    }

    #[test]
    fn test_diamond_rejects_rounding() {
        let mut diamond = DiamondDefinition::new();
        assert!(diamond.set_rounded(4.0).is_err());

        let mut rect = RectangleDefinition::new();
        assert!(rect.set_rounded(4.0).is_ok());
    }
}
