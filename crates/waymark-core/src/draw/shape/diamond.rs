use std::rc::Rc;

use svg::{self, node::element as svg_element};

use super::ShapeDefinition;
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Rhombus inscribed in the node's bounding box, used for decision nodes.
#[derive(Debug, Clone)]
pub struct DiamondDefinition {
    fill_color: Option<Color>,
    stroke: Rc<StrokeDefinition>,
}

impl DiamondDefinition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for DiamondDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke: Rc::new(StrokeDefinition::default()),
        }
    }
}

/// Returns the top, right, bottom and left vertices as an SVG `points` list.
fn diamond_points(size: Size, position: Point) -> String {
    let bounds = position.to_bounds(size);
    let center = bounds.center();
    format!(
        "{},{} {},{} {},{} {},{}",
        center.x(),
        bounds.min_y(),
        bounds.max_x(),
        center.y(),
        center.x(),
        bounds.max_y(),
        bounds.min_x(),
        center.y(),
    )
}

impl ShapeDefinition for DiamondDefinition {
    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node> {
        let mut polygon = svg_element::Polygon::new()
            .set("points", diamond_points(size, position))
            .set("fill", "white");

        polygon = apply_stroke!(polygon, self.stroke);

        if let Some(fill_color) = self.fill_color {
            polygon = polygon
                .set("fill", fill_color.to_string())
                .set("fill-opacity", fill_color.alpha());
        }

        polygon.into()
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }

    fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>) {
        self.stroke = stroke;
    }

    fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diamond_points() {
        let points = diamond_points(Size::new(100.0, 60.0), Point::new(50.0, 30.0));
        assert_eq!(points, "50,0 100,30 50,60 0,30");
    }

    #[test]
    fn test_diamond_render_polygon() {
        let diamond = DiamondDefinition::new();
        let rendered = diamond
            .render_to_svg(Size::new(100.0, 60.0), Point::new(50.0, 30.0))
            .to_string();

        assert!(rendered.starts_with("<polygon"));
        assert!(rendered.contains("points=\"50,0 100,30 50,60 0,30\""));
    }
}
