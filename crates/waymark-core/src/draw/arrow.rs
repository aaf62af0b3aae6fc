//! Arrow drawable types and SVG marker generation.
//!
//! An [`Arrow`] is a polyline with an arrow head at its last point. Arrow
//! heads are SVG `<marker>` elements referenced by id; the id is derived
//! from the stroke color so every arrow of one color shares one marker.
//! [`ArrowDrawer`] records the colors it draws and emits the matching
//! `<defs>` block afterwards.

use std::{collections::BTreeMap, rc::Rc};

use svg::{self, node::element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::Point,
};

/// Visual properties of an arrow: its stroke and the style of its label.
#[derive(Debug, Clone, Default)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
    text: Rc<TextDefinition>,
}

impl ArrowDefinition {
    /// Creates a new ArrowDefinition with the given stroke
    pub fn new(stroke: Rc<StrokeDefinition>) -> Self {
        Self {
            stroke,
            text: Rc::new(TextDefinition::default()),
        }
    }

    /// Gets the arrow stroke definition
    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    /// Gets the label text definition.
    pub fn text(&self) -> &Rc<TextDefinition> {
        &self.text
    }

    pub fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>) {
        self.stroke = stroke;
    }

    pub fn set_text(&mut self, text: Rc<TextDefinition>) {
        self.text = text;
    }
}

/// A drawable arrow along a sequence of points.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
}

impl Arrow {
    pub fn new(definition: Rc<ArrowDefinition>) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &Rc<ArrowDefinition> {
        &self.definition
    }

    /// Returns the `url(#...)` reference of the arrow head for `color`.
    pub fn marker_url(color: Color) -> String {
        format!("url(#{})", Self::marker_id(color))
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-right-{}", color.to_id_safe_string())
    }

    fn render_to_svg(&self, points: &[Point]) -> Box<dyn svg::Node> {
        let color = self.definition.stroke().color();

        let path = svg_element::Path::new()
            .set("d", Self::create_path_data_from_points(points))
            .set("fill", "none");

        let path = apply_stroke!(path, self.definition.stroke()).set("marker-end", Self::marker_url(color));

        Box::new(path)
    }

    /// Create a path data string visiting every point in order
    ///
    /// ```
    /// # use waymark_core::{draw::Arrow, geometry::Point};
    /// let d = Arrow::create_path_data_from_points(&[
    ///     Point::new(10.0, 20.0),
    ///     Point::new(10.0, 50.0),
    ///     Point::new(40.0, 50.0),
    /// ]);
    /// assert_eq!(d, "M 10 20 L 10 50 L 40 50");
    /// ```
    pub fn create_path_data_from_points(points: &[Point]) -> String {
        let mut data = String::new();
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                data.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            data.push_str(&format!("{command} {} {}", point.x(), point.y()));
        }
        data
    }

    fn create_arrow_right(color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", Self::marker_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            )
    }
}

/// Draws arrows and collects the marker definitions they reference.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    // Keyed by marker id so the emitted defs are ordered deterministically
    heads: BTreeMap<String, Color>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws an arrow through `points` and registers its marker color.
    pub fn draw_arrow(&mut self, arrow: &Arrow, points: &[Point]) -> Box<dyn svg::Node> {
        let color = arrow.definition.stroke().color();
        self.heads.insert(Arrow::marker_id(color), color);
        arrow.render_to_svg(points)
    }

    /// Number of distinct arrow heads registered so far.
    pub fn marker_count(&self) -> usize {
        self.heads.len()
    }

    /// Generates SVG marker definitions for all collected colors
    pub fn draw_marker_definitions(&self) -> Box<dyn svg::Node> {
        let mut defs = svg_element::Definitions::new();
        for color in self.heads.values() {
            defs = defs.add(Arrow::create_arrow_right(*color));
        }
        defs.into()
    }
}
