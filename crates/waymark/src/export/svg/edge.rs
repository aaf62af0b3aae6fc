//! SVG rendering for routed edges.

use std::rc::Rc;

use svg::node::element as svg_element;

use waymark_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, Drawable, LayeredOutput, RenderLayer, StrokeCap, StrokeDefinition,
        StrokeJoin, Text, TextDefinition,
    },
    geometry::Insets,
};

use super::SvgExporter;
use crate::route::RoutedEdge;

const EDGE_WIDTH: f32 = 2.0;
const EDGE_LABEL_FONT_SIZE: u16 = 11;

impl SvgExporter {
    /// Renders the edge path on the edge layer and its label, over a white
    /// backdrop, on the text layer.
    pub(super) fn render_edge(&mut self, edge: &RoutedEdge) -> LayeredOutput {
        let style = edge.style();
        let mut stroke = if style.is_dashed() {
            StrokeDefinition::dashed(style.color(), EDGE_WIDTH)
        } else {
            StrokeDefinition::solid(style.color(), EDGE_WIDTH)
        };
        stroke.set_cap(StrokeCap::Round);
        stroke.set_join(StrokeJoin::Round);

        let mut definition = ArrowDefinition::new(Rc::new(stroke));
        definition.set_text(Rc::new(self.edge_label_definition(style.color())));
        let arrow = Arrow::new(Rc::new(definition));

        let path = self.arrow_drawer.draw_arrow(&arrow, edge.points());
        let group = svg_element::Group::new()
            .set("data-edge-id", edge.id())
            .add(path);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Edge, Box::new(group));

        if let Some(label) = edge.label() {
            let text = Text::new(arrow.definition().text(), label);
            output.merge(text.render_to_layers(edge.label_position()));
        }

        output
    }

    fn edge_label_definition(&self, color: Color) -> TextDefinition {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(EDGE_LABEL_FONT_SIZE);
        definition.set_color(Some(color));
        definition.set_background_color(Some(Color::from_rgb8(0xff, 0xff, 0xff)));
        definition.set_padding(Insets::new(2.0, 4.0, 2.0, 4.0));
        definition
    }
}
