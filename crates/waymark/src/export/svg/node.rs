//! SVG rendering for workflow nodes.

use std::rc::Rc;

use svg::node::element as svg_element;

use waymark_core::{
    color::Color,
    draw::{
        DiamondDefinition, Drawable, FontWeight, LayeredOutput, RectangleDefinition, RenderLayer,
        Shape, ShapeDefinition, StrokeDefinition, SvgNode, Text, TextDefinition,
    },
    geometry::Point,
};

use super::SvgExporter;
use crate::{
    appearance::{Icon, NodeAppearance, NodeShape, palette},
    export,
    model::DiagramNode,
};

const CORNER_RADIUS: f32 = 8.0;
const ICON_RADIUS: f32 = 8.0;
const ICON_INSET: f32 = 20.0;
const LABEL_FONT_SIZE: u16 = 13;
const BADGE_FONT_SIZE: u16 = 10;
const BADGE_OFFSET: f32 = 9.0;
const LABEL_LIFT: f32 = 6.0;

impl SvgExporter {
    /// Renders one node into a self-contained `<g data-node-id>` group on
    /// the node layer.
    pub(super) fn render_node(
        &self,
        node: &DiagramNode,
        selected: bool,
    ) -> Result<LayeredOutput, export::Error> {
        let appearance = NodeAppearance::resolve(node, selected, self.label_max_chars);
        let bounds = node.bounds();
        let center = bounds.center();

        let mut parts = LayeredOutput::new();

        let shape = Shape::new(Rc::new(self.shape_definition(&appearance)?), node.size());
        parts.merge(shape.render_to_layers(center));

        let icon_center = Point::new(bounds.min_x() + ICON_INSET, center.y());
        parts.add_to_layer(
            RenderLayer::Icon,
            render_icon(appearance.icon(), appearance.accent(), icon_center),
        );

        parts.merge(self.render_node_text(&appearance, center));

        let mut group = svg_element::Group::new()
            .set("data-node-id", node.id())
            .set("data-icon", appearance.icon().name());
        if appearance.scale() != 1.0 {
            group = group.set(
                "transform",
                format!(
                    "translate({}, {}) scale({}) translate({}, {})",
                    center.x(),
                    center.y(),
                    appearance.scale(),
                    -center.x(),
                    -center.y()
                ),
            );
        }

        let group = parts
            .render()
            .into_iter()
            .fold(group, |group, layer| group.add(layer));

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(group));
        Ok(output)
    }

    fn shape_definition(
        &self,
        appearance: &NodeAppearance,
    ) -> Result<Box<dyn ShapeDefinition>, export::Error> {
        let color = appearance.stroke_color();
        let width = appearance.stroke_width();

        let (mut definition, stroke): (Box<dyn ShapeDefinition>, StrokeDefinition) =
            match appearance.shape() {
                NodeShape::Diamond => (
                    Box::new(DiamondDefinition::new()),
                    StrokeDefinition::solid(color, width),
                ),
                NodeShape::RoundedRect => (
                    Box::new(RectangleDefinition::new()),
                    StrokeDefinition::solid(color, width),
                ),
                NodeShape::DashedRoundedRect => (
                    Box::new(RectangleDefinition::new()),
                    StrokeDefinition::dashed(color, width),
                ),
            };

        if appearance.shape() != NodeShape::Diamond {
            definition
                .set_rounded(CORNER_RADIUS)
                .map_err(|err| export::Error::Render(err.to_string()))?;
        }
        definition.set_stroke(Rc::new(stroke));
        definition.set_fill_color(Some(appearance.fill()));

        Ok(definition)
    }

    /// Label centered in the node, nudged up when a process-id badge sits
    /// beneath it.
    fn render_node_text(&self, appearance: &NodeAppearance, center: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut label_def = TextDefinition::new();
        label_def.set_font_family(&self.font_family);
        label_def.set_font_size(LABEL_FONT_SIZE);
        label_def.set_font_weight(FontWeight::Medium);
        label_def.set_color(Some(palette::text()));

        let Some(badge) = appearance.badge() else {
            output.merge(Text::new(&label_def, appearance.label()).render_to_layers(center));
            return output;
        };

        let label_center = Point::new(center.x(), center.y() - LABEL_LIFT);
        output.merge(Text::new(&label_def, appearance.label()).render_to_layers(label_center));

        let mut badge_def = TextDefinition::new();
        badge_def.set_font_family(&self.font_family);
        badge_def.set_font_size(BADGE_FONT_SIZE);
        badge_def.set_color(Some(palette::muted_text()));

        let badge_center = Point::new(center.x(), center.y() + BADGE_OFFSET);
        output.merge(Text::new(&badge_def, badge).render_to_layers(badge_center));

        output
    }
}

/// Draws a small line glyph for `icon` centered on `center`.
fn render_icon(icon: Icon, color: Color, center: Point) -> SvgNode {
    let (cx, cy) = (center.x(), center.y());
    let r = ICON_RADIUS;

    let group = svg_element::Group::new()
        .set("fill", "none")
        .set("stroke", color.to_string())
        .set("stroke-opacity", color.alpha())
        .set("stroke-width", 1.5)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");

    let circle = || {
        svg_element::Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", r)
    };
    let path = |d: String| svg_element::Path::new().set("d", d);

    let group = match icon {
        Icon::Check => group.add(circle()).add(path(format!(
            "M {} {} L {} {} L {} {}",
            cx - 4.0,
            cy,
            cx - 1.0,
            cy + 3.0,
            cx + 4.0,
            cy - 3.0
        ))),
        Icon::Spinner => group.add(
            circle()
                .set("stroke-dasharray", format!("{} {}", r * 4.0, r * 2.5))
                .set("transform", format!("rotate(-90 {cx} {cy})")),
        ),
        Icon::Cross => group.add(circle()).add(path(format!(
            "M {} {} L {} {} M {} {} L {} {}",
            cx - 3.0,
            cy - 3.0,
            cx + 3.0,
            cy + 3.0,
            cx + 3.0,
            cy - 3.0,
            cx - 3.0,
            cy + 3.0
        ))),
        Icon::Clock => group.add(circle()).add(path(format!(
            "M {cx} {} L {cx} {cy} L {} {}",
            cy - 5.0,
            cx + 3.5,
            cy + 2.0
        ))),
        Icon::Branch => group.add(path(format!(
            "M {cx} {} L {cx} {cy} L {} {} M {cx} {cy} L {} {}",
            cy + r,
            cx - 6.0,
            cy - r,
            cx + 6.0,
            cy - r
        ))),
        Icon::Merge => group.add(path(format!(
            "M {} {} L {cx} {cy} L {} {} M {cx} {cy} L {cx} {}",
            cx - 6.0,
            cy - r,
            cx + 6.0,
            cy - r,
            cy + r
        ))),
        Icon::Workflow => [-r, 0.0, r].into_iter().fold(group, |group, dx| {
            group.add(
                svg_element::Rectangle::new()
                    .set("x", cx + dx - 2.5)
                    .set("y", cy - 2.5)
                    .set("width", 5)
                    .set("height", 5)
                    .set("rx", 1),
            )
        }),
        Icon::Gear => group
            .add(
                circle()
                    .set("r", r - 2.0)
                    .set("stroke-dasharray", "2 2")
                    .set("stroke-width", 3),
            )
            .add(circle().set("r", 2.5)),
    };

    Box::new(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeData, NodeStatus, NodeType};

    fn render(node: &DiagramNode, selected: bool) -> String {
        let output = SvgExporter::new()
            .render_node(node, selected)
            .expect("render node");
        output
            .render()
            .into_iter()
            .map(|group| group.to_string())
            .collect()
    }

    #[test]
    fn test_node_is_one_group_on_node_layer() {
        let node = DiagramNode::new("stage-1", NodeType::Task, "Review").with_position(310.0, 200.0);
        let output = SvgExporter::new().render_node(&node, false).expect("render node");

        assert_eq!(output.layer_len(RenderLayer::Node), 1);
        assert_eq!(output.layer_len(RenderLayer::Text), 0);
    }

    #[test]
    fn test_node_shapes() {
        let choice = DiagramNode::new("c", NodeType::Choice, "Route");
        assert!(render(&choice, false).contains("<polygon"));

        let map = DiagramNode::new("m", NodeType::Map, "Fan out");
        let svg = render(&map, false);
        assert!(svg.contains("<rect"));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));

        let task = DiagramNode::new("t", NodeType::Task, "Post");
        let svg = render(&task, false);
        assert!(svg.contains("rx=\"8\""));
        assert!(!svg.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn test_status_icon_attribute() {
        let node = DiagramNode::new("stage-2", NodeType::Choice, "Approve")
            .with_status(NodeStatus::Failed);
        assert!(render(&node, false).contains(r#"data-icon="cross""#));

        let node = DiagramNode::new("stage-3", NodeType::Parallel, "Split");
        assert!(render(&node, false).contains(r#"data-icon="merge""#));
    }

    #[test]
    fn test_label_and_badge() {
        let node = DiagramNode::new("stage-1", NodeType::Task, "Reconcile intercompany balances")
            .with_data(NodeData::new().with_process_id("P-77"));
        let svg = render(&node, false);

        assert!(svg.contains("Reconcile intercompa…"));
        assert!(svg.contains("P-77"));
    }

    #[test]
    fn test_selected_node_scales_about_center() {
        let node = DiagramNode::new("stage-1", NodeType::Task, "Review")
            .with_status(NodeStatus::Completed)
            .with_position(310.0, 200.0);

        let svg = render(&node, true);
        assert!(svg.contains("translate(400, 230) scale(1.05) translate(-400, -230)"));
        assert!(svg.contains("stroke-width=\"3\""));

        let svg = render(&node, false);
        assert!(!svg.contains("scale("));
        assert!(!svg.contains("stroke-width=\"3\""));
    }
}
