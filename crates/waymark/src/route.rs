//! Edge routing between positioned nodes.
//!
//! Every edge leaves its source at the bottom-center and enters its target
//! at the top-center. Vertically aligned anchors are joined by a single
//! segment; otherwise the route is a vertical / horizontal / vertical
//! staircase that turns at the vertical midpoint.

use std::collections::HashMap;

use log::debug;

use waymark_core::{color::Color, geometry::Point};

use crate::model::{DiagramEdge, DiagramNode, EdgeType};

/// Stroke appearance of an edge, keyed by its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    color: Color,
    dashed: bool,
}

impl EdgeStyle {
    /// Returns the palette entry for `edge_type`.
    pub fn for_type(edge_type: EdgeType) -> Self {
        match edge_type {
            EdgeType::Default => Self::solid(Color::from_rgb8(0x94, 0xa3, 0xb8)),
            EdgeType::Success => Self::solid(Color::from_rgb8(0x22, 0xc5, 0x5e)),
            EdgeType::Failure => Self::solid(Color::from_rgb8(0xef, 0x44, 0x44)),
            EdgeType::Condition => Self {
                color: Color::from_rgb8(0xf5, 0x9e, 0x0b),
                dashed: true,
            },
        }
    }

    fn solid(color: Color) -> Self {
        Self {
            color,
            dashed: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_dashed(&self) -> bool {
        self.dashed
    }
}

/// An edge with a resolved route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    id: String,
    edge_type: EdgeType,
    points: Vec<Point>,
    label: Option<String>,
    label_position: Point,
}

impl RoutedEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn style(&self) -> EdgeStyle {
        EdgeStyle::for_type(self.edge_type)
    }

    /// Route corners from source anchor to target anchor.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Midpoint of the route, where the label is centered.
    pub fn label_position(&self) -> Point {
        self.label_position
    }

    /// Returns `true` for a single vertical segment.
    pub fn is_straight(&self) -> bool {
        self.points.len() == 2
    }
}

/// Computes routes for all edges whose endpoints exist.
#[derive(Debug, Clone)]
pub struct EdgeRouter {
    straight_threshold: f32,
}

impl Default for EdgeRouter {
    fn default() -> Self {
        Self {
            straight_threshold: 1.0,
        }
    }
}

impl EdgeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal offset below which anchors count as aligned
    pub fn set_straight_threshold(&mut self, threshold: f32) -> &mut Self {
        self.straight_threshold = threshold;
        self
    }

    /// Routes `edges` against the positioned `nodes`.
    ///
    /// Edges whose source or target id is missing are dropped; the result
    /// keeps the input order of the remaining edges.
    pub fn route(&self, nodes: &[DiagramNode], edges: &[DiagramEdge]) -> Vec<RoutedEdge> {
        let by_id: HashMap<&str, &DiagramNode> =
            nodes.iter().map(|node| (node.id(), node)).collect();

        let routed: Vec<RoutedEdge> = edges
            .iter()
            .filter_map(|edge| {
                let (Some(source), Some(target)) =
                    (by_id.get(edge.source()), by_id.get(edge.target()))
                else {
                    debug!(
                        edge_id = edge.id(),
                        source_id = edge.source(),
                        target_id = edge.target();
                        "Dropping edge with a missing endpoint"
                    );
                    return None;
                };

                Some(self.route_edge(edge, source, target))
            })
            .collect();

        debug!(edges_len = edges.len(), routed_len = routed.len(); "Edges routed");
        routed
    }

    fn route_edge(
        &self,
        edge: &DiagramEdge,
        source: &DiagramNode,
        target: &DiagramNode,
    ) -> RoutedEdge {
        let start = source.bounds().bottom_center();
        let end = target.bounds().top_center();

        RoutedEdge {
            id: edge.id().to_string(),
            edge_type: edge.edge_type(),
            points: self.route_points(start, end),
            label: edge.label().map(str::to_string),
            label_position: start.midpoint(end),
        }
    }

    fn route_points(&self, start: Point, end: Point) -> Vec<Point> {
        if (end.x() - start.x()).abs() < self.straight_threshold {
            return vec![start, end];
        }

        let mid_y = start.midpoint(end).y();
        vec![
            start,
            Point::new(start.x(), mid_y),
            Point::new(end.x(), mid_y),
            end,
        ]
    }
}
