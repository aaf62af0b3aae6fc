//! Layout engine for the start / stage / substage / end hierarchy.
//!
//! Nodes are classified by id:
//!
//! | Id | Role | Placement |
//! |----|------|-----------|
//! | `start` | start | centered on the canvas width, at the top margin |
//! | `stage-*` | stage | one vertical column, centered, in input order |
//! | `substage-*` | substage | a row under the stage named by `data.stageId` |
//! | `end` | end | centered, one spacing unit below the lowest stage or substage |
//! | anything else | other | keeps its input coordinates |
//!
//! The engine is a pure function of the node array and its constants: it
//! never mutates its input and returns a fresh vector in input order.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    config::LayoutConfig,
    model::{DiagramEdge, DiagramNode},
};

const START_ID: &str = "start";
const END_ID: &str = "end";
const STAGE_PREFIX: &str = "stage-";
const SUBSTAGE_PREFIX: &str = "substage-";

/// Role of a node in the workflow hierarchy, derived from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Start,
    Stage,
    Substage,
    End,
    Other,
}

impl NodeRole {
    pub fn classify(id: &str) -> Self {
        if id == START_ID {
            Self::Start
        } else if id == END_ID {
            Self::End
        } else if id.starts_with(STAGE_PREFIX) {
            Self::Stage
        } else if id.starts_with(SUBSTAGE_PREFIX) {
            Self::Substage
        } else {
            Self::Other
        }
    }
}

/// Computes node positions for a workflow snapshot.
#[derive(Debug, Clone)]
pub struct Engine {
    canvas_width: f32,
    top_margin: f32,
    vertical_spacing: f32,
    substage_gap: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Engine {
    /// Create a new layout engine with default constants
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            canvas_width: config.canvas_width(),
            top_margin: config.top_margin(),
            vertical_spacing: config.vertical_spacing(),
            substage_gap: config.substage_gap(),
        }
    }

    /// Set the width nodes are horizontally centered in
    pub fn set_canvas_width(&mut self, width: f32) -> &mut Self {
        self.canvas_width = width;
        self
    }

    /// Set the y-coordinate of the start node
    pub fn set_top_margin(&mut self, margin: f32) -> &mut Self {
        self.top_margin = margin;
        self
    }

    /// Set the vertical spacing between rows
    pub fn set_vertical_spacing(&mut self, spacing: f32) -> &mut Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set the horizontal gap between substages of one row
    pub fn set_substage_gap(&mut self, gap: f32) -> &mut Self {
        self.substage_gap = gap;
        self
    }

    /// Returns a positioned copy of `nodes`.
    ///
    /// Edges are accepted for symmetry with the rest of the pipeline; the
    /// hierarchy is fully described by node ids and `data.stageId`.
    pub fn calculate(&self, nodes: &[DiagramNode], _edges: &[DiagramEdge]) -> Vec<DiagramNode> {
        let mut positioned = nodes.to_vec();
        let center_x = self.canvas_width / 2.0;

        let mut start_index = None;
        let mut end_index = None;
        let mut stages: IndexMap<&str, usize> = IndexMap::new();
        let mut substage_rows: IndexMap<&str, Vec<usize>> = IndexMap::new();
        let mut unparented = Vec::new();

        for (index, node) in nodes.iter().enumerate() {
            match NodeRole::classify(node.id()) {
                NodeRole::Start => start_index = Some(index),
                NodeRole::End => end_index = Some(index),
                NodeRole::Stage => {
                    stages.insert(node.id(), index);
                }
                NodeRole::Substage => match node.stage_id() {
                    Some(stage_id) => substage_rows.entry(stage_id).or_default().push(index),
                    None => unparented.push(node.id()),
                },
                NodeRole::Other => trace!(node_id = node.id(); "Node keeps its input position"),
            }
        }

        if let Some(index) = start_index {
            let node = &mut positioned[index];
            let x = center_x - node.width() / 2.0;
            node.set_position(x, self.top_margin);
        }

        let mut row_y = self.top_margin + self.vertical_spacing;
        for &index in stages.values() {
            let node = &mut positioned[index];
            let x = center_x - node.width() / 2.0;
            node.set_position(x, row_y);
            row_y += self.vertical_spacing;
        }

        let mut placed_substages = 0;
        for (stage_id, row) in &substage_rows {
            let Some(&stage_index) = stages.get(stage_id) else {
                debug!(
                    stage_id = *stage_id,
                    substages_len = row.len();
                    "Substages reference an unknown stage, leaving them in place"
                );
                continue;
            };

            let stage = &positioned[stage_index];
            let stage_center_x = stage.x() + stage.width() / 2.0;
            let y = stage.y() + self.vertical_spacing;

            let total_width: f32 = row.iter().map(|&i| positioned[i].width()).sum::<f32>()
                + self.substage_gap * (row.len() as f32 - 1.0);

            let mut x = stage_center_x - total_width / 2.0;
            for &index in row {
                let node = &mut positioned[index];
                node.set_position(x, y);
                x += node.width() + self.substage_gap;
            }
            placed_substages += row.len();
        }

        for node_id in &unparented {
            debug!(node_id = *node_id; "Substage has no stageId, leaving it in place");
        }

        if let Some(index) = end_index {
            let lowest_bottom = positioned
                .iter()
                .filter(|node| {
                    matches!(
                        NodeRole::classify(node.id()),
                        NodeRole::Stage | NodeRole::Substage
                    )
                })
                .map(|node| node.y() + node.height())
                .reduce(f32::max);

            let y = match (lowest_bottom, start_index) {
                (Some(bottom), _) => bottom + self.vertical_spacing,
                (None, Some(start)) => positioned[start].y() + self.vertical_spacing,
                (None, None) => self.top_margin + self.vertical_spacing,
            };

            let node = &mut positioned[index];
            let x = center_x - node.width() / 2.0;
            node.set_position(x, y);
        }

        debug!(
            nodes_len = positioned.len(),
            stages_len = stages.len(),
            substages_len = placed_substages;
            "Layout calculated"
        );

        positioned
    }
}
