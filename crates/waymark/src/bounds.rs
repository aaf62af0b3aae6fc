//! Canvas extent of a positioned diagram.

use waymark_core::geometry::Size;

use crate::{config::BoundsConfig, model::DiagramNode};

/// Derives the canvas size from positioned nodes.
///
/// The canvas spans from the origin to the furthest node edge plus padding
/// on both sides of each axis, and never shrinks below the minimum size.
#[derive(Debug, Clone)]
pub struct BoundsCalculator {
    padding: f32,
    min_size: Size,
}

impl Default for BoundsCalculator {
    fn default() -> Self {
        Self::from_config(&BoundsConfig::default())
    }
}

impl BoundsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BoundsConfig) -> Self {
        Self {
            padding: config.padding(),
            min_size: Size::new(config.min_width(), config.min_height()),
        }
    }

    pub fn set_padding(&mut self, padding: f32) -> &mut Self {
        self.padding = padding;
        self
    }

    pub fn set_min_size(&mut self, min_size: Size) -> &mut Self {
        self.min_size = min_size;
        self
    }

    /// Returns the canvas size for `nodes`; empty input yields the minimum size.
    pub fn calculate(&self, nodes: &[DiagramNode]) -> Size {
        let extent = nodes.iter().fold(None, |extent: Option<Size>, node| {
            let bounds = node.bounds();
            let node_extent = Size::new(bounds.max_x(), bounds.max_y());
            Some(extent.map_or(node_extent, |size| size.max(node_extent)))
        });

        let Some(extent) = extent else {
            return self.min_size;
        };

        Size::new(
            extent.width() + 2.0 * self.padding,
            extent.height() + 2.0 * self.padding,
        )
        .max(self.min_size)
    }
}
