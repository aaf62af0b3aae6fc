//! Visual mapping from a node to its shape, icon and colors.
//!
//! This is a pure function of the node and the selection flag; the SVG
//! exporter turns a [`NodeAppearance`] into actual elements.

use std::borrow::Cow;

use waymark_core::color::Color;

use crate::model::{DiagramNode, NodeStatus, NodeType};

/// Outline drawn for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    RoundedRect,
    DashedRoundedRect,
    Diamond,
}

impl NodeShape {
    pub fn for_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Choice => Self::Diamond,
            NodeType::Parallel | NodeType::Map => Self::DashedRoundedRect,
            NodeType::Task
            | NodeType::Wait
            | NodeType::Pass
            | NodeType::Fail
            | NodeType::Succeed => Self::RoundedRect,
        }
    }
}

/// Glyph drawn at the left of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Check,
    Spinner,
    Cross,
    Clock,
    Branch,
    Merge,
    Workflow,
    Gear,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Spinner => "spinner",
            Self::Cross => "cross",
            Self::Clock => "clock",
            Self::Branch => "branch",
            Self::Merge => "merge",
            Self::Workflow => "workflow",
            Self::Gear => "gear",
        }
    }
}

/// Fixed colors of the node renderer.
pub mod palette {
    use waymark_core::color::Color;

    pub fn green() -> Color {
        Color::from_rgb8(0x22, 0xc5, 0x5e)
    }

    pub fn blue() -> Color {
        Color::from_rgb8(0x3b, 0x82, 0xf6)
    }

    pub fn red() -> Color {
        Color::from_rgb8(0xef, 0x44, 0x44)
    }

    pub fn amber() -> Color {
        Color::from_rgb8(0xf5, 0x9e, 0x0b)
    }

    pub fn gray() -> Color {
        Color::from_rgb8(0x6b, 0x72, 0x80)
    }

    /// Border of unselected nodes.
    pub fn border() -> Color {
        Color::from_rgb8(0xcb, 0xd5, 0xe1)
    }

    pub fn selected_fill() -> Color {
        Color::from_rgb8(0xef, 0xf6, 0xff)
    }

    pub fn surface() -> Color {
        Color::from_rgb8(0xff, 0xff, 0xff)
    }

    pub fn text() -> Color {
        Color::from_rgb8(0x1e, 0x29, 0x3b)
    }

    pub fn muted_text() -> Color {
        Color::from_rgb8(0x64, 0x74, 0x8b)
    }
}

/// Status icon first, then a per-type default in neutral gray.
pub fn icon_for(status: Option<NodeStatus>, node_type: NodeType) -> (Icon, Color) {
    match status {
        Some(NodeStatus::Completed) => (Icon::Check, palette::green()),
        Some(NodeStatus::InProgress) => (Icon::Spinner, palette::blue()),
        Some(NodeStatus::Failed) => (Icon::Cross, palette::red()),
        Some(NodeStatus::Pending) => (Icon::Clock, palette::amber()),
        None => {
            let icon = match node_type {
                NodeType::Choice => Icon::Branch,
                NodeType::Parallel => Icon::Merge,
                NodeType::Map => Icon::Workflow,
                _ => Icon::Gear,
            };
            (icon, palette::gray())
        }
    }
}

/// Shortens `label` to `max_chars` characters followed by an ellipsis.
///
/// ```
/// # use waymark::appearance::truncate_label;
/// assert_eq!(truncate_label("Review", 20), "Review");
/// assert_eq!(truncate_label("Reconcile intercompany balances", 20), "Reconcile intercompa…");
/// ```
pub fn truncate_label(label: &str, max_chars: usize) -> Cow<'_, str> {
    match label.char_indices().nth(max_chars) {
        None => Cow::Borrowed(label),
        Some((cut, _)) => Cow::Owned(format!("{}…", &label[..cut])),
    }
}

/// Everything the renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAppearance {
    shape: NodeShape,
    icon: Icon,
    accent: Color,
    label: String,
    badge: Option<String>,
    selected: bool,
}

impl NodeAppearance {
    pub fn resolve(node: &DiagramNode, selected: bool, label_max_chars: usize) -> Self {
        let (icon, accent) = icon_for(node.status(), node.node_type());
        Self {
            shape: NodeShape::for_type(node.node_type()),
            icon,
            accent,
            label: truncate_label(node.label(), label_max_chars).into_owned(),
            badge: node.process_id().map(str::to_string),
            selected,
        }
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    /// Color of the status or type icon.
    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn stroke_width(&self) -> f32 {
        if self.selected { 3.0 } else { 2.0 }
    }

    pub fn stroke_color(&self) -> Color {
        if self.selected {
            palette::blue()
        } else {
            palette::border()
        }
    }

    pub fn fill(&self) -> Color {
        if self.selected {
            palette::selected_fill()
        } else {
            palette::surface()
        }
    }

    /// Scale about the node center.
    pub fn scale(&self) -> f32 {
        if self.selected { 1.05 } else { 1.0 }
    }
}
