//! Node selection state.

use log::{debug, trace};

/// Result of a click on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The clicked node became selected.
    Selected(String),
    /// The clicked node was already selected and got deselected.
    Deselected,
}

/// Tracks which node, if any, is selected.
///
/// Clicking the selected node deselects it; clicking any other node selects
/// that node. Clicking empty canvas changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selected.as_deref() == Some(node_id)
    }

    /// Toggles the selection for a clicked node.
    pub fn click_node(&mut self, node_id: &str) -> SelectionChange {
        if self.is_selected(node_id) {
            debug!(node_id; "Node deselected");
            self.selected = None;
            return SelectionChange::Deselected;
        }

        debug!(node_id; "Node selected");
        self.selected = Some(node_id.to_string());
        SelectionChange::Selected(node_id.to_string())
    }

    /// Drops the selection without a click, returning the id that was
    /// selected.
    pub fn clear(&mut self) -> Option<String> {
        self.selected.take()
    }

    /// Clicking the canvas background keeps the current selection.
    pub fn click_canvas(&mut self) {
        trace!(selected:? = self.selected; "Canvas clicked");
    }
}
