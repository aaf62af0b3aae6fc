//! The interactive diagram instance.
//!
//! A [`WorkflowDiagram`] ties the pipeline together for one workflow:
//!
//! ```text
//! DiagramSnapshot
//!     ↓ layout::Engine        (re-run only when the snapshot changes identity)
//! positioned nodes
//!     ↓ BoundsCalculator, EdgeRouter
//! canvas size + routed edges
//!     ↓ SvgExporter           (+ ViewState, Selection)
//! SVG document
//! ```
//!
//! It owns the view state, the selection and the optional node-click
//! callback; every gesture is a `&mut self` method that updates them
//! synchronously.

use std::{fmt, io, rc::Rc};

use log::{debug, info, trace};

use waymark_core::geometry::{Point, Size};

use crate::{
    WaymarkError,
    bounds::BoundsCalculator,
    config::{AppConfig, StyleConfig},
    export::{self, Exporter, Scene, svg::SvgExporter},
    layout::Engine,
    model::{DiagramNode, DiagramSnapshot, WorkflowInput},
    route::{EdgeRouter, RoutedEdge},
    selection::{Selection, SelectionChange},
    viewport::{PointerButton, ViewState, WheelOutcome},
};

/// Callback invoked with the id of a node that became selected.
pub type NodeClickHandler = Box<dyn FnMut(&str)>;

/// Creates [`WorkflowDiagram`]s sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses a JSON [`WorkflowInput`] and builds its diagram.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Input`] if `source` is not a valid workflow.
    pub fn parse(&self, source: &str) -> Result<WorkflowDiagram, WaymarkError> {
        let input = WorkflowInput::from_json(source)?;
        Ok(self.build(input))
    }

    /// Builds a diagram and runs the initial layout.
    pub fn build(&self, input: WorkflowInput) -> WorkflowDiagram {
        let (workflow_id, workflow_title, snapshot) = input.into_parts();

        let engine = Engine::from_config(self.config.layout());
        let bounds = BoundsCalculator::from_config(self.config.bounds());
        let router = EdgeRouter::new();
        let frame = Frame::compute(&engine, &bounds, &router, &snapshot);

        info!(
            workflow_id = workflow_id.as_str(),
            nodes_len = snapshot.nodes().len();
            "Diagram built"
        );

        WorkflowDiagram {
            workflow_id,
            workflow_title,
            snapshot,
            engine,
            bounds,
            router,
            style: self.config.style().clone(),
            frame,
            view: ViewState::new(),
            selection: Selection::new(),
            on_node_click: None,
        }
    }
}

/// Derived geometry of one snapshot.
#[derive(Debug, Clone)]
struct Frame {
    nodes: Vec<DiagramNode>,
    edges: Vec<RoutedEdge>,
    canvas_size: Size,
}

impl Frame {
    fn compute(
        engine: &Engine,
        bounds: &BoundsCalculator,
        router: &EdgeRouter,
        snapshot: &DiagramSnapshot,
    ) -> Self {
        let nodes = engine.calculate(snapshot.nodes(), snapshot.edges());
        let edges = router.route(&nodes, snapshot.edges());
        let canvas_size = bounds.calculate(&nodes);

        debug!(
            nodes_len = nodes.len(),
            edges_len = edges.len(),
            width = canvas_size.width(),
            height = canvas_size.height();
            "Frame computed"
        );

        Self {
            nodes,
            edges,
            canvas_size,
        }
    }
}

/// One interactive workflow diagram.
pub struct WorkflowDiagram {
    workflow_id: String,
    workflow_title: String,
    snapshot: Rc<DiagramSnapshot>,
    engine: Engine,
    bounds: BoundsCalculator,
    router: EdgeRouter,
    style: StyleConfig,
    frame: Frame,
    view: ViewState,
    selection: Selection,
    on_node_click: Option<NodeClickHandler>,
}

impl fmt::Debug for WorkflowDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowDiagram")
            .field("workflow_id", &self.workflow_id)
            .field("workflow_title", &self.workflow_title)
            .field("nodes_len", &self.snapshot.nodes().len())
            .field("view", &self.view)
            .field("selection", &self.selection)
            .field("has_on_node_click", &self.on_node_click.is_some())
            .finish_non_exhaustive()
    }
}

impl WorkflowDiagram {
    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn workflow_title(&self) -> &str {
        &self.workflow_title
    }

    pub fn snapshot(&self) -> &Rc<DiagramSnapshot> {
        &self.snapshot
    }

    /// Replaces the node and edge snapshot.
    ///
    /// Layout re-runs only when `snapshot` is a different allocation from
    /// the current one; handing back the same `Rc` is free. View state is
    /// kept, and so is the selection as long as the selected node is still
    /// present. Returns `true` if layout re-ran.
    pub fn set_snapshot(&mut self, snapshot: Rc<DiagramSnapshot>) -> bool {
        if Rc::ptr_eq(&self.snapshot, &snapshot) {
            trace!(workflow_id = self.workflow_id.as_str(); "Snapshot unchanged, layout reused");
            return false;
        }

        self.frame = Frame::compute(&self.engine, &self.bounds, &self.router, &snapshot);
        self.snapshot = snapshot;

        let selection_gone = self
            .selection
            .selected()
            .is_some_and(|id| !self.frame.nodes.iter().any(|node| node.id() == id));
        if selection_gone {
            let node_id = self.selection.clear().unwrap_or_default();
            debug!(node_id = node_id.as_str(); "Selected node left the snapshot, selection cleared");
        }
        true
    }

    /// Nodes with their computed positions, in input order.
    pub fn positioned_nodes(&self) -> &[DiagramNode] {
        &self.frame.nodes
    }

    /// Routes of every edge whose endpoints exist.
    pub fn routed_edges(&self) -> &[RoutedEdge] {
        &self.frame.edges
    }

    pub fn canvas_size(&self) -> Size {
        self.frame.canvas_size
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn wheel(&mut self, delta_y: f32, modifier_held: bool) -> WheelOutcome {
        self.view.wheel(delta_y, modifier_held)
    }

    pub fn pointer_down(&mut self, button: PointerButton, position: Point) {
        self.view.pointer_down(button, position);
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.view.pointer_move(position);
    }

    pub fn pointer_up(&mut self) {
        self.view.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.view.pointer_leave();
    }

    /// Restores zoom 1 and zero pan; the selection is kept.
    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selection.selected()
    }

    /// Registers the callback fired whenever a node becomes selected.
    pub fn set_on_node_click(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_node_click = Some(Box::new(handler));
    }

    pub fn clear_on_node_click(&mut self) {
        self.on_node_click = None;
    }

    /// Handles a click on the node `node_id`.
    ///
    /// Ids that are not part of the current snapshot are ignored and return
    /// `None`. Deselecting does not fire the callback.
    pub fn click_node(&mut self, node_id: &str) -> Option<SelectionChange> {
        if !self.frame.nodes.iter().any(|node| node.id() == node_id) {
            debug!(node_id; "Ignoring click on unknown node");
            return None;
        }

        let change = self.selection.click_node(node_id);
        if let (SelectionChange::Selected(id), Some(handler)) =
            (&change, self.on_node_click.as_mut())
        {
            handler(id);
        }

        Some(change)
    }

    /// Handles a click on empty canvas; the selection is kept.
    pub fn click_canvas(&mut self) {
        self.selection.click_canvas();
    }

    /// Returns the topmost node under a point in canvas element coordinates.
    ///
    /// Nodes later in input order are drawn on top and win overlaps.
    pub fn hit_test(&self, screen: Point) -> Option<&DiagramNode> {
        let content = self.view.screen_to_content(screen);
        self.frame
            .nodes
            .iter()
            .rev()
            .find(|node| node.bounds().contains(content))
    }

    /// Dispatches a click at a canvas element position to the node under it,
    /// or to the canvas when there is none.
    pub fn click_at(&mut self, screen: Point) -> Option<SelectionChange> {
        let Some(node_id) = self.hit_test(screen).map(|node| node.id().to_string()) else {
            self.click_canvas();
            return None;
        };
        self.click_node(&node_id)
    }

    /// Borrowed view of the current frame for an [`Exporter`].
    pub fn scene(&self) -> Scene<'_> {
        Scene::new(
            &self.frame.nodes,
            &self.frame.edges,
            self.frame.canvas_size,
            &self.view,
            self.selection.selected(),
        )
    }

    /// Writes the current frame as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Export`] if rendering or writing fails.
    pub fn write_svg(&self, writer: &mut dyn io::Write) -> Result<(), WaymarkError> {
        let mut exporter = SvgExporter::from_config(&self.style);
        exporter.export_scene(&self.scene(), writer)?;
        Ok(())
    }

    /// Renders the current frame to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Export`] if rendering fails.
    pub fn render_svg(&self) -> Result<String, WaymarkError> {
        let mut buffer = Vec::new();
        self.write_svg(&mut buffer)?;
        let svg = String::from_utf8(buffer)
            .map_err(|err| export::Error::Render(format!("SVG output is not UTF-8: {err}")))?;
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::model::{DiagramEdge, NodeType};

    fn input() -> WorkflowInput {
        WorkflowInput::new(
            "wf-1",
            "Month-end close",
            vec![
                DiagramNode::new("start", NodeType::Pass, "Start"),
                DiagramNode::new("stage-1", NodeType::Task, "Collect"),
                DiagramNode::new("end", NodeType::Succeed, "End"),
            ],
            vec![
                DiagramEdge::new("e1", "start", "stage-1"),
                DiagramEdge::new("e2", "stage-1", "end"),
            ],
        )
    }

    #[test]
    fn test_build_runs_layout() {
        let diagram = DiagramBuilder::default().build(input());

        assert_eq!(diagram.workflow_id(), "wf-1");
        assert_eq!(diagram.workflow_title(), "Month-end close");
        assert_eq!(diagram.positioned_nodes()[0].x(), 310.0);
        assert_eq!(diagram.positioned_nodes()[0].y(), 50.0);
        assert_eq!(diagram.routed_edges().len(), 2);
        assert_eq!(diagram.canvas_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_set_snapshot_memoizes_on_identity() {
        let mut diagram = DiagramBuilder::default().build(input());

        let same = Rc::clone(diagram.snapshot());
        assert!(!diagram.set_snapshot(same));

        let equal_but_new = Rc::new((**diagram.snapshot()).clone());
        assert!(diagram.set_snapshot(equal_but_new));
    }

    #[test]
    fn test_set_snapshot_keeps_view_and_selection() {
        let mut diagram = DiagramBuilder::default().build(input());
        diagram.zoom_in();
        diagram.click_node("stage-1");

        diagram.set_snapshot(Rc::new(DiagramSnapshot::new(
            vec![DiagramNode::new("stage-1", NodeType::Task, "Review")],
            vec![],
        )));

        assert_eq!(diagram.positioned_nodes().len(), 1);
        assert!(diagram.view().zoom() > 1.0);
        assert_eq!(diagram.selected_node(), Some("stage-1"));
    }

    #[test]
    fn test_set_snapshot_clears_selection_of_removed_node() {
        let mut diagram = DiagramBuilder::default().build(input());
        diagram.zoom_in();
        diagram.click_node("stage-1");

        diagram.set_snapshot(Rc::new(DiagramSnapshot::new(
            vec![DiagramNode::new("start", NodeType::Pass, "Start")],
            vec![],
        )));

        assert!(diagram.view().zoom() > 1.0);
        assert_eq!(diagram.selected_node(), None);
        let svg = diagram.render_svg().expect("Failed to render");
        assert!(!svg.contains("scale(1.05)"));
    }

    #[test]
    fn test_callback_fires_on_select_only() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut diagram = DiagramBuilder::default().build(input());
        {
            let clicks = Rc::clone(&clicks);
            diagram.set_on_node_click(move |id| clicks.borrow_mut().push(id.to_string()));
        }

        diagram.click_node("stage-1");
        diagram.click_node("stage-1");
        diagram.click_node("end");
        diagram.click_canvas();

        assert_eq!(*clicks.borrow(), vec!["stage-1".to_string(), "end".to_string()]);
        assert_eq!(diagram.selected_node(), Some("end"));
    }

    #[test]
    fn test_click_unknown_node_is_ignored() {
        let mut diagram = DiagramBuilder::default().build(input());
        assert_eq!(diagram.click_node("stage-99"), None);
        assert_eq!(diagram.selected_node(), None);
    }

    #[test]
    fn test_click_at_hits_through_view_transform() {
        let mut diagram = DiagramBuilder::default().build(input());
        // stage-1 spans x 310..490, y 200..260 in content space
        diagram.zoom_in();
        diagram.zoom_in();
        diagram.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0));
        diagram.pointer_move(Point::new(-100.0, -50.0));
        diagram.pointer_up();

        let screen = diagram.view().content_to_screen(Point::new(400.0, 230.0));
        assert_eq!(
            diagram.click_at(screen),
            Some(SelectionChange::Selected("stage-1".to_string()))
        );

        assert_eq!(diagram.click_at(Point::new(5.0, 5.0)), None);
        assert_eq!(diagram.selected_node(), Some("stage-1"));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let input = WorkflowInput::new(
            "wf-2",
            "Overlap",
            vec![
                DiagramNode::new("note-a", NodeType::Task, "A").with_position(0.0, 0.0),
                DiagramNode::new("note-b", NodeType::Task, "B").with_position(50.0, 0.0),
            ],
            vec![],
        );
        let diagram = DiagramBuilder::default().build(input);

        let hit = diagram.hit_test(Point::new(100.0, 30.0)).map(DiagramNode::id);
        assert_eq!(hit, Some("note-b"));
        let hit = diagram.hit_test(Point::new(20.0, 30.0)).map(DiagramNode::id);
        assert_eq!(hit, Some("note-a"));
    }

    #[test]
    fn test_reset_view_keeps_selection() {
        let mut diagram = DiagramBuilder::default().build(input());
        diagram.click_node("start");
        diagram.zoom_out();

        diagram.reset_view();

        assert_eq!(diagram.view().zoom(), 1.0);
        assert_eq!(diagram.selected_node(), Some("start"));
    }

    #[test]
    fn test_render_svg() {
        let mut diagram = DiagramBuilder::default().build(input());
        diagram.click_node("stage-1");

        let svg = diagram.render_svg().expect("render");
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"data-node-id="stage-1""#));
        assert!(svg.contains("scale(1.05)"));
    }
}
