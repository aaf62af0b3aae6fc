//! Input model for workflow diagrams.
//!
//! Hosts describe a workflow as flat arrays of [`DiagramNode`] and
//! [`DiagramEdge`]. The hierarchy (start, stages, substages, end) is encoded
//! in node ids and in the `stageId` entry of a node's [`NodeData`]; this crate
//! only consumes that convention.
//!
//! Every type here (de)serializes with the camelCase field names used by
//! the JSON wire format:
//!
//! ```
//! # use waymark::model::{DiagramNode, NodeStatus, NodeType};
//! let node: DiagramNode = serde_json::from_str(
//!     r#"{"id": "stage-1", "type": "task", "label": "Collect", "status": "in-progress"}"#,
//! ).unwrap();
//!
//! assert_eq!(node.node_type(), NodeType::Task);
//! assert_eq!(node.status(), Some(NodeStatus::InProgress));
//! assert_eq!(node.width(), 180.0);
//! ```

use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use waymark_core::geometry::{Bounds, Point, Size};

use crate::WaymarkError;

/// Width given to nodes that do not specify one.
pub const DEFAULT_NODE_WIDTH: f32 = 180.0;

/// Height given to nodes that do not specify one.
pub const DEFAULT_NODE_HEIGHT: f32 = 60.0;

/// Kind of workflow step a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Task,
    Choice,
    Parallel,
    Map,
    Wait,
    Pass,
    Fail,
    Succeed,
}

/// Execution status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    Completed,
    InProgress,
    Pending,
    Failed,
}

/// Semantic kind of an edge; drives its color and dash style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    #[default]
    Default,
    Success,
    Failure,
    Condition,
}

/// Free-form node payload.
///
/// `stageId` links a substage to its parent stage and `processId` feeds the
/// badge under the label. Any other keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stage_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_loose_id",
        skip_serializing_if = "Option::is_none"
    )]
    process_id: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl NodeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage_id(mut self, stage_id: impl Into<String>) -> Self {
        self.stage_id = Some(stage_id.into());
        self
    }

    pub fn with_process_id(mut self, process_id: impl Into<String>) -> Self {
        self.process_id = Some(process_id.into());
        self
    }

    /// Id of the parent stage, for substage nodes.
    pub fn stage_id(&self) -> Option<&str> {
        self.stage_id.as_deref()
    }

    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }

    /// Looks up any other key of the payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Accepts ids given either as JSON strings or numbers.
fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<LooseId>::deserialize(deserializer)?.map(|id| match id {
        LooseId::Text(text) => text,
        LooseId::Number(number) => number.to_string(),
    }))
}

fn default_width() -> f32 {
    DEFAULT_NODE_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_NODE_HEIGHT
}

/// A node of the workflow graph.
///
/// `x` and `y` are the top-left corner in content coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    id: String,
    #[serde(rename = "type")]
    node_type: NodeType,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<NodeStatus>,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default = "default_width")]
    width: f32,
    #[serde(default = "default_height")]
    height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<NodeData>,
}

impl DiagramNode {
    /// Creates a node at the origin with the default size.
    pub fn new(id: impl Into<String>, node_type: NodeType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: label.into(),
            status: None,
            x: 0.0,
            y: 0.0,
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            data: None,
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn data(&self) -> Option<&NodeData> {
        self.data.as_ref()
    }

    /// Shortcut for `data.stageId`.
    pub fn stage_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(NodeData::stage_id)
    }

    /// Shortcut for `data.processId`.
    pub fn process_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(NodeData::process_id)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the node's rectangle in content coordinates.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), self.size())
    }

    /// Moves the node's top-left corner. Only the layout engine calls this,
    /// and only on its own copy.
    pub(crate) fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEdge {
    id: String,
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(rename = "type", default)]
    edge_type: EdgeType,
}

impl DiagramEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            edge_type: EdgeType::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }
}

/// Immutable node and edge arrays for one render.
///
/// Snapshots are shared behind [`Rc`]; a new `Rc` means new data, and the
/// diagram re-runs layout only when the pointer changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramSnapshot {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl DiagramSnapshot {
    pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The complete input of one workflow diagram, as received from a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInput {
    #[serde(default)]
    workflow_id: String,
    #[serde(default)]
    workflow_title: String,
    #[serde(default)]
    nodes: Vec<DiagramNode>,
    #[serde(default)]
    edges: Vec<DiagramEdge>,
}

impl WorkflowInput {
    pub fn new(
        workflow_id: impl Into<String>,
        workflow_title: impl Into<String>,
        nodes: Vec<DiagramNode>,
        edges: Vec<DiagramEdge>,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            workflow_title: workflow_title.into(),
            nodes,
            edges,
        }
    }

    /// Parses a workflow from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Input`] carrying the source text when the JSON
    /// is malformed or does not match the expected shape.
    pub fn from_json(source: &str) -> Result<Self, WaymarkError> {
        serde_json::from_str(source).map_err(|err| WaymarkError::new_input_error(err, source))
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn workflow_title(&self) -> &str {
        &self.workflow_title
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    /// Splits the input into its identifying strings and a shared snapshot.
    pub fn into_parts(self) -> (String, String, Rc<DiagramSnapshot>) {
        (
            self.workflow_id,
            self.workflow_title,
            Rc::new(DiagramSnapshot::new(self.nodes, self.edges)),
        )
    }
}
