//! Waymark - layout, routing and an interactive viewport for workflow diagrams.
//!
//! A workflow arrives as flat arrays of nodes and edges whose ids encode a
//! fixed hierarchy: `start`, a column of `stage-*` nodes, rows of
//! `substage-*` nodes under their stage, and `end`. Waymark positions the
//! nodes, routes the edges, sizes the canvas and renders the result as SVG,
//! while tracking zoom, pan, drag and node selection for one diagram
//! instance.
//!
//! # Examples
//!
//! ```rust,no_run
//! use waymark::{DiagramBuilder, config::AppConfig};
//!
//! let source = r#"{
//!     "workflowId": "wf-42",
//!     "workflowTitle": "Month-end close",
//!     "nodes": [
//!         {"id": "start", "type": "pass", "label": "Start"},
//!         {"id": "stage-1", "type": "task", "label": "Collect", "status": "completed"},
//!         {"id": "end", "type": "succeed", "label": "Done"}
//!     ],
//!     "edges": [
//!         {"id": "e1", "source": "start", "target": "stage-1"},
//!         {"id": "e2", "source": "stage-1", "target": "end", "type": "success"}
//!     ]
//! }"#;
//!
//! let builder = DiagramBuilder::new(AppConfig::default());
//! let mut diagram = builder.parse(source).expect("Failed to parse");
//!
//! diagram.set_on_node_click(|id| println!("selected {id}"));
//! diagram.zoom_in();
//! diagram.click_node("stage-1");
//!
//! let svg = diagram.render_svg().expect("Failed to render");
//! println!("{svg}");
//! ```

pub mod appearance;
pub mod bounds;
pub mod config;
pub mod diagram;
pub mod export;
pub mod layout;
pub mod model;
pub mod route;
pub mod selection;
pub mod viewport;

mod error;

pub use waymark_core::{color, draw, geometry};

pub use diagram::{DiagramBuilder, NodeClickHandler, WorkflowDiagram};
pub use error::WaymarkError;
