//! CLI logic for the Waymark workflow renderer.
//!
//! Reads a JSON workflow snapshot, replays the requested view gestures and
//! writes the diagram as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Pan};

use std::fs;

use log::{info, warn};

use waymark::{
    DiagramBuilder, WaymarkError, WorkflowDiagram, geometry::Point, viewport::PointerButton,
};

/// Run the Waymark CLI application
///
/// # Errors
///
/// Returns `WaymarkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed workflow input
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), WaymarkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing workflow"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let mut diagram = builder.parse(&source)?;
    diagram.set_on_node_click(|node_id| info!(node_id; "Node selected"));

    apply_view(&mut diagram, args);

    let svg = diagram.render_svg()?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Replays zoom, pan and selection arguments as gestures.
fn apply_view(diagram: &mut WorkflowDiagram, args: &Args) {
    for _ in 0..args.zoom_steps.unsigned_abs() {
        if args.zoom_steps > 0 {
            diagram.zoom_in();
        } else {
            diagram.zoom_out();
        }
    }

    if let Some(pan) = args.pan {
        diagram.pointer_down(PointerButton::Primary, Point::default());
        diagram.pointer_move(Point::new(pan.x, pan.y));
        diagram.pointer_up();
    }

    let Some(node_id) = &args.select else {
        return;
    };
    if diagram.click_node(node_id).is_none() {
        warn!(node_id = node_id.as_str(); "Node to select not found, rendering without selection");
    }
}
