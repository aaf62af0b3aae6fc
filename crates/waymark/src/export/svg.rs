//! SVG export backend.
//!
//! The document has a fixed structure:
//!
//! ```text
//! <svg width height viewBox>
//!   <defs>          arrow markers, one per edge color in use
//!   <rect>          canvas background, outside the viewport transform
//!   <g data-viewport transform style="transition: ...">
//!     <g data-layer="edge">   edge paths
//!     <g data-layer="node">   one <g data-node-id> per node
//!     <g data-layer="text">   edge labels
//! ```

mod edge;
mod node;

use std::io;

use log::{debug, error};
use svg::{Document, node::element as svg_element};

use waymark_core::{
    color::Color,
    draw::{ArrowDrawer, LayeredOutput},
    geometry::Size,
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter, Scene},
};

/// Renders a [`Scene`] to an SVG document.
#[derive(Debug)]
pub struct SvgExporter {
    arrow_drawer: ArrowDrawer,
    background_color: Option<Color>,
    font_family: String,
    label_max_chars: usize,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

impl SvgExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(style: &StyleConfig) -> Self {
        Self {
            arrow_drawer: ArrowDrawer::new(),
            background_color: style.background_color(),
            font_family: style.font_family().to_string(),
            label_max_chars: style.label_max_chars(),
        }
    }

    /// Builds the complete SVG document for `scene`.
    pub fn render_scene(&mut self, scene: &Scene<'_>) -> Result<Document, export::Error> {
        // Markers only for the colors of this frame
        self.arrow_drawer = ArrowDrawer::new();

        let size = scene.canvas_size();
        let mut output = LayeredOutput::new();

        for edge in scene.edges() {
            output.merge(self.render_edge(edge));
        }

        for node in scene.nodes() {
            output.merge(self.render_node(node, scene.is_selected(node.id()))?);
        }

        let view = scene.view();
        let viewport = output.render().into_iter().fold(
            svg_element::Group::new()
                .set("data-viewport", "")
                .set("transform", view.transform())
                .set("style", format!("transition: {}", view.transition())),
            |group, layer| group.add(layer),
        );

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height())
            .add(self.arrow_drawer.draw_marker_definitions());

        debug!(
            nodes_len = scene.nodes().len(),
            edges_len = scene.edges().len(),
            markers_len = self.arrow_drawer.marker_count();
            "Scene rendered"
        );

        Ok(self.add_background(doc, size).add(viewport))
    }

    /// Adds a full-canvas rectangle that also serves as the canvas click target.
    fn add_background(&self, doc: Document, size: Size) -> Document {
        let mut background = svg_element::Rectangle::new()
            .set("data-canvas", "")
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height());

        background = match self.background_color {
            Some(color) => background
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
            None => background.set("fill", "transparent"),
        };

        doc.add(background)
    }
}

impl Exporter for SvgExporter {
    fn export_scene(
        &mut self,
        scene: &Scene<'_>,
        writer: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render_scene(scene)?;

        if let Err(err) = write!(writer, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}
