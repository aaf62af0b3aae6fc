//! Export of a rendered diagram scene.
//!
//! A [`Scene`] bundles everything rendering depends on: positioned nodes,
//! routed edges, canvas size, view state and selection. Rendering is a pure
//! function of the scene; an [`Exporter`] turns it into an output format and
//! writes it to any [`io::Write`] sink.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgExporter`]

pub mod svg;

use std::io;

use thiserror::Error;

use waymark_core::geometry::Size;

use crate::{model::DiagramNode, route::RoutedEdge, viewport::ViewState};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `scene` and writes the result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene<'_>, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`WaymarkError::Export`](crate::WaymarkError::Export) at
/// the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Borrowed view of one frame of a diagram.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    nodes: &'a [DiagramNode],
    edges: &'a [RoutedEdge],
    canvas_size: Size,
    view: &'a ViewState,
    selected: Option<&'a str>,
}

impl<'a> Scene<'a> {
    pub fn new(
        nodes: &'a [DiagramNode],
        edges: &'a [RoutedEdge],
        canvas_size: Size,
        view: &'a ViewState,
        selected: Option<&'a str>,
    ) -> Self {
        Self {
            nodes,
            edges,
            canvas_size,
            view,
            selected,
        }
    }

    /// Positioned nodes, in input order.
    pub fn nodes(&self) -> &'a [DiagramNode] {
        self.nodes
    }

    pub fn edges(&self) -> &'a [RoutedEdge] {
        self.edges
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn view(&self) -> &'a ViewState {
        self.view
    }

    pub fn selected(&self) -> Option<&'a str> {
        self.selected
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selected == Some(node_id)
    }
}
