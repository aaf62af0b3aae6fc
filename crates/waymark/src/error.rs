//! Error types for Waymark operations.
//!
//! Layout, routing, viewport and selection never fail; degenerate input is
//! dropped or left in place. Only the surfaces that touch external data
//! return [`WaymarkError`]: JSON input, configuration and SVG export.

use std::io;

use thiserror::Error;

/// The main error type for Waymark operations.
///
/// The `Input` variant keeps the offending source text so callers can point
/// at the line and column reported by the JSON parser.
#[derive(Debug, Error)]
pub enum WaymarkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid workflow input: {err}")]
    Input {
        err: serde_json::Error,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl WaymarkError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
