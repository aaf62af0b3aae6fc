//! Waymark Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Waymark workflow
//! diagram crates. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual definitions and SVG rendering for diagram elements ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
