//! Configuration types for Waymark diagram rendering.
//!
//! All types implement [`serde::Deserialize`]; every field is optional in
//! the serialized form and falls back to the documented default.
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Constants of the layout engine.
//! - [`BoundsConfig`] - Canvas padding and minimum size.
//! - [`StyleConfig`] - Visual styling options.
//!
//! ```
//! # use waymark::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [layout]
//!     vertical_spacing = 120
//!
//!     [style]
//!     background_color = "#f8fafc"
//!     "##,
//! ).unwrap();
//!
//! assert_eq!(config.layout().vertical_spacing(), 120.0);
//! assert_eq!(config.layout().substage_gap(), 40.0);
//! assert!(config.style().background_color().is_some());
//! ```

use serde::Deserialize;

use waymark_core::color::Color;

use crate::WaymarkError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    bounds: BoundsConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, bounds: BoundsConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            bounds,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the canvas bounds configuration.
    pub fn bounds(&self) -> &BoundsConfig {
        &self.bounds
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every numeric setting is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), WaymarkError> {
        let checks = [
            ("layout.canvas_width", self.layout.canvas_width),
            ("layout.top_margin", self.layout.top_margin),
            ("layout.vertical_spacing", self.layout.vertical_spacing),
            ("layout.substage_gap", self.layout.substage_gap),
            ("bounds.padding", self.bounds.padding),
            ("bounds.min_width", self.bounds.min_width),
            ("bounds.min_height", self.bounds.min_height),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(WaymarkError::Config(format!(
                    "`{name}` must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if self.style.label_max_chars == 0 {
            return Err(WaymarkError::Config(
                "`style.label_max_chars` must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Constants used by the layout engine.
///
/// | Setting | Default |
/// |---------|---------|
/// | `canvas_width` | 800 |
/// | `top_margin` | 50 |
/// | `vertical_spacing` | 150 |
/// | `substage_gap` | 40 |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    top_margin: f32,
    vertical_spacing: f32,
    substage_gap: f32,
}

impl LayoutConfig {
    /// Width of the column the start, stage and end nodes are centered in.
    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    /// Y-coordinate of the start node.
    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Vertical distance between consecutive rows.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Horizontal gap between substages of one row.
    pub fn substage_gap(&self) -> f32 {
        self.substage_gap
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            top_margin: 50.0,
            vertical_spacing: 150.0,
            substage_gap: 40.0,
        }
    }
}

/// Canvas sizing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    padding: f32,
    min_width: f32,
    min_height: f32,
}

impl BoundsConfig {
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            min_width: 800.0,
            min_height: 600.0,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<Color>,
    font_family: String,
    label_max_chars: usize,
}

impl StyleConfig {
    /// Canvas background; `None` leaves the canvas transparent.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Labels longer than this many characters are truncated.
    pub fn label_max_chars(&self) -> usize {
        self.label_max_chars
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: String::from("sans-serif"),
            label_max_chars: 20,
        }
    }
}
