//! Text styles and renderable text elements.
//!
//! - [`TextDefinition`]: reusable font, color and padding settings
//! - [`Text`]: a string paired with a definition, measurable and drawable
//!
//! Measurement uses `cosmic-text` shaping through a process-wide font
//! system that is initialized on first use.
//!
//! ```
//! # use waymark_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(11);
//!
//! let text = Text::new(&style, "approval");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Font weight of rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Bold,
}

impl FontWeight {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "400",
            Self::Medium => "500",
            Self::Bold => "700",
        }
    }
}

/// Visual style of a text element.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Font weight | normal |
/// | Text color | `None` (SVG default) |
/// | Background color | `None` |
/// | Padding | zero |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: FontWeight,
    color: Option<Color>,
    background_color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    /// Sets the text fill color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the background color.
    ///
    /// When present, a rounded rectangle covering the text and its padding
    /// is drawn on the [`RenderLayer::Text`] layer just before the text.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Sets the padding around the text content.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            font_weight: FontWeight::default(),
            color: None,
            background_color: None,
            padding: Insets::default(),
        }
    }
}

/// A single line of text combined with its style.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the total size required to display this text, including padding.
    pub fn calculate_size(&self) -> Size {
        self.calculate_size_without_padding()
            .add_padding(self.definition.padding())
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl<'a> Drawable for Text<'a> {
    /// Renders the text centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        if let Some(bg_color) = self.definition.background_color() {
            let bg_bounds = position.to_bounds(self.calculate_size());

            let bg = svg_element::Rectangle::new()
                .set("x", bg_bounds.min_x())
                .set("y", bg_bounds.min_y())
                .set("width", bg_bounds.width())
                .set("height", bg_bounds.height())
                .set("fill", bg_color.to_string())
                .set("fill-opacity", bg_color.alpha())
                .set("rx", 3.0);

            output.add_to_layer(RenderLayer::Text, Box::new(bg));
        }

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("font-weight", self.definition.font_weight().to_svg_value())
            .add(SvgText::new(self.content));

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Owns the shared `FontSystem` used for text measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` with real font metrics and shaping.
    ///
    /// Falls back to an average glyph width estimate when shaping yields no
    /// layout runs (for example when no system font is available).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // A poisoned lock still holds a usable FontSystem
        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        if max_width <= 0.0 {
            max_width = text.chars().count() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 12);
        assert_eq!(def.font_family(), "sans-serif");
        assert_eq!(def.font_weight(), FontWeight::Normal);
        assert!(def.color().is_none());
        assert!(def.background_color().is_none());
        assert_approx_eq!(f32, def.padding().horizontal_sum(), 0.0);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_size(14);
        def.set_font_family("monospace");
        def.set_font_weight(FontWeight::Bold);
        def.set_color(Some(Color::new("#1e293b").unwrap()));
        def.set_padding(Insets::uniform(4.0));

        assert_eq!(def.font_size(), 14);
        assert_eq!(def.font_family(), "monospace");
        assert_eq!(def.font_weight(), FontWeight::Bold);
        assert!(def.color().is_some());
        assert_approx_eq!(f32, def.padding().top(), 4.0);
    }

    #[test]
    fn test_text_empty_has_zero_size() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");
        assert!(text.calculate_size().is_zero());
    }

    #[test]
    fn test_text_size_includes_padding() {
        let mut def = TextDefinition::new();
        let plain = Text::new(&def, "Review").calculate_size();

        def.set_padding(Insets::uniform(4.0));
        let padded = Text::new(&def, "Review").calculate_size();

        assert_approx_eq!(f32, padded.width(), plain.width() + 8.0, epsilon = 0.01);
        assert_approx_eq!(f32, padded.height(), plain.height() + 8.0, epsilon = 0.01);
    }

    #[test]
    fn test_text_longer_content_is_wider() {
        let def = TextDefinition::new();
        let short = Text::new(&def, "ok").calculate_size();
        let long = Text::new(&def, "ok ok ok ok ok").calculate_size();
        assert!(long.width() > short.width());
    }

    #[test]
    fn test_text_render_layers() {
        let mut def = TextDefinition::new();
        let text = Text::new(&def, "approved");
        let output = text.render_to_layers(Point::new(10.0, 20.0));
        assert_eq!(output.layer_len(RenderLayer::Text), 1);

        def.set_background_color(Some(Color::new("white").unwrap()));
        let text = Text::new(&def, "approved");
        let output = text.render_to_layers(Point::new(10.0, 20.0));
        assert_eq!(output.layer_len(RenderLayer::Text), 2);
    }
}
