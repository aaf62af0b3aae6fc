//! Color handling for Waymark diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors parse from any CSS color string and can be
//! deserialized directly from configuration files.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use serde::Deserialize;
use thiserror::Error;

/// Error returned when a string is not a valid CSS color.
#[derive(Debug, Clone, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark_core::color::Color;
    ///
    /// let green = Color::new("#22c55e").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_ne!(green, blue);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Creates an opaque sRGB color from 8-bit channels.
    ///
    /// Unlike [`Color::new`] this cannot fail, which makes it the constructor
    /// of choice for built-in palettes.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgb8(r, g, b)),
        }
    }

    /// Returns a sanitized, ID-safe string representation of this color.
    ///
    /// The result is usable as (part of) an SVG `id` attribute: it contains
    /// only alphanumeric characters, `-` and `_`, and never starts with a digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark_core::color::Color;
    ///
    /// let color = Color::new("#ff8000").unwrap();
    /// let id_str = color.to_id_safe_string();
    /// assert!(id_str.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let color_str = self.to_string();
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '/', '.', '%'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let tint = red.with_alpha(0.1);
    /// assert!((tint.alpha() - 0.1).abs() < 0.001);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());

        let invalid = Color::new("not-a-color");
        let err = invalid.unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
        assert!((color.alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let colors = [
            Color::new("#ff0000").unwrap(),
            Color::new("rgb(10, 20, 30)").unwrap(),
            Color::new("navy").unwrap().with_alpha(0.25),
        ];
        for color in colors {
            let safe_id = color.to_id_safe_string();
            assert!(
                safe_id
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-'),
                "`{safe_id}` is not id-safe"
            );
            assert!(!safe_id.starts_with(|c: char| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }

    #[test]
    fn test_color_from_rgb8() {
        let green = Color::from_rgb8(34, 197, 94);
        assert_eq!(green, Color::from_rgb8(34, 197, 94));
        assert_ne!(green, Color::from_rgb8(239, 68, 68));
        assert!((green.alpha() - 1.0).abs() < 0.001);

        let safe_id = green.to_id_safe_string();
        assert!(
            safe_id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        );
    }

    #[test]
    fn test_color_try_from_string() {
        assert!(Color::try_from("navy".to_string()).is_ok());
        assert!(Color::try_from("nope".to_string()).is_err());
    }
}
