use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate between two colors, channel by channel.
    ///
    /// `t` is clamped to `[0, 1]`, each channel is rounded to the nearest integer.
    pub fn mix(from: Color, to: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Color::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex color. The alpha channel, if any, is ignored.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ColorError::InvalidLength(input.to_string()));
        }
        let channel = |index: usize| {
            u8::from_str_radix(&digits[index..index + 2], 16).map_err(|_| ColorError::InvalidDigits(input.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        crossterm::style::Color::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("color '{0}' must have 6 or 8 hex digits")]
    InvalidLength(String),

    #[error("color '{0}' contains non hex digits")]
    InvalidDigits(String),
}

/// The style a piece of text is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// The nominal font size in canvas pixels.
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(color: Color) -> Self {
        Self { color, size: 0.0, bold: false }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}
