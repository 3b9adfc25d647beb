//! RGBA colors

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing a color string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),

    /// Wrong number of hex digits
    #[error("color `{0}` must be #RRGGBB or #AARRGGBB")]
    InvalidLength(String),

    /// A character outside `[0-9a-fA-F]`
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Color from `0xAARRGGBB`
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as f32 / 255.0;
        Self::from_hex(argb & 0x00FF_FFFF).with_alpha(a)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Pack back into `0xAARRGGBB`, rounding each channel
    pub fn to_argb(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#RRGGBB` or `#AARRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_string()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;
        match digits.len() {
            6 => Ok(Color::from_hex(value)),
            8 => Ok(Color::from_argb(value)),
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        let color: Color = "#FF0000".parse().unwrap();
        assert_eq!(color, Color::RED);
    }

    #[test]
    fn test_parse_argb_keeps_alpha() {
        let color: Color = "#80FFFFFF".parse().unwrap();
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.r, 1.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "FF0000".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#FF00".parse::<Color>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "#GG0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            "#+F0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_display_roundtrips_through_argb() {
        let color = Color::from_hex(0x888888);
        assert_eq!(color.to_string(), "#FF888888");
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }
}
