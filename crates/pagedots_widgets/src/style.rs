//! Indicator styling
//!
//! Three layers describe how the indicator looks:
//!
//! - [`IndicatorAttrs`]: the declarative attribute source, read once at
//!   construction (every key optional, usually loaded from TOML)
//! - [`IndicatorStyle`]: the resolved configuration the widget lays out and
//!   draws with
//! - [`StyleUpdate`]: a runtime patch where `None` means "leave unchanged"
//!
//! # Example
//!
//! ```ignore
//! let attrs = IndicatorAttrs::from_toml_str(r##"
//!     width = 40
//!     height = 8
//!     selected_color = "#FF2196F3"
//! "##)?;
//! let style = attrs.resolve()?;
//! assert_eq!(style.step(), 60.0);
//! ```

use pagedots_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Default gap before each dot
pub const DEFAULT_MARGIN: f32 = 20.0;
/// Default dot width
pub const DEFAULT_WIDTH: f32 = 100.0;
/// Default dot height
pub const DEFAULT_HEIGHT: f32 = 50.0;
/// Default corner radius for dots and highlight
pub const DEFAULT_CORNER_RADIUS: f32 = 10.0;

/// Resolved indicator configuration
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorStyle {
    /// Gap before each dot (and after the last one)
    pub margin: f32,
    /// Dot width
    pub width: f32,
    /// Dot height
    pub height: f32,
    /// Corner radius shared by dots and the highlight
    pub corner_radius: f32,
    /// Dot fill color
    pub normal_color: Color,
    /// Highlight fill color
    pub selected_color: Color,
    /// Whether the highlight follows the drag continuously
    ///
    /// When false the highlight jumps on page selection only.
    pub movable: bool,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            corner_radius: DEFAULT_CORNER_RADIUS,
            normal_color: Color::from_hex(0x888888),
            selected_color: Color::WHITE,
            movable: true,
        }
    }
}

impl IndicatorStyle {
    /// Create a style with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap before each dot
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the dot size
    pub fn dot_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the corner radius
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the dot color
    pub fn normal_color(mut self, color: Color) -> Self {
        self.normal_color = color;
        self
    }

    /// Set the highlight color
    pub fn selected_color(mut self, color: Color) -> Self {
        self.selected_color = color;
        self
    }

    /// Set whether the highlight tracks the drag
    pub fn movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Distance the highlight travels per page
    pub fn step(&self) -> f32 {
        self.margin + self.width
    }

    /// Apply every field set in `update`
    ///
    /// Sizes that are negative or not finite are ignored. Returns whether
    /// anything changed.
    pub fn apply(&mut self, update: &StyleUpdate) -> bool {
        let before = self.clone();

        if let Some(movable) = update.movable {
            self.movable = movable;
        }
        if let Some(color) = update.normal_color {
            self.normal_color = color;
        }
        if let Some(color) = update.selected_color {
            self.selected_color = color;
        }
        apply_dimension(&mut self.margin, update.margin, "margin");
        apply_dimension(&mut self.width, update.width, "width");
        apply_dimension(&mut self.height, update.height, "height");
        apply_dimension(&mut self.corner_radius, update.corner_radius, "corner_radius");

        *self != before
    }
}

fn apply_dimension(field: &mut f32, value: Option<f32>, key: &'static str) {
    match value {
        Some(v) if valid_dimension(v) => *field = v,
        Some(v) => tracing::debug!(key, value = v, "ignoring invalid style dimension"),
        None => {}
    }
}

fn valid_dimension(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Runtime style patch
///
/// Every field is optional; `None` leaves the current value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleUpdate {
    pub margin: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub corner_radius: Option<f32>,
    pub normal_color: Option<Color>,
    pub selected_color: Option<Color>,
    pub movable: Option<bool>,
}

impl StyleUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn normal_color(mut self, color: Color) -> Self {
        self.normal_color = Some(color);
        self
    }

    pub fn selected_color(mut self, color: Color) -> Self {
        self.selected_color = Some(color);
        self
    }

    pub fn movable(mut self, movable: bool) -> Self {
        self.movable = Some(movable);
        self
    }
}

// =============================================================================
// Declarative attributes
// =============================================================================

/// Declarative attribute source for the rect indicator
///
/// Mirrors the attribute names layout files use. Colors are `#RRGGBB` or
/// `#AARRGGBB` strings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_margin: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_move: Option<bool>,
}

impl IndicatorAttrs {
    /// Parse attributes from a TOML table
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Resolve into a style, filling absent keys with defaults
    pub fn resolve(&self) -> Result<IndicatorStyle> {
        let defaults = IndicatorStyle::default();

        Ok(IndicatorStyle {
            margin: dimension("horizon_margin", self.horizon_margin, defaults.margin)?,
            width: dimension("width", self.width, defaults.width)?,
            height: dimension("height", self.height, defaults.height)?,
            corner_radius: dimension("round_size", self.round_size, defaults.corner_radius)?,
            normal_color: color(
                "normal_color",
                self.normal_color.as_deref(),
                defaults.normal_color,
            )?,
            selected_color: color(
                "selected_color",
                self.selected_color.as_deref(),
                defaults.selected_color,
            )?,
            movable: self.can_move.unwrap_or(defaults.movable),
        })
    }
}

fn dimension(key: &'static str, value: Option<f32>, default: f32) -> Result<f32> {
    match value {
        Some(v) if valid_dimension(v) => Ok(v),
        Some(v) => Err(StyleError::Dimension { key, value: v }),
        None => Ok(default),
    }
}

fn color(key: &'static str, value: Option<&str>, default: Color) -> Result<Color> {
    match value {
        Some(s) => s
            .parse()
            .map_err(|source| StyleError::Color { key, source }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = IndicatorStyle::default();
        assert_eq!(style.margin, 20.0);
        assert_eq!(style.width, 100.0);
        assert_eq!(style.height, 50.0);
        assert_eq!(style.corner_radius, 10.0);
        assert_eq!(style.selected_color, Color::WHITE);
        assert!(style.movable);
        assert_eq!(style.step(), 120.0);
    }

    #[test]
    fn test_empty_update_leaves_style_unchanged() {
        let mut style = IndicatorStyle::new()
            .margin(8.0)
            .dot_size(24.0, 6.0)
            .movable(false);
        let before = style.clone();

        assert!(!style.apply(&StyleUpdate::new()));
        assert_eq!(style, before);
    }

    #[test]
    fn test_update_overrides_only_set_fields() {
        let mut style = IndicatorStyle::default();
        let changed = style.apply(
            &StyleUpdate::new()
                .width(40.0)
                .selected_color(Color::RED)
                .movable(false),
        );

        assert!(changed);
        assert_eq!(style.width, 40.0);
        assert_eq!(style.selected_color, Color::RED);
        assert!(!style.movable);
        assert_eq!(style.margin, DEFAULT_MARGIN);
        assert_eq!(style.height, DEFAULT_HEIGHT);
        assert_eq!(style.step(), 60.0);
    }

    #[test]
    fn test_update_ignores_invalid_dimensions() {
        let mut style = IndicatorStyle::default();
        let changed = style.apply(&StyleUpdate::new().width(-5.0).height(f32::NAN));

        assert!(!changed);
        assert_eq!(style.width, DEFAULT_WIDTH);
        assert_eq!(style.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn test_attrs_resolve_defaults() {
        let attrs = IndicatorAttrs::from_toml_str("").unwrap();
        assert_eq!(attrs.resolve().unwrap(), IndicatorStyle::default());
    }

    #[test]
    fn test_attrs_from_toml() {
        let attrs = IndicatorAttrs::from_toml_str(
            r##"
            horizon_margin = 8.0
            width = 24.0
            height = 6.0
            round_size = 3.0
            normal_color = "#33FFFFFF"
            selected_color = "#2196F3"
            can_move = false
            "##,
        )
        .unwrap();
        let style = attrs.resolve().unwrap();

        assert_eq!(style.margin, 8.0);
        assert_eq!(style.width, 24.0);
        assert_eq!(style.height, 6.0);
        assert_eq!(style.corner_radius, 3.0);
        assert_eq!(style.selected_color, Color::from_hex(0x2196F3));
        assert!((style.normal_color.a - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!(!style.movable);
    }

    #[test]
    fn test_attrs_reject_bad_values() {
        let attrs = IndicatorAttrs::from_toml_str("selected_color = \"blue\"").unwrap();
        assert!(matches!(
            attrs.resolve(),
            Err(StyleError::Color {
                key: "selected_color",
                ..
            })
        ));

        let attrs = IndicatorAttrs::from_toml_str("width = -1.0").unwrap();
        assert!(matches!(
            attrs.resolve(),
            Err(StyleError::Dimension { key: "width", .. })
        ));

        assert!(matches!(
            IndicatorAttrs::from_toml_str("colour = \"#FFFFFF\""),
            Err(StyleError::Toml(_))
        ));
    }
}
