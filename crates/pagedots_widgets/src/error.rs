//! Widget error types
//!
//! Widgets themselves never fail at runtime; these errors only surface when
//! reading attributes or when the layout engine rejects a tree.

use pagedots_core::ColorParseError;
use thiserror::Error;

/// Errors produced while turning declarative attributes into a style
#[derive(Error, Debug)]
pub enum StyleError {
    /// A color attribute could not be parsed
    #[error("Invalid color for `{key}`: {source}")]
    Color {
        key: &'static str,
        #[source]
        source: ColorParseError,
    },

    /// A size attribute is negative or not finite
    #[error("Invalid dimension for `{key}`: {value} (must be finite and non-negative)")]
    Dimension { key: &'static str, value: f32 },

    /// The attribute document is not valid TOML
    #[error("Attribute parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors from laying out the dot row
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The flexbox engine rejected the tree
    #[error("Layout engine error: {0}")]
    Engine(String),
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Engine(err.to_string())
    }
}

/// Result type for attribute parsing
pub type Result<T> = std::result::Result<T, StyleError>;
