//! pagedots Core
//!
//! Foundational paint primitives shared by the pagedots widgets:
//!
//! - **Geometry**: points, sizes, rectangles and 2D affine transforms
//! - **Color**: linear RGBA colors with hex parsing
//! - **Draw Context**: the drawing API widgets paint through, plus a
//!   recording implementation used by tests and tooling
//!
//! # Example
//!
//! ```rust
//! use pagedots_core::{Color, DrawContext, DrawContextExt, Rect, RecordingContext, Size, Transform};
//!
//! let mut ctx = RecordingContext::new(Size::new(400.0, 80.0));
//! ctx.with_transform(Transform::translate(120.0, 0.0), |ctx| {
//!     ctx.fill_rect(Rect::new(20.0, 15.0, 100.0, 50.0), 10.0.into(), Color::WHITE);
//! });
//!
//! let fills = ctx.device_fills();
//! assert_eq!(fills[0].rect.x(), 140.0);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use draw::{DrawCommand, DrawContext, DrawContextExt, RecordingContext, ResolvedFill};
pub use geometry::{CornerRadius, Point, Rect, Size, Transform};
