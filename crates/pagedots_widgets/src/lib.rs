//! pagedots Widget Library
//!
//! Page indicators that sit beneath a swipeable page view and follow its
//! scroll position.
//!
//! # Architecture
//!
//! - **Page source**: the host page view implements [`PageSource`] and
//!   reports scroll progress, selections and gesture phases to
//!   [`OnPageChange`] listeners.
//! - **Style**: [`IndicatorAttrs`] are read once from a declarative source,
//!   resolved into an [`IndicatorStyle`], and patched at runtime with
//!   [`StyleUpdate`].
//! - **Layout**: the dot sequence is a single flexbox row.
//! - **Draw**: widgets paint through `pagedots_core::DrawContext`; dirty
//!   flags tell the host when to lay out and redraw.
//!
//! # Example
//!
//! ```rust
//! use pagedots_core::{RecordingContext, Size};
//! use pagedots_widgets::prelude::*;
//!
//! let mut pager = ScriptedPager::new(3, 360.0);
//! let mut indicator = RectIndicator::new(IndicatorStyle::default());
//! indicator.configure(3, Some(&mut pager));
//! indicator.layout(Size::ZERO);
//!
//! pager.swipe_to(1, 4);
//! assert_eq!(indicator.offset(), indicator.step());
//!
//! let mut ctx = RecordingContext::new(Size::new(360.0, 50.0));
//! indicator.draw(&mut ctx);
//! ```

pub mod error;
pub mod pager;
pub mod rect_indicator;
pub mod row;
pub mod style;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, StyleError};
pub use pager::{OnPageChange, PageSource, ScriptedPager, ScrollState};
pub use rect_indicator::{highlight_offset, selected_offset, DotView, PagerListener, RectIndicator};
pub use row::RowGeometry;
pub use style::{IndicatorAttrs, IndicatorStyle, StyleUpdate};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::pager::{OnPageChange, PageSource, ScriptedPager, ScrollState};
    pub use crate::rect_indicator::RectIndicator;
    pub use crate::style::{IndicatorAttrs, IndicatorStyle, StyleUpdate};
}
