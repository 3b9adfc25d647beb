//! Rectangular page indicator
//!
//! A row of rounded rectangles, one per page, with a highlight rectangle that
//! slides across them as the page source scrolls.
//!
//! Two highlight modes:
//!
//! - **Movable** (default): the highlight follows the drag. At page `p` with
//!   progress `f` it sits `step * (p % count) + step * f` from the first dot.
//!   Dragging forward off the last page snaps it back to the first dot
//!   rather than sliding past the end of the row.
//! - **Fixed**: drag progress is ignored; the highlight jumps to
//!   `step * (p % count)` when page `p` is selected.
//!
//! `step` is the dot width plus the margin between dots.
//!
//! # Example
//!
//! ```rust
//! use pagedots_core::{RecordingContext, Size};
//! use pagedots_widgets::prelude::*;
//!
//! let mut pager = ScriptedPager::new(4, 360.0);
//! let mut indicator = RectIndicator::new(IndicatorStyle::new().dot_size(24.0, 6.0));
//! indicator.configure(4, Some(&mut pager));
//! indicator.layout(Size::new(360.0, 24.0));
//!
//! pager.swipe_to(2, 8);
//! assert_eq!(indicator.offset(), 2.0 * indicator.step());
//!
//! let mut ctx = RecordingContext::new(indicator.bounds().size);
//! indicator.draw(&mut ctx);
//!
//! // Four dots, then the highlight over the third one
//! let fills = ctx.device_fills();
//! assert_eq!(fills.len(), 5);
//! assert_eq!(fills[4].rect, fills[2].rect);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use pagedots_core::{Color, CornerRadius, DrawContext, DrawContextExt, Rect, Size, Transform};
use smallvec::SmallVec;

use crate::error::Result;
use crate::pager::{OnPageChange, PageSource, ScrollState};
use crate::row::{self, RowGeometry};
use crate::style::{IndicatorAttrs, IndicatorStyle, StyleUpdate};

/// Highlight offset for page `position` at drag progress `progress`
///
/// Progress is clamped to `[0, 1]`; non-finite progress counts as 0. The
/// result always lies in `[0, step * (count - 1)]`.
pub fn highlight_offset(position: usize, progress: f32, count: usize, step: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let index = position % count;

    // Leaving the last page forward wraps to the first one
    if index == count - 1 && progress > 0.0 {
        return 0.0;
    }
    step * index as f32 + step * progress
}

/// Highlight offset when the highlight only moves on selection
pub fn selected_offset(position: usize, count: usize, step: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    step * (position % count) as f32
}

/// One dot of the sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotView {
    /// Laid-out bounds, empty until the first layout
    pub bounds: Rect,
    pub corner_radius: f32,
    pub color: Color,
}

/// Last page event that moved the highlight
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PageAnchor {
    position: usize,
    progress: f32,
}

/// State shared between the widget and its page listener
#[derive(Debug, Default)]
struct IndicatorState {
    style: IndicatorStyle,
    dots: SmallVec<[DotView; 8]>,
    bounds: Rect,
    /// First dot's bounds; `None` until laid out
    highlight: Option<Rect>,
    step: f32,
    offset: f32,
    anchor: PageAnchor,
    scroll_state: ScrollState,
    needs_layout: bool,
    needs_redraw: bool,
    /// Bumped by every `configure`; listeners from older ones go quiet
    generation: u64,
}

impl IndicatorState {
    fn count(&self) -> usize {
        self.dots.len()
    }

    fn rebuild_dots(&mut self, count: usize) {
        let template = DotView {
            bounds: Rect::ZERO,
            corner_radius: self.style.corner_radius,
            color: self.style.normal_color,
        };
        self.dots = SmallVec::from_elem(template, count);
        self.generation = self.generation.wrapping_add(1);
        self.highlight = None;
        self.step = 0.0;
        self.offset = 0.0;
        self.anchor = PageAnchor::default();
        self.needs_layout = true;
        self.needs_redraw = true;
    }

    fn restyle_dots(&mut self) {
        for dot in &mut self.dots {
            dot.corner_radius = self.style.corner_radius;
            dot.color = self.style.normal_color;
        }
    }

    fn apply_geometry(&mut self, geometry: RowGeometry) {
        for (dot, bounds) in self.dots.iter_mut().zip(geometry.dots.iter()) {
            dot.bounds = *bounds;
        }
        self.bounds = geometry.bounds;
        self.highlight = geometry.first_dot();
        self.step = self.style.step();
        self.needs_layout = false;
        self.refresh_offset();
    }

    /// Recompute the offset from the last anchor with the current step and mode
    fn refresh_offset(&mut self) {
        let PageAnchor { position, progress } = self.anchor;
        let offset = if self.style.movable {
            highlight_offset(position, progress, self.count(), self.step)
        } else {
            selected_offset(position, self.count(), self.step)
        };
        self.set_offset(offset);
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
        self.needs_redraw = true;
    }

    fn page_scrolled(&mut self, position: usize, progress: f32) {
        let count = self.count();
        if !self.style.movable || count == 0 {
            return;
        }
        self.anchor = PageAnchor { position, progress };
        let offset = highlight_offset(position, progress, count, self.step);
        tracing::trace!(position, progress, offset, "indicator scrolled");
        self.set_offset(offset);
    }

    fn page_selected(&mut self, position: usize) {
        let count = self.count();
        if self.style.movable || count == 0 {
            return;
        }
        self.anchor = PageAnchor {
            position,
            progress: 0.0,
        };
        let offset = selected_offset(position, count, self.step);
        tracing::trace!(position, offset, "indicator selected");
        self.set_offset(offset);
    }
}

/// Page listener registered on the page source
///
/// Holds the widget state weakly: once the widget is dropped, events are
/// ignored. A listener is also tied to the configuration it was created
/// under; after the next `configure` it stays registered on its source but
/// no longer moves the highlight.
#[derive(Clone)]
pub struct PagerListener {
    state: Weak<RefCell<IndicatorState>>,
    generation: u64,
}

impl PagerListener {
    /// Widget state, if the widget is alive and this listener is current
    fn live_state(&self) -> Option<Rc<RefCell<IndicatorState>>> {
        let state = self.state.upgrade()?;
        let current = state.borrow().generation;
        if current != self.generation {
            tracing::trace!(
                listener = self.generation,
                current,
                "ignoring event from a stale page source"
            );
            return None;
        }
        Some(state)
    }
}

impl OnPageChange for PagerListener {
    fn on_page_scrolled(&mut self, position: usize, offset: f32, _offset_pixels: i32) {
        if let Some(state) = self.live_state() {
            state.borrow_mut().page_scrolled(position, offset);
        }
    }

    fn on_page_selected(&mut self, position: usize) {
        if let Some(state) = self.live_state() {
            state.borrow_mut().page_selected(position);
        }
    }

    fn on_page_scroll_state_changed(&mut self, scroll_state: ScrollState) {
        if let Some(state) = self.live_state() {
            tracing::trace!(?scroll_state, "indicator scroll state");
            state.borrow_mut().scroll_state = scroll_state;
        }
    }
}

/// Rectangular page indicator widget
pub struct RectIndicator {
    state: Rc<RefCell<IndicatorState>>,
}

impl Default for RectIndicator {
    fn default() -> Self {
        Self::new(IndicatorStyle::default())
    }
}

impl RectIndicator {
    /// Create an indicator with no dots
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            state: Rc::new(RefCell::new(IndicatorState {
                style,
                ..Default::default()
            })),
        }
    }

    /// Create an indicator from declarative attributes
    pub fn from_attrs(attrs: &IndicatorAttrs) -> Result<Self> {
        Ok(Self::new(attrs.resolve()?))
    }

    /// Build `count` dots and listen to `source`
    ///
    /// A zero count is ignored. Calling again replaces the dot sequence and
    /// detaches the indicator from every previously configured source.
    pub fn configure(&mut self, count: usize, source: Option<&mut dyn PageSource>) {
        if count == 0 {
            tracing::debug!("ignoring indicator configuration with zero pages");
            return;
        }

        self.state.borrow_mut().rebuild_dots(count);
        tracing::debug!(count, "configured rect indicator");

        if let Some(source) = source {
            source.add_page_change_listener(Box::new(self.listener()));
        }
    }

    /// A listener feeding page events into this indicator
    ///
    /// `configure` registers one automatically; use this when the page
    /// source is wired up separately. The listener is valid until the next
    /// `configure`.
    pub fn listener(&self) -> PagerListener {
        PagerListener {
            state: Rc::downgrade(&self.state),
            generation: self.state.borrow().generation,
        }
    }

    /// Override every style field set in `update`
    ///
    /// Dots pick up the new look immediately; sizes take effect at the next
    /// layout.
    pub fn apply_style(&mut self, update: &StyleUpdate) {
        let mut state = self.state.borrow_mut();
        if !state.style.apply(update) {
            return;
        }
        tracing::debug!(?update, "applied indicator style");
        state.restyle_dots();
        state.needs_layout = true;
        state.needs_redraw = true;
    }

    /// Smallest size that shows every dot
    pub fn measure(&self) -> Size {
        let state = self.state.borrow();
        row::content_size(&state.style, state.count())
    }

    /// Lay the dots out inside `available`
    ///
    /// Derives the highlight bounds from the first dot and the per-page step
    /// from the style. A layout failure is logged and leaves the previous
    /// geometry in place.
    pub fn layout(&mut self, available: Size) {
        let mut state = self.state.borrow_mut();
        if state.count() == 0 {
            return;
        }

        match row::layout_row(&state.style, state.count(), available) {
            Ok(geometry) => state.apply_geometry(geometry),
            Err(err) => tracing::warn!(%err, "indicator layout failed"),
        }
    }

    /// Paint the dots and, once laid out, the highlight
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        let state = self.state.borrow();

        for dot in state.dots.iter().filter(|dot| !dot.bounds.is_empty()) {
            ctx.fill_rect(dot.bounds, CornerRadius::uniform(dot.corner_radius), dot.color);
        }

        let Some(highlight) = state.highlight.filter(|rect| !rect.is_empty()) else {
            return;
        };
        let radius = state.style.corner_radius;
        let color = state.style.selected_color;
        ctx.with_transform(Transform::translate(state.offset, 0.0), |ctx| {
            ctx.fill_rounded_rect(highlight, radius, color);
        });
    }

    // =========================================================================
    // Direct event entry points
    // =========================================================================

    /// Feed a continuous scroll event
    pub fn on_page_scrolled(&mut self, position: usize, progress: f32) {
        self.state.borrow_mut().page_scrolled(position, progress);
    }

    /// Feed a page selection event
    pub fn on_page_selected(&mut self, position: usize) {
        self.state.borrow_mut().page_selected(position);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of dots
    pub fn dot_count(&self) -> usize {
        self.state.borrow().count()
    }

    /// Snapshot of the dot sequence
    pub fn dots(&self) -> Vec<DotView> {
        self.state.borrow().dots.to_vec()
    }

    /// Current style
    pub fn style(&self) -> IndicatorStyle {
        self.state.borrow().style.clone()
    }

    /// Current horizontal highlight offset
    pub fn offset(&self) -> f32 {
        self.state.borrow().offset
    }

    /// Per-page highlight step; 0 until laid out
    pub fn step(&self) -> f32 {
        self.state.borrow().step
    }

    /// Row bounds from the last layout
    pub fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    /// Highlight bounds with the current offset applied
    pub fn highlight_bounds(&self) -> Option<Rect> {
        let state = self.state.borrow();
        state.highlight.map(|rect| rect.offset(state.offset, 0.0))
    }

    /// Last gesture phase reported by the page source
    pub fn scroll_state(&self) -> ScrollState {
        self.state.borrow().scroll_state
    }

    /// Whether sizes changed since the last layout
    pub fn needs_layout(&self) -> bool {
        self.state.borrow().needs_layout
    }

    /// Check whether a redraw was requested and clear the flag
    pub fn take_needs_redraw(&self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().needs_redraw)
    }
}
