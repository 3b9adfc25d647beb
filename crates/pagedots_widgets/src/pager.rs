//! Page source interface
//!
//! The indicator never owns the page view it decorates. A page view only has
//! to implement [`PageSource`] and report swipes to its registered
//! [`OnPageChange`] listeners:
//!
//! - `on_page_scrolled(position, offset, offset_pixels)` while a page is
//!   moving, where `position` is the leftmost visible page and `offset` in
//!   `[0, 1)` is how far the next page has scrolled in
//! - `on_page_selected(position)` once a page becomes current
//! - `on_page_scroll_state_changed(state)` as a gesture starts, is released
//!   and comes to rest
//!
//! [`ScriptedPager`] is an in-memory page source that replays swipes, used by
//! the CLI and tests in place of a real page view.

/// Gesture phase reported by a page source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollState {
    /// No gesture in progress
    #[default]
    Idle,
    /// The user is dragging a page
    Dragging,
    /// The page is animating to its final position
    Settling,
}

/// Listener for page-change events
pub trait OnPageChange {
    /// A page is scrolling; `offset` is the progress toward `position + 1`
    fn on_page_scrolled(&mut self, position: usize, offset: f32, offset_pixels: i32);

    /// `position` became the current page
    fn on_page_selected(&mut self, position: usize);

    /// The gesture phase changed
    fn on_page_scroll_state_changed(&mut self, _state: ScrollState) {}
}

/// Anything that emits page-change events
pub trait PageSource {
    /// Register a listener; it receives every event from now on
    fn add_page_change_listener(&mut self, listener: Box<dyn OnPageChange>);
}

/// Virtual pages per real page when a pager loops
pub const LOOP_MULTIPLIER: usize = 1000;

/// In-memory page source that replays swipe gestures
pub struct ScriptedPager {
    page_count: usize,
    page_width: f32,
    looping: bool,
    current: usize,
    scroll_state: ScrollState,
    listeners: Vec<Box<dyn OnPageChange>>,
}

impl ScriptedPager {
    /// A pager over `page_count` pages, each `page_width` pixels wide
    pub fn new(page_count: usize, page_width: f32) -> Self {
        Self {
            page_count,
            page_width,
            looping: false,
            current: 0,
            scroll_state: ScrollState::Idle,
            listeners: Vec::new(),
        }
    }

    /// A banner-style pager whose positions run far past `page_count`
    ///
    /// Starts in the middle of the virtual range, aligned to the first real
    /// page, so it can be swiped either way.
    pub fn looping(page_count: usize, page_width: f32) -> Self {
        let mut pager = Self::new(page_count, page_width);
        pager.looping = true;
        pager.current = page_count.saturating_mul(LOOP_MULTIPLIER / 2);
        pager
    }

    /// Number of real pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of addressable positions
    pub fn virtual_count(&self) -> usize {
        if self.looping {
            self.page_count.saturating_mul(LOOP_MULTIPLIER)
        } else {
            self.page_count
        }
    }

    /// Current position
    pub fn current_item(&self) -> usize {
        self.current
    }

    /// Current gesture phase
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Emit a single scroll event
    pub fn scroll(&mut self, position: usize, offset: f32) {
        let pixels = (offset * self.page_width) as i32;
        for listener in &mut self.listeners {
            listener.on_page_scrolled(position, offset, pixels);
        }
    }

    /// Make `position` current without a drag
    pub fn select(&mut self, position: usize) {
        if position >= self.virtual_count() {
            tracing::debug!(position, "ignoring selection past the last page");
            return;
        }
        self.current = position;
        for listener in &mut self.listeners {
            listener.on_page_selected(position);
        }
    }

    /// Change the gesture phase, notifying listeners on change
    pub fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll_state == state {
            return;
        }
        self.scroll_state = state;
        for listener in &mut self.listeners {
            listener.on_page_scroll_state_changed(state);
        }
    }

    /// Drag from the current page to `target`
    ///
    /// Each page crossed emits `frames` scroll events with evenly spaced
    /// progress, followed by the selection and a final resting scroll event.
    pub fn swipe_to(&mut self, target: usize, frames: usize) {
        if target == self.current {
            return;
        }
        if target >= self.virtual_count() {
            tracing::debug!(target, "ignoring swipe past the last page");
            return;
        }

        tracing::debug!(from = self.current, to = target, frames, "replaying swipe");
        self.set_scroll_state(ScrollState::Dragging);

        let forward = target > self.current;
        let mut position = self.current;
        while position != target {
            let base = if forward { position } else { position - 1 };
            for frame in 1..=frames {
                let t = frame as f32 / (frames as f32 + 1.0);
                let offset = if forward { t } else { 1.0 - t };
                self.scroll(base, offset);
            }
            position = if forward { position + 1 } else { position - 1 };
        }

        self.set_scroll_state(ScrollState::Settling);
        self.select(target);
        self.scroll(target, 0.0);
        self.set_scroll_state(ScrollState::Idle);
    }
}

impl PageSource for ScriptedPager {
    fn add_page_change_listener(&mut self, listener: Box<dyn OnPageChange>) {
        self.listeners.push(listener);
    }
}
