//! End-to-end indicator scenarios driven through a scripted pager

use std::cell::RefCell;
use std::rc::Rc;

use pagedots_core::{Color, RecordingContext, Size};

use crate::pager::{OnPageChange, PageSource, ScriptedPager, ScrollState};
use crate::rect_indicator::RectIndicator;
use crate::style::{IndicatorAttrs, IndicatorStyle, StyleUpdate};

const PAGE_WIDTH: f32 = 360.0;

/// Listener that records the indicator offset after every scroll event
struct OffsetProbe {
    indicator: Rc<RefCell<RectIndicator>>,
    offsets: Rc<RefCell<Vec<f32>>>,
}

impl OnPageChange for OffsetProbe {
    fn on_page_scrolled(&mut self, _position: usize, _offset: f32, _offset_pixels: i32) {
        let offset = self.indicator.borrow().offset();
        self.offsets.borrow_mut().push(offset);
    }

    fn on_page_selected(&mut self, _position: usize) {}
}

fn setup(count: usize, style: IndicatorStyle, pager: &mut ScriptedPager) -> RectIndicator {
    let mut indicator = RectIndicator::new(style);
    indicator.configure(count, Some(pager));
    indicator.layout(Size::new(PAGE_WIDTH, 60.0));
    indicator
}

#[test]
fn test_resting_offset_follows_page() {
    let mut pager = ScriptedPager::new(4, PAGE_WIDTH);
    let indicator = setup(4, IndicatorStyle::new().margin(10.0).dot_size(40.0, 8.0), &mut pager);
    let step = indicator.step();
    assert_eq!(step, 50.0);

    for target in [1, 3, 2, 0] {
        pager.swipe_to(target, 5);
        assert_eq!(indicator.offset(), step * target as f32);
    }
}

#[test]
fn test_highlight_stays_inside_row_during_swipes() {
    let mut pager = ScriptedPager::looping(5, PAGE_WIDTH);
    let indicator = Rc::new(RefCell::new(setup(
        5,
        IndicatorStyle::new().margin(8.0).dot_size(24.0, 6.0),
        &mut pager,
    )));
    let offsets = Rc::new(RefCell::new(Vec::new()));
    pager.add_page_change_listener(Box::new(OffsetProbe {
        indicator: indicator.clone(),
        offsets: offsets.clone(),
    }));

    let start = pager.current_item();
    pager.swipe_to(start + 12, 7);
    pager.swipe_to(start + 3, 7);

    let indicator = indicator.borrow();
    let max = indicator.step() * 4.0;
    let offsets = offsets.borrow();
    assert!(!offsets.is_empty());
    assert!(offsets.iter().all(|offset| (0.0..=max).contains(offset)));

    let row = indicator.bounds();
    let highlight = indicator.highlight_bounds().unwrap();
    assert!(row.contains_rect(&highlight));
}

#[test]
fn test_forward_drag_off_last_page_wraps_to_first_dot() {
    let mut pager = ScriptedPager::looping(3, PAGE_WIDTH);
    let mut indicator = setup(3, IndicatorStyle::default(), &mut pager);

    let last = pager.current_item() + 2;
    pager.swipe_to(last, 0);
    assert_eq!(indicator.offset(), 240.0);

    pager.set_scroll_state(ScrollState::Dragging);
    pager.scroll(last, 0.3);
    assert_eq!(indicator.offset(), 0.0);
    assert_eq!(indicator.scroll_state(), ScrollState::Dragging);

    pager.scroll(last + 1, 0.0);
    assert_eq!(indicator.offset(), 0.0);

    indicator.on_page_scrolled(last + 1, 0.5);
    assert_eq!(indicator.offset(), 60.0);
}

#[test]
fn test_fixed_mode_jumps_on_selection() {
    let mut pager = ScriptedPager::new(4, PAGE_WIDTH);
    let indicator = setup(4, IndicatorStyle::new().movable(false), &mut pager);
    let offsets = Rc::new(RefCell::new(Vec::new()));
    let shared = Rc::new(RefCell::new(indicator));
    pager.add_page_change_listener(Box::new(OffsetProbe {
        indicator: shared.clone(),
        offsets: offsets.clone(),
    }));

    pager.swipe_to(2, 4);

    // Mid-drag the highlight stays put
    assert!(offsets.borrow()[..8].iter().all(|offset| *offset == 0.0));
    assert_eq!(shared.borrow().offset(), 240.0);
}

#[test]
fn test_switching_mode_at_runtime() {
    let mut pager = ScriptedPager::new(4, PAGE_WIDTH);
    let mut indicator = setup(4, IndicatorStyle::default(), &mut pager);

    indicator.apply_style(&StyleUpdate::new().movable(false));
    pager.scroll(1, 0.5);
    assert_eq!(indicator.offset(), 0.0);

    pager.select(3);
    assert_eq!(indicator.offset(), 360.0);
}

#[test]
fn test_reconfigure_replaces_dots() {
    let mut pager = ScriptedPager::new(6, PAGE_WIDTH);
    let mut indicator = setup(3, IndicatorStyle::default(), &mut pager);
    assert_eq!(indicator.dot_count(), 3);

    indicator.configure(6, Some(&mut pager));
    assert_eq!(indicator.dot_count(), 6);
    assert!(indicator.needs_layout());
    assert_eq!(indicator.highlight_bounds(), None);

    indicator.layout(Size::ZERO);
    pager.swipe_to(5, 2);
    assert_eq!(indicator.offset(), 600.0);
}

#[test]
fn test_reconfigure_detaches_previous_source() {
    let mut first = ScriptedPager::new(4, PAGE_WIDTH);
    let mut indicator = setup(4, IndicatorStyle::default(), &mut first);

    let mut second = ScriptedPager::new(4, PAGE_WIDTH);
    indicator.configure(4, Some(&mut second));
    indicator.layout(Size::new(PAGE_WIDTH, 60.0));

    first.scroll(2, 0.0);
    first.set_scroll_state(ScrollState::Dragging);
    assert_eq!(indicator.offset(), 0.0);
    assert_eq!(indicator.scroll_state(), ScrollState::Idle);

    second.scroll(2, 0.0);
    assert_eq!(indicator.offset(), 240.0);
}

#[test]
fn test_reconfigure_on_same_source_keeps_one_live_listener() {
    let mut pager = ScriptedPager::new(4, PAGE_WIDTH);
    let mut indicator = setup(4, IndicatorStyle::default(), &mut pager);
    for _ in 0..5 {
        indicator.configure(4, Some(&mut pager));
    }
    indicator.layout(Size::new(PAGE_WIDTH, 60.0));

    // Earlier listeners stay registered but are inert
    assert_eq!(pager.listener_count(), 6);

    pager.scroll(1, 0.5);
    assert_eq!(indicator.offset(), 180.0);
}

#[test]
fn test_draw_uses_current_colors() {
    let attrs = IndicatorAttrs::from_toml_str(
        r##"
        horizon_margin = 10.0
        width = 30.0
        height = 10.0
        round_size = 5.0
        normal_color = "#444444"
        selected_color = "#FFFFFF"
        "##,
    )
    .unwrap();
    let mut pager = ScriptedPager::new(3, PAGE_WIDTH);
    let mut indicator = RectIndicator::from_attrs(&attrs).unwrap();
    indicator.configure(3, Some(&mut pager));
    indicator.layout(Size::new(200.0, 10.0));
    indicator.apply_style(&StyleUpdate::new().selected_color(Color::RED));
    pager.swipe_to(1, 0);

    let mut ctx = RecordingContext::new(Size::new(200.0, 10.0));
    indicator.draw(&mut ctx);
    let fills = ctx.device_fills();

    assert_eq!(fills.len(), 4);
    assert!(fills[..3]
        .iter()
        .all(|fill| fill.color == Color::from_hex(0x444444)));
    let highlight = fills[3];
    assert_eq!(highlight.color, Color::RED);
    assert_eq!(highlight.rect, fills[1].rect);
}

#[test]
fn test_dropped_indicator_leaves_pager_usable() {
    let mut pager = ScriptedPager::new(3, PAGE_WIDTH);
    let indicator = setup(3, IndicatorStyle::default(), &mut pager);
    drop(indicator);

    pager.swipe_to(2, 3);
    assert_eq!(pager.current_item(), 2);
}
