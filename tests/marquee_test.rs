// Overflow marquee and cell view tests
//
// Virtual time comes from ManualScheduler, which also counts live timers.

use dashboard_cell_wasm::marquee::{
    ManualScheduler, MarqueeConfig, MarqueeController, MarqueePhase, SCROLL_GAP_PX,
};
use dashboard_cell_wasm::models::{CellConfig, RenderedOutput};
use dashboard_cell_wasm::view::{CellView, Segment};
use std::cell::RefCell;
use std::rc::Rc;

fn scrolling(speed: f64) -> MarqueeConfig {
    MarqueeConfig { enabled: true, speed }
}

#[test]
fn test_overflowing_content_scrolls() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));

    let phase = marquee.measure(500.0, 200.0, scrolling(50.0));
    assert_eq!(phase, MarqueePhase::Scrolling);
    assert!(marquee.state().is_scrolling);
    assert_eq!(scheduler.live_timers(), 1);
}

#[test]
fn test_fitting_content_is_static_at_zero() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));

    let phase = marquee.measure(150.0, 200.0, scrolling(50.0));
    assert_eq!(phase, MarqueePhase::Static);
    assert_eq!(marquee.offset(), 0.0);
    assert!(!marquee.state().is_scrolling);
    assert_eq!(scheduler.live_timers(), 0);
}

#[test]
fn test_equal_widths_do_not_scroll() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));
    assert_eq!(marquee.measure(200.0, 200.0, scrolling(50.0)), MarqueePhase::Static);
}

#[test]
fn test_disabled_never_scrolls() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));
    let config = MarqueeConfig { enabled: false, speed: 50.0 };
    assert_eq!(marquee.measure(500.0, 200.0, config), MarqueePhase::Static);
    assert_eq!(scheduler.started(), 0);
}

#[test]
fn test_offset_advances_one_pixel_per_tick() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));
    // 50 px/s -> one pixel every 20 ms
    marquee.measure(500.0, 200.0, scrolling(50.0));

    scheduler.advance(200);
    assert_eq!(marquee.offset(), -10.0);
}

#[test]
fn test_offset_wraps_after_content_plus_gap() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));
    // 1000 px/s -> one pixel per ms
    marquee.measure(40.0, 20.0, scrolling(1000.0));

    let wrap = (40.0 + SCROLL_GAP_PX) as u64;
    scheduler.advance(wrap - 1);
    assert_eq!(marquee.offset(), -((wrap - 1) as f64));
    scheduler.advance(1);
    assert_eq!(marquee.offset(), 0.0);
    scheduler.advance(3);
    assert_eq!(marquee.offset(), -3.0);
}

#[test]
fn test_painter_sees_every_offset() {
    let scheduler = ManualScheduler::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()))
        .with_painter(Rc::new(move |offset| sink.borrow_mut().push(offset)));

    marquee.measure(500.0, 200.0, scrolling(1000.0));
    scheduler.advance(3);
    assert_eq!(*seen.borrow(), vec![0.0, -1.0, -2.0, -3.0]);
}

#[test]
fn test_remeasure_to_static_cancels_timer() {
    let scheduler = ManualScheduler::new();
    let mut marquee = MarqueeController::new(Rc::new(scheduler.clone()));

    marquee.measure(500.0, 200.0, scrolling(1000.0));
    scheduler.advance(25);
    assert_eq!(marquee.measure(500.0, 800.0, scrolling(1000.0)), MarqueePhase::Static);

    scheduler.advance(25);
    assert_eq!(marquee.offset(), 0.0);
    assert_eq!(scheduler.live_timers(), 0);
    assert!(!marquee.has_timer());
}

#[test]
fn test_hundred_dependency_changes_keep_one_timer() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(100.0));
    view.set_output(RenderedOutput::text("a long line of text"));
    view.measure(500.0, 200.0);

    for i in 0..100 {
        if i % 2 == 0 {
            view.set_container_height(300.0 + i as f64);
        } else {
            view.measure(500.0 + i as f64, 200.0);
        }
        assert!(scheduler.live_timers() <= 1);
        scheduler.advance(5);
    }

    assert_eq!(scheduler.live_timers(), 1);
    assert_eq!(scheduler.peak_live_timers(), 1);
    // Every start after the first was preceded by a cancel
    assert_eq!(scheduler.started(), scheduler.cancelled() + 1);
}

#[test]
fn test_new_output_resets_marquee() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    view.set_output(RenderedOutput::text("first"));
    view.measure(500.0, 200.0);
    scheduler.advance(10);
    assert!(view.is_scrolling());

    assert!(view.set_output(RenderedOutput::text("second")));
    assert_eq!(view.phase(), MarqueePhase::Idle);
    assert_eq!(view.marquee_state().offset, 0.0);
    assert_eq!(scheduler.live_timers(), 0);

    // Same output again is not a change
    assert!(!view.set_output(RenderedOutput::text("second")));
}

#[test]
fn test_container_height_change_remeasures() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    view.set_output(RenderedOutput::text("text"));
    view.measure(500.0, 200.0);
    scheduler.advance(10);
    assert_eq!(view.marquee_state().offset, -10.0);

    view.set_container_height(640.0);
    assert_eq!(view.marquee_state().offset, 0.0);
    assert_eq!(scheduler.started(), 2);

    // Same height is not a dependency change
    view.set_container_height(640.0);
    assert_eq!(scheduler.started(), 2);
}

#[test]
fn test_disabling_in_config_stops_scrolling() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    view.set_output(RenderedOutput::text("text"));
    view.measure(500.0, 200.0);

    let phase = view.set_config(CellConfig::default());
    assert_eq!(phase, MarqueePhase::Static);
    assert_eq!(scheduler.live_timers(), 0);
}

#[test]
fn test_teardown_and_drop_release_timer() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    view.set_output(RenderedOutput::text("text"));
    view.measure(500.0, 200.0);
    view.teardown();
    assert_eq!(scheduler.live_timers(), 0);

    let mut dropped = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    dropped.set_output(RenderedOutput::text("text"));
    dropped.measure(500.0, 200.0);
    assert_eq!(scheduler.live_timers(), 1);
    drop(dropped);
    assert_eq!(scheduler.live_timers(), 0);
}

#[test]
fn test_display_duplicates_content_only_while_scrolling() {
    let scheduler = ManualScheduler::new();
    let mut view = CellView::new(Rc::new(scheduler.clone()), CellConfig::scrolling(1000.0));
    view.set_output(RenderedOutput::text("hello"));

    view.measure(50.0, 200.0);
    let fitted = view.display();
    assert!(!fitted.duplicate);
    assert_eq!(fitted.segments, vec![Segment::Text { text: "hello".into() }]);
    assert_eq!(fitted.transform, "translateX(0px)");

    view.measure(500.0, 200.0);
    scheduler.advance(4);
    let scrolled = view.display();
    assert!(scrolled.duplicate);
    assert_eq!(scrolled.duplicate_gap, SCROLL_GAP_PX);
    assert_eq!(scrolled.transform, "translateX(-4px)");
    assert!(scrolled.classes.contains(&"scrolling".to_string()));
    assert_eq!(scrolled.phase, MarqueePhase::Scrolling);
}
