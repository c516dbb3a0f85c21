use glasskit_foundation::{GesturePhase, HapticIntensity};
use glasskit_testing::assertions::{assert_approx_eq, assert_thumb_settled, attached_thumb_layers};
use glasskit_testing::{ControlTestRule, EventRecorder};
use glasskit_ui::prelude::*;
use glasskit_ui::{Invalidations, ThumbState};
use glasskit_ui_graphics::{Color, Point, Rect};
use web_time::Duration;

const ROW_Y: f32 = 20.0;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// 237 pt wide so the contracted thumb travels exactly 200 pt.
fn slider(rule: &ControlTestRule) -> GlassSlider {
    let slider = GlassSlider::new(rule.env(), Rect::new(0.0, 0.0, 237.0, 40.0));
    slider.set_maximum_value(10.0);
    slider
}

fn at_fraction(slider: &GlassSlider, fraction: f32) -> Point {
    let mapper = slider.value_mapper();
    Point::new(
        mapper.min_center + fraction * (mapper.max_center - mapper.min_center),
        ROW_Y,
    )
}

#[test]
fn tap_at_forty_percent_sets_value_with_one_notification() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let recorder = EventRecorder::attach(&slider);

    rule.robot(&slider).tap(at_fraction(&slider, 0.4));

    assert_approx_eq(slider.value(), 4.0, 1e-4, "tapped value");
    assert_eq!(recorder.value_changes(), 1);
    assert_eq!(
        recorder.events(),
        vec![
            ControlEvent::TouchDown,
            ControlEvent::ValueChanged,
            ControlEvent::TouchUpInside
        ]
    );

    rule.wait_for_idle();
    assert_eq!(recorder.value_changes(), 1);
    assert!(!slider.has_pending_contraction());
    assert_thumb_settled(&rule.scene().borrow(), &slider.thumb(), ThumbState::Contracted);
    assert_approx_eq(slider.thumb().center().x, at_fraction(&slider, 0.4).x, 1e-3, "thumb x");
}

#[test]
fn touch_down_expands_before_classification() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);

    rule.robot(&slider).press(at_fraction(&slider, 0.0));
    assert!(slider.thumb_state().is_heading_expanded());
    assert_eq!(slider.gesture_phase(), GesturePhase::Pending);
    assert_eq!(
        attached_thumb_layers(&rule.scene().borrow(), &slider.thumb()).len(),
        2
    );

    rule.advance_time(ms(400));
    assert_eq!(slider.thumb_state(), ThumbState::Expanded);
}

#[test]
fn new_gesture_cancels_pending_auto_contraction() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let mut robot = rule.robot(&slider);

    robot.tap(at_fraction(&slider, 0.5)).wait(ms(350));
    assert!(slider.has_pending_contraction());
    assert!(rule.clock().has_pending_timers());

    let touch = robot.position();
    robot.press(touch).wait(ms(400)).move_to(touch);

    assert!(!slider.has_pending_contraction());
    assert_eq!(slider.gesture_phase(), GesturePhase::Dragging);
    assert_eq!(slider.thumb_state(), ThumbState::Expanded);

    robot.release();
    rule.wait_for_idle();
    assert_thumb_settled(&rule.scene().borrow(), &slider.thumb(), ThumbState::Contracted);
}

#[test]
fn auto_contraction_runs_after_tap_without_new_gesture() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);

    rule.robot(&slider).tap(at_fraction(&slider, 0.8));
    rule.advance_time(ms(400));
    assert!(slider.has_pending_contraction());

    rule.wait_for_idle();
    assert!(!slider.has_pending_contraction());
    assert_eq!(slider.thumb_state(), ThumbState::Contracted);
}

#[test]
fn out_of_range_assignment_clamps_and_notifies_only_on_change() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let recorder = EventRecorder::attach(&slider);

    slider.set_value(15.0, false);
    assert_eq!(slider.value(), 10.0);
    assert_eq!(recorder.value_changes(), 1);

    slider.set_value(12.0, false);
    assert_eq!(slider.value(), 10.0);
    assert_eq!(recorder.value_changes(), 1);

    slider.set_value(-3.0, true);
    assert_eq!(slider.value(), 0.0);
    assert_eq!(recorder.value_changes(), 2);

    rule.wait_for_idle();
    assert_thumb_settled(&rule.scene().borrow(), &slider.thumb(), ThumbState::Contracted);
    assert_eq!(rule.scene().borrow().attach_count(), 1);
}

#[test]
fn programmatic_changes_stay_silent_when_not_continuous() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_continuous(false);
    let recorder = EventRecorder::attach(&slider);

    slider.set_value(3.0, false);
    assert_eq!(slider.value(), 3.0);
    assert_eq!(recorder.value_changes(), 0);
}

#[test]
fn stationary_hold_is_a_drag_without_notification() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_value(5.0, false);
    let recorder = EventRecorder::attach(&slider);

    let thumb = slider.thumb().center();
    rule.robot(&slider).press(thumb).wait(ms(300)).release();

    assert_eq!(slider.value(), 5.0);
    assert_eq!(recorder.value_changes(), 0);
    assert!(!slider.has_pending_contraction());
    assert!(!slider.thumb_state().is_heading_expanded());
}

#[test]
fn drag_past_end_rubber_bands_and_fires_edge_haptic_once() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let recorder = EventRecorder::attach(&slider);
    let start = slider.thumb().center();
    let max_center = slider.value_mapper().max_center;

    let mut robot = rule.robot(&slider);
    robot.drag_to(start, Point::new(300.0, ROW_Y), ms(300));

    assert_eq!(slider.value(), 10.0);
    let thumb_x = slider.thumb().center().x;
    assert!(thumb_x > max_center, "thumb should overshoot, got {thumb_x}");
    assert_approx_eq(thumb_x, max_center + (300.0 - max_center).sqrt(), 1e-3, "rubber band");
    assert_eq!(rule.haptics().count_of(HapticIntensity::Light), 1);
    let live_changes = recorder.value_changes();
    assert!(live_changes >= 1);

    robot.release();
    assert_eq!(slider.thumb().center().x, max_center);
    assert_eq!(recorder.value_changes(), live_changes);
    assert_eq!(rule.haptics().count(), 1);

    rule.wait_for_idle();
    assert_thumb_settled(&rule.scene().borrow(), &slider.thumb(), ThumbState::Contracted);
}

#[test]
fn non_continuous_drag_reports_once_at_release() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_continuous(false);
    let recorder = EventRecorder::attach(&slider);
    let start = slider.thumb().center();

    let mut robot = rule.robot(&slider);
    robot.drag_to(start, at_fraction(&slider, 0.3), ms(320));
    assert_eq!(recorder.value_changes(), 0);

    robot.release();
    assert_approx_eq(slider.value(), 3.0, 1e-3, "released value");
    assert_eq!(recorder.value_changes(), 1);
}

#[test]
fn drag_returning_to_start_reports_no_net_change() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_continuous(false);
    slider.set_value(5.0, false);
    let recorder = EventRecorder::attach(&slider);
    let start = slider.thumb().center();

    let mut robot = rule.robot(&slider);
    robot.drag_to(start, at_fraction(&slider, 0.9), ms(200));
    rule.advance_frame();
    robot.move_to(start).release();

    assert_eq!(slider.value(), 5.0);
    assert_eq!(recorder.value_changes(), 0);
}

#[test]
fn repeated_start_and_cancel_settles_with_one_representation() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let mut robot = rule.robot(&slider);
    let touch = at_fraction(&slider, 0.2);

    for _ in 0..6 {
        robot.press(touch).wait(ms(16)).cancel().wait(ms(32));
        if slider.thumb_state() == ThumbState::Contracted {
            assert_eq!(
                attached_thumb_layers(&rule.scene().borrow(), &slider.thumb()).len(),
                1
            );
        }
    }

    rule.wait_for_idle();
    assert_eq!(slider.value(), 0.0);
    assert_thumb_settled(&rule.scene().borrow(), &slider.thumb(), ThumbState::Contracted);
}

#[test]
fn cancel_during_drag_keeps_dragged_value() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let recorder = EventRecorder::attach(&slider);
    let start = slider.thumb().center();

    rule.robot(&slider)
        .drag_to(start, at_fraction(&slider, 0.6), ms(240))
        .cancel();

    assert_approx_eq(slider.value(), 6.0, 1e-3, "value after cancel");
    assert_eq!(recorder.count(ControlEvent::TouchCancel), 1);
    assert_eq!(recorder.count(ControlEvent::TouchUpInside), 0);
}

#[test]
fn disabling_mid_gesture_reverts_and_ignores_touches() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_value(2.0, false);
    let recorder = EventRecorder::attach(&slider);
    let start = slider.thumb().center();

    rule.robot(&slider)
        .drag_to(start, at_fraction(&slider, 0.7), ms(240));
    assert!(slider.value() > 2.0);

    slider.set_enabled(false);
    assert_eq!(slider.value(), 2.0);
    assert_eq!(slider.gesture_phase(), GesturePhase::Idle);
    assert_eq!(recorder.count(ControlEvent::TouchCancel), 1);

    recorder.clear();
    rule.robot(&slider).tap(at_fraction(&slider, 0.9));
    assert!(recorder.events().is_empty());
    assert_eq!(slider.value(), 2.0);
}

#[test]
fn accessibility_steps_a_tenth_of_the_range() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_value(9.5, false);

    slider.accessibility_increment();
    assert_eq!(slider.value(), 10.0);
    slider.accessibility_decrement();
    slider.accessibility_decrement();
    assert_approx_eq(slider.value(), 8.0, 1e-4, "stepped value");

    rule.wait_for_idle();
    assert_eq!(slider.thumb_state(), ThumbState::Contracted);
    assert_approx_eq(
        slider.thumb().center().x,
        at_fraction(&slider, 0.8).x,
        1e-3,
        "animated thumb",
    );
}

#[test]
fn listeners_can_read_the_control_they_observe() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let seen = std::rc::Rc::new(std::cell::Cell::new(f32::NAN));
    {
        let observed = slider.clone();
        let seen = seen.clone();
        slider.add_listener(
            ControlEvents::VALUE_CHANGED,
            Box::new(move |_| seen.set(observed.value())),
        );
    }

    rule.robot(&slider).tap(at_fraction(&slider, 0.25));
    assert_approx_eq(seen.get(), 2.5, 1e-4, "value seen by listener");
}

#[test]
fn appearance_changes_request_targeted_refresh() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.take_invalidations();

    slider.set_thumb_tint(Some(Color::SYSTEM_BLUE));
    slider.set_maximum_track_tint(Some(Color::WHITE));
    let pending = slider.take_invalidations();
    assert!(pending.contains(Invalidations::THUMB_TINT));
    assert!(pending.contains(Invalidations::TRACK_TINT));
    assert!(!pending.contains(Invalidations::LAYOUT));
    assert!(slider.take_invalidations().is_empty());

    slider.set_bounds(Rect::new(10.0, 0.0, 237.0, 40.0));
    assert!(slider.take_invalidations().contains(Invalidations::LAYOUT));
}

#[test]
fn layout_fill_follows_thumb() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    slider.set_value(5.0, false);

    let layout = slider.layout();
    let thumb_x = slider.thumb().center().x;
    assert_approx_eq(layout.minimum_track.width, thumb_x, 1e-4, "minimum track");
    assert_approx_eq(
        layout.minimum_track.width + layout.maximum_track.width,
        layout.track.width,
        1e-4,
        "track split",
    );
    assert_eq!(layout.thumb.size, slider.thumb().metrics().contracted);
    assert_eq!(layout.minimum_track_tint, Color::SYSTEM_BLUE);
}

#[test]
fn inverted_range_degenerates_to_fixed_point() {
    let rule = ControlTestRule::new();
    let slider = GlassSlider::new(rule.env(), Rect::new(0.0, 0.0, 237.0, 40.0));
    slider.set_minimum_value(5.0);
    slider.set_maximum_value(1.0);

    slider.set_value(3.0, false);
    assert_eq!(slider.value(), 1.0);
    rule.robot(&slider).tap(at_fraction(&slider, 0.7));
    assert_eq!(slider.value(), 1.0);
    rule.wait_for_idle();
}

#[test]
fn touch_down_during_tap_move_starts_from_tapped_value() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let recorder = EventRecorder::attach(&slider);
    let tapped = at_fraction(&slider, 0.8);

    let mut robot = rule.robot(&slider);
    robot.tap(tapped).wait(ms(16));
    assert!(slider.thumb().is_moving());

    robot.press(tapped);
    assert!(!slider.thumb().is_moving());
    assert_approx_eq(slider.thumb().center().x, tapped.x, 1e-3, "thumb jumps to tap target");

    robot.wait(ms(300)).move_to(Point::new(tapped.x + 1.0, ROW_Y));
    assert_approx_eq(slider.thumb().center().x, tapped.x + 1.0, 1e-3, "thumb follows finger");
    robot.release();

    assert_approx_eq(slider.value(), 8.05, 1e-3, "value after drag");
    assert_eq!(recorder.value_changes(), 2);
}

#[test]
fn touch_down_during_programmatic_move_starts_from_new_value() {
    let rule = ControlTestRule::new();
    let slider = slider(&rule);
    let target = at_fraction(&slider, 0.2);

    slider.set_value(2.0, true);
    rule.advance_frame();
    assert!(slider.thumb().is_moving());

    let mut robot = rule.robot(&slider);
    robot.press(target);
    assert_approx_eq(slider.thumb().center().x, target.x, 1e-3, "thumb at new value");

    robot.wait(ms(300)).release();
    assert_approx_eq(slider.value(), 2.0, 1e-4, "held drag keeps value");
}
