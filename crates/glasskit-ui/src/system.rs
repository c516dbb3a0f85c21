//! Platform-style controls returned by the factory when the glass style is
//! unavailable or not wanted. Same capability interfaces and value
//! semantics, no thumb morph and no haptics.

use glasskit_core::Owned;
use glasskit_foundation::{TouchEvent, TouchPhase};
use glasskit_ui_graphics::{Color, Point, Rect, Size};
use smallvec::SmallVec;

use crate::appearance::{ControlState, ImageHandle};
use crate::capability::{ControlStyle, SliderControl, SwitchControl, TouchTarget};
use crate::events::{ControlEvent, ControlEvents, EventListeners, ListenerId};
use crate::invalidation::Invalidations;
use crate::slider::{SliderImage, SliderModel, ValueMapper};

const SYSTEM_THUMB_WIDTH: f32 = 28.0;
pub const SYSTEM_SWITCH_SIZE: Size = Size::new(51.0, 31.0);

struct SystemSliderState {
    model: SliderModel,
    bounds: Rect,
    value_at_touch_down: Option<f32>,
    events: SmallVec<[ControlEvent; 4]>,
}

impl SystemSliderState {
    fn mapper(&self) -> ValueMapper {
        let half = SYSTEM_THUMB_WIDTH / 2.0;
        ValueMapper::new(self.bounds.x + half, self.bounds.max_x() - half)
    }

    fn follow(&mut self, x: f32) {
        let value = self.mapper().value_at(x, self.model.range());
        self.follow_value(value);
    }

    fn follow_value(&mut self, value: f32) {
        if self.model.assign(value) && self.model.continuous {
            self.events.push(ControlEvent::ValueChanged);
        }
    }

    fn finish(&mut self, event: ControlEvent) {
        if let Some(start) = self.value_at_touch_down.take() {
            if !self.model.continuous && self.model.value() != start {
                self.events.push(ControlEvent::ValueChanged);
            }
            self.events.push(event);
        }
    }
}

#[derive(Clone)]
pub struct SystemSlider {
    state: Owned<SystemSliderState>,
    listeners: EventListeners,
}

impl SystemSlider {
    pub fn new(bounds: Rect) -> Self {
        Self {
            state: Owned::new(SystemSliderState {
                model: SliderModel::default(),
                bounds,
                value_at_touch_down: None,
                events: SmallVec::new(),
            }),
            listeners: EventListeners::new(),
        }
    }

    fn flush_events(&self) {
        let events = std::mem::take(&mut self.state.borrow_mut().events);
        if !events.is_empty() {
            self.listeners.dispatch(events);
        }
    }
}

impl TouchTarget for SystemSlider {
    fn style(&self) -> ControlStyle {
        ControlStyle::System
    }

    fn handle_touch(&self, event: &TouchEvent) {
        {
            let mut state = self.state.borrow_mut();
            if !state.model.enabled {
                return;
            }
            match event.phase {
                TouchPhase::Began => {
                    state.value_at_touch_down = Some(state.model.value());
                    state.events.push(ControlEvent::TouchDown);
                    state.follow(event.location.x);
                }
                TouchPhase::Moved => {
                    if state.value_at_touch_down.is_some() {
                        state.follow(event.location.x);
                    }
                }
                TouchPhase::Ended => state.finish(ControlEvent::TouchUpInside),
                TouchPhase::Cancelled => state.finish(ControlEvent::TouchCancel),
            }
        }
        self.flush_events();
    }

    fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    fn set_bounds(&self, bounds: Rect) {
        let mut state = self.state.borrow_mut();
        if state.bounds != bounds {
            state.bounds = bounds;
            state.model.invalidate(Invalidations::LAYOUT);
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.borrow().model.enabled
    }

    fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            state.model.enabled = enabled;
            if !enabled {
                if let Some(start) = state.value_at_touch_down {
                    state.follow_value(start);
                }
                state.finish(ControlEvent::TouchCancel);
            }
        }
        self.flush_events();
    }

    fn add_listener(
        &self,
        events: ControlEvents,
        listener: Box<dyn FnMut(ControlEvent)>,
    ) -> ListenerId {
        self.listeners.add(events, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn take_invalidations(&self) -> Invalidations {
        self.state.borrow_mut().model.take_invalidations()
    }
}

impl SliderControl for SystemSlider {
    fn value(&self) -> f32 {
        self.state.borrow().model.value()
    }

    fn set_value(&self, value: f32, _animated: bool) {
        self.state.borrow_mut().follow_value(value);
        self.flush_events();
    }

    fn minimum_value(&self) -> f32 {
        self.state.borrow().model.range().minimum
    }

    fn set_minimum_value(&self, minimum: f32) {
        self.state.borrow_mut().model.set_minimum(minimum);
    }

    fn maximum_value(&self) -> f32 {
        self.state.borrow().model.range().maximum
    }

    fn set_maximum_value(&self, maximum: f32) {
        self.state.borrow_mut().model.set_maximum(maximum);
    }

    fn is_continuous(&self) -> bool {
        self.state.borrow().model.continuous
    }

    fn set_continuous(&self, continuous: bool) {
        self.state.borrow_mut().model.continuous = continuous;
    }

    fn set_minimum_track_tint(&self, tint: Option<Color>) {
        self.state.borrow_mut().model.set_minimum_track_tint(tint);
    }

    fn set_maximum_track_tint(&self, tint: Option<Color>) {
        self.state.borrow_mut().model.set_maximum_track_tint(tint);
    }

    fn set_thumb_tint(&self, tint: Option<Color>) {
        self.state.borrow_mut().model.set_thumb_tint(tint);
    }

    fn image(&self, kind: SliderImage, state: ControlState) -> Option<ImageHandle> {
        self.state.borrow().model.image(kind, state).cloned()
    }

    fn set_image(&self, kind: SliderImage, state: ControlState, image: Option<ImageHandle>) {
        self.state.borrow_mut().model.set_image(kind, state, image);
    }
}

struct SystemSwitchState {
    bounds: Rect,
    is_on: bool,
    enabled: bool,
    pressed: bool,
    on_tint: Option<Color>,
    thumb_tint: Option<Color>,
    on_image: Option<ImageHandle>,
    off_image: Option<ImageHandle>,
    invalidations: Invalidations,
    events: SmallVec<[ControlEvent; 4]>,
}

#[derive(Clone)]
pub struct SystemSwitch {
    state: Owned<SystemSwitchState>,
    listeners: EventListeners,
}

impl SystemSwitch {
    pub fn new(origin: Point) -> Self {
        Self {
            state: Owned::new(SystemSwitchState {
                bounds: Rect::from_origin_size(origin, SYSTEM_SWITCH_SIZE),
                is_on: false,
                enabled: true,
                pressed: false,
                on_tint: None,
                thumb_tint: None,
                on_image: None,
                off_image: None,
                invalidations: Invalidations::NONE,
                events: SmallVec::new(),
            }),
            listeners: EventListeners::new(),
        }
    }

    fn flush_events(&self) {
        let events = std::mem::take(&mut self.state.borrow_mut().events);
        if !events.is_empty() {
            self.listeners.dispatch(events);
        }
    }
}

impl TouchTarget for SystemSwitch {
    fn style(&self) -> ControlStyle {
        ControlStyle::System
    }

    /// Toggles when a touch lifts inside the bounds.
    fn handle_touch(&self, event: &TouchEvent) {
        {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                return;
            }
            match event.phase {
                TouchPhase::Began => {
                    state.pressed = true;
                    state.events.push(ControlEvent::TouchDown);
                }
                TouchPhase::Moved => {}
                TouchPhase::Ended if state.pressed => {
                    state.pressed = false;
                    if state.bounds.contains(event.location.x, event.location.y) {
                        state.is_on = !state.is_on;
                        state.invalidations.insert(Invalidations::THUMB_POSITION);
                        state.events.push(ControlEvent::ValueChanged);
                    }
                    state.events.push(ControlEvent::TouchUpInside);
                }
                TouchPhase::Cancelled if state.pressed => {
                    state.pressed = false;
                    state.events.push(ControlEvent::TouchCancel);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {}
            }
        }
        self.flush_events();
    }

    fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    fn set_bounds(&self, bounds: Rect) {
        let mut state = self.state.borrow_mut();
        if state.bounds != bounds {
            state.bounds = bounds;
            state.invalidations.insert(Invalidations::LAYOUT);
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            state.enabled = enabled;
            if !enabled && state.pressed {
                state.pressed = false;
                state.events.push(ControlEvent::TouchCancel);
            }
        }
        self.flush_events();
    }

    fn add_listener(
        &self,
        events: ControlEvents,
        listener: Box<dyn FnMut(ControlEvent)>,
    ) -> ListenerId {
        self.listeners.add(events, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn take_invalidations(&self) -> Invalidations {
        self.state.borrow_mut().invalidations.take()
    }
}

impl SwitchControl for SystemSwitch {
    fn is_on(&self) -> bool {
        self.state.borrow().is_on
    }

    fn set_on(&self, on: bool, _animated: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.is_on == on {
                return;
            }
            state.is_on = on;
            state.invalidations.insert(Invalidations::THUMB_POSITION);
            state.events.push(ControlEvent::ValueChanged);
        }
        self.flush_events();
    }

    fn set_on_tint(&self, tint: Option<Color>) {
        let mut state = self.state.borrow_mut();
        state.on_tint = tint;
        state.invalidations.insert(Invalidations::TRACK_TINT);
    }

    fn set_thumb_tint(&self, tint: Option<Color>) {
        let mut state = self.state.borrow_mut();
        state.thumb_tint = tint;
        state.invalidations.insert(Invalidations::THUMB_TINT);
    }

    fn on_image(&self) -> Option<ImageHandle> {
        self.state.borrow().on_image.clone()
    }

    fn set_on_image(&self, image: Option<ImageHandle>) {
        let mut state = self.state.borrow_mut();
        state.on_image = image;
        state.invalidations.insert(Invalidations::IMAGES);
    }

    fn off_image(&self) -> Option<ImageHandle> {
        self.state.borrow().off_image.clone()
    }

    fn set_off_image(&self, image: Option<ImageHandle>) {
        let mut state = self.state.borrow_mut();
        state.off_image = image;
        state.invalidations.insert(Invalidations::IMAGES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use web_time::Duration;

    fn count_changes(control: &dyn TouchTarget) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        control.add_listener(
            ControlEvents::VALUE_CHANGED,
            Box::new(move |_| counter.set(counter.get() + 1)),
        );
        count
    }

    #[test]
    fn system_slider_follows_the_finger() {
        let slider = SystemSlider::new(Rect::new(0.0, 0.0, 228.0, 30.0));
        slider.set_maximum_value(10.0);
        let changes = count_changes(&slider);

        let at = |x: f32| Point::new(x, 15.0);
        slider.handle_touch(&TouchEvent::began(at(14.0), Duration::ZERO));
        slider.handle_touch(&TouchEvent::moved(at(94.0), Duration::from_millis(50)));
        slider.handle_touch(&TouchEvent::ended(at(94.0), Duration::from_millis(90)));

        assert!((slider.value() - 4.0).abs() < 1e-4);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn non_continuous_system_slider_reports_on_release() {
        let slider = SystemSlider::new(Rect::new(0.0, 0.0, 228.0, 30.0));
        slider.set_continuous(false);
        let changes = count_changes(&slider);

        let at = |x: f32| Point::new(x, 15.0);
        slider.handle_touch(&TouchEvent::began(at(60.0), Duration::ZERO));
        slider.handle_touch(&TouchEvent::moved(at(120.0), Duration::from_millis(50)));
        assert_eq!(changes.get(), 0);
        slider.handle_touch(&TouchEvent::ended(at(120.0), Duration::from_millis(90)));
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn system_switch_toggles_on_release_inside() {
        let switch = SystemSwitch::new(Point::ZERO);
        let changes = count_changes(&switch);
        let inside = Point::new(20.0, 15.0);

        switch.handle_touch(&TouchEvent::began(inside, Duration::ZERO));
        switch.handle_touch(&TouchEvent::ended(inside, Duration::from_millis(80)));
        assert!(switch.is_on());

        switch.handle_touch(&TouchEvent::began(inside, Duration::from_millis(500)));
        switch.handle_touch(&TouchEvent::ended(Point::new(200.0, 15.0), Duration::from_millis(580)));
        assert!(switch.is_on());
        assert_eq!(changes.get(), 1);
    }
}
