//! Glass slider.
//!
//! Touch-down expands the thumb immediately and the thumb tracks the finger
//! with rubber-band resistance past the track ends. The raw target, not the
//! rubber-banded one, feeds the value. How the gesture resolves depends on
//! its classification: a tap moves the value to the tapped point and
//! contracts after a short delay, a drag settles where the finger left it.

mod model;
mod value_mapper;

pub use model::{SliderImage, SliderModel};
pub use value_mapper::{EdgeHapticLatch, TrackEdge, ValueMapper, ValueRange};

pub(crate) use value_mapper::clamp_between;

use std::rc::Rc;

use glasskit_core::{Generation, GenerationToken, Owned};
use glasskit_foundation::{
    rubber_band_clamp, GestureClassifier, GestureOutcome, GesturePhase, GestureSession,
    HapticIntensity, TouchEvent, TouchPhase,
};
use glasskit_ui_graphics::{Color, Point, Rect};
use smallvec::SmallVec;

use crate::appearance::{ControlState, ImageHandle};
use crate::capability::{ControlStyle, SliderControl, TouchTarget};
use crate::environment::ControlEnvironment;
use crate::events::{ControlEvent, ControlEvents, EventListeners, ListenerId};
use crate::invalidation::Invalidations;
use crate::style::SliderStyle;
use crate::thumb::{ThumbGeometry, ThumbMorphEngine, ThumbState};

/// Geometry snapshot for the host renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderLayout {
    pub bounds: Rect,
    pub track: Rect,
    /// Filled part of the track, from the minimum end to the thumb.
    pub minimum_track: Rect,
    pub maximum_track: Rect,
    pub thumb: ThumbGeometry,
    pub minimum_track_tint: Color,
    pub maximum_track_tint: Color,
    pub thumb_tint: Color,
}

struct SliderState {
    env: ControlEnvironment,
    style: SliderStyle,
    bounds: Rect,
    model: SliderModel,
    classifier: GestureClassifier,
    edge_latch: EdgeHapticLatch,
    morph: ThumbMorphEngine,
    /// Last value announced through `ValueChanged`.
    reported_value: f32,
    value_at_gesture_start: f32,
    continuations: Generation,
    pending_contraction: Option<GenerationToken>,
    events: SmallVec<[ControlEvent; 4]>,
}

impl SliderState {
    fn mapper(&self) -> ValueMapper {
        let half = self.style.thumb.contracted.width / 2.0;
        ValueMapper::new(self.bounds.x + half, self.bounds.max_x() - half)
    }

    fn thumb_point(&self, x: f32) -> Point {
        Point::new(x, self.bounds.mid_y())
    }

    fn resting_center(&self) -> Point {
        let x = self
            .mapper()
            .center_for(self.model.value(), self.model.range());
        self.thumb_point(x)
    }

    fn report_if_changed(&mut self) {
        let value = self.model.value();
        if value != self.reported_value {
            self.reported_value = value;
            self.events.push(ControlEvent::ValueChanged);
        }
    }

    fn invalidate_pending_contraction(&mut self) {
        self.continuations.advance();
        if self.pending_contraction.take().is_some() {
            log::debug!("pending auto-contraction superseded");
        }
    }

    fn begin_gesture(&mut self, event: &TouchEvent) {
        self.invalidate_pending_contraction();
        // An in-flight tap or programmatic move is cut short at its target.
        let center = self.resting_center();
        self.morph.set_center(center);
        self.model.invalidate(Invalidations::THUMB_POSITION);
        self.classifier.begin(event, center);
        self.value_at_gesture_start = self.model.value();
        self.reported_value = self.model.value();
        self.morph.expand();
        self.events.push(ControlEvent::TouchDown);
    }

    fn track_move(&mut self, event: &TouchEvent) {
        let Some(update) = self.classifier.update(event) else {
            return;
        };
        let mapper = self.mapper();
        let raw = update.raw_target.x;
        let visual = rubber_band_clamp(raw, mapper.min_center, mapper.max_center);
        self.morph.set_center(self.thumb_point(visual));
        self.model.invalidate(Invalidations::THUMB_POSITION);

        let latch = self.edge_latch;
        let edge = self.classifier.session_mut().and_then(|session| {
            session.rubber_band_offset = visual - mapper.clamp_center(raw);
            latch.update(&mut session.edge_flags, raw, &mapper)
        });
        if let Some(edge) = edge {
            log::debug!("slider reached {edge:?} edge");
            self.env.haptics.impact(HapticIntensity::Light);
        }

        // Until classified, the release may still turn out to be a tap.
        if self.classifier.phase() != GesturePhase::Dragging {
            return;
        }
        self.model.assign(mapper.value_at(raw, self.model.range()));
        if self.model.continuous {
            self.report_if_changed();
        }
    }

    /// Applies a tap and returns where the thumb should travel.
    fn resolve_tap(&mut self, location: Point) -> Point {
        let mapper = self.mapper();
        self.model.assign(mapper.value_at(location.x, self.model.range()));
        log::debug!("slider tap set value {}", self.model.value());
        self.report_if_changed();
        self.resting_center()
    }

    fn finalize_drag(&mut self, session: &GestureSession) {
        let mapper = self.mapper();
        let raw = session.raw_target().x;
        self.model.assign(mapper.value_at(raw, self.model.range()));
        self.morph.set_center(self.resting_center());
        self.morph.contract();
        self.report_if_changed();
    }

    fn revert(&mut self) {
        self.model.assign(self.value_at_gesture_start);
        self.morph.set_center(self.resting_center());
        self.morph.contract();
        self.report_if_changed();
    }

    fn cancel_gesture(&mut self, event: &TouchEvent) {
        match self.classifier.cancel(event) {
            Some(GestureOutcome::Drag { session }) => self.finalize_drag(&session),
            Some(_) => self.revert(),
            None => return,
        }
        self.events.push(ControlEvent::TouchCancel);
    }

    fn abandon_gesture(&mut self) {
        self.invalidate_pending_contraction();
        if self.classifier.session().is_some() {
            self.classifier.reset();
            self.revert();
            self.events.push(ControlEvent::TouchCancel);
        } else {
            self.morph.contract();
        }
    }

    fn run_auto_contraction(&mut self, token: GenerationToken) {
        if !self.continuations.is_current(token) {
            log::trace!("stale auto-contraction ignored");
            return;
        }
        self.pending_contraction = None;
        if self.classifier.phase() == GesturePhase::Idle {
            log::debug!("slider auto-contracting after tap");
            self.morph.contract();
        }
    }

    fn place_thumb_at_rest(&mut self, animated: bool) {
        if self.classifier.phase() != GesturePhase::Idle {
            return;
        }
        let target = self.resting_center();
        if animated {
            self.morph
                .move_to(target, self.style.programmatic_move, None);
        } else {
            self.morph.set_center(target);
        }
    }
}

/// Shared handle to a glass slider. Clones refer to the same control.
#[derive(Clone)]
pub struct GlassSlider {
    state: Owned<SliderState>,
    listeners: EventListeners,
}

impl GlassSlider {
    pub fn new(env: ControlEnvironment, bounds: Rect) -> Self {
        Self::with_style(env, bounds, SliderStyle::default())
    }

    pub fn with_style(env: ControlEnvironment, bounds: Rect, style: SliderStyle) -> Self {
        let model = SliderModel::default();
        let center = Point::new(
            bounds.x + style.thumb.contracted.width / 2.0,
            bounds.mid_y(),
        );
        let morph = ThumbMorphEngine::new(
            Rc::clone(&env.scene),
            Rc::clone(&env.driver),
            style.thumb,
            style.morph,
            center,
        );
        let state = SliderState {
            classifier: GestureClassifier::new(env.gestures.tap_time_threshold),
            edge_latch: EdgeHapticLatch::new(env.gestures.slider_edge_haptic_threshold),
            env,
            style,
            bounds,
            reported_value: model.value(),
            value_at_gesture_start: model.value(),
            model,
            morph,
            continuations: Generation::new(),
            pending_contraction: None,
            events: SmallVec::new(),
        };
        Self {
            state: Owned::new(state),
            listeners: EventListeners::new(),
        }
    }

    pub fn value_mapper(&self) -> ValueMapper {
        self.state.borrow().mapper()
    }

    pub fn thumb(&self) -> ThumbMorphEngine {
        self.state.borrow().morph.clone()
    }

    pub fn thumb_state(&self) -> ThumbState {
        self.state.borrow().morph.state()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.state.borrow().classifier.phase()
    }

    pub fn has_pending_contraction(&self) -> bool {
        self.state.borrow().pending_contraction.is_some()
    }

    pub fn layout(&self) -> SliderLayout {
        let state = self.state.borrow();
        let bounds = state.bounds;
        let thumb = state.morph.geometry();
        let height = state.style.track_height;
        let track = Rect::new(bounds.x, bounds.mid_y() - height / 2.0, bounds.width, height);
        let fill = clamp_between(thumb.center.x, track.x, track.max_x());
        SliderLayout {
            bounds,
            track,
            minimum_track: Rect::new(track.x, track.y, fill - track.x, height),
            maximum_track: Rect::new(fill, track.y, track.max_x() - fill, height),
            thumb,
            minimum_track_tint: state
                .model
                .minimum_track_tint()
                .unwrap_or(Color::SYSTEM_BLUE),
            maximum_track_tint: state
                .model
                .maximum_track_tint()
                .unwrap_or(Color::SYSTEM_FILL),
            thumb_tint: state.model.thumb_tint().unwrap_or(Color::WHITE),
        }
    }

    fn end_gesture(&self, event: &TouchEvent) {
        let mut state = self.state.borrow_mut();
        let Some(outcome) = state.classifier.end(event) else {
            return;
        };
        match outcome {
            GestureOutcome::Tap { location } => {
                let token = state.continuations.advance();
                state.pending_contraction = Some(token);
                let target = state.resolve_tap(location);
                let spec = state.style.tap_move;
                state
                    .morph
                    .move_to(target, spec, Some(self.auto_contraction(token)));
            }
            GestureOutcome::Drag { session } => state.finalize_drag(&session),
            GestureOutcome::Reverted { .. } => state.revert(),
        }
        state.events.push(ControlEvent::TouchUpInside);
    }

    /// Continuation run when the tap move ends: schedules the delayed
    /// contraction unless a newer gesture took over.
    fn auto_contraction(&self, token: GenerationToken) -> Box<dyn FnOnce(bool)> {
        let weak = self.state.downgrade();
        Box::new(move |_arrived| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let (driver, delay) = {
                let state = state.borrow();
                if !state.continuations.is_current(token) {
                    return;
                }
                (
                    Rc::clone(&state.env.driver),
                    state.env.gestures.auto_contract_delay,
                )
            };
            let weak = state.downgrade();
            driver.run_after(
                delay,
                Box::new(move || {
                    if let Some(state) = weak.upgrade() {
                        state.borrow_mut().run_auto_contraction(token);
                    }
                }),
            );
        })
    }

    fn flush_events(&self) {
        let events = std::mem::take(&mut self.state.borrow_mut().events);
        if !events.is_empty() {
            self.listeners.dispatch(events);
        }
    }
}

impl TouchTarget for GlassSlider {
    fn style(&self) -> ControlStyle {
        ControlStyle::Glass
    }

    fn handle_touch(&self, event: &TouchEvent) {
        if !self.state.borrow().model.enabled {
            return;
        }
        match event.phase {
            TouchPhase::Began => self.state.borrow_mut().begin_gesture(event),
            TouchPhase::Moved => self.state.borrow_mut().track_move(event),
            TouchPhase::Ended => self.end_gesture(event),
            TouchPhase::Cancelled => self.state.borrow_mut().cancel_gesture(event),
        }
        self.flush_events();
    }

    fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    fn set_bounds(&self, bounds: Rect) {
        let mut state = self.state.borrow_mut();
        if state.bounds == bounds {
            return;
        }
        state.bounds = bounds;
        state.model.invalidate(Invalidations::LAYOUT);
        state.place_thumb_at_rest(false);
    }

    fn is_enabled(&self) -> bool {
        self.state.borrow().model.enabled
    }

    fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.model.enabled == enabled {
                return;
            }
            state.model.enabled = enabled;
            if !enabled {
                state.abandon_gesture();
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

impl SliderControl for GlassSlider {
    fn value(&self) -> f32 {
        self.state.borrow().model.value()
    }

    fn set_value(&self, value: f32, animated: bool) {
        {
            let mut state = self.state.borrow_mut();
            if !state.model.assign(value) {
                return;
            }
            state.place_thumb_at_rest(animated);
            state.reported_value = state.model.value();
            if state.model.continuous {
                state.events.push(ControlEvent::ValueChanged);
            }
        }
        self.flush_events();
    }

    fn minimum_value(&self) -> f32 {
        self.state.borrow().model.range().minimum
    }

    fn set_minimum_value(&self, minimum: f32) {
        let mut state = self.state.borrow_mut();
        state.model.set_minimum(minimum);
        state.reported_value = state.model.value();
        state.place_thumb_at_rest(false);
    }

    fn maximum_value(&self) -> f32 {
        self.state.borrow().model.range().maximum
    }

    fn set_maximum_value(&self, maximum: f32) {
        let mut state = self.state.borrow_mut();
        state.model.set_maximum(maximum);
        state.reported_value = state.model.value();
        state.place_thumb_at_rest(false);
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
        let mut state = self.state.borrow_mut();
        if state.model.set_thumb_tint(tint) {
            state.morph.set_tint(tint);
        }
    }

    fn image(&self, kind: SliderImage, state: ControlState) -> Option<ImageHandle> {
        self.state.borrow().model.image(kind, state).cloned()
    }

    fn set_image(&self, kind: SliderImage, state: ControlState, image: Option<ImageHandle>) {
        self.state.borrow_mut().model.set_image(kind, state, image);
    }
}
