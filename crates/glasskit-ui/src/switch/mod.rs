//! Glass switch.
//!
//! The thumb expands on touch-down and follows the finger between the off
//! and on positions. Once the gesture is a drag, reaching the opposite end
//! flips the state immediately with a medium haptic. A tap flips the state
//! and plays the move-then-contract choreography.

mod edge_toggle;

pub use edge_toggle::EdgeToggleDetector;

use std::rc::Rc;

use glasskit_core::{Generation, GenerationToken, Owned};
use glasskit_foundation::{
    rubber_band_clamp, GestureClassifier, GestureOutcome, GesturePhase, HapticIntensity,
    TouchEvent, TouchPhase,
};
use glasskit_ui_graphics::{Color, Point, Rect};
use smallvec::SmallVec;

use crate::appearance::ImageHandle;
use crate::capability::{ControlStyle, SwitchControl, TouchTarget};
use crate::environment::ControlEnvironment;
use crate::events::{ControlEvent, ControlEvents, EventListeners, ListenerId};
use crate::invalidation::Invalidations;
use crate::slider::ValueMapper;
use crate::style::SwitchStyle;
use crate::thumb::{ThumbGeometry, ThumbMorphEngine, ThumbState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchLayout {
    pub bounds: Rect,
    pub track: Rect,
    /// Off tint blended towards the on tint by thumb position.
    pub track_tint: Color,
    pub thumb: ThumbGeometry,
    pub thumb_tint: Color,
}

struct SwitchState {
    env: ControlEnvironment,
    style: SwitchStyle,
    bounds: Rect,
    is_on: bool,
    enabled: bool,
    on_tint: Option<Color>,
    thumb_tint: Option<Color>,
    on_image: Option<ImageHandle>,
    off_image: Option<ImageHandle>,
    classifier: GestureClassifier,
    toggle: EdgeToggleDetector,
    morph: ThumbMorphEngine,
    on_at_gesture_start: bool,
    continuations: Generation,
    invalidations: Invalidations,
    events: SmallVec<[ControlEvent; 4]>,
}

impl SwitchState {
    fn travel(&self) -> ValueMapper {
        travel_for(self.bounds, &self.style)
    }

    fn side_center(&self, on: bool) -> Point {
        let travel = self.travel();
        let x = if on {
            travel.max_center
        } else {
            travel.min_center
        };
        Point::new(x, self.bounds.mid_y())
    }

    fn flip(&mut self) {
        self.is_on = !self.is_on;
        self.invalidations
            .insert(Invalidations::TRACK_TINT | Invalidations::THUMB_POSITION);
    }

    fn begin_gesture(&mut self, event: &TouchEvent) {
        self.continuations.advance();
        let center = self.side_center(self.is_on);
        self.morph.set_center(center);
        self.invalidations.insert(Invalidations::THUMB_POSITION);
        self.classifier.begin(event, center);
        self.on_at_gesture_start = self.is_on;
        self.toggle.reset();
        self.morph.expand();
        self.events.push(ControlEvent::TouchDown);
    }

    fn track_move(&mut self, event: &TouchEvent) {
        let Some(update) = self.classifier.update(event) else {
            return;
        };
        let travel = self.travel();
        let raw = update.raw_target.x;
        let visual = rubber_band_clamp(raw, travel.min_center, travel.max_center);
        self.morph
            .set_center(Point::new(visual, self.bounds.mid_y()));
        self.invalidations
            .insert(Invalidations::THUMB_POSITION | Invalidations::TRACK_TINT);
        if let Some(session) = self.classifier.session_mut() {
            session.rubber_band_offset = visual - travel.clamp_center(raw);
        }

        if self.classifier.phase() != GesturePhase::Dragging {
            return;
        }
        let is_on = self.is_on;
        if self
            .toggle
            .update(visual, is_on, travel.min_center, travel.max_center)
        {
            self.flip();
            log::debug!("switch toggled mid-drag to {}", self.is_on);
            self.env.haptics.impact(HapticIntensity::Medium);
        }
    }

    fn finalize_drag(&mut self) {
        if !self.toggle.has_toggled() {
            self.flip();
            log::debug!("drag ended without reaching an edge; toggled to {}", self.is_on);
            self.env.haptics.impact(HapticIntensity::Light);
        }
        self.settle();
    }

    fn revert(&mut self) {
        if self.is_on != self.on_at_gesture_start {
            self.flip();
        }
        self.settle();
    }

    /// Snaps the thumb to its side, contracts and reports any net change.
    fn settle(&mut self) {
        self.morph.set_center(self.side_center(self.is_on));
        self.morph.contract();
        if self.is_on != self.on_at_gesture_start {
            self.events.push(ControlEvent::ValueChanged);
        }
    }

    fn cancel_gesture(&mut self, event: &TouchEvent) {
        match self.classifier.cancel(event) {
            Some(GestureOutcome::Drag { .. }) => self.finalize_drag(),
            Some(_) => self.revert(),
            None => return,
        }
        self.events.push(ControlEvent::TouchCancel);
    }

    fn abandon_gesture(&mut self) {
        self.continuations.advance();
        if self.classifier.session().is_some() {
            self.classifier.reset();
            self.revert();
            self.events.push(ControlEvent::TouchCancel);
        } else {
            self.morph.contract();
        }
    }

    fn contract_after_tap(&mut self, token: GenerationToken) {
        if !self.continuations.is_current(token) {
            log::trace!("stale tap contraction ignored");
            return;
        }
        if self.classifier.phase() == GesturePhase::Idle {
            self.morph.contract();
        }
    }
}

fn travel_for(bounds: Rect, style: &SwitchStyle) -> ValueMapper {
    let half = style.thumb.contracted.width / 2.0;
    ValueMapper::new(
        bounds.x + style.thumb_inset + half,
        bounds.max_x() - style.thumb_inset - half,
    )
}

/// Shared handle to a glass switch. Clones refer to the same control.
#[derive(Clone)]
pub struct GlassSwitch {
    state: Owned<SwitchState>,
    listeners: EventListeners,
}

impl GlassSwitch {
    pub fn new(env: ControlEnvironment, origin: Point) -> Self {
        Self::with_style(env, origin, SwitchStyle::default())
    }

    pub fn with_style(env: ControlEnvironment, origin: Point, style: SwitchStyle) -> Self {
        let bounds = Rect::from_origin_size(origin, style.size);
        let center = Point::new(travel_for(bounds, &style).min_center, bounds.mid_y());
        let morph = ThumbMorphEngine::new(
            Rc::clone(&env.scene),
            Rc::clone(&env.driver),
            style.thumb,
            style.morph,
            center,
        );
        let state = SwitchState {
            classifier: GestureClassifier::new(env.gestures.tap_time_threshold),
            toggle: EdgeToggleDetector::new(env.gestures.switch_toggle_threshold),
            env,
            style,
            bounds,
            is_on: false,
            enabled: true,
            on_tint: None,
            thumb_tint: None,
            on_image: None,
            off_image: None,
            morph,
            on_at_gesture_start: false,
            continuations: Generation::new(),
            invalidations: Invalidations::NONE,
            events: SmallVec::new(),
        };
        Self {
            state: Owned::new(state),
            listeners: EventListeners::new(),
        }
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

    /// Thumb centers for the off and on positions.
    pub fn thumb_travel(&self) -> ValueMapper {
        self.state.borrow().travel()
    }

    pub fn layout(&self) -> SwitchLayout {
        let state = self.state.borrow();
        let thumb = state.morph.geometry();
        let fraction = state.travel().normalized(thumb.center.x);
        let on_tint = state.on_tint.unwrap_or(Color::SYSTEM_GREEN);
        SwitchLayout {
            bounds: state.bounds,
            track: state.bounds,
            track_tint: Color::SYSTEM_FILL.lerp(on_tint, fraction),
            thumb,
            thumb_tint: state.thumb_tint.unwrap_or(Color::WHITE),
        }
    }

    fn end_gesture(&self, event: &TouchEvent) {
        let mut state = self.state.borrow_mut();
        let Some(outcome) = state.classifier.end(event) else {
            return;
        };
        match outcome {
            GestureOutcome::Tap { .. } => {
                state.flip();
                log::debug!("switch tapped to {}", state.is_on);
                state.env.haptics.impact(HapticIntensity::Light);
                state.events.push(ControlEvent::ValueChanged);
                let token = state.continuations.advance();
                let target = state.side_center(state.is_on);
                let spec = state.style.toggle_move;
                state
                    .morph
                    .move_to(target, spec, Some(self.contraction(token)));
            }
            GestureOutcome::Drag { .. } => state.finalize_drag(),
            GestureOutcome::Reverted { .. } => state.revert(),
        }
        state.events.push(ControlEvent::TouchUpInside);
    }

    fn contraction(&self, token: GenerationToken) -> Box<dyn FnOnce(bool)> {
        let weak = self.state.downgrade();
        Box::new(move |_arrived| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().contract_after_tap(token);
            }
        })
    }

    fn flush_events(&self) {
        let events = std::mem::take(&mut self.state.borrow_mut().events);
        if !events.is_empty() {
            self.listeners.dispatch(events);
        }
    }
}

impl TouchTarget for GlassSwitch {
    fn style(&self) -> ControlStyle {
        ControlStyle::Glass
    }

    fn handle_touch(&self, event: &TouchEvent) {
        if !self.state.borrow().enabled {
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
        state.invalidations.insert(Invalidations::LAYOUT);
        if state.classifier.phase() == GesturePhase::Idle {
            let center = state.side_center(state.is_on);
            state.morph.set_center(center);
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.enabled == enabled {
                return;
            }
            state.enabled = enabled;
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
        self.state.borrow_mut().invalidations.take()
    }
}

impl SwitchControl for GlassSwitch {
    fn is_on(&self) -> bool {
        self.state.borrow().is_on
    }

    fn set_on(&self, on: bool, animated: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.is_on == on {
                return;
            }
            state.flip();
            if state.classifier.phase() == GesturePhase::Idle {
                let target = state.side_center(on);
                if animated {
                    let spec = state.style.toggle_move;
                    state.morph.move_to(target, spec, None);
                } else {
                    state.morph.set_center(target);
                }
            }
            state.events.push(ControlEvent::ValueChanged);
        }
        self.flush_events();
    }

    fn set_on_tint(&self, tint: Option<Color>) {
        let mut state = self.state.borrow_mut();
        if state.on_tint != tint {
            state.on_tint = tint;
            state.invalidations.insert(Invalidations::TRACK_TINT);
        }
    }

    fn set_thumb_tint(&self, tint: Option<Color>) {
        let mut state = self.state.borrow_mut();
        if state.thumb_tint != tint {
            state.thumb_tint = tint;
            state.morph.set_tint(tint);
            state.invalidations.insert(Invalidations::THUMB_TINT);
        }
    }

    fn on_image(&self) -> Option<ImageHandle> {
        self.state.borrow().on_image.clone()
    }

    fn set_on_image(&self, image: Option<ImageHandle>) {
        let mut state = self.state.borrow_mut();
        if state.on_image != image {
            state.on_image = image;
            state.invalidations.insert(Invalidations::IMAGES);
        }
    }

    fn off_image(&self) -> Option<ImageHandle> {
        self.state.borrow().off_image.clone()
    }

    fn set_off_image(&self, image: Option<ImageHandle>) {
        let mut state = self.state.borrow_mut();
        if state.off_image != image {
            state.off_image = image;
            state.invalidations.insert(Invalidations::IMAGES);
        }
    }
}
