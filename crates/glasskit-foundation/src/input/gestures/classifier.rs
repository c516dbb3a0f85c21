//! Tap-or-drag classification for a single touch sequence.
//!
//! Classification is purely time based: a touch that stays down for at least
//! the tap threshold is a drag, however little it moved. Live feedback never
//! waits for classification; every move reports the current delta so the
//! control can track the finger immediately. Classification only decides how
//! the gesture resolves when it ends.

use glasskit_ui_graphics::Point;
use web_time::Duration;

use crate::gesture_constants::TAP_TIME_THRESHOLD;
use crate::input::types::TouchEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Touch is down but not yet classified.
    Pending,
    Dragging,
}

/// One-shot edge latches carried through a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeFlags {
    pub min: bool,
    pub max: bool,
}

impl EdgeFlags {
    pub fn clear(&mut self) {
        self.min = false;
        self.max = false;
    }
}

/// State of the touch sequence currently owned by a control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub start_time: Duration,
    pub start_location: Point,
    pub start_thumb_center: Point,
    pub is_dragging: bool,
    pub drag_delta: Point,
    /// Visual thumb position minus the clamped raw target, on the drag axis.
    pub rubber_band_offset: f32,
    pub edge_flags: EdgeFlags,
}

impl GestureSession {
    fn new(event: &TouchEvent, thumb_center: Point) -> Self {
        Self {
            start_time: event.timestamp,
            start_location: event.location,
            start_thumb_center: thumb_center,
            is_dragging: false,
            drag_delta: Point::ZERO,
            rubber_band_offset: 0.0,
            edge_flags: EdgeFlags::default(),
        }
    }

    /// Where the thumb would be if it followed the finger without resistance.
    pub fn raw_target(&self) -> Point {
        self.start_thumb_center + self.drag_delta
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start_time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    pub delta: Point,
    pub raw_target: Point,
    /// True on the move that crossed the tap threshold.
    pub became_drag: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Quick touch: resolve by moving to `location`.
    Tap { location: Point },
    /// Sustained touch: resolve from the drag session.
    Drag { session: GestureSession },
    /// Cancelled before it became a drag: restore pre-gesture state.
    Reverted { session: GestureSession },
}

#[derive(Debug)]
pub struct GestureClassifier {
    tap_threshold: Duration,
    session: Option<GestureSession>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(TAP_TIME_THRESHOLD)
    }
}

impl GestureClassifier {
    pub fn new(tap_threshold: Duration) -> Self {
        Self {
            tap_threshold,
            session: None,
        }
    }

    pub fn tap_threshold(&self) -> Duration {
        self.tap_threshold
    }

    pub fn phase(&self) -> GesturePhase {
        match &self.session {
            None => GesturePhase::Idle,
            Some(session) if session.is_dragging => GesturePhase::Dragging,
            Some(_) => GesturePhase::Pending,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GestureSession> {
        self.session.as_mut()
    }

    /// Starts a new session, discarding any session that was never ended.
    pub fn begin(&mut self, event: &TouchEvent, thumb_center: Point) -> GestureSession {
        if self.session.is_some() {
            log::debug!("touch began while a gesture was active; restarting session");
        }
        let session = GestureSession::new(event, thumb_center);
        self.session = Some(session);
        session
    }

    pub fn update(&mut self, event: &TouchEvent) -> Option<DragUpdate> {
        let threshold = self.tap_threshold;
        let session = self.session.as_mut()?;
        session.drag_delta = event.location - session.start_location;
        let became_drag = !session.is_dragging && session.elapsed(event.timestamp) >= threshold;
        if became_drag {
            session.is_dragging = true;
            log::debug!(
                "gesture classified as drag after {:?}",
                session.elapsed(event.timestamp)
            );
        }
        Some(DragUpdate {
            delta: session.drag_delta,
            raw_target: session.raw_target(),
            became_drag,
        })
    }

    pub fn end(&mut self, event: &TouchEvent) -> Option<GestureOutcome> {
        let threshold = self.tap_threshold;
        let mut session = self.session.take()?;
        session.drag_delta = event.location - session.start_location;
        if session.is_dragging || session.elapsed(event.timestamp) >= threshold {
            session.is_dragging = true;
            Some(GestureOutcome::Drag { session })
        } else {
            Some(GestureOutcome::Tap {
                location: event.location,
            })
        }
    }

    pub fn cancel(&mut self, event: &TouchEvent) -> Option<GestureOutcome> {
        let mut session = self.session.take()?;
        if session.is_dragging {
            session.drag_delta = event.location - session.start_location;
            Some(GestureOutcome::Drag { session })
        } else {
            Some(GestureOutcome::Reverted { session })
        }
    }

    /// Drops the session without producing an outcome.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn at(x: f32) -> Point {
        Point::new(x, 10.0)
    }

    #[test]
    fn quick_release_is_a_tap() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(10.0), ms(1000)), at(5.0));
        assert_eq!(classifier.phase(), GesturePhase::Pending);

        let outcome = classifier.end(&TouchEvent::ended(at(40.0), ms(1100)));
        assert_eq!(outcome, Some(GestureOutcome::Tap { location: at(40.0) }));
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn moves_report_delta_before_classification() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(10.0), ms(0)), at(20.0));

        let update = classifier
            .update(&TouchEvent::moved(at(25.0), ms(50)))
            .expect("session active");
        assert_eq!(update.delta, Point::new(15.0, 0.0));
        assert_eq!(update.raw_target, Point::new(35.0, 10.0));
        assert!(!update.became_drag);
        assert_eq!(classifier.phase(), GesturePhase::Pending);
    }

    #[test]
    fn move_past_threshold_becomes_drag_once() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(0.0), ms(0)), at(0.0));

        let first = classifier.update(&TouchEvent::moved(at(5.0), ms(150))).unwrap();
        assert!(first.became_drag);
        let second = classifier.update(&TouchEvent::moved(at(6.0), ms(170))).unwrap();
        assert!(!second.became_drag);
        assert_eq!(classifier.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn stationary_hold_past_threshold_ends_as_drag() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(30.0), ms(0)), at(30.0));

        match classifier.end(&TouchEvent::ended(at(30.0), ms(400))) {
            Some(GestureOutcome::Drag { session }) => {
                assert_eq!(session.drag_delta, Point::ZERO);
                assert!(session.is_dragging);
            }
            other => panic!("expected drag, got {other:?}"),
        }
    }

    #[test]
    fn cancel_before_drag_reverts() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(0.0), ms(0)), at(0.0));
        classifier.update(&TouchEvent::moved(at(8.0), ms(40)));

        let outcome = classifier.cancel(&TouchEvent::cancelled(at(8.0), ms(60)));
        assert!(matches!(outcome, Some(GestureOutcome::Reverted { .. })));
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn cancel_during_drag_finalizes_drag() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(0.0), ms(0)), at(0.0));
        classifier.update(&TouchEvent::moved(at(8.0), ms(200)));

        let outcome = classifier.cancel(&TouchEvent::cancelled(at(12.0), ms(260)));
        match outcome {
            Some(GestureOutcome::Drag { session }) => {
                assert_eq!(session.drag_delta, Point::new(12.0, 0.0))
            }
            other => panic!("expected drag, got {other:?}"),
        }
    }

    #[test]
    fn events_without_session_are_ignored() {
        let mut classifier = GestureClassifier::default();
        assert!(classifier.update(&TouchEvent::moved(at(1.0), ms(0))).is_none());
        assert!(classifier.end(&TouchEvent::ended(at(1.0), ms(0))).is_none());
        assert!(classifier.cancel(&TouchEvent::cancelled(at(1.0), ms(0))).is_none());
    }

    #[test]
    fn begin_restarts_an_unfinished_session() {
        let mut classifier = GestureClassifier::default();
        classifier.begin(&TouchEvent::began(at(0.0), ms(0)), at(0.0));
        classifier.update(&TouchEvent::moved(at(30.0), ms(300)));

        let session = classifier.begin(&TouchEvent::began(at(50.0), ms(500)), at(42.0));
        assert!(!session.is_dragging);
        assert_eq!(session.start_thumb_center, at(42.0));
        assert_eq!(classifier.phase(), GesturePhase::Pending);
    }
}
