use glasskit_ui_graphics::Point;
use web_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A single-finger touch sample delivered to a control.
///
/// `timestamp` is measured from an arbitrary host epoch; only differences
/// between samples of one touch sequence are meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub location: Point,
    pub timestamp: Duration,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, location: Point, timestamp: Duration) -> Self {
        Self {
            phase,
            location,
            timestamp,
        }
    }

    pub fn began(location: Point, timestamp: Duration) -> Self {
        Self::new(TouchPhase::Began, location, timestamp)
    }

    pub fn moved(location: Point, timestamp: Duration) -> Self {
        Self::new(TouchPhase::Moved, location, timestamp)
    }

    pub fn ended(location: Point, timestamp: Duration) -> Self {
        Self::new(TouchPhase::Ended, location, timestamp)
    }

    pub fn cancelled(location: Point, timestamp: Duration) -> Self {
        Self::new(TouchPhase::Cancelled, location, timestamp)
    }
}
