//! Scripted touch input with real timestamps.
//!
//! Every step advances the rule's clock, so animations started by one touch
//! sample have progressed by the time the next sample arrives.

use glasskit_foundation::TouchEvent;
use glasskit_ui::TouchTarget;
use glasskit_ui_graphics::Point;
use web_time::Duration;

use crate::rule::{ControlTestRule, FRAME_INTERVAL};

/// Hold time for [`TouchRobot::tap`], well inside the tap threshold.
pub const TAP_HOLD: Duration = Duration::from_millis(48);

pub struct TouchRobot<'a> {
    rule: &'a ControlTestRule,
    target: &'a dyn TouchTarget,
    position: Point,
}

impl<'a> TouchRobot<'a> {
    pub fn new(rule: &'a ControlTestRule, target: &'a dyn TouchTarget) -> Self {
        Self {
            rule,
            target,
            position: Point::ZERO,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn press(&mut self, at: Point) -> &mut Self {
        self.position = at;
        self.target
            .handle_touch(&TouchEvent::began(at, self.rule.now()));
        self
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.position = to;
        self.target
            .handle_touch(&TouchEvent::moved(to, self.rule.now()));
        self
    }

    pub fn release(&mut self) -> &mut Self {
        self.target
            .handle_touch(&TouchEvent::ended(self.position, self.rule.now()));
        self
    }

    pub fn cancel(&mut self) -> &mut Self {
        self.target
            .handle_touch(&TouchEvent::cancelled(self.position, self.rule.now()));
        self
    }

    pub fn wait(&mut self, duration: Duration) -> &mut Self {
        self.rule.advance_time(duration);
        self
    }

    pub fn tap(&mut self, at: Point) -> &mut Self {
        self.press(at).wait(TAP_HOLD).release()
    }

    /// Presses at `from`, moves to `to` one sample per frame over `duration`
    /// and stays down at `to`. Call [`TouchRobot::release`] to finish.
    pub fn drag_to(&mut self, from: Point, to: Point, duration: Duration) -> &mut Self {
        self.press(from);
        let frames = (duration.as_millis() / FRAME_INTERVAL.as_millis()).max(1) as u32;
        for frame in 1..=frames {
            self.rule.advance_frame();
            let fraction = frame as f32 / frames as f32;
            self.move_to(from.lerp(to, fraction));
        }
        self
    }

    pub fn drag(&mut self, from: Point, to: Point, duration: Duration) -> &mut Self {
        self.drag_to(from, to, duration).release()
    }
}
