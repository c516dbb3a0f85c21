//! Headless harness owning the clock, animator, scene and haptics.

use std::cell::RefCell;
use std::rc::Rc;

use glasskit_animation::Animator;
use glasskit_core::FrameClock;
use glasskit_foundation::{GestureConfiguration, MemoryScene};
use glasskit_ui::{ControlEnvironment, TouchTarget};
use web_time::Duration;

use crate::recorders::RecordingHaptics;
use crate::robot::TouchRobot;

/// Display frame interval used when advancing time.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frames pumped by [`ControlTestRule::wait_for_idle`] before giving up.
const MAX_IDLE_FRAMES: usize = 1_000;

pub struct ControlTestRule {
    clock: FrameClock,
    animator: Animator,
    scene: Rc<RefCell<MemoryScene>>,
    haptics: Rc<RecordingHaptics>,
    env: ControlEnvironment,
}

impl ControlTestRule {
    pub fn new() -> Self {
        Self::with_gestures(GestureConfiguration::default())
    }

    pub fn with_gestures(gestures: GestureConfiguration) -> Self {
        let clock = FrameClock::new();
        let animator = Animator::new(clock.clone());
        let scene = MemoryScene::shared();
        let haptics = Rc::new(RecordingHaptics::default());
        let env = ControlEnvironment::new(
            Rc::new(animator.clone()),
            scene.clone(),
            haptics.clone(),
        )
        .with_gestures(gestures);
        Self {
            clock,
            animator,
            scene,
            haptics,
            env,
        }
    }

    pub fn env(&self) -> ControlEnvironment {
        self.env.clone()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn scene(&self) -> &Rc<RefCell<MemoryScene>> {
        &self.scene
    }

    pub fn haptics(&self) -> &RecordingHaptics {
        &self.haptics
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn advance_frame(&self) {
        self.clock.advance_by(FRAME_INTERVAL);
    }

    /// Advances time in whole frames, the last one possibly shorter.
    pub fn advance_time(&self, duration: Duration) {
        let mut remaining = duration;
        while remaining > Duration::ZERO {
            let step = remaining.min(FRAME_INTERVAL);
            self.clock.advance_by(step);
            remaining -= step;
        }
    }

    /// Pumps frames until no animation or timer is pending.
    pub fn wait_for_idle(&self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if self.clock.is_idle() {
                return;
            }
            self.advance_frame();
        }
        panic!("controls did not settle within {MAX_IDLE_FRAMES} frames");
    }

    pub fn robot<'a>(&'a self, target: &'a dyn TouchTarget) -> TouchRobot<'a> {
        TouchRobot::new(self, target)
    }
}

impl Default for ControlTestRule {
    fn default() -> Self {
        Self::new()
    }
}
