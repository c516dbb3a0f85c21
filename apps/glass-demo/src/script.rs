//! Frame-accurate touch playback against the demo's clock.

use std::cell::{Cell, RefCell};

use glasskit_core::FrameClock;
use glasskit_foundation::{HapticFeedback, HapticIntensity, MemoryScene, TouchEvent};
use glasskit_ui::TouchTarget;
use glasskit_ui_graphics::Point;
use web_time::Duration;

pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
pub struct LoggingHaptics {
    fired: Cell<usize>,
}

impl LoggingHaptics {
    pub fn fired(&self) -> usize {
        self.fired.get()
    }
}

impl HapticFeedback for LoggingHaptics {
    fn impact(&self, intensity: HapticIntensity) {
        self.fired.set(self.fired.get() + 1);
        log::info!("haptic: {intensity:?}");
    }
}

pub struct Player<'a> {
    clock: &'a FrameClock,
}

impl<'a> Player<'a> {
    pub fn new(clock: &'a FrameClock) -> Self {
        Self { clock }
    }

    pub fn wait(&self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let step = remaining.min(FRAME);
            self.clock.advance_by(step);
            remaining -= step;
        }
    }

    /// Runs frames until nothing is scheduled.
    pub fn settle(&self) {
        while !self.clock.is_idle() {
            self.clock.advance_by(FRAME);
        }
    }

    pub fn tap<T: TouchTarget + ?Sized>(&self, target: &T, at: Point) {
        target.handle_touch(&TouchEvent::began(at, self.clock.now()));
        self.wait(FRAME * 3);
        target.handle_touch(&TouchEvent::ended(at, self.clock.now()));
    }

    pub fn drag<T: TouchTarget + ?Sized>(
        &self,
        target: &T,
        from: Point,
        to: Point,
        duration: Duration,
    ) {
        target.handle_touch(&TouchEvent::began(from, self.clock.now()));
        let frames = (duration.as_millis() / FRAME.as_millis()).max(1) as u32;
        for frame in 1..=frames {
            self.clock.advance_by(FRAME);
            let at = from.lerp(to, frame as f32 / frames as f32);
            target.handle_touch(&TouchEvent::moved(at, self.clock.now()));
        }
        target.handle_touch(&TouchEvent::ended(to, self.clock.now()));
    }
}

pub fn log_scene(label: &str, scene: &RefCell<MemoryScene>) {
    let scene = scene.borrow();
    log::info!("{label}: {} attached layer(s)", scene.attached_count());
    for layer in scene.attached_layers() {
        if let (Some(kind), Some(props)) = (scene.kind(layer), scene.props(layer)) {
            log::info!(
                "  {layer} {kind:?} at ({:.1}, {:.1}) {:.0}x{:.0} alpha {:.2}",
                props.center.x,
                props.center.y,
                props.size.width,
                props.size.height,
                props.layer.alpha
            );
        }
    }
}
