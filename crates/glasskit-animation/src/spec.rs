//! Animation specifications.
//!
//! Every animation runs for a fixed duration. Tweens shape progress with an
//! [`Easing`] curve; springs follow the step response of a damped oscillator
//! scaled so that it has settled by the end of the duration. Underdamped
//! springs overshoot, so sampled progress may exceed 1.0 mid-flight.

use crate::easing::Easing;
use web_time::Duration;

/// Envelope decay reached at the end of a spring's duration.
const SPRING_SETTLE_LOG: f32 = 6.907_755; // ln(1000)
/// Natural frequency for a critically damped response that settles to 1e-3.
const CRITICAL_OMEGA: f32 = 9.233_5;
const MIN_DAMPING_RATIO: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, lower values bounce.
    pub damping_ratio: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32) -> Self {
        Self { damping_ratio }
    }

    /// Step response at normalized time `t` in [0, 1].
    pub fn response(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let zeta = self.damping_ratio.max(MIN_DAMPING_RATIO);
        if zeta >= 1.0 {
            let omega = CRITICAL_OMEGA;
            return 1.0 - (-omega * t).exp() * (1.0 + omega * t);
        }
        let omega = SPRING_SETTLE_LOG / zeta;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    Tween(Easing),
    Spring(SpringSpec),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub curve: AnimationCurve,
    pub delay: Duration,
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            curve: AnimationCurve::Tween(easing),
            delay: Duration::ZERO,
        }
    }

    pub fn spring(duration: Duration, damping_ratio: f32) -> Self {
        Self {
            duration,
            curve: AnimationCurve::Spring(SpringSpec::new(damping_ratio)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total time from start until the animation reports completion.
    pub fn total_duration(&self) -> Duration {
        self.delay + self.duration
    }

    /// Progress after `elapsed`, and whether the animation has finished.
    pub fn sample(&self, elapsed: Duration) -> (f32, bool) {
        if elapsed < self.delay {
            return (0.0, false);
        }
        let running = elapsed - self.delay;
        if self.duration.is_zero() || running >= self.duration {
            return (1.0, true);
        }
        let linear = running.as_secs_f32() / self.duration.as_secs_f32();
        let value = match self.curve {
            AnimationCurve::Tween(easing) => easing.transform(linear),
            AnimationCurve::Spring(spring) => spring.response(linear),
        };
        (value, false)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(250), Easing::EaseInOut)
    }
}
