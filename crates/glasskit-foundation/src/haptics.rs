//! Fire-and-forget haptic feedback seam.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticIntensity {
    Light,
    Medium,
}

/// Platform haptic engine. Implementations must not call back into controls.
pub trait HapticFeedback {
    fn impact(&self, intensity: HapticIntensity);
}

/// Haptics for hosts without a haptic engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticFeedback for NoopHaptics {
    fn impact(&self, _intensity: HapticIntensity) {}
}
