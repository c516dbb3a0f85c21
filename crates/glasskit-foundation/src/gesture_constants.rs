//! Shared gesture constants and the configuration built from them.
//!
//! Distances are in logical pixels, times are measured from the touch-down
//! timestamp supplied by the host.

use web_time::Duration;

/// A touch released before this much time has passed is a tap; a touch still
/// down past it is a drag, whatever the distance travelled.
pub const TAP_TIME_THRESHOLD: Duration = Duration::from_millis(150);

/// Delay between a slider tap settling and the thumb contracting again.
pub const AUTO_CONTRACT_DELAY: Duration = Duration::from_millis(200);

/// Distance from a slider track end at which the edge haptic fires. The
/// haptic re-arms at twice this distance.
pub const SLIDER_EDGE_HAPTIC_THRESHOLD: f32 = 2.0;

/// Distance from the opposite end of the switch track at which a drag
/// toggles the switch.
pub const SWITCH_TOGGLE_THRESHOLD: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfiguration {
    pub tap_time_threshold: Duration,
    pub auto_contract_delay: Duration,
    pub slider_edge_haptic_threshold: f32,
    pub switch_toggle_threshold: f32,
}

impl Default for GestureConfiguration {
    fn default() -> Self {
        Self {
            tap_time_threshold: TAP_TIME_THRESHOLD,
            auto_contract_delay: AUTO_CONTRACT_DELAY,
            slider_edge_haptic_threshold: SLIDER_EDGE_HAPTIC_THRESHOLD,
            switch_toggle_threshold: SWITCH_TOGGLE_THRESHOLD,
        }
    }
}
