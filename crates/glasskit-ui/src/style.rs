//! Thumb metrics and motion parameters for each control.
//!
//! The morph contract is identical for both controls; only sizes and
//! timing differ. Expansion uses a livelier spring than contraction.

use glasskit_animation::{AnimationSpec, Easing};
use glasskit_ui_graphics::Size;
use web_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbMetrics {
    pub contracted: Size,
    pub expanded: Size,
}

impl ThumbMetrics {
    pub const SLIDER: ThumbMetrics = ThumbMetrics {
        contracted: Size::new(37.0, 24.0),
        expanded: Size::new(58.0, 38.0),
    };

    pub const SWITCH: ThumbMetrics = ThumbMetrics {
        contracted: Size::new(37.0, 24.0),
        expanded: Size::new(56.0, 36.0),
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphSpecs {
    pub expand: AnimationSpec,
    pub contract: AnimationSpec,
}

impl MorphSpecs {
    pub fn slider() -> Self {
        Self {
            expand: AnimationSpec::spring(Duration::from_millis(350), 0.7),
            contract: AnimationSpec::spring(Duration::from_millis(300), 0.9),
        }
    }

    pub fn switch() -> Self {
        Self {
            expand: AnimationSpec::spring(Duration::from_millis(300), 0.65),
            contract: AnimationSpec::spring(Duration::from_millis(250), 0.85),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderStyle {
    pub thumb: ThumbMetrics,
    pub morph: MorphSpecs,
    /// Thumb travel to a tapped location.
    pub tap_move: AnimationSpec,
    /// Thumb travel for `set_value(_, true)`.
    pub programmatic_move: AnimationSpec,
    pub track_height: f32,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            thumb: ThumbMetrics::SLIDER,
            morph: MorphSpecs::slider(),
            tap_move: AnimationSpec::spring(Duration::from_millis(250), 0.85),
            programmatic_move: AnimationSpec::tween(Duration::from_millis(250), Easing::EaseInOut),
            track_height: 6.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchStyle {
    pub thumb: ThumbMetrics,
    pub morph: MorphSpecs,
    /// Thumb travel between the off and on positions.
    pub toggle_move: AnimationSpec,
    /// Gap between the thumb and the track ends.
    pub thumb_inset: f32,
    pub size: Size,
}

impl Default for SwitchStyle {
    fn default() -> Self {
        Self {
            thumb: ThumbMetrics::SWITCH,
            morph: MorphSpecs::switch(),
            toggle_move: AnimationSpec::spring(Duration::from_millis(300), 0.8),
            thumb_inset: 2.0,
            size: Size::new(63.0, 28.0),
        }
    }
}
