//! Assertion helpers for control tests.

use glasskit_foundation::{LayerId, MemoryScene};
use glasskit_ui::{ThumbMorphEngine, ThumbState};

pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Which of the thumb's two layers are currently attached.
pub fn attached_thumb_layers(scene: &MemoryScene, thumb: &ThumbMorphEngine) -> Vec<LayerId> {
    let (contracted, expanded) = thumb.layers();
    scene
        .attached_layers()
        .filter(|layer| *layer == contracted || *layer == expanded)
        .collect()
}

/// A terminal thumb state has exactly its own representation attached.
pub fn assert_thumb_settled(scene: &MemoryScene, thumb: &ThumbMorphEngine, expected: ThumbState) {
    let state = thumb.state();
    assert_eq!(state, expected, "thumb state");
    let (contracted, expanded) = thumb.layers();
    let attached = attached_thumb_layers(scene, thumb);
    let wanted = match expected {
        ThumbState::Expanded => expanded,
        _ => contracted,
    };
    assert_eq!(
        attached,
        vec![wanted],
        "settled thumb in {expected:?} must attach only {wanted}"
    );
    let props = scene.props(wanted).unwrap_or_default();
    assert!(props.layer.is_identity(), "settled layer keeps a transform: {props:?}");
}
