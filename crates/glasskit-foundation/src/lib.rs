//! Touch input, gesture classification and platform seams for glasskit.
//!
//! Everything a control consumes from the outside world lives here: touch
//! samples, the tap/drag classifier and rubber-band math, and the two
//! fire-and-forget collaborators (haptics and the scene graph).

pub mod gesture_constants;
pub mod haptics;
pub mod input;
pub mod rubber_band;
pub mod scene;

pub use gesture_constants::GestureConfiguration;
pub use haptics::{HapticFeedback, HapticIntensity, NoopHaptics};
pub use input::gestures::{
    DragUpdate, EdgeFlags, GestureClassifier, GestureOutcome, GesturePhase, GestureSession,
};
pub use input::{TouchEvent, TouchPhase};
pub use rubber_band::{rubber_band_clamp, rubber_band_slope};
pub use scene::{
    LayerId, MemoryScene, SceneError, SceneHost, SharedScene, SurfaceKind, SurfaceProps,
};
