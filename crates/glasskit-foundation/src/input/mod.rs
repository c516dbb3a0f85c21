pub mod gestures;
pub mod types;

pub use types::{TouchEvent, TouchPhase};

pub mod prelude {
    pub use super::gestures::{
        DragUpdate, EdgeFlags, GestureClassifier, GestureOutcome, GesturePhase, GestureSession,
    };
    pub use super::types::{TouchEvent, TouchPhase};
}
