pub mod classifier;

pub use classifier::{
    DragUpdate, EdgeFlags, GestureClassifier, GestureOutcome, GesturePhase, GestureSession,
};
