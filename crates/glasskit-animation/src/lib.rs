//! Animation system for glasskit
//!
//! Provides duration-based tween and spring curves and the
//! [`AnimationDriver`] seam through which controls run every morph, move and
//! delayed continuation.

mod driver;
mod easing;
mod spec;

pub use driver::{AnimationDriver, AnimationId, Animator, CompletionFn, StepFn};
pub use easing::Easing;
pub use spec::{AnimationCurve, AnimationSpec, SpringSpec};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
