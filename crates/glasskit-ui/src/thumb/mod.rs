//! The dual-representation thumb shared by both glass controls.

mod morph;

pub use morph::{MorphDirection, ThumbGeometry, ThumbMorphEngine, ThumbState};
