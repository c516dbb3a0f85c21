//! Pure math/data for drawing in glasskit
//!
//! Geometry primitives, color definitions and the opacity/scale transform
//! carried by every scene layer.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{GraphicsLayer, Point, Rect, Size};
}
