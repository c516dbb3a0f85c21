//! Geometric primitives: Point, Size, Rect and the per-layer transform.

use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn with_x(self, x: f32) -> Self {
        Self { x, y: self.y }
    }

    /// Linear interpolation towards `target`. `fraction` is not clamped so
    /// spring overshoot carries through.
    pub fn lerp(self, target: Point, fraction: f32) -> Self {
        Self {
            x: self.x * (1.0 - fraction) + target.x * fraction,
            y: self.y * (1.0 - fraction) + target.y * fraction,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn lerp(self, target: Size, fraction: f32) -> Self {
        Self {
            width: self.width * (1.0 - fraction) + target.width * fraction,
            height: self.height * (1.0 - fraction) + target.height * fraction,
        }
    }

    /// Per-axis ratio `self / other`. Zero-sized axes of `other` yield 1.0.
    pub fn ratio_to(self, other: Size) -> (f32, f32) {
        let sx = if other.width > 0.0 {
            self.width / other.width
        } else {
            1.0
        };
        let sy = if other.height > 0.0 {
            self.height / other.height
        } else {
            1.0
        };
        (sx, sy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self {
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.mid_y())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.max_x() && y <= self.max_y()
    }
}

/// Opacity and scale applied on top of a layer's frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl GraphicsLayer {
    pub const IDENTITY: GraphicsLayer = GraphicsLayer {
        alpha: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn new(alpha: f32, scale_x: f32, scale_y: f32) -> Self {
        Self {
            alpha,
            scale_x,
            scale_y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self::IDENTITY
    }
}
