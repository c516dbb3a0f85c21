//! Color representation

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// Component-wise blend; `fraction` is clamped to [0, 1].
    pub fn lerp(&self, target: Color, fraction: f32) -> Self {
        let t = fraction.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from * (1.0 - t) + to * t;
        Self(
            mix(self.0, target.0),
            mix(self.1, target.1),
            mix(self.2, target.2),
            mix(self.3, target.3),
        )
    }

    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    // System palette used as control defaults.
    pub const SYSTEM_BLUE: Color = Color::from_rgb_u8(0, 136, 255);
    pub const SYSTEM_GREEN: Color = Color::from_rgb_u8(52, 199, 89);
    pub const SYSTEM_FILL: Color = Color::from_rgba_u8(120, 120, 128, 41);
}
