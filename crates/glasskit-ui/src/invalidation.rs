//! Targeted refresh requests drained by the host renderer.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invalidations(u8);

impl Invalidations {
    pub const NONE: Self = Self(0);
    pub const THUMB_TINT: Self = Self(1 << 0);
    pub const TRACK_TINT: Self = Self(1 << 1);
    pub const IMAGES: Self = Self(1 << 2);
    /// Thumb moved; fill geometry follows it.
    pub const THUMB_POSITION: Self = Self(1 << 3);
    /// Bounds changed; everything must be laid out again.
    pub const LAYOUT: Self = Self(1 << 4);

    pub fn insert(&mut self, other: Invalidations) {
        self.0 |= other.0;
    }

    pub fn contains(&self, other: Invalidations) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn take(&mut self) -> Invalidations {
        std::mem::take(self)
    }
}

impl std::ops::BitOr for Invalidations {
    type Output = Invalidations;

    fn bitor(self, rhs: Invalidations) -> Invalidations {
        Invalidations(self.0 | rhs.0)
    }
}
