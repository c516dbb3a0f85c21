//! Thumb position to slider value mapping and the edge haptic latch.

use glasskit_foundation::EdgeFlags;

/// `x` limited to `[lo, hi]`. Unlike `f32::clamp` this never panics: when
/// `lo > hi` every input maps to `hi`.
pub(crate) fn clamp_between(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub minimum: f32,
    pub maximum: f32,
}

impl ValueRange {
    pub const fn new(minimum: f32, maximum: f32) -> Self {
        Self { minimum, maximum }
    }

    /// Inverted ranges are accepted and clamp to a fixed point.
    pub fn clamp(&self, value: f32) -> f32 {
        clamp_between(value, self.minimum, self.maximum)
    }

    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    /// Position of `value` within the range, in [0, 1].
    pub fn fraction(&self, value: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.minimum) / span).clamp(0.0, 1.0)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Maps thumb centers on the track axis to values and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueMapper {
    pub min_center: f32,
    pub max_center: f32,
}

impl ValueMapper {
    pub fn new(min_center: f32, max_center: f32) -> Self {
        Self {
            min_center,
            max_center,
        }
    }

    /// `(center - min_center) / (max_center - min_center)` clamped to [0, 1].
    /// A track with no travel maps everything to 0.
    pub fn normalized(&self, center: f32) -> f32 {
        let travel = self.max_center - self.min_center;
        if travel <= 0.0 {
            return 0.0;
        }
        ((center - self.min_center) / travel).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, center: f32, range: ValueRange) -> f32 {
        range.clamp(range.minimum + self.normalized(center) * range.span())
    }

    pub fn center_for(&self, value: f32, range: ValueRange) -> f32 {
        let travel = (self.max_center - self.min_center).max(0.0);
        self.min_center + range.fraction(value) * travel
    }

    /// `center` limited to the thumb's travel.
    pub fn clamp_center(&self, center: f32) -> f32 {
        clamp_between(center, self.min_center, self.max_center)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackEdge {
    Minimum,
    Maximum,
}

/// One-shot haptic per track end, re-armed once the thumb is at least twice
/// the threshold away from both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeHapticLatch {
    threshold: f32,
}

impl EdgeHapticLatch {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the edge whose haptic should fire for `position`, if any.
    pub fn update(
        &self,
        flags: &mut EdgeFlags,
        position: f32,
        mapper: &ValueMapper,
    ) -> Option<TrackEdge> {
        let from_min = position - mapper.min_center;
        let from_max = mapper.max_center - position;

        if from_min <= self.threshold && !flags.min {
            flags.min = true;
            return Some(TrackEdge::Minimum);
        }
        if from_max <= self.threshold && !flags.max {
            flags.max = true;
            return Some(TrackEdge::Maximum);
        }
        let rearm = 2.0 * self.threshold;
        if from_min >= rearm && from_max >= rearm {
            flags.clear();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPER: ValueMapper = ValueMapper {
        min_center: 20.0,
        max_center: 220.0,
    };

    #[test]
    fn maps_center_linearly_into_range() {
        let range = ValueRange::new(0.0, 10.0);
        assert_eq!(MAPPER.value_at(20.0, range), 0.0);
        assert_eq!(MAPPER.value_at(100.0, range), 4.0);
        assert_eq!(MAPPER.value_at(220.0, range), 10.0);
        assert_eq!(MAPPER.value_at(-50.0, range), 0.0);
        assert_eq!(MAPPER.value_at(900.0, range), 10.0);
        assert_eq!(MAPPER.center_for(4.0, range), 100.0);
    }

    #[test]
    fn degenerate_track_maps_to_minimum() {
        let mapper = ValueMapper::new(50.0, 50.0);
        let range = ValueRange::new(2.0, 8.0);
        assert_eq!(mapper.normalized(70.0), 0.0);
        assert_eq!(mapper.value_at(70.0, range), 2.0);
        assert_eq!(mapper.center_for(8.0, range), 50.0);
    }

    #[test]
    fn inverted_range_clamps_to_fixed_point() {
        let range = ValueRange::new(5.0, 1.0);
        assert_eq!(range.clamp(-3.0), 1.0);
        assert_eq!(range.clamp(3.0), 1.0);
        assert_eq!(range.clamp(30.0), 1.0);
        assert_eq!(range.fraction(3.0), 0.0);
        assert_eq!(MAPPER.value_at(150.0, range), 1.0);
    }

    #[test]
    fn edge_haptic_fires_once_until_rearmed() {
        let latch = EdgeHapticLatch::new(2.0);
        let mut flags = EdgeFlags::default();

        assert_eq!(latch.update(&mut flags, 21.5, &MAPPER), Some(TrackEdge::Minimum));
        assert_eq!(latch.update(&mut flags, 10.0, &MAPPER), None);
        // Inside the re-arm band: still latched.
        assert_eq!(latch.update(&mut flags, 23.0, &MAPPER), None);
        assert_eq!(latch.update(&mut flags, 21.0, &MAPPER), None);

        assert_eq!(latch.update(&mut flags, 24.0, &MAPPER), None);
        assert!(!flags.min);
        assert_eq!(latch.update(&mut flags, 22.0, &MAPPER), Some(TrackEdge::Minimum));
    }

    #[test]
    fn each_edge_latches_independently() {
        let latch = EdgeHapticLatch::new(2.0);
        let mut flags = EdgeFlags::default();

        assert_eq!(latch.update(&mut flags, 20.0, &MAPPER), Some(TrackEdge::Minimum));
        assert_eq!(latch.update(&mut flags, 219.0, &MAPPER), Some(TrackEdge::Maximum));
        assert_eq!(latch.update(&mut flags, 230.0, &MAPPER), None);
        assert!(flags.min && flags.max);
    }
}
