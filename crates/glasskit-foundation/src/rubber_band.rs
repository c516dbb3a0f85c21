//! Damped overshoot for dragged positions.

/// Keeps `x` inside `[lo, hi]` with square-root resistance past either end.
///
/// Identity inside the range; `lo - sqrt(lo - x)` below it and
/// `hi + sqrt(x - hi)` above it. Continuous, monotonic non-decreasing and
/// unbounded, with the escape slope falling towards zero as overshoot grows.
pub fn rubber_band_clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo {
        lo - (lo - x).sqrt()
    } else if x > hi {
        hi + (x - hi).sqrt()
    } else {
        x
    }
}

/// Derivative of [`rubber_band_clamp`] with respect to `x`.
pub fn rubber_band_slope(x: f32, lo: f32, hi: f32) -> f32 {
    let overshoot = if x < lo {
        lo - x
    } else if x > hi {
        x - hi
    } else {
        return 1.0;
    };
    0.5 / overshoot.sqrt()
}
