//! In-drag toggle for the switch.

/// Flips the switch once per drag when the thumb comes within `threshold`
/// of the end opposite the current state, then latches until reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeToggleDetector {
    threshold: f32,
    toggled: bool,
}

impl EdgeToggleDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            toggled: false,
        }
    }

    pub fn reset(&mut self) {
        self.toggled = false;
    }

    pub fn has_toggled(&self) -> bool {
        self.toggled
    }

    /// Returns true exactly when the switch should flip now.
    pub fn update(&mut self, position: f32, is_on: bool, off_center: f32, on_center: f32) -> bool {
        if self.toggled {
            return false;
        }
        let reached = if is_on {
            position <= off_center + self.threshold
        } else {
            position >= on_center - self.threshold
        };
        self.toggled = reached;
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_near_the_opposite_end_only() {
        let mut detector = EdgeToggleDetector::new(4.0);
        assert!(!detector.update(10.0, false, 10.0, 40.0));
        assert!(!detector.update(35.0, false, 10.0, 40.0));
        assert!(detector.update(36.0, false, 10.0, 40.0));
        assert!(detector.has_toggled());
    }

    #[test]
    fn latches_until_reset() {
        let mut detector = EdgeToggleDetector::new(4.0);
        assert!(detector.update(41.0, false, 10.0, 40.0));
        // Back at the off end with the state now on: still latched.
        assert!(!detector.update(9.0, true, 10.0, 40.0));

        detector.reset();
        assert!(detector.update(9.0, true, 10.0, 40.0));
    }
}
