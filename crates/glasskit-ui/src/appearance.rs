//! Per-state image configuration.
//!
//! Images are carried for API parity with the system controls. The glass
//! style does not draw them, but hosts that fall back to the system control
//! read them back unchanged.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlState {
    Normal,
    Highlighted,
    Disabled,
    Selected,
}

impl ControlState {
    fn index(self) -> usize {
        match self {
            ControlState::Normal => 0,
            ControlState::Highlighted => 1,
            ControlState::Disabled => 2,
            ControlState::Selected => 3,
        }
    }
}

/// Opaque reference to a host-owned image asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateImages {
    images: [Option<ImageHandle>; 4],
}

impl StateImages {
    /// Image set explicitly for `state`.
    pub fn get(&self, state: ControlState) -> Option<&ImageHandle> {
        self.images[state.index()].as_ref()
    }

    /// Image shown in `state`, falling back to the normal-state image.
    pub fn resolve(&self, state: ControlState) -> Option<&ImageHandle> {
        self.get(state).or_else(|| self.get(ControlState::Normal))
    }

    /// Returns whether the stored image changed.
    pub fn set(&mut self, state: ControlState, image: Option<ImageHandle>) -> bool {
        let slot = &mut self.images[state.index()];
        if *slot == image {
            return false;
        }
        *slot = image;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_to_normal() {
        let mut images = StateImages::default();
        assert!(images.set(ControlState::Normal, Some(ImageHandle::named("thumb"))));
        assert_eq!(
            images.resolve(ControlState::Highlighted),
            Some(&ImageHandle::named("thumb"))
        );
        assert_eq!(images.get(ControlState::Highlighted), None);
    }

    #[test]
    fn setting_the_same_image_reports_no_change() {
        let mut images = StateImages::default();
        images.set(ControlState::Selected, Some(ImageHandle::named("a")));
        assert!(!images.set(ControlState::Selected, Some(ImageHandle::named("a"))));
        assert!(images.set(ControlState::Selected, None));
    }
}
