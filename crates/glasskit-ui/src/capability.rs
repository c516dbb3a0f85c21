//! Capability interfaces shared by the glass controls and their system
//! fallbacks. Hosts hold `Box<dyn SliderControl>` / `Box<dyn SwitchControl>`
//! and never need to know which style the factory picked.

use glasskit_foundation::TouchEvent;
use glasskit_ui_graphics::{Color, Rect};

use crate::appearance::{ControlState, ImageHandle};
use crate::events::{ControlEvent, ControlEvents, ListenerId};
use crate::invalidation::Invalidations;
use crate::slider::SliderImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlStyle {
    Glass,
    System,
}

pub trait TouchTarget {
    fn style(&self) -> ControlStyle;

    /// Feeds one touch sample. Disabled controls ignore touches.
    fn handle_touch(&self, event: &TouchEvent);

    fn bounds(&self) -> Rect;

    fn set_bounds(&self, bounds: Rect);

    fn is_enabled(&self) -> bool;

    /// Disabling cancels and reverts a gesture in progress.
    fn set_enabled(&self, enabled: bool);

    fn add_listener(
        &self,
        events: ControlEvents,
        listener: Box<dyn FnMut(ControlEvent)>,
    ) -> ListenerId;

    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Drains refresh requests recorded since the last call.
    fn take_invalidations(&self) -> Invalidations;
}

pub trait SliderControl: TouchTarget {
    fn value(&self) -> f32;

    /// Clamps `value`, never expands the thumb and notifies only when the
    /// slider is continuous and the stored value changed.
    fn set_value(&self, value: f32, animated: bool);

    fn minimum_value(&self) -> f32;

    fn set_minimum_value(&self, minimum: f32);

    fn maximum_value(&self) -> f32;

    fn set_maximum_value(&self, maximum: f32);

    fn is_continuous(&self) -> bool;

    fn set_continuous(&self, continuous: bool);

    fn set_minimum_track_tint(&self, tint: Option<Color>);

    fn set_maximum_track_tint(&self, tint: Option<Color>);

    fn set_thumb_tint(&self, tint: Option<Color>);

    fn image(&self, kind: SliderImage, state: ControlState) -> Option<ImageHandle>;

    fn set_image(&self, kind: SliderImage, state: ControlState, image: Option<ImageHandle>);

    /// One tenth of the range, through the animated `set_value` path.
    fn accessibility_step(&self) -> f32 {
        (self.maximum_value() - self.minimum_value()) / 10.0
    }

    fn accessibility_increment(&self) {
        self.set_value(self.value() + self.accessibility_step(), true);
    }

    fn accessibility_decrement(&self) {
        self.set_value(self.value() - self.accessibility_step(), true);
    }
}

pub trait SwitchControl: TouchTarget {
    fn is_on(&self) -> bool;

    /// Never expands the thumb; notifies whenever the state changes.
    fn set_on(&self, on: bool, animated: bool);

    fn set_on_tint(&self, tint: Option<Color>);

    fn set_thumb_tint(&self, tint: Option<Color>);

    fn on_image(&self) -> Option<ImageHandle>;

    fn set_on_image(&self, image: Option<ImageHandle>);

    fn off_image(&self) -> Option<ImageHandle>;

    fn set_off_image(&self, image: Option<ImageHandle>);

    fn accessibility_activate(&self) {
        self.set_on(!self.is_on(), true);
    }
}
