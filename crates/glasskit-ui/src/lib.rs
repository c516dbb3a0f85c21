//! Liquid-glass slider and switch.
//!
//! Both controls share one interaction core: a thumb with a contracted and
//! an expanded glass representation ([`thumb::ThumbMorphEngine`]), the
//! tap/drag classifier and rubber band from `glasskit-foundation`, and a
//! domain mapper ([`slider::ValueMapper`] or
//! [`switch::EdgeToggleDetector`]). Hosts usually go through
//! [`ControlFactory`], which falls back to the system controls when the
//! glass style is unavailable or unwanted.

pub mod appearance;
pub mod capability;
pub mod environment;
pub mod events;
pub mod factory;
pub mod invalidation;
pub mod slider;
pub mod style;
pub mod switch;
pub mod system;
pub mod thumb;

pub use appearance::{ControlState, ImageHandle, StateImages};
pub use capability::{ControlStyle, SliderControl, SwitchControl, TouchTarget};
pub use environment::ControlEnvironment;
pub use events::{ControlEvent, ControlEvents, EventListeners, ListenerId};
pub use factory::{ControlFactory, ControlPreference, PlatformCapabilities};
pub use invalidation::Invalidations;
pub use slider::{GlassSlider, SliderImage, SliderLayout, ValueMapper, ValueRange};
pub use style::{MorphSpecs, SliderStyle, SwitchStyle, ThumbMetrics};
pub use switch::{GlassSwitch, SwitchLayout};
pub use system::{SystemSlider, SystemSwitch};
pub use thumb::{MorphDirection, ThumbGeometry, ThumbMorphEngine, ThumbState};

pub mod prelude {
    pub use crate::capability::{SliderControl, SwitchControl, TouchTarget};
    pub use crate::{
        ControlEnvironment, ControlEvent, ControlEvents, ControlFactory, GlassSlider,
        GlassSwitch, ThumbState,
    };
}
