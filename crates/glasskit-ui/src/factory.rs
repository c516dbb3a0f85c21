//! Chooses between the glass controls and the system ones.

use glasskit_ui_graphics::{Point, Rect};

use crate::capability::{ControlStyle, SliderControl, SwitchControl};
use crate::environment::ControlEnvironment;
use crate::slider::GlassSlider;
use crate::switch::GlassSwitch;
use crate::system::{SystemSlider, SystemSwitch};

/// What the running platform offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// The platform's own controls already render the glass style.
    pub native_glass_controls: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlPreference {
    #[default]
    PreferGlass,
    PreferSystem,
}

pub struct ControlFactory {
    env: ControlEnvironment,
    capabilities: PlatformCapabilities,
    preference: ControlPreference,
}

impl ControlFactory {
    pub fn new(
        env: ControlEnvironment,
        capabilities: PlatformCapabilities,
        preference: ControlPreference,
    ) -> Self {
        Self {
            env,
            capabilities,
            preference,
        }
    }

    /// Native glass always wins; otherwise the caller's preference decides.
    pub fn resolved_style(&self) -> ControlStyle {
        if self.capabilities.native_glass_controls {
            return ControlStyle::System;
        }
        match self.preference {
            ControlPreference::PreferGlass => ControlStyle::Glass,
            ControlPreference::PreferSystem => ControlStyle::System,
        }
    }

    pub fn make_slider(&self, bounds: Rect) -> Box<dyn SliderControl> {
        let style = self.resolved_style();
        log::debug!("creating {style:?} slider");
        match style {
            ControlStyle::Glass => Box::new(GlassSlider::new(self.env.clone(), bounds)),
            ControlStyle::System => Box::new(SystemSlider::new(bounds)),
        }
    }

    pub fn make_switch(&self, origin: Point) -> Box<dyn SwitchControl> {
        let style = self.resolved_style();
        log::debug!("creating {style:?} switch");
        match style {
            ControlStyle::Glass => Box::new(GlassSwitch::new(self.env.clone(), origin)),
            ControlStyle::System => Box::new(SystemSwitch::new(origin)),
        }
    }
}
