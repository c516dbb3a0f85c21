//! External collaborators shared by every control on one UI thread.

use std::cell::RefCell;
use std::rc::Rc;

use glasskit_animation::AnimationDriver;
use glasskit_foundation::{GestureConfiguration, HapticFeedback, SceneHost, SharedScene};

#[derive(Clone)]
pub struct ControlEnvironment {
    pub driver: Rc<dyn AnimationDriver>,
    pub scene: SharedScene,
    pub haptics: Rc<dyn HapticFeedback>,
    pub gestures: GestureConfiguration,
}

impl ControlEnvironment {
    pub fn new(
        driver: Rc<dyn AnimationDriver>,
        scene: Rc<RefCell<dyn SceneHost>>,
        haptics: Rc<dyn HapticFeedback>,
    ) -> Self {
        Self {
            driver,
            scene,
            haptics,
            gestures: GestureConfiguration::default(),
        }
    }

    pub fn with_gestures(mut self, gestures: GestureConfiguration) -> Self {
        self.gestures = gestures;
        self
    }
}
