//! Collaborators that remember what controls asked of them.

use std::cell::RefCell;
use std::rc::Rc;

use glasskit_foundation::{HapticFeedback, HapticIntensity};
use glasskit_ui::{ControlEvent, ControlEvents, TouchTarget};

#[derive(Debug, Default)]
pub struct RecordingHaptics {
    impacts: RefCell<Vec<HapticIntensity>>,
}

impl RecordingHaptics {
    pub fn impacts(&self) -> Vec<HapticIntensity> {
        self.impacts.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.impacts.borrow().len()
    }

    pub fn count_of(&self, intensity: HapticIntensity) -> usize {
        self.impacts
            .borrow()
            .iter()
            .filter(|recorded| **recorded == intensity)
            .count()
    }

    pub fn clear(&self) {
        self.impacts.borrow_mut().clear();
    }
}

impl HapticFeedback for RecordingHaptics {
    fn impact(&self, intensity: HapticIntensity) {
        self.impacts.borrow_mut().push(intensity);
    }
}

/// Listener that stores every event a control emits.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<ControlEvent>>>,
}

impl EventRecorder {
    pub fn attach(target: &dyn TouchTarget) -> Self {
        let recorder = Self::default();
        let events = Rc::clone(&recorder.events);
        target.add_listener(
            ControlEvents::ALL,
            Box::new(move |event| events.borrow_mut().push(event)),
        );
        recorder
    }

    pub fn events(&self) -> Vec<ControlEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: ControlEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|recorded| **recorded == event)
            .count()
    }

    pub fn value_changes(&self) -> usize {
        self.count(ControlEvent::ValueChanged)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
