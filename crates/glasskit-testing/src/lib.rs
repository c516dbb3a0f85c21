//! Testing utilities and harness for glasskit controls

pub mod assertions;
pub mod recorders;
pub mod robot;
pub mod rule;

pub use recorders::{EventRecorder, RecordingHaptics};
pub use robot::TouchRobot;
pub use rule::{ControlTestRule, FRAME_INTERVAL};

pub mod prelude {
    pub use crate::assertions;
    pub use crate::recorders::{EventRecorder, RecordingHaptics};
    pub use crate::robot::TouchRobot;
    pub use crate::rule::{ControlTestRule, FRAME_INTERVAL};
}
