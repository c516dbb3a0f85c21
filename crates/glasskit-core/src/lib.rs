//! Core runtime for glasskit controls.
//!
//! Everything here is single-threaded: the host owns one [`FrameClock`] per
//! UI thread and advances it once per display frame.

mod frame_clock;
mod generation;
mod owned;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock, TimerId};
pub use generation::{Generation, GenerationToken};
pub use owned::{Owned, WeakOwned};
