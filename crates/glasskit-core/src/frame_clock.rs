//! Host-driven frame clock.
//!
//! The host advances the clock once per display frame. Each advance first
//! fires every timer whose deadline has passed, in deadline order, and then
//! the frame callbacks that were registered before the frame began.
//! Callbacks registered while a frame is being dispatched run on the next
//! frame, which keeps per-frame animation loops from spinning.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_time::Duration;

pub type FrameCallbackId = u64;
pub type TimerId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;
type TimerAction = Box<dyn FnOnce()>;

struct Timer {
    id: TimerId,
    deadline_nanos: u64,
    action: TimerAction,
}

#[derive(Default)]
struct ClockState {
    now_nanos: u64,
    next_id: u64,
    frame_callbacks: Vec<(FrameCallbackId, FrameCallback)>,
    timers: Vec<Timer>,
}

impl ClockState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn take_due_timer(&mut self) -> Option<Timer> {
        let now = self.now_nanos;
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline_nanos <= now)
            .min_by_key(|(_, timer)| (timer.deadline_nanos, timer.id))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }
}

#[derive(Clone, Default)]
pub struct FrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the most recent frame.
    pub fn now(&self) -> Duration {
        Duration::from_nanos(self.now_nanos())
    }

    pub fn now_nanos(&self) -> u64 {
        self.state.borrow().now_nanos
    }

    /// Registers `callback` to run once on the next frame. Dropping the
    /// returned registration cancels the callback.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.frame_callbacks.push((id, Box::new(callback)));
        FrameCallbackRegistration {
            state: Rc::downgrade(&self.state),
            id: Some(id),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }

    /// Schedules `action` to run on the first frame at or after `now + delay`.
    pub fn run_after(&self, delay: Duration, action: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let deadline_nanos = state
            .now_nanos
            .saturating_add(u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX));
        state.timers.push(Timer {
            id,
            deadline_nanos,
            action: Box::new(action),
        });
        id
    }

    /// Removes a timer that has not fired yet. Returns whether it was pending.
    pub fn cancel_timer(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|timer| timer.id != id);
        before != state.timers.len()
    }

    pub fn advance_by(&self, delta: Duration) {
        let target = self
            .now_nanos()
            .saturating_add(u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX));
        self.advance_to(target);
    }

    /// Produces a frame at `frame_time_nanos`. Times earlier than the current
    /// frame are treated as a repeat of the current frame.
    pub fn advance_to(&self, frame_time_nanos: u64) {
        let now = {
            let mut state = self.state.borrow_mut();
            if frame_time_nanos < state.now_nanos {
                log::warn!(
                    "frame clock asked to go backwards ({} < {}), holding time",
                    frame_time_nanos,
                    state.now_nanos
                );
            } else {
                state.now_nanos = frame_time_nanos;
            }
            state.now_nanos
        };

        loop {
            let timer = self.state.borrow_mut().take_due_timer();
            match timer {
                Some(timer) => (timer.action)(),
                None => break,
            }
        }

        let callbacks: SmallVec<[(FrameCallbackId, FrameCallback); 8]> =
            self.state.borrow_mut().frame_callbacks.drain(..).collect();
        log::trace!("frame at {}ns: {} callbacks", now, callbacks.len());
        for (_, callback) in callbacks {
            callback(now);
        }
    }

    pub fn has_pending_frame_callbacks(&self) -> bool {
        !self.state.borrow().frame_callbacks.is_empty()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.state.borrow().timers.is_empty()
    }

    /// True when advancing the clock would not run anything.
    pub fn is_idle(&self) -> bool {
        !self.has_pending_frame_callbacks() && !self.has_pending_timers()
    }

    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.state
            .borrow()
            .timers
            .iter()
            .map(|timer| timer.deadline_nanos)
            .min()
            .map(Duration::from_nanos)
    }
}

pub struct FrameCallbackRegistration {
    state: Weak<RefCell<ClockState>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(state) = self.state.upgrade() {
            // The clock may be dispatching this very callback; it has already
            // drained the list, so `try_borrow_mut` failing means nothing to do.
            if let Ok(mut state) = state.try_borrow_mut() {
                state.frame_callbacks.retain(|(entry, _)| *entry != id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn frame_callbacks_fire_once_with_frame_time() {
        let clock = FrameClock::new();
        let seen = Rc::new(Cell::new(None));
        let _registration = {
            let seen = Rc::clone(&seen);
            clock.with_frame_nanos(move |time| seen.set(Some(time)))
        };

        clock.advance_to(16_000_000);
        assert_eq!(seen.get(), Some(16_000_000));

        seen.set(None);
        clock.advance_to(32_000_000);
        assert_eq!(seen.get(), None);
    }

    #[test]
    fn dropping_registration_cancels_callback() {
        let clock = FrameClock::new();
        let fired = Rc::new(Cell::new(false));
        {
            let fired = Rc::clone(&fired);
            let registration = clock.with_frame_nanos(move |_| fired.set(true));
            drop(registration);
        }
        clock.advance_by(Duration::from_millis(16));
        assert!(!fired.get());
        assert!(clock.is_idle());
    }

    #[test]
    fn callbacks_registered_during_frame_wait_for_next_frame() {
        let clock = FrameClock::new();
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

        let registration = {
            let clock = clock.clone();
            let count = Rc::clone(&count);
            let slot = Rc::clone(&slot);
            clock.clone().with_frame_nanos(move |_| {
                count.set(count.get() + 1);
                let count = Rc::clone(&count);
                let next = clock.with_frame_nanos(move |_| count.set(count.get() + 1));
                slot.borrow_mut().replace(next);
            })
        };

        clock.advance_by(Duration::from_millis(16));
        assert_eq!(count.get(), 1);
        clock.advance_by(Duration::from_millis(16));
        assert_eq!(count.get(), 2);
        drop(registration);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let clock = FrameClock::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, delay) in [("late", 200), ("early", 50), ("mid", 100)] {
            let order = Rc::clone(&order);
            clock.run_after(Duration::from_millis(delay), move || {
                order.borrow_mut().push(label)
            });
        }

        clock.advance_by(Duration::from_millis(120));
        assert_eq!(order.borrow().as_slice(), &["early", "mid"]);
        assert_eq!(clock.next_timer_deadline(), Some(Duration::from_millis(200)));

        clock.advance_by(Duration::from_millis(100));
        assert_eq!(order.borrow().as_slice(), &["early", "mid", "late"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let clock = FrameClock::new();
        let fired = Rc::new(Cell::new(false));
        let id = {
            let fired = Rc::clone(&fired);
            clock.run_after(Duration::from_millis(10), move || fired.set(true))
        };
        assert!(clock.cancel_timer(id));
        clock.advance_by(Duration::from_millis(50));
        assert!(!fired.get());
    }

    #[test]
    fn going_backwards_holds_time() {
        let clock = FrameClock::new();
        clock.advance_to(100);
        clock.advance_to(50);
        assert_eq!(clock.now_nanos(), 100);
    }
}
