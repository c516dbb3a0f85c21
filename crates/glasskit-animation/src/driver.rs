//! The animation driver seam and its frame-clock implementation.
//!
//! Controls never interpolate on their own schedule. They hand an
//! [`AnimationSpec`] plus two continuations to an [`AnimationDriver`]: a step
//! callback receiving sampled progress each frame, and a completion that
//! always runs exactly once with `finished = false` when the animation was
//! cancelled before reaching its target.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glasskit_core::{FrameCallbackRegistration, FrameClock};
use rustc_hash::FxHashMap;
use web_time::Duration;

use crate::spec::AnimationSpec;

pub type AnimationId = u64;
pub type StepFn = Box<dyn FnMut(f32)>;
pub type CompletionFn = Box<dyn FnOnce(bool)>;

pub trait AnimationDriver {
    /// Starts an animation. `on_step` runs once per frame with progress (0 at
    /// start, 1 at the end; springs may overshoot). `on_complete` runs once.
    /// Neither callback may run before `animate` returns.
    fn animate(
        &self,
        spec: AnimationSpec,
        on_step: StepFn,
        on_complete: CompletionFn,
    ) -> AnimationId;

    /// Stops stepping `id`. Its completion still runs, later, with
    /// `finished = false`. Unknown or finished ids are ignored.
    fn cancel(&self, id: AnimationId);

    fn is_running(&self, id: AnimationId) -> bool;

    /// Runs `action` once after `delay`, never before `run_after` returns.
    fn run_after(&self, delay: Duration, action: Box<dyn FnOnce()>);
}

struct RunningAnimation {
    spec: AnimationSpec,
    start_nanos: Option<u64>,
    on_step: Rc<RefCell<StepFn>>,
    on_complete: Option<CompletionFn>,
    registration: Option<FrameCallbackRegistration>,
}

#[derive(Default)]
struct AnimatorState {
    next_id: AnimationId,
    running: FxHashMap<AnimationId, RunningAnimation>,
}

/// [`AnimationDriver`] that samples animations on [`FrameClock`] frames.
#[derive(Clone)]
pub struct Animator {
    clock: FrameClock,
    state: Rc<RefCell<AnimatorState>>,
}

impl Animator {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            state: Rc::new(RefCell::new(AnimatorState::default())),
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn running_count(&self) -> usize {
        self.state.borrow().running.len()
    }

    fn schedule_frame(&self, id: AnimationId) {
        let weak: Weak<RefCell<AnimatorState>> = Rc::downgrade(&self.state);
        let clock = self.clock.clone();
        let registration = self.clock.with_frame_nanos(move |time| {
            if let Some(state) = weak.upgrade() {
                Animator { clock, state }.on_frame(id, time);
            }
        });
        if let Some(animation) = self.state.borrow_mut().running.get_mut(&id) {
            animation.registration = Some(registration);
        }
    }

    fn on_frame(&self, id: AnimationId, frame_time_nanos: u64) {
        let (on_step, progress, done) = {
            let mut state = self.state.borrow_mut();
            let Some(animation) = state.running.get_mut(&id) else {
                return;
            };
            animation.registration = None;
            let start = *animation.start_nanos.get_or_insert(frame_time_nanos);
            let elapsed = Duration::from_nanos(frame_time_nanos.saturating_sub(start));
            let (progress, done) = animation.spec.sample(elapsed);
            (Rc::clone(&animation.on_step), progress, done)
        };

        log::trace!("animation {id} progress {progress:.3}");
        (on_step.borrow_mut())(progress);

        if done {
            let completion = self
                .state
                .borrow_mut()
                .running
                .remove(&id)
                .and_then(|mut animation| animation.on_complete.take());
            if let Some(completion) = completion {
                completion(true);
            }
        } else if self.state.borrow().running.contains_key(&id) {
            self.schedule_frame(id);
        }
    }
}

impl AnimationDriver for Animator {
    fn animate(
        &self,
        spec: AnimationSpec,
        on_step: StepFn,
        on_complete: CompletionFn,
    ) -> AnimationId {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.running.insert(
                id,
                RunningAnimation {
                    spec,
                    start_nanos: None,
                    on_step: Rc::new(RefCell::new(on_step)),
                    on_complete: Some(on_complete),
                    registration: None,
                },
            );
            id
        };
        self.schedule_frame(id);
        id
    }

    fn cancel(&self, id: AnimationId) {
        let removed = self.state.borrow_mut().running.remove(&id);
        let Some(mut animation) = removed else {
            return;
        };
        log::trace!("animation {id} cancelled");
        drop(animation.registration.take());
        if let Some(completion) = animation.on_complete.take() {
            self.clock
                .run_after(Duration::ZERO, move || completion(false));
        }
    }

    fn is_running(&self, id: AnimationId) -> bool {
        self.state.borrow().running.contains_key(&id)
    }

    fn run_after(&self, delay: Duration, action: Box<dyn FnOnce()>) {
        self.clock.run_after(delay, action);
    }
}
