//! Contracted/expanded thumb morph.
//!
//! The thumb has two scene layers: a cheap opaque contracted surface and an
//! expensive glass expanded surface. In a terminal state exactly one of them
//! is attached. While transitioning both are attached and cross-fade, each
//! scaled so that its outline matches the other's at the start of the morph.
//!
//! Every morph and every position animation captures a generation token.
//! Starting a morph in either direction advances the morph generation, so a
//! completion belonging to a superseded morph never detaches a layer.

use std::rc::Rc;

use glasskit_animation::{AnimationDriver, AnimationId, AnimationSpec};
use glasskit_core::{Generation, GenerationToken, Owned, WeakOwned};
use glasskit_foundation::{LayerId, SharedScene, SurfaceKind, SurfaceProps};
use glasskit_ui_graphics::{Color, GraphicsLayer, Point, Size};

use crate::style::{MorphSpecs, ThumbMetrics};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphDirection {
    Expanding,
    Contracting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThumbState {
    Contracted,
    Expanded,
    /// `progress` is 0 at contracted and 1 at expanded; springs may overshoot.
    Transitioning {
        progress: f32,
        direction: MorphDirection,
    },
}

impl ThumbState {
    pub fn progress(&self) -> f32 {
        match *self {
            ThumbState::Contracted => 0.0,
            ThumbState::Expanded => 1.0,
            ThumbState::Transitioning { progress, .. } => progress,
        }
    }

    /// Where the thumb ends up if nothing else happens.
    pub fn is_heading_expanded(&self) -> bool {
        matches!(
            self,
            ThumbState::Expanded
                | ThumbState::Transitioning {
                    direction: MorphDirection::Expanding,
                    ..
                }
        )
    }
}

/// Interpolated thumb outline at the current progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbGeometry {
    pub center: Point,
    pub size: Size,
}

struct MorphInner {
    scene: SharedScene,
    driver: Rc<dyn AnimationDriver>,
    contracted: LayerId,
    expanded: LayerId,
    metrics: ThumbMetrics,
    specs: MorphSpecs,
    center: Point,
    tint: Option<Color>,
    state: ThumbState,
    morph_generation: Generation,
    morph_animation: Option<AnimationId>,
    move_generation: Generation,
    move_animation: Option<AnimationId>,
}

impl MorphInner {
    fn ensure_attached(&self, layer: LayerId) {
        let mut scene = self.scene.borrow_mut();
        if scene.is_attached(layer) {
            return;
        }
        if let Err(err) = scene.attach(layer) {
            log::warn!("thumb attach failed: {err}");
        }
    }

    fn ensure_detached(&self, layer: LayerId) {
        let mut scene = self.scene.borrow_mut();
        if !scene.is_attached(layer) {
            return;
        }
        if let Err(err) = scene.detach(layer) {
            log::warn!("thumb detach failed: {err}");
        }
    }

    fn cancel_morph(&mut self) {
        if let Some(id) = self.morph_animation.take() {
            self.driver.cancel(id);
        }
    }

    fn cancel_move(&mut self) {
        self.move_generation.advance();
        if let Some(id) = self.move_animation.take() {
            self.driver.cancel(id);
        }
    }

    fn geometry(&self) -> ThumbGeometry {
        let progress = self.state.progress().clamp(0.0, 1.0);
        ThumbGeometry {
            center: self.center,
            size: self.metrics.contracted.lerp(self.metrics.expanded, progress),
        }
    }

    /// Pushes both layers' properties for the current state.
    fn apply(&self) {
        let p = self.state.progress();
        let fade = p.clamp(0.0, 1.0);
        let (shrink_x, shrink_y) = self.metrics.contracted.ratio_to(self.metrics.expanded);
        let (grow_x, grow_y) = self.metrics.expanded.ratio_to(self.metrics.contracted);

        let contracted_layer = match self.state {
            ThumbState::Contracted | ThumbState::Expanded => GraphicsLayer::IDENTITY,
            ThumbState::Transitioning { .. } => GraphicsLayer::new(
                1.0 - fade,
                1.0 + (grow_x - 1.0) * p,
                1.0 + (grow_y - 1.0) * p,
            ),
        };
        let expanded_layer = match self.state {
            ThumbState::Expanded => GraphicsLayer::IDENTITY,
            _ => GraphicsLayer::new(
                fade,
                shrink_x + (1.0 - shrink_x) * p,
                shrink_y + (1.0 - shrink_y) * p,
            ),
        };

        let contracted = SurfaceProps {
            center: self.center,
            size: self.metrics.contracted,
            layer: contracted_layer,
            tint: Some(self.tint.unwrap_or(Color::WHITE)),
            hit_testable: false,
        };
        let expanded = SurfaceProps {
            center: self.center,
            size: self.metrics.expanded,
            layer: expanded_layer,
            tint: None,
            hit_testable: false,
        };

        let mut scene = self.scene.borrow_mut();
        for (layer, props) in [(self.contracted, contracted), (self.expanded, expanded)] {
            if let Err(err) = scene.update(layer, props) {
                log::warn!("thumb update failed: {err}");
            }
        }
    }

    fn on_morph_step(&mut self, token: GenerationToken, from: f32, to: f32, t: f32) {
        if !self.morph_generation.is_current(token) {
            return;
        }
        let direction = if to > from {
            MorphDirection::Expanding
        } else {
            MorphDirection::Contracting
        };
        self.state = ThumbState::Transitioning {
            progress: from + (to - from) * t,
            direction,
        };
        self.apply();
    }

    fn on_morph_complete(&mut self, token: GenerationToken, target: ThumbState, finished: bool) {
        if !self.morph_generation.is_current(token) {
            log::trace!("stale morph completion ignored");
            return;
        }
        self.morph_animation = None;
        if !finished {
            log::debug!("morph towards {target:?} interrupted; layers left in place");
            return;
        }
        match target {
            ThumbState::Expanded => self.ensure_detached(self.contracted),
            _ => self.ensure_detached(self.expanded),
        }
        self.state = target;
        self.apply();
        log::debug!("thumb settled {target:?}");
    }
}

impl Drop for MorphInner {
    fn drop(&mut self) {
        for id in [self.morph_animation.take(), self.move_animation.take()]
            .into_iter()
            .flatten()
        {
            self.driver.cancel(id);
        }
        let Ok(mut scene) = self.scene.try_borrow_mut() else {
            log::warn!(
                "scene busy while dropping thumb; {} and {} may stay attached",
                self.contracted,
                self.expanded
            );
            return;
        };
        for layer in [self.contracted, self.expanded] {
            if !scene.is_attached(layer) {
                continue;
            }
            if let Err(err) = scene.detach(layer) {
                log::warn!("thumb detach on drop failed: {err}");
            }
        }
    }
}

/// Handle to a thumb's morph and position state.
///
/// Clones share the same thumb. Scheduled work holds only a weak reference,
/// so dropping the last handle detaches both layers and turns pending
/// completions into no-ops.
#[derive(Clone)]
pub struct ThumbMorphEngine {
    inner: Owned<MorphInner>,
}

impl ThumbMorphEngine {
    pub fn new(
        scene: SharedScene,
        driver: Rc<dyn AnimationDriver>,
        metrics: ThumbMetrics,
        specs: MorphSpecs,
        center: Point,
    ) -> Self {
        let (contracted, expanded) = {
            let mut host = scene.borrow_mut();
            (
                host.create_layer(SurfaceKind::Opaque),
                host.create_layer(SurfaceKind::Glass),
            )
        };
        let inner = MorphInner {
            scene,
            driver,
            contracted,
            expanded,
            metrics,
            specs,
            center,
            tint: None,
            state: ThumbState::Contracted,
            morph_generation: Generation::new(),
            morph_animation: None,
            move_generation: Generation::new(),
            move_animation: None,
        };
        inner.apply();
        inner.ensure_attached(contracted);
        Self {
            inner: Owned::new(inner),
        }
    }

    pub fn state(&self) -> ThumbState {
        self.inner.borrow().state
    }

    pub fn center(&self) -> Point {
        self.inner.borrow().center
    }

    pub fn geometry(&self) -> ThumbGeometry {
        self.inner.borrow().geometry()
    }

    pub fn metrics(&self) -> ThumbMetrics {
        self.inner.borrow().metrics
    }

    /// `(contracted, expanded)` layer ids.
    pub fn layers(&self) -> (LayerId, LayerId) {
        let inner = self.inner.borrow();
        (inner.contracted, inner.expanded)
    }

    pub fn is_moving(&self) -> bool {
        self.inner.borrow().move_animation.is_some()
    }

    pub fn set_tint(&self, tint: Option<Color>) {
        let mut inner = self.inner.borrow_mut();
        inner.tint = tint;
        inner.apply();
    }

    pub fn expand(&self) {
        self.morph_towards(ThumbState::Expanded);
    }

    pub fn contract(&self) {
        self.morph_towards(ThumbState::Contracted);
    }

    fn morph_towards(&self, target: ThumbState) {
        let expanding = target == ThumbState::Expanded;
        let (driver, spec, token, from) = {
            let mut inner = self.inner.borrow_mut();
            let underway = match inner.state {
                ThumbState::Transitioning { direction, .. } => {
                    (direction == MorphDirection::Expanding) == expanding
                }
                state => state == target,
            };
            if underway {
                return;
            }
            let from = inner.state.progress();
            let token = inner.morph_generation.advance();
            inner.cancel_morph();
            if expanding {
                inner.ensure_attached(inner.contracted);
                inner.ensure_attached(inner.expanded);
            } else {
                inner.ensure_attached(inner.expanded);
                inner.ensure_attached(inner.contracted);
            }
            inner.state = ThumbState::Transitioning {
                progress: from,
                direction: if expanding {
                    MorphDirection::Expanding
                } else {
                    MorphDirection::Contracting
                },
            };
            inner.apply();
            let spec = if expanding {
                inner.specs.expand
            } else {
                inner.specs.contract
            };
            (Rc::clone(&inner.driver), spec, token, from)
        };
        log::debug!("thumb morph towards {target:?} from {from:.2}");

        let to = if expanding { 1.0 } else { 0.0 };
        let step_ref = self.inner.downgrade();
        let done_ref = self.inner.downgrade();
        let id = driver.animate(
            spec,
            Box::new(move |t| {
                if let Some(inner) = step_ref.upgrade() {
                    inner.borrow_mut().on_morph_step(token, from, to, t);
                }
            }),
            Box::new(move |finished| {
                if let Some(inner) = done_ref.upgrade() {
                    inner.borrow_mut().on_morph_complete(token, target, finished);
                }
            }),
        );

        let mut inner = self.inner.borrow_mut();
        if inner.morph_generation.is_current(token) && driver.is_running(id) {
            inner.morph_animation = Some(id);
        }
    }

    /// Moves the thumb immediately, cancelling any position animation.
    pub fn set_center(&self, center: Point) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_move();
        inner.center = center;
        inner.apply();
    }

    /// Animates the thumb to `target`. `on_arrival` runs once, after the
    /// thumb state borrow is released, with `true` only if this move was
    /// neither cancelled nor superseded.
    pub fn move_to(
        &self,
        target: Point,
        spec: AnimationSpec,
        on_arrival: Option<Box<dyn FnOnce(bool)>>,
    ) {
        let (driver, token, from) = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_move();
            let token = inner.move_generation.token();
            (Rc::clone(&inner.driver), token, inner.center)
        };

        let step_ref = self.inner.downgrade();
        let done_ref = self.inner.downgrade();
        let id = driver.animate(
            spec,
            Box::new(move |t| {
                if let Some(inner) = step_ref.upgrade() {
                    let mut inner = inner.borrow_mut();
                    if inner.move_generation.is_current(token) {
                        inner.center = from.lerp(target, t);
                        inner.apply();
                    }
                }
            }),
            Box::new(move |finished| {
                let arrived = finish_move(&done_ref, token, target, finished);
                if let Some(on_arrival) = on_arrival {
                    on_arrival(arrived);
                }
            }),
        );

        let mut inner = self.inner.borrow_mut();
        if inner.move_generation.is_current(token) && driver.is_running(id) {
            inner.move_animation = Some(id);
        }
    }
}

fn finish_move(
    inner: &WeakOwned<MorphInner>,
    token: GenerationToken,
    target: Point,
    finished: bool,
) -> bool {
    let Some(inner) = inner.upgrade() else {
        return false;
    };
    let mut inner = inner.borrow_mut();
    if !inner.move_generation.is_current(token) {
        return false;
    }
    inner.move_animation = None;
    if finished {
        inner.center = target;
        inner.apply();
    }
    finished
}
