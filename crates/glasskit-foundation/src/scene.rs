//! Scene-graph seam for thumb surfaces.
//!
//! Controls never render the glass effect themselves. They create layers on
//! a [`SceneHost`], attach and detach them, and push geometry, opacity and
//! scale. [`MemoryScene`] is the in-process host used by headless hosts and
//! tests; it enforces the same attachment rules a real view hierarchy does.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glasskit_ui_graphics::{Color, GraphicsLayer, Point, Size};
use indexmap::{IndexMap, IndexSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Cheap opaque view.
    Opaque,
    /// Translucent glass surface rendered by the platform shader pipeline.
    Glass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceProps {
    pub center: Point,
    pub size: Size,
    pub layer: GraphicsLayer,
    pub tint: Option<Color>,
    /// Whether the surface may intercept touches.
    pub hit_testable: bool,
}

impl Default for SurfaceProps {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            size: Size::ZERO,
            layer: GraphicsLayer::IDENTITY,
            tint: None,
            hit_testable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownLayer(LayerId),
    AlreadyAttached(LayerId),
    NotAttached(LayerId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownLayer(id) => write!(f, "{id} was never created"),
            SceneError::AlreadyAttached(id) => write!(f, "{id} is already attached"),
            SceneError::NotAttached(id) => write!(f, "{id} is not attached"),
        }
    }
}

impl std::error::Error for SceneError {}

pub trait SceneHost {
    fn create_layer(&mut self, kind: SurfaceKind) -> LayerId;

    /// Adds `layer` on top of the attached stack.
    fn attach(&mut self, layer: LayerId) -> Result<(), SceneError>;

    fn detach(&mut self, layer: LayerId) -> Result<(), SceneError>;

    fn is_attached(&self, layer: LayerId) -> bool;

    /// Replaces the layer's properties. Detached layers keep their properties.
    fn update(&mut self, layer: LayerId, props: SurfaceProps) -> Result<(), SceneError>;
}

pub type SharedScene = Rc<RefCell<dyn SceneHost>>;

#[derive(Clone, Debug)]
struct LayerRecord {
    kind: SurfaceKind,
    props: SurfaceProps,
}

/// Ordered in-memory scene graph.
#[derive(Debug, Default)]
pub struct MemoryScene {
    next_id: u32,
    layers: IndexMap<LayerId, LayerRecord>,
    stack: IndexSet<LayerId>,
    attach_count: usize,
    detach_count: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<MemoryScene>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn kind(&self, layer: LayerId) -> Option<SurfaceKind> {
        self.layers.get(&layer).map(|record| record.kind)
    }

    pub fn props(&self, layer: LayerId) -> Option<SurfaceProps> {
        self.layers.get(&layer).map(|record| record.props)
    }

    /// Attached layers, bottom to top.
    pub fn attached_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.stack.iter().copied()
    }

    pub fn attached_count(&self) -> usize {
        self.stack.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total successful attach operations since creation.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    fn require(&self, layer: LayerId) -> Result<(), SceneError> {
        if self.layers.contains_key(&layer) {
            Ok(())
        } else {
            Err(SceneError::UnknownLayer(layer))
        }
    }
}

impl SceneHost for MemoryScene {
    fn create_layer(&mut self, kind: SurfaceKind) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(
            id,
            LayerRecord {
                kind,
                props: SurfaceProps::default(),
            },
        );
        id
    }

    fn attach(&mut self, layer: LayerId) -> Result<(), SceneError> {
        self.require(layer)?;
        if !self.stack.insert(layer) {
            return Err(SceneError::AlreadyAttached(layer));
        }
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self, layer: LayerId) -> Result<(), SceneError> {
        self.require(layer)?;
        if !self.stack.shift_remove(&layer) {
            return Err(SceneError::NotAttached(layer));
        }
        self.detach_count += 1;
        Ok(())
    }

    fn is_attached(&self, layer: LayerId) -> bool {
        self.stack.contains(&layer)
    }

    fn update(&mut self, layer: LayerId, props: SurfaceProps) -> Result<(), SceneError> {
        let record = self
            .layers
            .get_mut(&layer)
            .ok_or(SceneError::UnknownLayer(layer))?;
        record.props = props;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_and_detach_follow_stack_order() {
        let mut scene = MemoryScene::new();
        let bottom = scene.create_layer(SurfaceKind::Opaque);
        let top = scene.create_layer(SurfaceKind::Glass);

        scene.attach(bottom).unwrap();
        scene.attach(top).unwrap();
        assert_eq!(scene.attached_layers().collect::<Vec<_>>(), vec![bottom, top]);

        scene.detach(bottom).unwrap();
        assert_eq!(scene.attached_layers().collect::<Vec<_>>(), vec![top]);
        assert_eq!(scene.attach_count(), 2);
        assert_eq!(scene.detach_count(), 1);
    }

    #[test]
    fn double_attach_and_double_detach_are_rejected() {
        let mut scene = MemoryScene::new();
        let layer = scene.create_layer(SurfaceKind::Glass);

        scene.attach(layer).unwrap();
        assert_eq!(scene.attach(layer), Err(SceneError::AlreadyAttached(layer)));
        scene.detach(layer).unwrap();
        assert_eq!(scene.detach(layer), Err(SceneError::NotAttached(layer)));
        assert_eq!(
            scene.attach(LayerId(99)),
            Err(SceneError::UnknownLayer(LayerId(99)))
        );
    }

    #[test]
    fn detached_layers_keep_their_props() {
        let mut scene = MemoryScene::new();
        let layer = scene.create_layer(SurfaceKind::Opaque);
        let props = SurfaceProps {
            center: Point::new(4.0, 2.0),
            size: Size::new(10.0, 6.0),
            ..SurfaceProps::default()
        };
        scene.update(layer, props).unwrap();
        assert_eq!(scene.props(layer), Some(props));
        assert_eq!(scene.kind(layer), Some(SurfaceKind::Opaque));
    }

    #[test]
    fn errors_render_layer_ids() {
        let message = SceneError::AlreadyAttached(LayerId(3)).to_string();
        assert_eq!(message, "layer#3 is already attached");
    }
}
