/// Scenery contribution contract.
///
/// Components that produce something to draw or light implement
/// `SceneryCollectable` and register with the entity's
/// `SceneryLinkComponent`. A cull visitor asks the link to collect, and the
/// link fans out to every registered component in registration order.

use glam::Mat4;
use crate::scene::{LightSourceData, SceneItem};

/// Receiver of the records produced during collection.
pub trait SceneryCollector {
    fn add_item(&mut self, item: SceneItem);
    fn add_light(&mut self, light: LightSourceData);
}

/// Component contributing scenery for its entity.
pub trait SceneryCollectable: Send + Sync {
    /// Push this component's records. `world` is the entity's world transform.
    fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector);
}

/// Ordered registry of an entity's scenery contributors.
#[derive(Default)]
pub struct SceneryLinkComponent {
    collectables: Vec<Box<dyn SceneryCollectable>>,
}

impl SceneryLinkComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, collectable: Box<dyn SceneryCollectable>) {
        self.collectables.push(collectable);
    }

    pub fn len(&self) -> usize {
        self.collectables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectables.is_empty()
    }

    pub fn clear(&mut self) {
        self.collectables.clear();
    }

    /// Let every registered contributor push its records.
    pub fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector) {
        for collectable in &self.collectables {
            collectable.collect_scenery(world, collector);
        }
    }
}
