/// Cull visitor contract and the shared contribution step.

use glam::Mat4;
use crate::ecs::{Entity, SceneryCollector, World};
use crate::error::Result;
use crate::scene::{LightSourceData, Scene, SceneItem};
use crate::spatial::SpatialSystemComponent;

/// Strategy for gathering the visible scenery of a scene.
///
/// Called once per frame per scene. All working state is reset at the
/// start of `run`, so an instance can be reused across frames and scenes.
///
/// The spatial index is owned by the caller and passed by reference.
/// Visitors that do not need it ignore it.
pub trait CullVisitor: Send + Sync {
    /// Clear `scene` and refill it from the entity tree under `root`.
    ///
    /// A scene without camera is left empty and is not an error.
    fn run(
        &mut self,
        world: &World,
        root: Entity,
        spatial: Option<&SpatialSystemComponent>,
        scene: &mut Scene,
    ) -> Result<()>;
}

/// Forwards collected records into a scene.
pub(crate) struct SceneCollector<'a> {
    scene: &'a mut Scene,
}

impl<'a> SceneCollector<'a> {
    pub(crate) fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }
}

impl SceneryCollector for SceneCollector<'_> {
    fn add_item(&mut self, item: SceneItem) {
        self.scene.push_item(item);
    }

    fn add_light(&mut self, light: LightSourceData) {
        self.scene.push_light(light);
    }
}

/// Let the entity's scenery link (if any) contribute.
pub(crate) fn contribute(world: &World, entity: Entity, collector: &mut dyn SceneryCollector) {
    if let Some(link) = world.scenery_link(entity) {
        let transform = world.transform(entity).copied().unwrap_or(Mat4::IDENTITY);
        link.collect_scenery(&transform, collector);
    }
}
