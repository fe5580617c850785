/// Spatial cull visitor: asks the spatial index for the visible entities.

use crate::ecs::{Entity, World};
use crate::engine_err;
use crate::engine_trace;
use crate::error::Result;
use crate::math::Frustum;
use crate::scene::Scene;
use crate::spatial::SpatialSystemComponent;
use super::cull_visitor::{contribute, CullVisitor, SceneCollector};

/// Queries the spatial index with the camera frustum and lets each
/// candidate contribute, in the order the index returns them.
///
/// Candidates are not re-tested and their children are not visited.
/// Requires a spatial index whenever the scene has a camera.
#[derive(Default)]
pub struct SpatialCullVisitor {
    frustum: Option<Frustum>,
    entities: Vec<Entity>,
}

impl SpatialCullVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frustum of the last run, `None` if that scene had no camera.
    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    /// Entities returned by the index during the last run.
    pub fn candidates(&self) -> &[Entity] {
        &self.entities
    }
}

impl CullVisitor for SpatialCullVisitor {
    fn run(
        &mut self,
        world: &World,
        _root: Entity,
        spatial: Option<&SpatialSystemComponent>,
        scene: &mut Scene,
    ) -> Result<()> {
        scene.clear_scenery();
        self.entities.clear();
        self.frustum = None;

        let Some(camera) = scene.camera() else {
            engine_trace!("galaxy3d::SpatialCullVisitor",
                "Scene '{}' has no camera, nothing to cull", scene.name());
            return Ok(());
        };
        let frustum = camera.frustum();
        self.frustum = Some(frustum);

        let Some(spatial) = spatial else {
            return Err(engine_err!("galaxy3d::SpatialCullVisitor", MissingService,
                "Scene '{}' needs a SpatialSystemComponent to cull", scene.name()));
        };

        spatial.test_frustum(&frustum, &mut self.entities);

        let mut collector = SceneCollector::new(scene);
        for &entity in &self.entities {
            contribute(world, entity, &mut collector);
        }

        engine_trace!("galaxy3d::SpatialCullVisitor",
            "Scene '{}': {} candidates, {} items, {} lights",
            scene.name(), self.entities.len(), scene.items().len(), scene.lights().len());
        Ok(())
    }
}
