/// Brute-force cull visitor: walks the whole entity tree.

use crate::ecs::{Entity, World};
use crate::engine_trace;
use crate::error::Result;
use crate::math::Frustum;
use crate::scene::Scene;
use crate::spatial::SpatialSystemComponent;
use super::cull_visitor::{contribute, CullVisitor, SceneCollector};

/// Visits every entity under the root, depth-first pre-order.
///
/// An entity whose world volume misses the frustum contributes nothing,
/// but its children are still visited: each entity is judged by its own
/// bounds only. Entities without a volume always contribute.
///
/// Ignores the spatial index entirely.
#[derive(Default)]
pub struct BruteForceCullVisitor {
    frustum: Option<Frustum>,
    stack: Vec<Entity>,
}

impl BruteForceCullVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frustum of the last run, `None` if that scene had no camera.
    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }
}

impl CullVisitor for BruteForceCullVisitor {
    fn run(
        &mut self,
        world: &World,
        root: Entity,
        _spatial: Option<&SpatialSystemComponent>,
        scene: &mut Scene,
    ) -> Result<()> {
        scene.clear_scenery();
        self.stack.clear();
        self.frustum = None;

        let Some(camera) = scene.camera() else {
            engine_trace!("galaxy3d::BruteForceCullVisitor",
                "Scene '{}' has no camera, nothing to cull", scene.name());
            return Ok(());
        };
        let frustum = camera.frustum();
        self.frustum = Some(frustum);

        let mut visited = 0usize;
        let mut collector = SceneCollector::new(scene);
        self.stack.push(root);
        while let Some(entity) = self.stack.pop() {
            visited += 1;
            self.stack.extend(world.children(entity).iter().rev());

            let hidden = world
                .bounding_volume(entity)
                .and_then(|component| component.volume())
                .is_some_and(|volume| !volume.intersects_frustum(&frustum));
            if hidden {
                continue;
            }
            contribute(world, entity, &mut collector);
        }

        engine_trace!("galaxy3d::BruteForceCullVisitor",
            "Scene '{}': visited {} entities, {} items, {} lights",
            scene.name(), visited, scene.items().len(), scene.lights().len());
        Ok(())
    }
}
