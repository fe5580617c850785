/// CullDriver: runs a cull visitor over every enabled scene.

use crate::ecs::{Entity, World};
use crate::error::Result;
use crate::scene::Scene;
use crate::spatial::SpatialSystemComponent;
use super::brute_force_cull_visitor::BruteForceCullVisitor;
use super::cull_visitor::CullVisitor;

/// Owns the scenes of a frame and the visitor that fills them.
///
/// Rendering the filled scenes is left to the caller.
pub struct CullDriver {
    cull_visitor: Box<dyn CullVisitor>,
    scenes: Vec<Scene>,
}

impl CullDriver {
    /// Driver using a `BruteForceCullVisitor`.
    pub fn new() -> Self {
        Self::with_visitor(Box::new(BruteForceCullVisitor::new()))
    }

    pub fn with_visitor(cull_visitor: Box<dyn CullVisitor>) -> Self {
        Self {
            cull_visitor,
            scenes: Vec::new(),
        }
    }

    pub fn set_cull_visitor(&mut self, cull_visitor: Box<dyn CullVisitor>) {
        self.cull_visitor = cull_visitor;
    }

    /// Add a scene, returning its index.
    pub fn add_scene(&mut self, scene: Scene) -> usize {
        self.scenes.push(scene);
        self.scenes.len() - 1
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// Run the visitor on every scene that is not disabled, in order.
    ///
    /// Stops at the first failing scene.
    pub fn cull_scenes(
        &mut self,
        world: &World,
        root: Entity,
        spatial: Option<&SpatialSystemComponent>,
    ) -> Result<()> {
        for scene in self.scenes.iter_mut().filter(|scene| !scene.is_disabled()) {
            self.cull_visitor.run(world, root, spatial, scene)?;
        }
        Ok(())
    }
}

impl Default for CullDriver {
    fn default() -> Self {
        Self::new()
    }
}
