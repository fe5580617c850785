/// Scene: camera plus the items and lights gathered for one frame.
///
/// `items` and `lights` are rebuilt by a cull visitor every frame. They are
/// truncated, not reallocated, so their capacity carries over.

use glam::{Mat4, Vec3};
use crate::math::Frustum;

/// Opaque handle of a drawable resource (mesh, model part, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u64);

/// Opaque handle of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Opaque handle of a sprite texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Camera matrices of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCamera {
    pub view: Mat4,
    pub projection: Mat4,
    /// Precomputed `projection * view`, used as-is when present
    pub view_projection: Option<Mat4>,
}

impl SceneCamera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view,
            projection,
            view_projection: None,
        }
    }

    /// Combined matrix: `view` is applied first, then `projection`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection.unwrap_or(self.projection * self.view)
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }
}

/// Record of something to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneItem {
    Drawable {
        drawable: DrawableHandle,
        material: MaterialHandle,
        transform: Mat4,
        sort_key: Option<u64>,
    },
    Sprite {
        texture: TextureHandle,
        material: MaterialHandle,
        transform: Mat4,
        sort_key: Option<u64>,
    },
}

impl SceneItem {
    pub fn transform(&self) -> &Mat4 {
        match self {
            SceneItem::Drawable { transform, .. } => transform,
            SceneItem::Sprite { transform, .. } => transform,
        }
    }

    pub fn sort_key(&self) -> Option<u64> {
        match self {
            SceneItem::Drawable { sort_key, .. } => *sort_key,
            SceneItem::Sprite { sort_key, .. } => *sort_key,
        }
    }

    pub fn material(&self) -> MaterialHandle {
        match self {
            SceneItem::Drawable { material, .. } => *material,
            SceneItem::Sprite { material, .. } => *material,
        }
    }
}

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightType {
    #[default]
    Directional,
    Point,
    Spot,
}

/// Light record gathered for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSourceData {
    pub light_type: LightType,
    /// World-space position
    pub position: Vec3,
    /// World-space direction (normalized)
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    /// Cone angle in radians (spot lights)
    pub spot_angle: f32,
    pub cast_shadow: bool,
}

/// A scene to cull and render.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    name: String,
    camera: Option<SceneCamera>,
    items: Vec<SceneItem>,
    lights: Vec<LightSourceData>,
    disabled: bool,
}

impl Scene {
    /// Create an empty scene without camera.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_camera(mut self, camera: SceneCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> Option<&SceneCamera> {
        self.camera.as_ref()
    }

    pub fn set_camera(&mut self, camera: Option<SceneCamera>) {
        self.camera = camera;
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn lights(&self) -> &[LightSourceData] {
        &self.lights
    }

    /// Disabled scenes are skipped by `CullDriver`.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Empty the item and light lists, keeping their capacity.
    pub fn clear_scenery(&mut self) {
        self.items.truncate(0);
        self.lights.truncate(0);
    }

    /// Stable sort of the items by sort key, items without a key last.
    pub fn sort_items_by_key(&mut self) {
        self.items.sort_by_key(|item| match item.sort_key() {
            Some(key) => (0u8, key),
            None => (1u8, 0),
        });
    }

    pub(crate) fn push_item(&mut self, item: SceneItem) {
        self.items.push(item);
    }

    pub(crate) fn push_light(&mut self, light: LightSourceData) {
        self.lights.push(light);
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
