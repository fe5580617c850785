/// Built-in scenery contributors: meshes, models, sprites and lights.

use glam::{Mat4, Vec3};
use crate::math::{BoundingSphere, BoundingVolume};
use crate::scene::{
    DrawableHandle, LightSourceData, LightType, MaterialHandle, SceneItem, TextureHandle,
};
use super::scenery::{SceneryCollectable, SceneryCollector};

/// Radius of the local volume linked by lights.
///
/// Lights are never culled, so the volume is large enough to intersect any
/// frustum.
pub const LIGHT_VOLUME_RADIUS: f32 = 9.0e15;

// ===== MESH =====

/// Drawable mesh with a material.
///
/// Contributes one `SceneItem::Drawable` when both handles are set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshComponent {
    pub drawable: Option<DrawableHandle>,
    pub material: Option<MaterialHandle>,
    pub sort_key: Option<u64>,
    /// Local bounds of the mesh, linked to the entity's bounding volume
    pub volume: Option<BoundingVolume>,
}

impl MeshComponent {
    pub fn new(drawable: DrawableHandle, material: MaterialHandle) -> Self {
        Self {
            drawable: Some(drawable),
            material: Some(material),
            sort_key: None,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: BoundingVolume) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl SceneryCollectable for MeshComponent {
    fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector) {
        if let (Some(drawable), Some(material)) = (self.drawable, self.material) {
            collector.add_item(SceneItem::Drawable {
                drawable,
                material,
                transform: *world,
                sort_key: self.sort_key,
            });
        }
    }
}

// ===== MODEL =====

/// One drawable part of a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPart {
    pub drawable: DrawableHandle,
    pub material: MaterialHandle,
}

impl ModelPart {
    pub fn new(drawable: DrawableHandle, material: MaterialHandle) -> Self {
        Self { drawable, material }
    }
}

/// Multi-part model.
///
/// Contributes one `SceneItem::Drawable` per part, in part order, all
/// sharing the entity transform and the model's sort key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelComponent {
    pub parts: Vec<ModelPart>,
    pub sort_key: Option<u64>,
    /// Local bounds of the whole model, linked to the entity's bounding volume
    pub volume: Option<BoundingVolume>,
}

impl ModelComponent {
    pub fn new(parts: Vec<ModelPart>) -> Self {
        Self {
            parts,
            sort_key: None,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: BoundingVolume) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl SceneryCollectable for ModelComponent {
    fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector) {
        for part in &self.parts {
            collector.add_item(SceneItem::Drawable {
                drawable: part.drawable,
                material: part.material,
                transform: *world,
                sort_key: self.sort_key,
            });
        }
    }
}

// ===== SPRITE =====

/// Textured sprite.
///
/// `width` and `height` are the rendered size in local units. The pivot is
/// the local origin, measured from the sprite's lower left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    pub texture: Option<TextureHandle>,
    pub material: Option<MaterialHandle>,
    pub sort_key: Option<u64>,
    pub width: f32,
    pub height: f32,
    pub pivot_x: f32,
    pub pivot_y: f32,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            texture: None,
            material: None,
            sort_key: None,
            width: 1.0,
            height: 1.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
        }
    }
}

impl SpriteComponent {
    pub fn new(texture: TextureHandle, material: MaterialHandle) -> Self {
        Self {
            texture: Some(texture),
            material: Some(material),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_pivot(mut self, pivot_x: f32, pivot_y: f32) -> Self {
        self.pivot_x = pivot_x;
        self.pivot_y = pivot_y;
        self
    }

    /// Sphere around the pivot reaching the farthest corner of the sprite.
    pub fn local_volume(&self) -> BoundingVolume {
        let dx = self.pivot_x.abs().max((self.width - self.pivot_x).abs());
        let dy = self.pivot_y.abs().max((self.height - self.pivot_y).abs());
        BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, dx.hypot(dy)))
    }
}

impl SceneryCollectable for SpriteComponent {
    fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector) {
        if let (Some(texture), Some(material)) = (self.texture, self.material) {
            collector.add_item(SceneItem::Sprite {
                texture,
                material,
                transform: *world,
                sort_key: self.sort_key,
            });
        }
    }
}

// ===== LIGHT =====

/// Light options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightComponentDesc {
    pub enabled: bool,
    pub range: f32,
    pub intensity: f32,
    /// Cone angle in radians
    pub spot_angle: f32,
    pub cast_shadow: bool,
    pub color: Vec3,
    pub light_type: LightType,
}

impl Default for LightComponentDesc {
    fn default() -> Self {
        Self {
            enabled: true,
            range: 0.0,
            intensity: 1.0,
            spot_angle: std::f32::consts::FRAC_PI_4,
            cast_shadow: false,
            color: Vec3::ONE,
            light_type: LightType::Directional,
        }
    }
}

/// Light source placed by its entity's transform.
///
/// Position is the world translation, direction the world forward axis (-Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightComponent {
    desc: LightComponentDesc,
}

impl LightComponent {
    pub fn new(desc: LightComponentDesc) -> Self {
        Self { desc }
    }

    pub fn desc(&self) -> &LightComponentDesc {
        &self.desc
    }

    pub fn desc_mut(&mut self) -> &mut LightComponentDesc {
        &mut self.desc
    }

    /// Local volume linked to the entity so culling always keeps the light.
    pub fn local_volume(&self) -> BoundingVolume {
        BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, LIGHT_VOLUME_RADIUS))
    }

    /// Light record for the given world transform.
    pub fn light_data(&self, world: &Mat4) -> LightSourceData {
        let direction = world.transform_vector3(Vec3::NEG_Z).normalize_or_zero();
        LightSourceData {
            light_type: self.desc.light_type,
            position: world.w_axis.truncate(),
            direction,
            color: self.desc.color,
            intensity: self.desc.intensity,
            range: self.desc.range,
            spot_angle: self.desc.spot_angle,
            cast_shadow: self.desc.cast_shadow,
        }
    }
}

impl Default for LightComponent {
    fn default() -> Self {
        Self::new(LightComponentDesc::default())
    }
}

impl SceneryCollectable for LightComponent {
    fn collect_scenery(&self, world: &Mat4, collector: &mut dyn SceneryCollector) {
        if self.desc.enabled {
            collector.add_light(self.light_data(world));
        }
    }
}
