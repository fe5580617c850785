//! Scene module
//!
//! A Scene is the per-frame output of culling: a camera plus the drawable
//! and light records gathered for it. Rendering the scene is not part of
//! this crate.

mod scene;

pub use scene::{
    Scene, SceneCamera, SceneItem, LightSourceData, LightType,
    DrawableHandle, MaterialHandle, TextureHandle,
};
