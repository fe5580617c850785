//! Bounding volume family.
//!
//! Shapes used by the spatial index and the cull visitors, with a fixed
//! pairwise intersection contract. Everything is built on glam's `f32` types.

mod aabb;
mod sphere;
mod ray;
mod plane;
mod frustum;
mod bounding_volume;

pub use aabb::AABB;
pub use sphere::BoundingSphere;
pub use ray::Ray;
pub use plane::Plane;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use bounding_volume::{BoundingVolume, QueryShape};

/// Tolerance for point/ray/plane coincidence tests
pub const EPSILON: f32 = 1e-5;
