/// Half-line used for picking queries.

use glam::Vec3;
use super::aabb::AABB;
use super::sphere::BoundingSphere;
use super::plane::Plane;
use super::frustum::Frustum;
use super::EPSILON;

/// Ray starting at `origin` going along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (not required to be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from origin and direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Test if `point` lies on the ray (in front of or at the origin).
    pub fn intersects_point(&self, point: Vec3) -> bool {
        let len_sq = self.direction.length_squared();
        if len_sq == 0.0 {
            return self.origin.distance_squared(point) <= EPSILON * EPSILON;
        }
        let t = (point - self.origin).dot(self.direction) / len_sq;
        if t < 0.0 {
            return false;
        }
        self.at(t).distance_squared(point) <= EPSILON * EPSILON
    }

    /// Test if the ray reaches the plane.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let dist = plane.distance(self.origin);
        let denom = plane.normal.dot(self.direction);
        // Tolerance relative to the direction length
        if denom.abs() <= EPSILON * self.direction.length() {
            // Parallel: hits only when running inside the plane
            return dist.abs() <= EPSILON;
        }
        -dist / denom >= 0.0
    }

    /// Test against a box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_ray(self)
    }

    /// Test against a sphere.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.intersects_ray(self)
    }

    /// Test against a frustum.
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        frustum.intersects_ray(self)
    }
}
