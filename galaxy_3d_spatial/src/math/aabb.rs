/// Axis-aligned bounding box.
///
/// Used both for quad tree node bounds and as an entry volume.

use glam::{Mat4, Vec3};
use super::sphere::BoundingSphere;
use super::ray::Ray;
use super::plane::Plane;
use super::frustum::Frustum;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create a box from its corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB { min: *first, max: *first };
        for p in rest {
            aabb.min = aabb.min.min(*p);
            aabb.max = aabb.max.max(*p);
        }
        Some(aabb)
    }

    /// Center point of this AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of this AABB.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The 8 corners. Bit 0 selects max.x, bit 1 max.y, bit 2 max.z.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        corners
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB fully contains another AABB (touching faces count).
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if a point lies inside or on the boundary.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
        && point.y >= self.min.y && point.y <= self.max.y
        && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Test against a sphere using the closest point of the box.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = sphere.center.clamp(self.min, self.max);
        closest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
    }

    /// Test if the plane passes through (or touches) this box.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let n = plane.normal;
        let p_vertex = Vec3::new(
            if n.x >= 0.0 { self.max.x } else { self.min.x },
            if n.y >= 0.0 { self.max.y } else { self.min.y },
            if n.z >= 0.0 { self.max.z } else { self.min.z },
        );
        let n_vertex = Vec3::new(
            if n.x >= 0.0 { self.min.x } else { self.max.x },
            if n.y >= 0.0 { self.min.y } else { self.max.y },
            if n.z >= 0.0 { self.min.z } else { self.max.z },
        );
        plane.distance(p_vertex) >= 0.0 && plane.distance(n_vertex) <= 0.0
    }

    /// Test against a frustum (conservative, see `Frustum::intersects_aabb`).
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        frustum.intersects_aabb(self)
    }

    /// Test against a ray.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.intersection_ray(ray).is_some()
    }

    /// Distance along the ray to the first hit (slab method).
    ///
    /// Returns `Some(0.0)` when the ray starts inside the box and
    /// `None` when the box lies entirely behind the origin.
    /// Only an exactly zero direction component counts as parallel, so the
    /// result does not depend on the direction length.
    pub fn intersection_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            let origin = ray.origin[i];
            let direction = ray.direction[i];

            if direction == 0.0 {
                // Parallel to the slab: origin must be between the planes
                if origin < self.min[i] || origin > self.max[i] {
                    return None;
                }
            } else {
                let inv = 1.0 / direction;
                let mut t1 = (self.min[i] - origin) * inv;
                let mut t2 = (self.max[i] - origin) * inv;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }
                t_min = t_min.max(t1);
                t_max = t_max.min(t2);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
