//! Axis-aligned collision volumes
//!
//! Hazards, ramps and the vehicle all collide as axis-aligned boxes;
//! collectibles use a bounding sphere against the vehicle box. The vehicle
//! hitbox is deliberately shrunk well inside the visual silhouette so
//! near-misses feel like misses.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Standard AABB overlap test (touching counts as overlap)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Sphere-vs-box test via the closest point on the box
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let closest = sphere.center.clamp(self.min, self.max);
        closest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
    }
}

/// Bounding sphere (collectibles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Shrink factors turning a visual bounding box into the forgiving hitbox
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitboxShrink {
    pub shrink_x: f32,
    pub shrink_z: f32,
    pub y_offset: f32,
    pub height_factor: f32,
}

impl HitboxShrink {
    /// Derive the hitbox from the full visual bounds.
    ///
    /// The shrunk size is halved at 0.4 rather than 0.5, cutting another 20%
    /// off every axis of the final box.
    pub fn apply(&self, bounds: &Aabb) -> Aabb {
        let size = bounds.size();
        let center = bounds.center();

        let shrunk = Vec3::new(
            size.x * self.shrink_x,
            size.y * self.height_factor,
            size.z * self.shrink_z,
        );
        let hit_center = Vec3::new(center.x, center.y - self.y_offset, center.z);

        let half = shrunk * 0.4;
        Aabb::new(hit_center - half, hit_center + half)
    }
}

/// Cheap x/z rejection ahead of the full ramp box test
pub fn ramp_within_reach(vehicle_pos: Vec3, ramp_pos: Vec3) -> bool {
    if (vehicle_pos.x - ramp_pos.x).abs() > 1.2 {
        return false;
    }
    (vehicle_pos.z - ramp_pos.z).abs() <= 1.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap_and_separation() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(2.0));
        let c = Aabb::from_center_size(Vec3::new(4.0, 0.0, 0.0), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_separated_on_one_axis_only() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let above = Aabb::from_center_size(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(2.0));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_sphere_vs_box() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        assert!(b.intersects_sphere(&Sphere::new(Vec3::new(1.2, 0.0, 0.0), 0.45)));
        assert!(!b.intersects_sphere(&Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.45)));
    }

    #[test]
    fn test_hitbox_is_tighter_than_bounds() {
        let shrink = HitboxShrink {
            shrink_x: 0.9,
            shrink_z: 0.9,
            y_offset: 0.0,
            height_factor: 0.8,
        };
        let bounds = Aabb::from_center_size(Vec3::new(0.0, 0.42, 3.0), Vec3::new(1.25, 0.25, 1.69));
        let hit = shrink.apply(&bounds);
        let size = hit.size();
        assert!((size.x - 1.25 * 0.9 * 0.8).abs() < 1e-5);
        assert!((size.y - 0.25 * 0.8 * 0.8).abs() < 1e-5);
        assert!((size.z - 1.69 * 0.9 * 0.8).abs() < 1e-5);
        assert_eq!(hit.center(), bounds.center());
    }

    #[test]
    fn test_ramp_reach_prefilter() {
        let car = Vec3::new(0.0, 0.25, 3.0);
        assert!(ramp_within_reach(car, Vec3::new(0.5, 0.25, 2.0)));
        assert!(!ramp_within_reach(car, Vec3::new(2.0, 0.25, 3.0)));
        assert!(!ramp_within_reach(car, Vec3::new(0.0, 0.25, 5.0)));
    }
}
