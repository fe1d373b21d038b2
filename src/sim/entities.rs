//! Track entities: hazards, ramps, collectibles
//!
//! Plain data structs - a transform, a collider and the per-kind fields.
//! Every entity advances toward the player by the current speed each tick and
//! reports when it has passed the exit threshold behind the vehicle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collider::{Aabb, Sphere};
use crate::consts::EXIT_THRESHOLD;

/// A solid obstacle the vehicle must dodge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub lane: usize,
    pub position: Vec3,
    pub size: Vec3,
    /// z at which this hazard entered the track
    pub spawn_z: f32,
    pub collider: Aabb,
}

impl Hazard {
    pub fn new(lane: usize, position: Vec3, size: Vec3) -> Self {
        Self {
            lane,
            position,
            size,
            spawn_z: position.z,
            collider: Aabb::from_center_size(position, size),
        }
    }

    /// Advance toward the player; true once past the exit threshold
    pub fn advance(&mut self, speed: f32) -> bool {
        self.position.z += speed;
        self.collider = Aabb::from_center_size(self.position, self.size);
        self.position.z > EXIT_THRESHOLD
    }
}

/// A one-shot jump trigger; touching it launches the vehicle instead of
/// destroying it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ramp {
    pub lane: usize,
    pub position: Vec3,
    pub size: Vec3,
    /// Set on first contact; an activated ramp never triggers again
    pub activated: bool,
    pub collider: Aabb,
}

impl Ramp {
    pub fn new(lane: usize, position: Vec3, size: Vec3) -> Self {
        Self {
            lane,
            position,
            size,
            activated: false,
            collider: Aabb::from_center_size(position, size),
        }
    }

    pub fn advance(&mut self, speed: f32) -> bool {
        self.position.z += speed;
        self.collider = Aabb::from_center_size(self.position, self.size);
        self.position.z > EXIT_THRESHOLD
    }
}

/// A pickup worth `value` points, collected by overlap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub lane: usize,
    pub position: Vec3,
    pub value: f32,
    pub collider: Sphere,
}

impl Collectible {
    pub fn new(lane: usize, position: Vec3, radius: f32, value: f32) -> Self {
        Self {
            lane,
            position,
            value,
            collider: Sphere::new(position, radius),
        }
    }

    pub fn advance(&mut self, speed: f32) -> bool {
        self.position.z += speed;
        self.collider.center = self.position;
        self.position.z > EXIT_THRESHOLD
    }
}

/// Owner collections for everything spawned onto the track.
///
/// Spawn order is preserved; the collision layer iterates these in order and
/// only ever borrows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackEntities {
    pub hazards: Vec<Hazard>,
    pub ramps: Vec<Ramp>,
    pub collectibles: Vec<Collectible>,
}

impl TrackEntities {
    /// Advance every entity and drop the ones past the exit threshold
    pub fn advance(&mut self, speed: f32) {
        self.hazards.retain_mut(|h| !h.advance(speed));
        self.ramps.retain_mut(|r| !r.advance(speed));
        self.collectibles.retain_mut(|c| !c.advance(speed));
    }

    /// Tear down all live entities
    pub fn clear(&mut self) {
        self.hazards.clear();
        self.ramps.clear();
        self.collectibles.clear();
    }

    /// Hazards whose z lies within [z_min, z_max]
    pub fn hazards_in_range(&self, z_min: f32, z_max: f32) -> impl Iterator<Item = &Hazard> {
        self.hazards
            .iter()
            .filter(move |h| h.position.z >= z_min && h.position.z <= z_max)
    }
}
