//! Data-driven game tuning
//!
//! Every number the simulation runs on lives here, grouped per subsystem.
//! Defaults are the shipped balance; a full [`Tuning`] can be round-tripped
//! through JSON for experiments.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Vehicle body, steering and jump tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleTuning {
    /// Lane the vehicle occupies at session start
    pub start_lane: usize,
    /// World position at session start (y is the driving ground height)
    pub start_position: Vec3,

    /// Full extents of the visual body (union of the hull cubes)
    pub body_size: Vec3,
    /// Offset from the vehicle origin to the body box center
    pub body_center: Vec3,

    // Hitbox derivation (see collider::HitboxShrink)
    pub collider_shrink_x: f32,
    pub collider_shrink_z: f32,
    pub collider_y_offset: f32,
    pub collider_height_factor: f32,

    /// Per-tick fraction of the remaining lateral error closed each tick
    pub lane_change_speed: f32,
    /// Yaw tilt cap while changing lanes (radians)
    pub max_tilt: f32,
    /// Per-tick blend rate for the turn tilt
    pub tilt_smoothing: f32,
    /// Per-tick blend rate for the jump pitch cue
    pub pitch_smoothing: f32,

    /// Apex height of a jump (world units)
    pub jump_height: f32,
    /// Per-tick gravity used by the jump integrator
    pub gravity: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            start_lane: 2,
            start_position: Vec3::new(0.0, 0.25, 3.0),
            body_size: Vec3::new(1.25, 0.25, 1.69),
            body_center: Vec3::new(0.0, 0.17, 0.0),
            collider_shrink_x: 0.9,
            collider_shrink_z: 0.9,
            collider_y_offset: 0.0,
            collider_height_factor: 0.8,
            lane_change_speed: 0.2,
            max_tilt: 0.3,
            tilt_smoothing: 0.2,
            pitch_smoothing: 0.2,
            jump_height: 2.0,
            gravity: 0.015,
        }
    }
}

/// Destruction and fragment physics tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestructionTuning {
    /// Lateral scatter speed for fragments with no impact point
    pub explosion_force: f32,
    /// Upward scatter speed for fragments with no impact point
    pub explosion_upward: f32,
    /// Angular velocity scale assigned at detach (radians per tick)
    pub fragment_spin: f32,
    /// Per-tick gravity applied to fragments
    pub fragment_gravity: f32,

    /// Road surface height fragments bounce on
    pub ground_y: f32,
    /// Vertical velocity retained after a ground bounce
    pub bounce: f32,
    /// Horizontal velocity retained after a ground bounce
    pub friction: f32,
    /// Push strength when two fragments overlap
    pub repulsion: f32,
    /// Separation below which fragments repel each other
    pub min_separation: f32,

    /// Fragments falling below this height leave the simulation
    pub removal_height: f32,
}

impl Default for DestructionTuning {
    fn default() -> Self {
        Self {
            explosion_force: 0.3,
            explosion_upward: 0.2,
            fragment_spin: 0.05,
            fragment_gravity: 0.005,
            ground_y: 0.0,
            bounce: 0.4,
            friction: 0.85,
            repulsion: 0.2,
            min_separation: 0.5,
            removal_height: -5.0,
        }
    }
}

/// Track layout and entity geometry tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackTuning {
    /// Lane center x-positions, left to right
    pub lanes: Vec<f32>,
    /// Extra track width past the outermost lanes
    pub edge_offset: f32,

    pub hazard_size: Vec3,
    pub hazard_y: f32,
    pub ramp_size: Vec3,
    pub ramp_y: f32,
    pub coin_radius: f32,
    pub coin_y: f32,
    pub coin_value: f32,
}

impl Default for TrackTuning {
    fn default() -> Self {
        Self {
            lanes: vec![-4.0, -2.0, 0.0, 2.0, 4.0],
            edge_offset: 0.0,
            hazard_size: Vec3::new(1.8, 0.5, 1.2),
            hazard_y: 0.25,
            ramp_size: Vec3::new(2.0, 0.2, 2.0),
            ramp_y: 0.25,
            coin_radius: 0.45,
            coin_y: 0.2,
            coin_value: 10.0,
        }
    }
}

/// Spawn cadence and row composition tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Hazard-row cadence at standstill (seconds)
    pub hazard_interval: f32,
    /// Hard floor the hazard cadence never tightens past
    pub hazard_interval_floor: f32,
    /// Seconds shaved off the hazard cadence per unit of speed
    pub hazard_speed_scale: f32,

    /// Collectible cadence at standstill (seconds)
    pub coin_interval: f32,
    pub coin_interval_floor: f32,
    pub coin_speed_scale: f32,

    /// Chance a hazard lane also gets a ramp placed ahead of the row
    pub ramp_chance: f64,
    /// Ramp lead distance range, scaled by speed
    pub ramp_lead_min: f32,
    pub ramp_lead_max: f32,
    /// Speed at which the ramp lead reaches its maximum
    pub speed_for_max_lead: f32,
    /// Number of collectibles sampled along a ramp's jump arc
    pub arc_samples: usize,

    /// Chance a lone collectible extends into a chain
    pub chain_chance: f64,
    /// Extra collectibles in a chain
    pub chain_len: usize,
    /// Forward spacing between chained collectibles
    pub chain_spacing: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            hazard_interval: 0.5,
            hazard_interval_floor: 0.3,
            hazard_speed_scale: 0.005,
            coin_interval: 0.3,
            coin_interval_floor: 0.2,
            coin_speed_scale: 0.002,
            ramp_chance: 0.1,
            ramp_lead_min: 2.0,
            ramp_lead_max: 8.0,
            speed_for_max_lead: 3.0,
            arc_samples: 6,
            chain_chance: 0.3,
            chain_len: 3,
            chain_spacing: 1.2,
        }
    }
}

/// Forward speed curve tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedTuning {
    /// Cruising speed floor
    pub base: f32,
    /// Multiplier while nitro is held
    pub nitro_multiplier: f32,
    /// Effective speed cap
    pub max: f32,
    /// Per-tick base-speed gain, tapered toward the cap
    pub acceleration: f32,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            base: 0.5,
            nitro_multiplier: 2.0,
            max: 3.0,
            acceleration: 0.001,
        }
    }
}

/// Complete tuning set for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tuning {
    pub vehicle: VehicleTuning,
    pub destruction: DestructionTuning,
    pub track: TrackTuning,
    pub spawn: SpawnTuning,
    pub speed: SpeedTuning,
}
