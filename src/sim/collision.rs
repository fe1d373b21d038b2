//! Contact detection with a debounced collision protocol
//!
//! The tracker is a two-state machine: Armed tests the vehicle hitbox
//! against hazards (spawn order), then un-activated ramps; a hazard hit arms
//! a tick-counted cooldown during which every test reports no contact. Ramps
//! are one-shot triggers and never enter the cooldown. Collectibles resolve
//! outside the state machine entirely.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collider::ramp_within_reach;
use super::entities::{Hazard, TrackEntities};
use super::vehicle::Vehicle;
use crate::consts::{DANGER_DISTANCE, DANGER_LATERAL};

/// Outcome of one tick's contact test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    None,
    /// Solid hit; the impact point is the hazard's position
    Hazard { impact: Vec3 },
    /// Ramp touched for the first time; expected to launch a jump
    Ramp { impact: Vec3 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactTracker {
    /// Debounce window length, in ticks
    cooldown_ticks: u32,
    cooldown_remaining: u32,
}

impl ContactTracker {
    pub fn new(cooldown_ticks: u32) -> Self {
        Self {
            cooldown_ticks,
            cooldown_remaining: 0,
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Run one tick of the contact protocol. Call exactly once per tick:
    /// the cooldown countdown advances here.
    pub fn check(&mut self, vehicle: &Vehicle, track: &mut TrackEntities) -> Contact {
        if vehicle.is_destroyed() {
            return Contact::None;
        }
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
            return Contact::None;
        }

        let hitbox = vehicle.hitbox();

        for hazard in &track.hazards {
            if hitbox.intersects(&hazard.collider) {
                self.cooldown_remaining = self.cooldown_ticks;
                return Contact::Hazard {
                    impact: hazard.position,
                };
            }
        }

        for ramp in &mut track.ramps {
            if ramp.activated {
                continue;
            }
            if !ramp_within_reach(vehicle.position, ramp.position) {
                continue;
            }
            if hitbox.intersects(&ramp.collider) {
                ramp.activated = true;
                return Contact::Ramp {
                    impact: ramp.position,
                };
            }
        }

        Contact::None
    }

    /// Sweep collectibles against the vehicle; returns the value collected
    /// this tick. Not subject to the cooldown.
    pub fn collect(&self, vehicle: &Vehicle, track: &mut TrackEntities) -> f32 {
        if vehicle.is_destroyed() {
            return 0.0;
        }
        let hitbox = vehicle.hitbox();
        let mut collected = 0.0;
        track.collectibles.retain(|coin| {
            if hitbox.intersects_sphere(&coin.collider) {
                collected += coin.value;
                false
            } else {
                true
            }
        });
        collected
    }

    /// Disarm the cooldown (round reset)
    pub fn reset(&mut self) {
        self.cooldown_remaining = 0;
    }
}

/// Proximity danger score over trailing hazards, for presentation only.
///
/// Only hazards still approaching (z below the vehicle's) count; anything
/// farther than twice the danger distance or more than one unit off-lane is
/// ignored. Weighted 70% forward proximity, 30% lateral. Always in [0, 1].
pub fn danger_level(vehicle: &Vehicle, hazards: &[Hazard]) -> f32 {
    if vehicle.is_destroyed() {
        return 0.0;
    }

    let mut max_danger = 0.0_f32;
    for hazard in hazards {
        if hazard.position.z >= vehicle.position.z {
            continue;
        }
        let z_diff = (hazard.position.z - vehicle.position.z).abs();
        let x_diff = (hazard.position.x - vehicle.position.x).abs();
        if z_diff > DANGER_DISTANCE * 2.0 || x_diff > DANGER_LATERAL {
            continue;
        }

        let danger_by_z = (1.0 - z_diff / DANGER_DISTANCE).max(0.0);
        let danger_by_x = (1.0 - x_diff / DANGER_LATERAL).max(0.0);
        max_danger = max_danger.max(danger_by_z * 0.7 + danger_by_x * 0.3);
    }
    max_danger
}
