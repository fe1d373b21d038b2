//! Vehicle kinematics and destruction entry point
//!
//! Lateral motion is an exponential approach toward the target lane with a
//! proportional turn tilt; vertical motion is the closed-form jump
//! integrator. Once destroyed, the vehicle stops steering entirely and only
//! its fragments keep simulating.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collider::{Aabb, HitboxShrink};
use super::fragments::{self, Fragment};
use super::jump::JumpState;
use super::lane::LaneField;
use crate::config::{DestructionTuning, VehicleTuning};
use crate::ease_toward;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    tuning: VehicleTuning,
    destruction: DestructionTuning,

    pub lane: usize,
    pub position: Vec3,
    /// Turn tilt around the forward axis convention (lane-change lean)
    pub yaw: f32,
    /// Nose-up/nose-down cue while jumping
    pub pitch: f32,
    pitch_target: f32,

    jump: JumpState,
    destroyed: bool,
    fragments: Vec<Fragment>,
    hitbox: Aabb,
}

impl Vehicle {
    pub fn new(tuning: VehicleTuning, destruction: DestructionTuning) -> Self {
        let position = tuning.start_position;
        let jump = JumpState::new(tuning.gravity, tuning.jump_height, position.y);
        let mut vehicle = Self {
            lane: tuning.start_lane,
            position,
            yaw: 0.0,
            pitch: 0.0,
            pitch_target: 0.0,
            jump,
            destroyed: false,
            fragments: Vec::new(),
            hitbox: Aabb::new(Vec3::ZERO, Vec3::ZERO),
            tuning,
            destruction,
        };
        vehicle.refresh_hitbox();
        vehicle
    }

    /// Steer one lane left; no-op at the leftmost lane or when destroyed
    pub fn move_left(&mut self) {
        if self.lane > 0 && !self.destroyed {
            self.lane -= 1;
        }
    }

    /// Steer one lane right; no-op at the rightmost lane or when destroyed
    pub fn move_right(&mut self, lane_count: usize) {
        if self.lane + 1 < lane_count && !self.destroyed {
            self.lane += 1;
        }
    }

    /// Launch a jump; no-op while airborne or destroyed
    pub fn start_jump(&mut self) {
        if self.destroyed {
            return;
        }
        self.jump.start();
        if self.jump.airborne {
            self.pitch_target = 0.2;
        }
    }

    /// One simulation tick.
    ///
    /// Destroyed vehicles only integrate their fragments; everything else is
    /// lateral easing, jump ballistics and the hitbox refresh.
    pub fn tick(&mut self, lanes: &LaneField) {
        if self.destroyed {
            fragments::integrate(&mut self.fragments, &self.destruction);
            return;
        }

        let target_x = lanes.position_clamped(self.lane);
        let delta_x = target_x - self.position.x;

        // A NaN target would poison position and yaw; skip this tick instead
        if !delta_x.is_nan() {
            self.position.x += delta_x * self.tuning.lane_change_speed;
            self.yaw = ease_toward(
                self.yaw,
                -delta_x * self.tuning.max_tilt,
                self.tuning.tilt_smoothing,
            );
        }

        if self.jump.airborne {
            self.jump.step();
            self.position.y = self.jump.y;
            self.pitch_target = if !self.jump.airborne {
                0.0
            } else if self.jump.velocity > 0.0 {
                0.2
            } else {
                -0.1
            };
        }
        self.pitch = ease_toward(self.pitch, self.pitch_target, self.tuning.pitch_smoothing);

        self.refresh_hitbox();
    }

    /// Break the hull into fragments. Idempotent: a destroyed vehicle keeps
    /// its existing fragment set.
    pub fn destroy<R: Rng>(&mut self, impact: Option<Vec3>, rng: &mut R) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.fragments = fragments::spawn_fragments(
            self.position,
            self.yaw,
            self.pitch,
            impact,
            &self.destruction,
            rng,
        );
        log::info!(
            "vehicle destroyed at z={:.1}, {} fragments",
            self.position.z,
            self.fragments.len()
        );
    }

    /// Restore the start-of-round state, dropping all fragments
    pub fn reset(&mut self) {
        self.lane = self.tuning.start_lane;
        self.position = self.tuning.start_position;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.pitch_target = 0.0;
        self.jump.reset();
        self.destroyed = false;
        self.fragments.clear();
        self.refresh_hitbox();
    }

    fn refresh_hitbox(&mut self) {
        let bounds = Aabb::from_center_size(
            self.position + self.tuning.body_center,
            self.tuning.body_size,
        );
        let shrink = HitboxShrink {
            shrink_x: self.tuning.collider_shrink_x,
            shrink_z: self.tuning.collider_shrink_z,
            y_offset: self.tuning.collider_y_offset,
            height_factor: self.tuning.collider_height_factor,
        };
        self.hitbox = shrink.apply(&bounds);
    }

    #[inline]
    pub fn hitbox(&self) -> &Aabb {
        &self.hitbox
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump.airborne
    }

    #[inline]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Camera framing target while destroyed
    pub fn fragment_centroid(&self) -> Option<Vec3> {
        fragments::centroid(&self.fragments)
    }
}
