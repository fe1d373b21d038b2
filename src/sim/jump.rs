//! Closed-form jump ballistics
//!
//! A jump is fully determined by (gravity, jump_height): launch velocity is
//! `sqrt(2 * g * h)`, each tick adds velocity to height and gravity to
//! velocity, and landing snaps exactly back to ground level. The spawn
//! scheduler replays the same integrator to lay collectibles along the arc a
//! ramp will actually produce.

use serde::{Deserialize, Serialize};

/// Vertical jump integrator state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JumpState {
    gravity: f32,
    jump_height: f32,
    ground_y: f32,
    pub y: f32,
    pub velocity: f32,
    pub airborne: bool,
}

impl JumpState {
    pub fn new(gravity: f32, jump_height: f32, ground_y: f32) -> Self {
        Self {
            gravity,
            jump_height,
            ground_y,
            y: ground_y,
            velocity: 0.0,
            airborne: false,
        }
    }

    /// Launch; no-op while already airborne
    pub fn start(&mut self) {
        if self.airborne {
            return;
        }
        self.airborne = true;
        self.velocity = (2.0 * self.gravity * self.jump_height).sqrt();
    }

    /// One tick of ballistic integration; snaps to ground on landing
    pub fn step(&mut self) {
        if !self.airborne {
            return;
        }
        self.y += self.velocity;
        self.velocity -= self.gravity;

        if self.y <= self.ground_y {
            self.y = self.ground_y;
            self.velocity = 0.0;
            self.airborne = false;
        }
    }

    pub fn set_ground(&mut self, ground_y: f32) {
        self.ground_y = ground_y;
        if !self.airborne {
            self.y = ground_y;
        }
    }

    pub fn reset(&mut self) {
        self.y = self.ground_y;
        self.velocity = 0.0;
        self.airborne = false;
    }
}

/// One sampled point of a jump arc, relative to the launch position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Height above the ground at this step
    pub y: f32,
    /// Forward offset accumulated since launch (negative = farther away)
    pub z_offset: f32,
}

/// Replay a full jump at the given forward speed and collect the arc.
///
/// Terminates on landing; `max_steps` bounds degenerate tunings where the
/// integrator would stay airborne too long.
pub fn sample_trajectory(
    gravity: f32,
    jump_height: f32,
    forward_speed: f32,
    max_steps: usize,
) -> Vec<TrajectoryPoint> {
    let mut state = JumpState::new(gravity, jump_height, 0.0);
    state.start();

    let mut z = 0.0;
    let mut points = Vec::new();

    for _ in 0..max_steps {
        state.step();
        z -= forward_speed;

        if !state.airborne {
            break;
        }
        points.push(TrajectoryPoint {
            y: state.y,
            z_offset: z,
        });
    }

    points
}
