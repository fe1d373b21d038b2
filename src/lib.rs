//! Neon Rush - an endless-runner driving game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawning, session state)
//! - `config`: Data-driven tuning
//! - `highscores`: Local leaderboard persistence
//!
//! The simulation is headless: rendering, camera and input collaborators
//! consume the read surfaces on [`sim::GameSession`] and never reach inside.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::Tuning;
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, matching the capped frame loop)
    pub const SIM_DT: f32 = 1.0 / 30.0;

    /// Forward depth at which new track entities appear
    pub const SPAWN_DEPTH: f32 = -60.0;
    /// Entities past this z have left the playfield and are removed
    pub const EXIT_THRESHOLD: f32 = 10.0;

    /// Distance over which a trailing hazard ramps from harmless to maximum danger
    pub const DANGER_DISTANCE: f32 = 30.0;
    /// Lateral window for a hazard to register as dangerous at all
    pub const DANGER_LATERAL: f32 = 1.0;

    /// Contact debounce window after a registered hazard hit
    pub const COLLISION_COOLDOWN_SECS: f32 = 1.0;
}

/// Ease a value toward a target by a fixed per-tick rate (exponential approach)
#[inline]
pub fn ease_toward(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}
