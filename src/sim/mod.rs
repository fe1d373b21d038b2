//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collider;
pub mod collision;
pub mod entities;
pub mod fragments;
pub mod jump;
pub mod lane;
pub mod session;
pub mod spawn;
pub mod speed;
pub mod vehicle;

pub use collider::{Aabb, Sphere};
pub use collision::{Contact, ContactTracker, danger_level};
pub use entities::{Collectible, Hazard, Ramp, TrackEntities};
pub use fragments::Fragment;
pub use jump::{JumpState, TrajectoryPoint, sample_trajectory};
pub use lane::{LaneError, LaneField};
pub use session::{
    CameraView, Command, GameSession, HudSnapshot, ScenePose, SceneSnapshot, SessionPhase,
};
pub use spawn::{SpawnPattern, SpawnScheduler};
pub use speed::SpeedModel;
pub use vehicle::Vehicle;
