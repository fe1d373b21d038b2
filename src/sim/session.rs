//! Game session: the owned simulation context
//!
//! One `GameSession` owns every service object (lane field, speed model,
//! vehicle, track entities, spawner, contact tracker) and threads them
//! through a fixed per-tick order: speed read -> spawner/entity advance ->
//! vehicle kinematics or fragment integration -> contact protocol. There is
//! no global state; independent sessions can run side by side.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, ContactTracker, danger_level};
use super::entities::TrackEntities;
use super::lane::LaneField;
use super::spawn::{SpawnPattern, SpawnScheduler};
use super::speed::SpeedModel;
use super::vehicle::Vehicle;
use crate::config::Tuning;
use crate::consts::{COLLISION_COOLDOWN_SECS, SIM_DT};

/// Session phase, driven by the game-state collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Discrete input commands, each mapping 1:1 to a session method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    NitroOn,
    NitroOff,
    Pause,
    Resume,
    Restart,
    ReturnToMenu,
}

/// Read surface for the HUD collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Current speed scaled x100 for display
    pub speed_display: f32,
    pub lane: usize,
    /// Proximity danger in [0, 1]
    pub danger: f32,
    pub score: u64,
    pub best: u64,
    pub nitro: bool,
}

/// Read surface for the camera collaborator
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub destroyed: bool,
    /// Framing target while destroyed
    pub fragment_centroid: Option<Vec3>,
}

/// A renderable transform
#[derive(Debug, Clone, Copy)]
pub struct ScenePose {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Read surface for the scene/rendering collaborator. The core never issues
/// draw calls; this is everything a renderer needs per frame.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub vehicle: ScenePose,
    pub vehicle_visible: bool,
    pub hazards: Vec<ScenePose>,
    pub ramps: Vec<ScenePose>,
    pub collectibles: Vec<ScenePose>,
    pub fragments: Vec<ScenePose>,
}

pub struct GameSession {
    tuning: Tuning,
    phase: SessionPhase,

    lanes: LaneField,
    speed: SpeedModel,
    vehicle: Vehicle,
    track: TrackEntities,
    spawner: SpawnScheduler,
    contacts: ContactTracker,

    rng: Pcg32,
    seed: u64,
    score: f64,
    best: u64,
    ticks: u64,
}

impl GameSession {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let lanes = LaneField::new(&tuning.track.lanes, tuning.track.edge_offset);
        let speed = SpeedModel::new(tuning.speed.clone());
        let vehicle = Vehicle::new(tuning.vehicle.clone(), tuning.destruction.clone());
        let spawner = SpawnScheduler::new(
            tuning.spawn.clone(),
            tuning.track.clone(),
            &tuning.vehicle,
        );
        let cooldown_ticks = (COLLISION_COOLDOWN_SECS / SIM_DT).round() as u32;

        Self {
            phase: SessionPhase::Menu,
            lanes,
            speed,
            vehicle,
            track: TrackEntities::default(),
            spawner,
            contacts: ContactTracker::new(cooldown_ticks),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            score: 0.0,
            best: 0,
            ticks: 0,
            tuning,
        }
    }

    // === Commands (input collaborator surface) ===

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Jump => self.jump(),
            Command::NitroOn => self.set_nitro(true),
            Command::NitroOff => self.set_nitro(false),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
            Command::ReturnToMenu => self.return_to_menu(),
        }
    }

    pub fn move_left(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.vehicle.move_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.vehicle.move_right(self.lanes.lane_count());
        }
    }

    pub fn jump(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.vehicle.start_jump();
        }
    }

    pub fn set_nitro(&mut self, enabled: bool) {
        self.speed.set_nitro(enabled);
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.phase = SessionPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Playing;
        }
    }

    /// Start (or restart) a round: full reset, then Playing
    pub fn restart(&mut self) {
        self.reset();
        self.phase = SessionPhase::Playing;
        log::info!("round started (seed {})", self.seed);
    }

    pub fn return_to_menu(&mut self) {
        self.phase = SessionPhase::Menu;
    }

    /// Tear down all live entities, fragments and timers; keep the session
    /// context (lane field and speed model are reset, not recreated)
    pub fn reset(&mut self) {
        self.speed.reset();
        self.vehicle.reset();
        self.track.clear();
        self.spawner.reset();
        self.contacts.reset();
        self.score = 0.0;
        self.ticks = 0;
    }

    // === Per-tick update ===

    /// Advance the simulation one fixed timestep.
    ///
    /// Only Playing runs the full pipeline. GameOver keeps integrating the
    /// destruction fragments so the wreck settles on screen; Menu and Paused
    /// do nothing.
    pub fn tick(&mut self, dt: f32) {
        match self.phase {
            SessionPhase::Playing => {}
            SessionPhase::GameOver => {
                self.vehicle.tick(&self.lanes);
                return;
            }
            _ => return,
        }

        self.ticks += 1;

        let speed = self.speed.current_speed();
        if !self.vehicle.is_destroyed() {
            self.speed.tick();

            self.track.advance(speed);
            self.spawner
                .tick(dt, speed, &self.lanes, &mut self.track, &mut self.rng);
        }

        self.vehicle.tick(&self.lanes);

        if !self.vehicle.is_destroyed() {
            match self.contacts.check(&self.vehicle, &mut self.track) {
                Contact::Hazard { impact } => {
                    self.vehicle.destroy(Some(impact), &mut self.rng);
                    self.end_round();
                    return;
                }
                Contact::Ramp { impact } => {
                    log::debug!("ramp activated at z={:.1}", impact.z);
                    self.vehicle.start_jump();
                }
                Contact::None => {}
            }

            let collected = self.contacts.collect(&self.vehicle, &mut self.track);
            if collected > 0.0 {
                self.add_score(collected);
            }
        }
    }

    fn end_round(&mut self) {
        self.phase = SessionPhase::GameOver;
        let final_score = self.score() as u64;
        if final_score > self.best {
            self.best = final_score;
        }
        log::info!("game over: score {final_score}, best {}", self.best);
    }

    fn add_score(&mut self, amount: f32) {
        self.score += f64::from(amount);
        let floored = self.score() as u64;
        if floored > self.best {
            self.best = floored;
        }
    }

    // === Read surfaces ===

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            speed_display: self.speed.current_speed() * 100.0,
            lane: self.vehicle.lane,
            danger: danger_level(&self.vehicle, &self.track.hazards),
            score: self.score() as u64,
            best: self.best,
            nitro: self.speed.nitro_enabled(),
        }
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView {
            position: self.vehicle.position,
            yaw: self.vehicle.yaw,
            pitch: self.vehicle.pitch,
            destroyed: self.vehicle.is_destroyed(),
            fragment_centroid: self.vehicle.fragment_centroid(),
        }
    }

    pub fn scene(&self) -> SceneSnapshot {
        let still = |position: Vec3| ScenePose {
            position,
            rotation: Vec3::ZERO,
        };
        SceneSnapshot {
            vehicle: ScenePose {
                position: self.vehicle.position,
                rotation: Vec3::new(self.vehicle.pitch, self.vehicle.yaw, 0.0),
            },
            vehicle_visible: !self.vehicle.is_destroyed(),
            hazards: self.track.hazards.iter().map(|h| still(h.position)).collect(),
            ramps: self.track.ramps.iter().map(|r| still(r.position)).collect(),
            collectibles: self
                .track
                .collectibles
                .iter()
                .map(|c| still(c.position))
                .collect(),
            fragments: self
                .vehicle
                .fragments()
                .iter()
                .map(|f| ScenePose {
                    position: f.position,
                    rotation: f.rotation,
                })
                .collect(),
        }
    }

    /// Rebuild the lane field. Everything positioned off the old lanes is
    /// stale, so all live track entities are discarded with it.
    pub fn reconfigure_lanes(&mut self, lanes: &[f32], edge_offset: f32) {
        self.lanes.rebuild(lanes, edge_offset);
        self.track.clear();
        let lane_count = self.lanes.lane_count();
        if lane_count > 0 && self.vehicle.lane >= lane_count {
            self.vehicle.lane = lane_count - 1;
        }
    }

    /// Scripted spawn layout, outside the normal cadence
    pub fn spawn_pattern(&mut self, pattern: SpawnPattern, z: f32, spacing: f32) {
        self.spawner.spawn_pattern(
            pattern,
            z,
            spacing,
            &self.lanes,
            &mut self.track,
            &mut self.rng,
        );
    }

    // === Accessors ===

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score.floor()
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.best
    }

    #[inline]
    pub fn current_speed(&self) -> f32 {
        self.speed.current_speed()
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn lanes(&self) -> &LaneField {
        &self.lanes
    }

    #[inline]
    pub fn track(&self) -> &TrackEntities {
        &self.track
    }

    /// Mutable track access for scripted set pieces and tests
    pub fn track_mut(&mut self) -> &mut TrackEntities {
        &mut self.track
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entities::Hazard;

    fn session() -> GameSession {
        let mut s = GameSession::new(1234, Tuning::default());
        s.restart();
        s
    }

    #[test]
    fn test_move_left_twice_settles_on_outer_lane() {
        let mut s = session();
        assert_eq!(s.vehicle().lane, 2);
        assert_eq!(s.vehicle().position.x, 0.0);

        s.apply(Command::MoveLeft);
        s.apply(Command::MoveLeft);
        assert_eq!(s.vehicle().lane, 0);

        let mut last_x = s.vehicle().position.x;
        for _ in 0..120 {
            s.tick(SIM_DT);
            if s.phase() != SessionPhase::Playing {
                // A spawned hazard reached the vehicle; x easing is done by then
                break;
            }
            assert!(s.vehicle().position.x <= last_x + 1e-6);
            last_x = s.vehicle().position.x;
        }
        assert!((last_x - (-4.0)).abs() < 0.1, "x was {last_x}");
    }

    #[test]
    fn test_hazard_contact_destroys_and_ends_round() {
        let mut s = session();
        let pos = s.vehicle().position;
        s.track_mut()
            .hazards
            .push(Hazard::new(2, pos, Vec3::new(1.8, 0.5, 1.2)));

        s.tick(SIM_DT);
        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert!(s.vehicle().is_destroyed());
        assert!(!s.vehicle().fragments().is_empty());
    }

    #[test]
    fn test_fragments_keep_settling_after_game_over() {
        let mut s = session();
        let pos = s.vehicle().position;
        s.track_mut()
            .hazards
            .push(Hazard::new(2, pos, Vec3::new(1.8, 0.5, 1.2)));
        s.tick(SIM_DT);
        assert_eq!(s.phase(), SessionPhase::GameOver);

        let before: Vec<Vec3> = s.vehicle().fragments().iter().map(|f| f.position).collect();
        s.tick(SIM_DT);
        let after: Vec<Vec3> = s.vehicle().fragments().iter().map(|f| f.position).collect();
        assert_ne!(before, after, "fragments froze after game over");
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut s = session();
        let pos = s.vehicle().position;
        s.track_mut()
            .hazards
            .push(Hazard::new(2, pos, Vec3::new(1.8, 0.5, 1.2)));
        s.tick(SIM_DT);
        assert_eq!(s.phase(), SessionPhase::GameOver);

        s.apply(Command::Restart);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert!(!s.vehicle().is_destroyed());
        assert!(s.vehicle().fragments().is_empty());
        assert!(s.track().hazards.is_empty());
        assert_eq!(s.hud().score, 0);
        assert_eq!(s.current_speed(), 0.5);
    }

    #[test]
    fn test_pause_freezes_the_simulation() {
        let mut s = session();
        for _ in 0..5 {
            s.tick(SIM_DT);
        }
        s.apply(Command::Pause);
        assert_eq!(s.phase(), SessionPhase::Paused);

        let ticks = s.ticks();
        let hazards = s.track().hazards.len();
        for _ in 0..10 {
            s.tick(SIM_DT);
        }
        assert_eq!(s.ticks(), ticks);
        assert_eq!(s.track().hazards.len(), hazards);

        s.apply(Command::Resume);
        s.tick(SIM_DT);
        assert_eq!(s.ticks(), ticks + 1);
    }

    #[test]
    fn test_nitro_doubles_displayed_speed() {
        let mut s = session();
        let base = s.hud().speed_display;
        s.apply(Command::NitroOn);
        assert!((s.hud().speed_display - base * 2.0).abs() < 1.0);
        assert!(s.hud().nitro);
        s.apply(Command::NitroOff);
        assert!(!s.hud().nitro);
    }

    #[test]
    fn test_collecting_coins_scores() {
        let mut s = session();
        let pos = s.vehicle().position;
        s.track_mut()
            .collectibles
            .push(crate::sim::Collectible::new(2, pos, 0.45, 10.0));
        s.tick(SIM_DT);
        assert_eq!(s.hud().score, 10);
        assert!(s.track().collectibles.is_empty());
        assert_eq!(s.best(), 10);
    }

    #[test]
    fn test_commands_ignored_outside_playing() {
        let mut s = GameSession::new(7, Tuning::default());
        assert_eq!(s.phase(), SessionPhase::Menu);
        s.apply(Command::MoveLeft);
        assert_eq!(s.vehicle().lane, 2);
        s.tick(SIM_DT);
        assert_eq!(s.ticks(), 0);
    }

    #[test]
    fn test_hud_scales_speed_for_display() {
        let s = session();
        assert!((s.hud().speed_display - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_camera_view_tracks_wreck_centroid() {
        let mut s = session();
        assert!(s.camera_view().fragment_centroid.is_none());
        let pos = s.vehicle().position;
        s.track_mut()
            .hazards
            .push(Hazard::new(2, pos, Vec3::new(1.8, 0.5, 1.2)));
        s.tick(SIM_DT);
        let view = s.camera_view();
        assert!(view.destroyed);
        assert!(view.fragment_centroid.is_some());
    }

    #[test]
    fn test_reconfigure_lanes_discards_dependent_state() {
        let mut s = session();
        let pos = s.vehicle().position;
        s.track_mut()
            .hazards
            .push(Hazard::new(2, pos, Vec3::new(1.8, 0.5, 1.2)));
        s.reconfigure_lanes(&[-1.5, 1.5], 0.5);
        assert!(s.track().hazards.is_empty());
        assert_eq!(s.lanes().lane_count(), 2);
        assert!(s.vehicle().lane < 2);
        assert_eq!(s.lanes().bounds(), (-2.0, 2.0));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session();
        let mut b = session();
        for _ in 0..60 {
            a.tick(SIM_DT);
        }
        // b never ticked; a's entities must not leak into it
        assert!(b.track().hazards.is_empty());
        b.tick(SIM_DT);
        assert_eq!(b.ticks(), 1);
    }
}
