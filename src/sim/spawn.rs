//! Time-accumulator spawn scheduling
//!
//! Two independent accumulators drive hazard rows and collectibles. Each
//! fires when it crosses an interval that tightens with speed down to a hard
//! floor, then resets to zero - firing never "catches up" after a frame
//! hitch. Every hazard row keeps exactly one randomly chosen lane empty so a
//! safe path always exists.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Collectible, Hazard, Ramp, TrackEntities};
use super::jump::sample_trajectory;
use super::lane::LaneField;
use crate::config::{SpawnTuning, TrackTuning, VehicleTuning};
use crate::consts::SPAWN_DEPTH;

/// Layouts for explicit scripted spawns, outside the normal cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPattern {
    /// One hazard in every lane at the same row
    Wall,
    /// One hazard per lane, each a step deeper than the last
    Zigzag,
    /// A random handful spread over random lanes
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    tuning: SpawnTuning,
    track: TrackTuning,
    /// Jump constants mirrored from the vehicle so ramp coin chains follow
    /// the arc the vehicle will actually fly
    jump_gravity: f32,
    jump_height: f32,

    hazard_timer: f32,
    coin_timer: f32,
}

impl SpawnScheduler {
    pub fn new(tuning: SpawnTuning, track: TrackTuning, vehicle: &VehicleTuning) -> Self {
        Self {
            tuning,
            track,
            jump_gravity: vehicle.gravity,
            jump_height: vehicle.jump_height,
            hazard_timer: 0.0,
            coin_timer: 0.0,
        }
    }

    /// Hazard-row cadence at the given speed, never below the floor
    pub fn hazard_interval(&self, speed: f32) -> f32 {
        (self.tuning.hazard_interval - speed * self.tuning.hazard_speed_scale)
            .max(self.tuning.hazard_interval_floor)
    }

    /// Collectible cadence at the given speed, never below the floor
    pub fn coin_interval(&self, speed: f32) -> f32 {
        (self.tuning.coin_interval - speed * self.tuning.coin_speed_scale)
            .max(self.tuning.coin_interval_floor)
    }

    /// Advance both accumulators and fire whatever is due
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        speed: f32,
        lanes: &LaneField,
        track: &mut TrackEntities,
        rng: &mut R,
    ) {
        self.hazard_timer += dt;
        if self.hazard_timer >= self.hazard_interval(speed) {
            self.spawn_hazard_row(speed, lanes, track, rng);
            self.hazard_timer = 0.0;
        }

        self.coin_timer += dt;
        if self.coin_timer >= self.coin_interval(speed) {
            self.spawn_collectibles(lanes, track, rng);
            self.coin_timer = 0.0;
        }
    }

    /// One hazard row: a random lane stays empty, every other lane gets a
    /// hazard, and each of those lanes has a small chance of a ramp placed
    /// ahead with a coin chain along its jump arc.
    fn spawn_hazard_row<R: Rng>(
        &self,
        speed: f32,
        lanes: &LaneField,
        track: &mut TrackEntities,
        rng: &mut R,
    ) {
        let lane_count = lanes.lane_count();
        if lane_count == 0 {
            return;
        }
        let empty_lane = rng.random_range(0..lane_count);

        for lane in 0..lane_count {
            if lane == empty_lane {
                continue;
            }

            if rng.random_bool(self.tuning.ramp_chance) {
                let ramp_z = SPAWN_DEPTH + self.ramp_lead(speed);
                self.spawn_ramp(lane, ramp_z, speed, lanes, track);
            }

            self.spawn_hazard(lane, SPAWN_DEPTH, lanes, track);
        }
        log::debug!("hazard row spawned, empty lane {empty_lane}");
    }

    fn spawn_hazard(&self, lane: usize, z: f32, lanes: &LaneField, track: &mut TrackEntities) {
        let Ok(x) = lanes.position_of(lane) else {
            return;
        };
        // Never double-stack a row slot
        let occupied = track
            .hazards
            .iter()
            .any(|h| h.lane == lane && (h.position.z - z).abs() < 0.1);
        if occupied {
            return;
        }
        let position = Vec3::new(x, self.track.hazard_y, z);
        track
            .hazards
            .push(Hazard::new(lane, position, self.track.hazard_size));
    }

    fn spawn_ramp(
        &self,
        lane: usize,
        z: f32,
        speed: f32,
        lanes: &LaneField,
        track: &mut TrackEntities,
    ) {
        let Ok(x) = lanes.position_of(lane) else {
            return;
        };
        let position = Vec3::new(x, self.track.ramp_y, z);
        track
            .ramps
            .push(Ramp::new(lane, position, self.track.ramp_size));
        self.spawn_arc_chain(lane, x, z, speed, track);
    }

    /// Coins along the jump arc the ramp will launch, so clearing it pays
    fn spawn_arc_chain(&self, lane: usize, x: f32, ramp_z: f32, speed: f32, track: &mut TrackEntities) {
        let points = sample_trajectory(self.jump_gravity, self.jump_height, speed, 60);
        if points.is_empty() || self.tuning.arc_samples == 0 {
            return;
        }

        let stride = (points.len() / self.tuning.arc_samples).max(1);
        for point in points.iter().step_by(stride).take(self.tuning.arc_samples) {
            let position = Vec3::new(x, self.track.coin_y + point.y, ramp_z + point.z_offset);
            track.collectibles.push(Collectible::new(
                lane,
                position,
                self.track.coin_radius,
                self.track.coin_value,
            ));
        }
    }

    /// Collectible-only fire: one coin on a random lane, sometimes a chain
    fn spawn_collectibles<R: Rng>(
        &self,
        lanes: &LaneField,
        track: &mut TrackEntities,
        rng: &mut R,
    ) {
        let lane_count = lanes.lane_count();
        if lane_count == 0 {
            return;
        }
        let lane = rng.random_range(0..lane_count);
        let Ok(x) = lanes.position_of(lane) else {
            return;
        };

        self.push_coin(lane, x, SPAWN_DEPTH, track);

        if rng.random_bool(self.tuning.chain_chance) {
            for i in 1..=self.tuning.chain_len {
                self.push_coin(
                    lane,
                    x,
                    SPAWN_DEPTH - i as f32 * self.tuning.chain_spacing,
                    track,
                );
            }
        }
    }

    fn push_coin(&self, lane: usize, x: f32, z: f32, track: &mut TrackEntities) {
        track.collectibles.push(Collectible::new(
            lane,
            Vec3::new(x, self.track.coin_y, z),
            self.track.coin_radius,
            self.track.coin_value,
        ));
    }

    /// Scripted spawn layouts (debug tooling and set pieces)
    pub fn spawn_pattern<R: Rng>(
        &self,
        pattern: SpawnPattern,
        z: f32,
        spacing: f32,
        lanes: &LaneField,
        track: &mut TrackEntities,
        rng: &mut R,
    ) {
        let lane_count = lanes.lane_count();
        match pattern {
            SpawnPattern::Wall => {
                for lane in 0..lane_count {
                    self.spawn_hazard(lane, z, lanes, track);
                }
            }
            SpawnPattern::Zigzag => {
                for lane in 0..lane_count {
                    self.spawn_hazard(lane, z - lane as f32 * spacing, lanes, track);
                }
            }
            SpawnPattern::Random => {
                if lane_count == 0 {
                    return;
                }
                let count = 2 + rng.random_range(0..3);
                for i in 0..count {
                    let lane = rng.random_range(0..lane_count);
                    self.spawn_hazard(lane, z - i as f32 * spacing, lanes, track);
                }
            }
        }
    }

    fn ramp_lead(&self, speed: f32) -> f32 {
        let factor = (speed / self.tuning.speed_for_max_lead).min(1.0);
        self.tuning.ramp_lead_min + (self.tuning.ramp_lead_max - self.tuning.ramp_lead_min) * factor
    }

    /// Zero both accumulators (round reset)
    pub fn reset(&mut self) {
        self.hazard_timer = 0.0;
        self.coin_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scheduler() -> SpawnScheduler {
        SpawnScheduler::new(
            SpawnTuning::default(),
            TrackTuning::default(),
            &VehicleTuning::default(),
        )
    }

    fn lanes() -> LaneField {
        LaneField::new(&[-4.0, -2.0, 0.0, 2.0, 4.0], 0.0)
    }

    #[test]
    fn test_interval_never_below_floor() {
        let s = scheduler();
        for speed in [0.0, 0.5, 3.0, 50.0, 1000.0] {
            assert!(s.hazard_interval(speed) >= 0.3);
            assert!(s.coin_interval(speed) >= 0.2);
        }
    }

    #[test]
    fn test_interval_tightens_with_speed() {
        let s = scheduler();
        assert!(s.hazard_interval(3.0) < s.hazard_interval(0.0));
    }

    #[test]
    fn test_row_keeps_exactly_one_lane_empty() {
        let mut s = scheduler();
        let lanes = lanes();
        let mut rng = Pcg32::seed_from_u64(42);

        for _ in 0..20 {
            let mut track = TrackEntities::default();
            s.tick(1.0, 0.5, &lanes, &mut track, &mut rng);

            let occupied: Vec<usize> = track.hazards.iter().map(|h| h.lane).collect();
            assert_eq!(occupied.len(), lanes.lane_count() - 1);
            let empty: Vec<usize> = (0..lanes.lane_count())
                .filter(|lane| !occupied.contains(lane))
                .collect();
            assert_eq!(empty.len(), 1, "exactly one safe lane per row");
            s.reset();
        }
    }

    #[test]
    fn test_accumulator_resets_after_firing() {
        let mut s = scheduler();
        let lanes = lanes();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut track = TrackEntities::default();

        // A huge hitch still fires exactly once, no burst on the next tick
        s.tick(10.0, 0.5, &lanes, &mut track, &mut rng);
        let after_hitch = track.hazards.len();
        s.tick(0.01, 0.5, &lanes, &mut track, &mut rng);
        assert_eq!(track.hazards.len(), after_hitch);
    }

    #[test]
    fn test_duplicate_row_slot_guard() {
        let s = scheduler();
        let lanes = lanes();
        let mut track = TrackEntities::default();
        s.spawn_hazard(2, SPAWN_DEPTH, &lanes, &mut track);
        s.spawn_hazard(2, SPAWN_DEPTH, &lanes, &mut track);
        assert_eq!(track.hazards.len(), 1);
        // A different z in the same lane is fine
        s.spawn_hazard(2, SPAWN_DEPTH - 5.0, &lanes, &mut track);
        assert_eq!(track.hazards.len(), 2);
    }

    #[test]
    fn test_ramp_chain_follows_jump_arc() {
        let s = scheduler();
        let lanes = lanes();
        let mut track = TrackEntities::default();
        s.spawn_ramp(1, SPAWN_DEPTH + 4.0, 1.5, &lanes, &mut track);

        assert_eq!(track.ramps.len(), 1);
        assert!(!track.ramps[0].activated);
        assert_eq!(track.collectibles.len(), SpawnTuning::default().arc_samples);
        for coin in &track.collectibles {
            // Every chained coin hangs in the air along the arc, past the ramp
            assert!(coin.position.y > TrackTuning::default().coin_y);
            assert!(coin.position.z < track.ramps[0].position.z);
            assert_eq!(coin.position.x, -2.0);
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_interval_floor_holds_for_any_speed(speed in 0.0f32..10_000.0) {
            let s = scheduler();
            proptest::prop_assert!(s.hazard_interval(speed) >= 0.3);
            proptest::prop_assert!(s.coin_interval(speed) >= 0.2);
        }
    }

    #[test]
    fn test_wall_pattern_fills_every_lane() {
        let s = scheduler();
        let lanes = lanes();
        let mut track = TrackEntities::default();
        let mut rng = Pcg32::seed_from_u64(9);
        s.spawn_pattern(SpawnPattern::Wall, SPAWN_DEPTH, 4.0, &lanes, &mut track, &mut rng);
        assert_eq!(track.hazards.len(), 5);

        let mut zigzag = TrackEntities::default();
        s.spawn_pattern(SpawnPattern::Zigzag, SPAWN_DEPTH, 4.0, &lanes, &mut zigzag, &mut rng);
        let zs: Vec<f32> = zigzag.hazards.iter().map(|h| h.position.z).collect();
        assert!(zs.windows(2).all(|w| w[1] < w[0]));
    }
}
