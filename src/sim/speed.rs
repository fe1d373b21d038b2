//! Forward speed curve
//!
//! Base speed climbs each tick with an acceleration that tapers as it nears
//! the cap, so the run approaches max speed asymptotically. Nitro multiplies
//! the base; the effective speed is always clamped to the cap.

use serde::{Deserialize, Serialize};

use crate::config::SpeedTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedModel {
    tuning: SpeedTuning,
    base_speed: f32,
    nitro: bool,
}

impl SpeedModel {
    pub fn new(tuning: SpeedTuning) -> Self {
        let base_speed = tuning.base;
        Self {
            tuning,
            base_speed,
            nitro: false,
        }
    }

    /// Effective forward speed this tick
    pub fn current_speed(&self) -> f32 {
        let multiplier = if self.nitro {
            self.tuning.nitro_multiplier
        } else {
            1.0
        };
        (self.base_speed * multiplier).min(self.tuning.max)
    }

    /// Acceleration for this tick, tapering to zero at the cap
    pub fn current_acceleration(&self) -> f32 {
        self.tuning.acceleration * (1.0 - self.current_speed() / self.tuning.max)
    }

    /// Advance the base speed one tick (call only while the vehicle is alive)
    pub fn tick(&mut self) {
        if self.base_speed < self.tuning.base {
            self.base_speed = self.tuning.base;
        }
        self.base_speed += self.current_acceleration();
    }

    pub fn set_nitro(&mut self, enabled: bool) {
        self.nitro = enabled;
    }

    #[inline]
    pub fn nitro_enabled(&self) -> bool {
        self.nitro
    }

    /// Return the base speed to its floor and drop nitro
    pub fn reset(&mut self) {
        self.base_speed = self.tuning.base;
        self.nitro = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SpeedModel {
        SpeedModel::new(SpeedTuning::default())
    }

    #[test]
    fn test_nitro_multiplies_and_caps() {
        let mut m = model();
        assert_eq!(m.current_speed(), 0.5);
        m.set_nitro(true);
        assert_eq!(m.current_speed(), 1.0);
        // Drive the base near the cap; nitro must never exceed it
        for _ in 0..20_000 {
            m.tick();
        }
        assert!(m.current_speed() <= 3.0);
    }

    #[test]
    fn test_speed_approaches_max_asymptotically() {
        let mut m = model();
        let mut last = m.current_speed();
        for _ in 0..1000 {
            m.tick();
            let now = m.current_speed();
            assert!(now >= last);
            assert!(now < 3.0);
            last = now;
        }
    }

    #[test]
    fn test_reset_returns_to_floor() {
        let mut m = model();
        m.set_nitro(true);
        for _ in 0..500 {
            m.tick();
        }
        m.reset();
        assert_eq!(m.current_speed(), 0.5);
        assert!(!m.nitro_enabled());
    }
}
