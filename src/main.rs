//! Neon Rush entry point
//!
//! Headless demo runner: drives a session through the capped frame loop with
//! a small autopilot at the wheel, then feeds the leaderboard. Rendering,
//! input and camera collaborators hook into the same read surfaces this
//! runner consumes.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use neon_rush::consts::SIM_DT;
use neon_rush::sim::{Command, GameSession, SessionPhase};
use neon_rush::{HighScores, Tuning};

/// Target frame rate for the cooperative loop
const FPS: f32 = 30.0;

/// Frame-rate cap: frames arriving early are skipped whole, never split into
/// partial steps
struct FrameLimiter {
    frame_time: Duration,
    last: Instant,
}

impl FrameLimiter {
    fn new(fps: f32) -> Self {
        Self {
            frame_time: Duration::from_secs_f32(1.0 / fps),
            last: Instant::now(),
        }
    }

    /// True when a full frame has elapsed; carries the remainder forward so
    /// the cadence does not drift
    fn frame_due(&mut self) -> bool {
        let now = Instant::now();
        let delta = now - self.last;
        if delta < self.frame_time {
            return false;
        }
        let remainder_nanos = delta.as_nanos() % self.frame_time.as_nanos();
        self.last = now - Duration::from_nanos(remainder_nanos as u64);
        true
    }
}

/// Steer toward the lane with the most open road ahead.
///
/// Looks at the nearest approaching hazard per lane and bails to the clearer
/// neighbor when the current lane gets tight.
fn autopilot(session: &GameSession) -> Option<Command> {
    let vehicle = session.vehicle();
    let lane_count = session.lanes().lane_count();
    if lane_count == 0 {
        return None;
    }

    let mut nearest = vec![f32::INFINITY; lane_count];
    for hazard in &session.track().hazards {
        if hazard.position.z < vehicle.position.z {
            let dist = vehicle.position.z - hazard.position.z;
            if dist < nearest[hazard.lane] {
                nearest[hazard.lane] = dist;
            }
        }
    }

    let lane = vehicle.lane;
    let lookahead = 18.0;
    if nearest[lane] > lookahead {
        return None;
    }

    let left = if lane > 0 {
        nearest[lane - 1]
    } else {
        f32::NEG_INFINITY
    };
    let right = if lane + 1 < lane_count {
        nearest[lane + 1]
    } else {
        f32::NEG_INFINITY
    };

    if left <= nearest[lane] && right <= nearest[lane] {
        return None;
    }
    if left > right {
        Some(Command::MoveLeft)
    } else {
        Some(Command::MoveRight)
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Neon Rush starting, seed {seed}");

    let scores_path = Path::new("neon_rush_highscores.json");
    let mut scores = HighScores::load(scores_path);

    let mut session = GameSession::new(seed, Tuning::default());
    session.restart();

    // Skip real-time pacing when driven by scripts/CI
    let fast = std::env::var_os("NEON_RUSH_FAST").is_some();
    let mut limiter = FrameLimiter::new(FPS);
    let max_ticks = (90.0 / SIM_DT) as u64;

    while session.phase() != SessionPhase::GameOver && session.ticks() < max_ticks {
        if !fast && !limiter.frame_due() {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }

        if let Some(command) = autopilot(&session) {
            session.apply(command);
        }
        session.tick(SIM_DT);

        if session.ticks() % 30 == 0 {
            let hud = session.hud();
            log::info!(
                "t={:>4} speed={:>5.1} lane={} danger={:.2} score={}",
                session.ticks(),
                hud.speed_display,
                hud.lane,
                hud.danger,
                hud.score
            );
        }
    }

    // Let the wreck settle so the final camera view is meaningful
    if session.phase() == SessionPhase::GameOver {
        for _ in 0..60 {
            session.tick(SIM_DT);
        }
        if let Some(centroid) = session.camera_view().fragment_centroid {
            log::info!("wreck centroid at {centroid:?}");
        }
    }

    let hud = session.hud();
    log::info!(
        "run finished: {} ticks, score {}, best {}",
        session.ticks(),
        hud.score,
        hud.best
    );

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    if let Some(rank) = scores.add_score(hud.score, session.ticks(), timestamp) {
        log::info!("new high score, rank {rank}");
        scores.save(scores_path);
    }
}
