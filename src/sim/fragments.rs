//! Destruction fragment physics
//!
//! On impact the vehicle hull breaks into its construction cubes, each one
//! re-parented to world space at its former transform so the swap is
//! invisible. From then on fragments are point masses: Euler gravity, a
//! damped ground bounce and a penalty-based mutual repulsion, nothing more.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DestructionTuning;

/// Local offsets of the hull cubes making up the vehicle body (3 columns by
/// 4 rows, not fully populated)
pub const FRAGMENT_LAYOUT: [Vec3; 7] = [
    Vec3::new(0.0, 0.17, -0.72),
    Vec3::new(-0.5, 0.17, -0.25),
    Vec3::new(0.0, 0.17, -0.25),
    Vec3::new(0.5, 0.17, -0.25),
    Vec3::new(0.0, 0.17, 0.25),
    Vec3::new(-0.5, 0.17, 0.72),
    Vec3::new(0.5, 0.17, 0.72),
];

/// An independently simulated piece of the destroyed vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Euler rotation, accumulated per tick
    pub rotation: Vec3,
    /// Constant spin assigned at detach, never damped
    pub angular_velocity: Vec3,
    /// Local pose on the hull before the detach, kept for resets
    pub home_offset: Vec3,
}

/// Detach the hull cubes into world-space fragments.
///
/// With an impact point, every fragment is blasted along the vector from the
/// impact to itself; otherwise it gets a random lateral/upward scatter.
pub fn spawn_fragments<R: Rng>(
    vehicle_position: Vec3,
    yaw: f32,
    pitch: f32,
    impact: Option<Vec3>,
    tuning: &DestructionTuning,
    rng: &mut R,
) -> Vec<Fragment> {
    let orientation = Quat::from_euler(glam::EulerRot::XYZ, pitch, yaw, 0.0);

    FRAGMENT_LAYOUT
        .iter()
        .map(|&offset| {
            let world = vehicle_position + orientation * offset;

            let mut velocity = Vec3::new(
                (rng.random::<f32>() - 0.5) * tuning.explosion_force,
                rng.random::<f32>() * tuning.explosion_upward + 0.1,
                (rng.random::<f32>() - 0.5) * tuning.explosion_force,
            );
            if let Some(impact) = impact {
                let dir = (world - impact).normalize_or_zero();
                velocity = dir * tuning.explosion_force;
            }

            let angular_velocity = Vec3::new(
                (rng.random::<f32>() - 0.5) * tuning.fragment_spin,
                (rng.random::<f32>() - 0.5) * tuning.fragment_spin,
                (rng.random::<f32>() - 0.5) * tuning.fragment_spin,
            );

            Fragment {
                position: world,
                velocity,
                rotation: Vec3::new(pitch, yaw, 0.0),
                angular_velocity,
                home_offset: offset,
            }
        })
        .collect()
}

/// One tick of fragment integration; expired fragments are removed
pub fn integrate(fragments: &mut Vec<Fragment>, tuning: &DestructionTuning) {
    for i in 0..fragments.len() {
        let frag = &mut fragments[i];
        frag.position += frag.velocity;
        frag.rotation += frag.angular_velocity;
        frag.velocity.y -= tuning.fragment_gravity;

        if frag.position.y < tuning.ground_y {
            frag.position.y = tuning.ground_y;
            frag.velocity.y *= -tuning.bounce;
            frag.velocity.x *= tuning.friction;
            frag.velocity.z *= tuning.friction;
        }

        // Pairwise penalty repulsion, symmetric push on both fragments
        for j in (i + 1)..fragments.len() {
            let (head, tail) = fragments.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let dir = a.position - b.position;
            let dist = dir.length();
            if dist < tuning.min_separation && dist > 0.0 {
                let dir = dir / dist;
                let push = (tuning.min_separation - dist) * tuning.repulsion;
                a.position += dir * (push / 2.0);
                b.position -= dir * (push / 2.0);
                a.velocity += dir * (push * 0.5);
                b.velocity -= dir * (push * 0.5);
            }
        }
    }

    fragments.retain(|f| f.position.y >= tuning.removal_height);
}

/// Center of mass of the live fragments (camera framing target)
pub fn centroid(fragments: &[Fragment]) -> Option<Vec3> {
    if fragments.is_empty() {
        return None;
    }
    let sum: Vec3 = fragments.iter().map(|f| f.position).sum();
    Some(sum / fragments.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tuning() -> DestructionTuning {
        DestructionTuning::default()
    }

    #[test]
    fn test_fragments_spawn_at_world_transforms() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pos = Vec3::new(-2.0, 0.25, 3.0);
        let frags = spawn_fragments(pos, 0.0, 0.0, None, &tuning(), &mut rng);
        assert_eq!(frags.len(), FRAGMENT_LAYOUT.len());
        for (frag, offset) in frags.iter().zip(FRAGMENT_LAYOUT) {
            assert!((frag.position - (pos + offset)).length() < 1e-5);
        }
    }

    #[test]
    fn test_directional_blast_points_away_from_impact() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pos = Vec3::new(0.0, 0.25, 3.0);
        let impact = Vec3::new(0.0, 0.25, 1.0);
        let frags = spawn_fragments(pos, 0.0, 0.0, Some(impact), &tuning(), &mut rng);
        for frag in &frags {
            let away = frag.position - impact;
            assert!(frag.velocity.dot(away) > 0.0);
            assert!((frag.velocity.length() - 0.3).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ground_bounce_damps_velocity() {
        let mut frags = vec![Fragment {
            position: Vec3::new(0.0, 0.01, 0.0),
            velocity: Vec3::new(0.2, -0.3, 0.1),
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            home_offset: Vec3::ZERO,
        }];
        integrate(&mut frags, &tuning());
        let frag = &frags[0];
        assert_eq!(frag.position.y, 0.0);
        assert!(frag.velocity.y > 0.0);
        assert!(frag.velocity.x.abs() < 0.2);
    }

    #[test]
    fn test_overlapping_fragments_repel() {
        let make = |x: f32| Fragment {
            position: Vec3::new(x, 1.0, 0.0),
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            home_offset: Vec3::ZERO,
        };
        let mut frags = vec![make(0.0), make(0.2)];
        integrate(&mut frags, &tuning());
        let gap = (frags[1].position.x - frags[0].position.x).abs();
        assert!(gap > 0.2, "fragments failed to separate: gap {gap}");
    }

    #[test]
    fn test_fallen_fragments_removed_and_centroid_tracks_rest() {
        let make = |y: f32| Fragment {
            position: Vec3::new(0.0, y, 0.0),
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            home_offset: Vec3::ZERO,
        };
        let mut frags = vec![make(-10.0), make(2.0), make(4.0)];
        integrate(&mut frags, &tuning());
        assert_eq!(frags.len(), 2);
        let c = centroid(&frags).unwrap();
        assert!(c.y > 0.0);
        assert_eq!(centroid(&[]), None);
    }
}
