//! Speed-trail particles
//!
//! Purely visual. Nothing here reads or writes score, traffic or the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind};
use crate::consts::{TRACK_HEIGHT, TRACK_WIDTH};
use crate::tuning::Tuning;

/// Spawn, advance and cull particles for one tick
pub fn update_particles<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    is_boosting: bool,
    current_speed: f32,
    tuning: &Tuning,
) {
    let wants_streak = is_boosting || current_speed > tuning.particle_speed_threshold;
    if wants_streak && particles.len() < tuning.max_particles {
        particles.push(Particle {
            pos: Vec2::new(rng.random::<f32>() * TRACK_WIDTH, tuning.particle_spawn_y),
            life: 1.0,
            kind: if is_boosting {
                ParticleKind::Boost
            } else {
                ParticleKind::Speed
            },
        });
    }

    for particle in particles.iter_mut() {
        particle.pos.y += current_speed * tuning.particle_trail_factor;
        particle.life -= tuning.particle_decay;
    }
    particles.retain(|p| p.pos.y < TRACK_HEIGHT && p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cruising_below_threshold_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        update_particles(&mut particles, &mut rng, false, 12.0, &Tuning::default());
        assert!(particles.is_empty());
    }

    #[test]
    fn test_boost_streaks_are_orange_and_advance() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        update_particles(&mut particles, &mut rng, true, 26.4, &Tuning::default());
        assert_eq!(particles.len(), 1);
        let p = &particles[0];
        assert_eq!(p.kind, ParticleKind::Boost);
        assert!((p.life - 0.95).abs() < 1e-6);
        assert!((p.pos.y - (-10.0 + 26.4 * 1.5)).abs() < 1e-4);
        assert!(p.pos.x >= 0.0 && p.pos.x < TRACK_WIDTH);
    }

    #[test]
    fn test_fast_cruise_spawns_white_streaks() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        update_particles(&mut particles, &mut rng, false, 16.0, &Tuning::default());
        assert_eq!(particles[0].kind, ParticleKind::Speed);
    }

    #[test]
    fn test_particles_are_culled() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        // Slow enough that streaks die of old age before leaving the track
        for _ in 0..100 {
            update_particles(&mut particles, &mut rng, true, 1.0, &tuning);
            assert!(particles.iter().all(|p| p.life > 0.0 && p.pos.y < TRACK_HEIGHT));
        }
        // One particle per tick, each living under 20 ticks
        assert!(particles.len() <= 20);

        // Fast enough that streaks leave the bottom edge first
        particles.clear();
        for _ in 0..100 {
            update_particles(&mut particles, &mut rng, true, 80.0, &tuning);
            assert!(particles.iter().all(|p| p.pos.y < TRACK_HEIGHT));
        }
        assert!(particles.len() <= 5);
    }

    #[test]
    fn test_particle_cap() {
        let tuning = Tuning {
            max_particles: 3,
            particle_decay: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        for _ in 0..10 {
            update_particles(&mut particles, &mut rng, true, 0.1, &tuning);
        }
        assert_eq!(particles.len(), 3);
    }
}
