//! Traffic spawning

use glam::Vec2;
use rand::Rng;

use super::state::{OBSTACLE_PAINTS, Obstacle, ObstacleKind};
use crate::consts::LANE_COUNT;
use crate::lane_x;
use crate::tuning::Tuning;

/// Roll once for a new oncoming car.
///
/// The returned obstacle has id 0; the caller assigns the real id when it
/// takes ownership. Paint and kind are cosmetic and drawn last so they can
/// never change the lane or speed a given seed produces.
pub fn maybe_spawn<R: Rng + ?Sized>(rng: &mut R, score: u64, tuning: &Tuning) -> Option<Obstacle> {
    let chance = tuning.spawn_chance_at(score);
    if rng.random::<f64>() >= chance {
        return None;
    }

    let lane = rng.random_range(0..LANE_COUNT);
    let speed = tuning.obstacle_min_speed + rng.random::<f32>() * tuning.obstacle_speed_range;
    let paint = OBSTACLE_PAINTS[rng.random_range(0..OBSTACLE_PAINTS.len())];
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];

    Some(Obstacle {
        id: 0,
        pos: Vec2::new(lane_x(lane), tuning.spawn_y),
        speed,
        paint,
        kind,
        near_miss_awarded: false,
    })
}
