//! Per-frame simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::is_near_miss;
use super::particles::update_particles;
use super::spawner::maybe_spawn;
use super::state::{GameEvent, SimState};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_offset;

/// Held control keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

/// Road speed for this tick, after boost
pub fn current_speed(score: u64, is_boosting: bool, tuning: &Tuning) -> f32 {
    let multiplier = if is_boosting { tuning.boost_multiplier } else { 1.0 };
    tuning.base_speed_at(score) * multiplier
}

/// Advance the simulation by one tick.
///
/// Does nothing unless the run is in progress. The step order is fixed:
/// shake, steering, boost, speed, scroll, spawn, traffic, score, readouts,
/// particles. Later steps read what earlier steps wrote this tick.
pub fn tick(state: &mut SimState, input: &TickInput, tuning: &Tuning) {
    if !state.is_playing || state.is_game_over {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    // Decay screen shake
    state.camera_shake = (state.camera_shake - tuning.shake_decay).max(0.0);

    // Steering, clamped to the track
    if input.left {
        state.player_x -= tuning.lateral_step;
    }
    if input.right {
        state.player_x += tuning.lateral_step;
    }
    state.player_x = state.player_x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);

    // Boost is re-evaluated every tick; an empty tank cannot boost
    state.is_boosting = input.boost && state.boost_level > 0.0;
    if state.is_boosting {
        state.boost_level = (state.boost_level - tuning.boost_drain).max(0.0);
        state.camera_shake = tuning.boost_shake;
    } else if state.boost_level < MAX_BOOST {
        state.boost_level = (state.boost_level + tuning.boost_regen).min(MAX_BOOST);
    }

    let speed = current_speed(state.score, state.is_boosting, tuning);
    state.road_offset = wrap_offset(state.road_offset + speed, MARKING_PERIOD);

    if let Some(mut obstacle) = maybe_spawn(&mut state.rng, state.score, tuning) {
        obstacle.id = state.next_entity_id();
        log::debug!(
            "Spawned {:?} #{} at x={} (speed {:.2})",
            obstacle.kind,
            obstacle.id,
            obstacle.pos.x,
            obstacle.speed
        );
        state.events.push(GameEvent::Spawned { id: obstacle.id });
        state.obstacles.push(obstacle);
    }

    advance_traffic(state, speed, tuning);

    state.score += if state.is_boosting {
        tuning.boost_score_per_tick
    } else {
        tuning.score_per_tick
    };
    state.distance = state.score / tuning.distance_divisor.max(1);
    state.speed = (speed * tuning.speed_display_factor).round() as u32;

    update_particles(
        &mut state.particles,
        &mut state.cosmetic_rng,
        state.is_boosting,
        speed,
        tuning,
    );
}

/// Owned-value form of [`tick`]: consumes a state and returns its successor
pub fn step(mut state: SimState, input: &TickInput, tuning: &Tuning) -> SimState {
    tick(&mut state, input, tuning);
    state
}

/// Move traffic, resolve crashes and near misses, drop cars that have passed
fn advance_traffic(state: &mut SimState, road_speed: f32, tuning: &Tuning) {
    let player = state.player_rect();
    let cull_y = TRACK_HEIGHT + tuning.cull_margin;

    let mut obstacles = std::mem::take(&mut state.obstacles);
    obstacles.retain_mut(|obstacle| {
        obstacle.pos.y += obstacle.speed + road_speed * tuning.lane_closing_factor;
        let rect = obstacle.rect();

        if rect.overlaps(&player) && !state.is_game_over {
            state.is_game_over = true;
            state.is_playing = false;
            state.events.push(GameEvent::Crash { id: obstacle.id });
        }

        let already_paid = tuning.near_miss_once_per_obstacle && obstacle.near_miss_awarded;
        if !state.is_game_over
            && !already_paid
            && is_near_miss(&player, &rect, tuning.near_miss_distance)
        {
            state.score += tuning.near_miss_bonus;
            obstacle.near_miss_awarded = true;
            state.events.push(GameEvent::NearMiss { id: obstacle.id });
        }

        obstacle.pos.y < cull_y
    });
    state.obstacles = obstacles;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing() -> SimState {
        SimState::started(12345)
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let tuning = Tuning::default();
        let mut state = SimState::new(1);
        let input = TickInput {
            left: true,
            boost: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut state, &input, &tuning);
        }
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.player_x, PLAYER_START_X);
        assert_eq!(state.boost_level, MAX_BOOST);
    }

    #[test]
    fn test_baseline_score_and_readouts() {
        let tuning = Tuning::without_traffic();
        let mut state = playing();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        assert_eq!(state.score, 100);
        assert_eq!(state.distance, 10);
        // 12 + 99/2000 px/tick on the last tick, times 12
        assert_eq!(state.speed, 145);
        assert!(!state.is_game_over);
    }

    #[test]
    fn test_steering_clamps_at_edges() {
        let tuning = Tuning::without_traffic();
        let mut state = playing();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &left, &tuning);
        }
        assert_eq!(state.player_x, PLAYER_MIN_X);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &right, &tuning);
        }
        assert_eq!(state.player_x, PLAYER_MAX_X);
    }

    #[test]
    fn test_boost_drains_and_regenerates() {
        let tuning = Tuning::without_traffic();
        let mut state = playing();
        let boost = TickInput {
            boost: true,
            ..Default::default()
        };

        tick(&mut state, &boost, &tuning);
        assert!(state.is_boosting);
        assert!((state.boost_level - 99.2).abs() < 1e-4);
        assert_eq!(state.camera_shake, tuning.boost_shake);
        assert_eq!(state.score, 3);

        tick(&mut state, &TickInput::default(), &tuning);
        assert!(!state.is_boosting);
        assert!((state.boost_level - 99.3).abs() < 1e-4);
        assert_eq!(state.camera_shake, tuning.boost_shake - tuning.shake_decay);
    }

    #[test]
    fn test_boost_multiplies_speed() {
        let tuning = Tuning::default();
        assert_eq!(current_speed(0, false, &tuning), 12.0);
        assert!((current_speed(0, true, &tuning) - 26.4).abs() < 1e-5);
    }

    #[test]
    fn test_forced_overlap_ends_run_on_first_tick() {
        let tuning = Tuning::without_traffic();
        let mut state = playing();
        let player = state.player_rect();
        let id = state.place_obstacle(player.origin(), 4.0);

        tick(&mut state, &TickInput::default(), &tuning);

        assert!(state.is_game_over);
        assert!(!state.is_playing);
        assert!(state.events.contains(&GameEvent::Crash { id }));

        // Terminal: further ticks change nothing
        let score = state.score;
        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.score, score);
        assert!(state.is_game_over);
    }

    #[test]
    fn test_near_miss_pays_once_per_obstacle() {
        let tuning = Tuning {
            lane_closing_factor: 0.0,
            ..Tuning::without_traffic()
        };
        let mut state = playing();
        // Adjacent lane, level with the player, crawling
        let id = state.place_obstacle(Vec2::new(state.player_x - 50.0, PLAYER_Y - 40.0), 1.0);

        tick(&mut state, &TickInput::default(), &tuning);
        assert!(state.events.contains(&GameEvent::NearMiss { id }));
        assert_eq!(state.score, 1 + tuning.near_miss_bonus);

        tick(&mut state, &TickInput::default(), &tuning);
        assert!(!state.events.contains(&GameEvent::NearMiss { id }));
        assert_eq!(state.score, 2 + tuning.near_miss_bonus);
    }

    #[test]
    fn test_near_miss_repeats_without_debounce() {
        let tuning = Tuning {
            lane_closing_factor: 0.0,
            near_miss_once_per_obstacle: false,
            ..Tuning::without_traffic()
        };
        let mut state = playing();
        state.place_obstacle(Vec2::new(state.player_x - 50.0, PLAYER_Y - 40.0), 1.0);

        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        assert_eq!(state.score, 3 + 3 * tuning.near_miss_bonus);
    }

    #[test]
    fn test_passed_traffic_is_culled() {
        let tuning = Tuning::without_traffic();
        let mut state = playing();
        state.place_obstacle(Vec2::new(25.0, TRACK_HEIGHT + 95.0), 6.0);
        state.place_obstacle(Vec2::new(325.0, 0.0), 2.0);

        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 325.0);
    }

    #[test]
    fn test_step_matches_tick() {
        let tuning = Tuning::default();
        let input = TickInput {
            right: true,
            boost: true,
            ..Default::default()
        };
        let mut by_ref = playing();
        let mut by_value = playing();
        for _ in 0..200 {
            tick(&mut by_ref, &input, &tuning);
            by_value = step(by_value, &input, &tuning);
        }
        assert_eq!(by_ref.score, by_value.score);
        assert_eq!(by_ref.obstacles, by_value.obstacles);
        assert_eq!(by_ref.particles, by_value.particles);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 = SimState::started(99999);
        let mut state2 = SimState::started(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                boost: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                boost: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, &tuning);
                tick(&mut state2, input, &tuning);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player_x, state2.player_x);
    }
}
