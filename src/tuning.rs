//! Data-driven game balance
//!
//! Every gameplay rate the simulation uses lives here, so a balance pass never
//! touches the tick code. Values are per tick (one tick per rendered frame).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Lateral movement per tick while a steering key is held (px)
    pub lateral_step: f32,

    // === Boost ===
    /// Boost tank drained per tick while boosting
    pub boost_drain: f32,
    /// Boost tank regained per tick while not boosting
    pub boost_regen: f32,
    /// Camera shake forced while boosting
    pub boost_shake: f32,
    /// Camera shake lost per tick
    pub shake_decay: f32,
    /// Speed multiplier while boosting
    pub boost_multiplier: f32,

    // === Speed ===
    /// Road speed at score 0 (px/tick)
    pub base_speed: f32,
    /// Score needed for one extra px/tick of base speed
    pub score_speed_divisor: f32,
    /// Upper bound on the score-driven base speed
    pub max_base_speed: f32,
    /// Fraction of road speed added to each obstacle's own speed
    pub lane_closing_factor: f32,

    // === Traffic ===
    /// Spawn chance per tick at score 0
    pub base_spawn_chance: f64,
    /// Extra spawn chance per point of score
    pub score_spawn_factor: f64,
    /// Upper bound on the spawn chance
    pub max_spawn_chance: f64,
    pub obstacle_min_speed: f32,
    pub obstacle_speed_range: f32,
    /// Spawn height, above the visible track
    pub spawn_y: f32,
    /// Distance below the track at which obstacles are culled
    pub cull_margin: f32,

    // === Scoring ===
    pub score_per_tick: u64,
    pub boost_score_per_tick: u64,
    /// Corner-to-corner distance that counts as a near miss
    pub near_miss_distance: f32,
    pub near_miss_bonus: u64,
    /// Award the near-miss bonus once per obstacle instead of every tick in range
    pub near_miss_once_per_obstacle: bool,
    /// Score points per metre of distance
    pub distance_divisor: u64,
    /// px/tick to km/h for the speedometer
    pub speed_display_factor: f32,

    // === Particles ===
    /// Road speed above which speed streaks appear without boosting
    pub particle_speed_threshold: f32,
    /// Streak speed as a multiple of road speed
    pub particle_trail_factor: f32,
    /// Life lost per tick
    pub particle_decay: f32,
    pub particle_spawn_y: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lateral_step: 8.0,

            boost_drain: 0.8,
            boost_regen: 0.1,
            boost_shake: 2.0,
            shake_decay: 0.5,
            boost_multiplier: 2.2,

            base_speed: 12.0,
            score_speed_divisor: 2000.0,
            max_base_speed: 36.0,
            lane_closing_factor: 0.35,

            base_spawn_chance: 0.025,
            score_spawn_factor: 0.0001,
            max_spawn_chance: 0.25,
            obstacle_min_speed: 2.0,
            obstacle_speed_range: 4.0,
            spawn_y: -150.0,
            cull_margin: 100.0,

            score_per_tick: 1,
            boost_score_per_tick: 3,
            near_miss_distance: 80.0,
            near_miss_bonus: 2,
            near_miss_once_per_obstacle: true,
            distance_divisor: 10,
            speed_display_factor: 12.0,

            particle_speed_threshold: 15.0,
            particle_trail_factor: 1.5,
            particle_decay: 0.05,
            particle_spawn_y: -10.0,
            max_particles: 256,
        }
    }
}

impl Tuning {
    /// Parse a tuning file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Balance with traffic switched off (practice runs, scripted tests)
    pub fn without_traffic() -> Self {
        Self {
            base_spawn_chance: 0.0,
            score_spawn_factor: 0.0,
            ..Self::default()
        }
    }

    /// Score-driven base speed before boost
    pub fn base_speed_at(&self, score: u64) -> f32 {
        let divisor = self.score_speed_divisor.max(f32::EPSILON);
        (self.base_speed + score as f32 / divisor).min(self.max_base_speed)
    }

    /// Per-tick spawn chance at the given score, always a valid probability
    pub fn spawn_chance_at(&self, score: u64) -> f64 {
        (self.base_spawn_chance + score as f64 * self.score_spawn_factor)
            .min(self.max_spawn_chance)
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lateral_step": 5.0, "near_miss_bonus": 7 }"#).unwrap();
        assert_eq!(tuning.lateral_step, 5.0);
        assert_eq!(tuning.near_miss_bonus, 7);
        assert_eq!(tuning.boost_drain, Tuning::default().boost_drain);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ lateral_step: }").is_err());
    }

    #[test]
    fn test_base_speed_ramps_then_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.base_speed_at(0), 12.0);
        assert_eq!(tuning.base_speed_at(2000), 13.0);
        assert_eq!(tuning.base_speed_at(10_000_000), tuning.max_base_speed);
    }

    #[test]
    fn test_spawn_chance_ramps_then_caps() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_chance_at(0) - 0.025).abs() < 1e-12);
        assert!((tuning.spawn_chance_at(1000) - 0.125).abs() < 1e-12);
        assert_eq!(tuning.spawn_chance_at(u64::MAX), tuning.max_spawn_chance);
        assert_eq!(Tuning::without_traffic().spawn_chance_at(50_000), 0.0);
    }
}
