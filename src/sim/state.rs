//! Simulation state and entity types
//!
//! Everything the tick function reads or writes lives in [`SimState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Traffic body styles (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Sedan,
    Suv,
    Truck,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Sedan, ObstacleKind::Suv, ObstacleKind::Truck];
}

/// Traffic paint colors, 0xRRGGBB
pub const OBSTACLE_PAINTS: [u32; 5] = [0x4b5563, 0x1e40af, 0x15803d, 0xb45309, 0x3f3f46];

/// An oncoming car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Own closing speed, added to a share of road speed each tick
    pub speed: f32,
    /// 0xRRGGBB
    pub paint: u32,
    pub kind: ObstacleKind,
    /// Near-miss bonus already paid for this car
    #[serde(default)]
    pub near_miss_awarded: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CAR_WIDTH, CAR_HEIGHT)
    }
}

/// Which trail a particle belongs to (drives its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Orange streak while boosting
    Boost,
    /// White streak at high cruising speed
    Speed,
}

/// A speed-trail particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub kind: ParticleKind,
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned { id: u32 },
    NearMiss { id: u32 },
    Crash { id: u32 },
}

/// Complete simulation state
///
/// Owned by whoever drives the loop; the tick function is the only writer.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    /// Speedometer reading (km/h)
    pub speed: u32,
    /// Odometer reading (metres)
    pub distance: u64,
    /// Player car left edge
    pub player_x: f32,
    /// Lane marking scroll, always in [0, MARKING_PERIOD)
    pub road_offset: f32,
    /// 0-100
    pub boost_level: f32,
    pub is_boosting: bool,
    pub is_playing: bool,
    pub is_game_over: bool,
    /// Camera jitter amplitude (px), decays to zero
    pub camera_shake: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live traffic, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Gameplay randomness (traffic)
    pub rng: Pcg32,
    /// Cosmetic randomness (particles), kept apart so effects never shift traffic
    pub cosmetic_rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

/// PCG stream used for cosmetic randomness
const COSMETIC_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

impl SimState {
    /// Fresh state, not yet playing
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            speed: 0,
            distance: 0,
            player_x: PLAYER_START_X,
            road_offset: 0.0,
            boost_level: MAX_BOOST,
            is_boosting: false,
            is_playing: false,
            is_game_over: false,
            camera_shake: 0.0,
            time_ticks: 0,
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            cosmetic_rng: Pcg32::new(seed, COSMETIC_STREAM),
            next_id: 1,
        }
    }

    /// Fresh state with the run already under way
    pub fn started(seed: u64) -> Self {
        Self {
            is_playing: true,
            ..Self::new(seed)
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player bounding box
    pub fn player_rect(&self) -> Rect {
        Rect::new(self.player_x, PLAYER_Y, CAR_WIDTH, CAR_HEIGHT)
    }

    /// Place a car at an exact position (scripted scenarios, tutorials)
    pub fn place_obstacle(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos,
            speed,
            paint: OBSTACLE_PAINTS[0],
            kind: ObstacleKind::Sedan,
            near_miss_awarded: false,
        });
        id
    }
}
