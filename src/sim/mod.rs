//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, is_near_miss};
pub use particles::update_particles;
pub use spawner::maybe_spawn;
pub use state::{
    GameEvent, OBSTACLE_PAINTS, Obstacle, ObstacleKind, Particle, ParticleKind, SimState,
};
pub use tick::{TickInput, current_speed, step, tick};
