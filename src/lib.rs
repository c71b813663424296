//! Nitro Lane - An arcade lane-dodging driving minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, boost, spawning, collisions, scoring)
//! - `session`: Idle / playing / game-over state machine and HUD snapshots
//! - `input`: Held-key tracking for the control keys
//! - `frame_loop`: Cancellable frame scheduling
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod frame_loop;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use frame_loop::{FrameLoop, FrameScheduler};
pub use input::{ControlKey, InputTracker};
pub use session::{DisplaySnapshot, Phase, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Track geometry constants
pub mod consts {
    /// Number of parallel lanes
    pub const LANE_COUNT: u32 = 4;
    pub const LANE_WIDTH: f32 = 100.0;

    /// Drawing surface size in pixels
    pub const TRACK_WIDTH: f32 = LANE_COUNT as f32 * LANE_WIDTH;
    pub const TRACK_HEIGHT: f32 = 600.0;
    pub const SURFACE_WIDTH: u32 = TRACK_WIDTH as u32;
    pub const SURFACE_HEIGHT: u32 = TRACK_HEIGHT as u32;

    /// Every car (player and traffic) shares one bounding box size
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 90.0;
    /// Horizontal gap between a lane edge and a car centered in it
    pub const LANE_INSET: f32 = (LANE_WIDTH - CAR_WIDTH) / 2.0;

    /// Player car top edge. The player never moves longitudinally.
    pub const PLAYER_Y: f32 = TRACK_HEIGHT - 120.0;
    pub const PLAYER_MIN_X: f32 = 0.0;
    pub const PLAYER_MAX_X: f32 = TRACK_WIDTH - CAR_WIDTH;
    pub const PLAYER_START_X: f32 = (TRACK_WIDTH - CAR_WIDTH) / 2.0;

    /// Lane marking dash pattern
    pub const MARKING_DASH: f32 = 30.0;
    pub const MARKING_GAP: f32 = 50.0;
    pub const MARKING_PERIOD: f32 = MARKING_DASH + MARKING_GAP;

    /// Full boost tank
    pub const MAX_BOOST: f32 = 100.0;
}

/// Wrap a scroll offset into [0, period)
#[inline]
pub fn wrap_offset(offset: f32, period: f32) -> f32 {
    let wrapped = offset.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}

/// Left edge of a car centered in the given lane
#[inline]
pub fn lane_x(lane: u32) -> f32 {
    lane as f32 * consts::LANE_WIDTH + consts::LANE_INSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_offset() {
        assert_eq!(wrap_offset(0.0, 80.0), 0.0);
        assert_eq!(wrap_offset(79.5, 80.0), 79.5);
        assert_eq!(wrap_offset(80.0, 80.0), 0.0);
        assert_eq!(wrap_offset(92.0, 80.0), 12.0);
        assert!(wrap_offset(-1e-9, 80.0) < 80.0);
    }

    #[test]
    fn test_lane_x_centers_cars() {
        assert_eq!(lane_x(0), 25.0);
        assert_eq!(lane_x(3), 325.0);
        assert!(lane_x(consts::LANE_COUNT - 1) + consts::CAR_WIDTH <= consts::TRACK_WIDTH);
    }
}
