//! Game session state machine
//!
//! Owns the authoritative [`SimState`] and decides when it may tick. The HUD
//! never sees the live state, only [`DisplaySnapshot`] copies published at a
//! fixed tick cadence and on every phase change.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, SimState, TickInput, tick};
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Before the first start, or after leaving the game view
    Idle,
    /// Run in progress
    Playing,
    /// Run ended in a crash, waiting for restart or exit
    GameOver,
}

/// Read-only HUD projection of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub score: u64,
    /// km/h
    pub speed: u32,
    /// metres
    pub distance: u64,
    pub boost_level: f32,
    pub is_boosting: bool,
    pub is_playing: bool,
    pub is_game_over: bool,
}

impl DisplaySnapshot {
    pub fn capture(state: &SimState) -> Self {
        Self {
            score: state.score,
            speed: state.speed,
            distance: state.distance,
            boost_level: state.boost_level,
            is_boosting: state.is_boosting,
            is_playing: state.is_playing,
            is_game_over: state.is_game_over,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One player's run of the minigame, from start to exit
#[derive(Debug, Clone)]
pub struct Session {
    sim: SimState,
    tuning: Tuning,
    phase: Phase,
    snapshot: DisplaySnapshot,
    /// Ticks between periodic snapshots (at least 1)
    publish_every: u32,
    ticks_since_publish: u32,
}

impl Session {
    pub fn new(tuning: Tuning, publish_every: u32) -> Self {
        let sim = SimState::new(0);
        Self {
            snapshot: DisplaySnapshot::capture(&sim),
            sim,
            tuning,
            phase: Phase::Idle,
            publish_every: publish_every.max(1),
            ticks_since_publish: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Live simulation state (read-only; used by the renderer)
    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot
    }

    pub fn set_publish_every(&mut self, ticks: u32) {
        self.publish_every = ticks.max(1);
    }

    /// Begin a fresh run from any phase. All run state is reset.
    pub fn start(&mut self, seed: u64) -> DisplaySnapshot {
        if self.phase == Phase::Playing {
            log::info!("Restarting run in progress (score {})", self.sim.score);
        }
        self.sim = SimState::started(seed);
        self.phase = Phase::Playing;
        log::info!("Run started with seed: {}", seed);
        self.publish()
    }

    /// Start again after a crash; identical to [`Session::start`]
    pub fn restart(&mut self, seed: u64) -> DisplaySnapshot {
        self.start(seed)
    }

    /// Leave the game view. No further ticks run until the next start.
    pub fn exit(&mut self) -> DisplaySnapshot {
        if self.phase == Phase::Idle {
            return self.snapshot;
        }
        log::info!("Leaving game (phase {:?}, score {})", self.phase, self.sim.score);
        self.sim.is_playing = false;
        self.sim.is_game_over = false;
        self.phase = Phase::Idle;
        self.publish()
    }

    /// Fold changed player preferences into the live session
    pub fn apply_settings(&mut self, settings: &Settings) {
        settings.apply_to(&mut self.tuning);
        self.sim.particles.truncate(self.tuning.max_particles);
        self.set_publish_every(settings.hud_refresh_ticks);
    }

    /// Run one frame's worth of simulation.
    ///
    /// Returns a snapshot when one is published this frame. Outside of
    /// [`Phase::Playing`] this is a no-op.
    pub fn frame(&mut self, input: &TickInput) -> Option<DisplaySnapshot> {
        if self.phase != Phase::Playing {
            return None;
        }

        tick(&mut self.sim, input, &self.tuning);

        for event in &self.sim.events {
            match event {
                GameEvent::NearMiss { id } => log::debug!("Near miss with #{}", id),
                GameEvent::Crash { id } => log::debug!("Crashed into #{}", id),
                GameEvent::Spawned { .. } => {}
            }
        }

        if self.sim.is_game_over {
            self.phase = Phase::GameOver;
            log::info!(
                "Game over: score {}, distance {}m",
                self.sim.score,
                self.sim.distance
            );
            return Some(self.publish());
        }

        self.ticks_since_publish += 1;
        if self.ticks_since_publish >= self.publish_every {
            Some(self.publish())
        } else {
            None
        }
    }

    fn publish(&mut self) -> DisplaySnapshot {
        self.ticks_since_publish = 0;
        self.snapshot = DisplaySnapshot::capture(&self.sim);
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::QualityPreset;

    fn session() -> Session {
        Session::new(Tuning::without_traffic(), 4)
    }

    #[test]
    fn test_idle_frames_do_nothing() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.frame(&TickInput::default()).is_none());
        assert_eq!(s.sim().time_ticks, 0);
    }

    #[test]
    fn test_start_publishes_initial_snapshot() {
        let mut s = session();
        let snap = s.start(1);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(snap.is_playing);
        assert!(!snap.is_game_over);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.boost_level, MAX_BOOST);
    }

    #[test]
    fn test_publish_cadence() {
        let mut s = session();
        s.start(1);
        let published: Vec<bool> = (0..8)
            .map(|_| s.frame(&TickInput::default()).is_some())
            .collect();
        assert_eq!(
            published,
            [false, false, false, true, false, false, false, true]
        );
        assert_eq!(s.snapshot().score, 8);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut s = session();
        s.start(1);
        let before = s.snapshot();
        s.frame(&TickInput::default());
        assert_eq!(before.score, 0);
        assert_eq!(s.snapshot().score, 0);
        assert_eq!(s.sim().score, 1);
    }

    #[test]
    fn test_crash_moves_to_game_over_and_publishes() {
        let mut s = Session::new(Tuning::without_traffic(), 1000);
        s.start(1);
        let at = s.sim.player_rect().origin();
        s.sim.place_obstacle(at, 3.0);

        let snap = s.frame(&TickInput::default()).expect("game over publishes");
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(snap.is_game_over);
        assert!(!snap.is_playing);

        // No more ticks until restart
        let ticks = s.sim().time_ticks;
        assert!(s.frame(&TickInput::default()).is_none());
        assert_eq!(s.sim().time_ticks, ticks);

        s.restart(2);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.sim().obstacles.is_empty());
        assert_eq!(s.sim().score, 0);
    }

    #[test]
    fn test_exit_stops_ticking() {
        let mut s = session();
        s.start(1);
        s.frame(&TickInput::default());
        s.exit();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.sim().is_playing);
        let ticks = s.sim().time_ticks;
        for _ in 0..10 {
            assert!(s.frame(&TickInput::default()).is_none());
        }
        assert_eq!(s.sim().time_ticks, ticks);
    }

    #[test]
    fn test_exit_publishes_idle_snapshot() {
        let mut s = session();
        s.start(1);
        for _ in 0..6 {
            s.frame(&TickInput::default());
        }
        assert_eq!(s.snapshot().score, 4);

        let snap = s.exit();
        assert_eq!(snap, s.snapshot());
        assert!(!snap.is_playing);
        assert!(!snap.is_game_over);
        assert_eq!(snap.score, 6);
    }

    #[test]
    fn test_exit_after_crash_clears_game_over() {
        let mut s = Session::new(Tuning::without_traffic(), 1000);
        s.start(1);
        let at = s.sim.player_rect().origin();
        s.sim.place_obstacle(at, 3.0);
        let crashed = s.frame(&TickInput::default()).expect("game over publishes");
        assert!(crashed.is_game_over);

        let snap = s.exit();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!snap.is_playing);
        assert!(!snap.is_game_over);
        assert_eq!(snap.score, crashed.score);

        // A second exit changes nothing
        assert_eq!(s.exit(), snap);
    }

    #[test]
    fn test_apply_settings_mid_run() {
        let mut s = Session::new(Tuning::without_traffic(), 4);
        s.start(1);
        for _ in 0..10 {
            s.frame(&TickInput {
                boost: true,
                ..TickInput::default()
            });
        }
        assert!(!s.sim().particles.is_empty());

        let mut settings = Settings::default();
        settings.particles = false;
        settings.hud_refresh_ticks = 1;
        s.apply_settings(&settings);
        assert_eq!(s.tuning().max_particles, 0);
        assert!(s.sim().particles.is_empty());
        assert!(s.frame(&TickInput::default()).is_some());

        s.apply_settings(&Settings::from_preset(QualityPreset::Low));
        assert_eq!(s.tuning().max_particles, QualityPreset::Low.max_particles());
    }

    #[test]
    fn test_zero_cadence_publishes_every_frame() {
        let mut s = Session::new(Tuning::without_traffic(), 0);
        s.start(1);
        assert!(s.frame(&TickInput::default()).is_some());
        assert!(s.frame(&TickInput::default()).is_some());
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let mut s = session();
        let json = s.start(1).to_json().unwrap();
        assert!(json.contains("\"boostLevel\":100"));
        assert!(json.contains("\"isGameOver\":false"));
    }
}
