//! Held-key tracking
//!
//! Keyboard events arrive whenever the browser delivers them; the simulation
//! reads a consistent snapshot once per tick.

use crate::sim::TickInput;

/// The keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Left,
    Right,
    Boost,
}

impl ControlKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(ControlKey::Left),
            "ArrowRight" => Some(ControlKey::Right),
            " " | "Spacebar" => Some(ControlKey::Boost),
            _ => None,
        }
    }
}

/// Keys whose browser default (page scroll) must be suppressed while playing
pub fn suppresses_default(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown") || ControlKey::from_key(key).is_some()
}

/// Current up/down state of the control keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputTracker {
    left: bool,
    right: bool,
    boost: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the event's default action should be prevented.
    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(control) = ControlKey::from_key(key) {
            self.set(control, true);
        }
        suppresses_default(key)
    }

    /// Record a key release
    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = ControlKey::from_key(key) {
            self.set(control, false);
        }
    }

    pub fn set(&mut self, key: ControlKey, down: bool) {
        match key {
            ControlKey::Left => self.left = down,
            ControlKey::Right => self.right = down,
            ControlKey::Boost => self.boost = down,
        }
    }

    pub fn is_held(&self, key: ControlKey) -> bool {
        match key {
            ControlKey::Left => self.left,
            ControlKey::Right => self.right,
            ControlKey::Boost => self.boost,
        }
    }

    /// Forget every held key (focus loss, leaving the game view)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            boost: self.boost,
        }
    }
}
