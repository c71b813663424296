//! Player preferences
//!
//! Persisted in LocalStorage. Only preferences live here; run results are
//! never saved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live speed-trail particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset: {other}")),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Camera shake while boosting
    pub screen_shake: bool,
    /// Speed-trail particles
    pub particles: bool,

    // === HUD ===
    /// Simulation ticks between HUD refreshes
    pub hud_refresh_ticks: u32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            hud_refresh_ticks: 4,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        // Low preset trades the shake for steadier frames
        if preset == QualityPreset::Low {
            self.screen_shake = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Fold the visual preferences into a balance sheet
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.max_particles = self.max_particles();
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "nitro_lane_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::info!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("HIGH".parse::<QualityPreset>(), Ok(QualityPreset::High));
        assert_eq!("med".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert!("ultra".parse::<QualityPreset>().is_err());
        assert_eq!(QualityPreset::Low.to_string(), "Low");
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(Settings::default().effective_screen_shake());
        assert!(!Settings::from_preset(QualityPreset::Low).effective_screen_shake());
    }

    #[test]
    fn test_particles_off_caps_at_zero() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);
        assert_eq!(tuning.max_particles, 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_uses_defaults() {
        Settings::from_preset(QualityPreset::High).save();
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_old_settings_json_fills_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "High" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.hud_refresh_ticks, 4);
    }
}
