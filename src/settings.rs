//! Session settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a partial
//! file (or none at all) is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ABDUCTOR_COUNT, HUMANOID_COUNT, TICKS_PER_SECOND};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for terrain, spawns and effects
    pub seed: u64,
    /// Humanoids placed at session start
    pub humanoids: usize,
    /// Abductors placed at session start
    pub abductors: usize,
    /// Length of a headless run in ticks
    pub demo_ticks: u64,
    /// Let the autopilot fly the ship
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            humanoids: HUMANOID_COUNT,
            abductors: ABDUCTOR_COUNT,
            // Five minutes of play
            demo_ticks: TICKS_PER_SECOND as u64 * 300,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.humanoids, 10);
        assert_eq!(settings.abductors, 6);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "abductors": 2 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.abductors, 2);
        assert_eq!(settings.humanoids, HUMANOID_COUNT);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ seed: }").is_err());
        assert!(Settings::from_json(r#"{ "seed": "many" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 7,
            demo_ticks: 600,
            autopilot: false,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/defender-settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
