//! Launch settings and preferences
//!
//! Read from a JSON file by the headless driver. Every field has a default, so
//! a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};
use crate::error::ConfigError;
use crate::sim::StageBounds;
use crate::tuning::{DifficultyKey, MapTheme};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset for new sessions
    pub difficulty: DifficultyKey,
    /// Cosmetic map theme
    pub map: MapTheme,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,

    // === Stage ===
    pub stage_width: f32,
    pub stage_height: f32,

    // === Driver ===
    /// Simulated display refresh rate for headless runs
    pub frame_rate: u32,
    /// Optional difficulty table override
    pub tuning_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyKey::default(),
            map: MapTheme::default(),
            seed: None,

            stage_width: DEFAULT_STAGE_WIDTH,
            stage_height: DEFAULT_STAGE_HEIGHT,

            frame_rate: 60,
            tuning_path: None,
        }
    }
}

impl Settings {
    pub fn stage(&self) -> StageBounds {
        StageBounds::new(self.stage_width, self.stage_height)
    }

    /// Frame period in milliseconds (a zero rate is treated as 60 Hz)
    pub fn frame_period_ms(&self) -> f64 {
        let rate = if self.frame_rate == 0 { 60 } else { self.frame_rate };
        1000.0 / f64::from(rate)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }
}
