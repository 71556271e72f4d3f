//! Data-driven game balance
//!
//! Difficulty presets and map themes. The compiled-in table is the default;
//! a JSON override can replace any preset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty preset keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyKey {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyKey {
    pub const ALL: [DifficultyKey; 3] = [
        DifficultyKey::Easy,
        DifficultyKey::Normal,
        DifficultyKey::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyKey::Easy => "easy",
            DifficultyKey::Normal => "normal",
            DifficultyKey::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(DifficultyKey::Easy),
            "normal" | "medium" => Some(DifficultyKey::Normal),
            "hard" => Some(DifficultyKey::Hard),
            _ => None,
        }
    }

    /// Resolve a user-supplied key, falling back to the default preset
    pub fn resolve(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {s:?}, using {}", Self::default().as_str());
            Self::default()
        })
    }
}

/// Balance values for one difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Cat speed (px/s)
    pub cat_speed: f32,
    /// Mouse base speed before the kind multiplier (px/s)
    pub mouse_base_speed: f32,
    pub mouse_spawn_interval_ms: f32,
    pub max_mice: usize,
    /// Dog base speed before the kind multiplier (px/s)
    pub dog_base_speed: f32,
    pub dog_spawn_interval_ms: f32,
    pub max_dogs: usize,
    /// Probability in [0, 1] that a mouse spawn is golden
    pub golden_mouse_chance: f32,
}

impl DifficultyProfile {
    pub fn easy() -> Self {
        Self {
            cat_speed: 280.0,
            mouse_base_speed: 120.0,
            mouse_spawn_interval_ms: 900.0,
            max_mice: 14,
            dog_base_speed: 80.0,
            dog_spawn_interval_ms: 8000.0,
            max_dogs: 2,
            golden_mouse_chance: 0.12,
        }
    }

    pub fn normal() -> Self {
        Self {
            cat_speed: 260.0,
            mouse_base_speed: 140.0,
            mouse_spawn_interval_ms: 1100.0,
            max_mice: 12,
            dog_base_speed: 110.0,
            dog_spawn_interval_ms: 6000.0,
            max_dogs: 3,
            golden_mouse_chance: 0.08,
        }
    }

    pub fn hard() -> Self {
        Self {
            cat_speed: 250.0,
            mouse_base_speed: 170.0,
            mouse_spawn_interval_ms: 1300.0,
            max_mice: 10,
            dog_base_speed: 140.0,
            dog_spawn_interval_ms: 4500.0,
            max_dogs: 4,
            golden_mouse_chance: 0.05,
        }
    }

    /// Clamp out-of-range values from hand-edited tables
    fn sanitized(mut self) -> Self {
        self.golden_mouse_chance = self.golden_mouse_chance.clamp(0.0, 1.0);
        self.cat_speed = self.cat_speed.max(0.0);
        self.mouse_base_speed = self.mouse_base_speed.max(0.0);
        self.dog_base_speed = self.dog_base_speed.max(0.0);
        self
    }
}

/// The full difficulty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub easy: DifficultyProfile,
    pub normal: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::easy(),
            normal: DifficultyProfile::normal(),
            hard: DifficultyProfile::hard(),
        }
    }
}

impl Tuning {
    pub fn profile(&self, key: DifficultyKey) -> &DifficultyProfile {
        match key {
            DifficultyKey::Easy => &self.easy,
            DifficultyKey::Normal => &self.normal,
            DifficultyKey::Hard => &self.hard,
        }
    }

    /// Parse a table from JSON; presets missing from the document keep their
    /// compiled-in values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(Self {
            easy: tuning.easy.sanitized(),
            normal: tuning.normal.sanitized(),
            hard: tuning.hard.sanitized(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

/// Cosmetic stage themes; never read by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTheme {
    #[default]
    Garden,
    Kitchen,
    Rooftop,
}

impl MapTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapTheme::Garden => "garden",
            MapTheme::Kitchen => "kitchen",
            MapTheme::Rooftop => "rooftop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "garden" => Some(MapTheme::Garden),
            "kitchen" => Some(MapTheme::Kitchen),
            "rooftop" | "roof" => Some(MapTheme::Rooftop),
            _ => None,
        }
    }

    pub fn resolve(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown map {s:?}, using {}", Self::default().as_str());
            Self::default()
        })
    }

    /// Display name for overlays
    pub fn label(&self) -> &'static str {
        match self {
            MapTheme::Garden => "Garden",
            MapTheme::Kitchen => "Kitchen",
            MapTheme::Rooftop => "Rooftop",
        }
    }

    /// Stage background colour (0xRRGGBB)
    pub fn background(&self) -> u32 {
        match self {
            MapTheme::Garden => 0x7cb342,
            MapTheme::Kitchen => 0xd7ccc8,
            MapTheme::Rooftop => 0x37474f,
        }
    }
}
