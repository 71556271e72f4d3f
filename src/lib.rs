//! Cat Chase - A cat-and-mouse arcade chase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `session`: Idle/Running/Ended state machine and frame driver
//! - `platform`: Input bindings and frame timing glue
//! - `tuning`: Data-driven difficulty and map tables
//! - `settings`: Launch preferences for the headless driver

pub mod autopilot;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::ConfigError;
pub use session::{Session, run_headless};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use tuning::{DifficultyKey, DifficultyProfile, MapTheme, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Length of one session
    pub const GAME_DURATION_SECONDS: u32 = 60;

    /// Largest frame delta fed to the integrator (bounds error on hitches)
    pub const MAX_FRAME_DT: f64 = 0.033;
    /// Substituted when the measured frame delta is unusable
    pub const FALLBACK_FRAME_DT: f64 = 0.016;

    /// Cat hitbox
    pub const CAT_WIDTH: f32 = 48.0;
    pub const CAT_HEIGHT: f32 = 48.0;

    /// Inward padding for spawns on a stage edge
    pub const SPAWN_PADDING: f32 = 6.0;
    /// Random spread around the center-bound spawn heading (radians, ±)
    pub const SPAWN_ANGLE_SPREAD: f32 = 0.3;

    /// Mouse wander drift rate (radians per second)
    pub const MOUSE_JITTER_RATE: f32 = 0.4;

    /// Default stage used before a layout collaborator reports one
    pub const DEFAULT_STAGE_WIDTH: f32 = 800.0;
    pub const DEFAULT_STAGE_HEIGHT: f32 = 600.0;
}

/// Unit vector for a heading angle, scaled to `speed`
#[inline]
pub fn from_heading(theta: f32, speed: f32) -> Vec2 {
    Vec2::new(theta.cos() * speed, theta.sin() * speed)
}

/// Heading angle of a vector (0 for the zero vector)
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
