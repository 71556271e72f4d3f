//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{
    DogKind, DogVariant, MouseKind, MouseVariant, choose_dog_variant, choose_mouse_variant,
    weighted_pick,
};
pub use collision::{Rect, clamp, rects_overlap};
pub use rng::{RandomSource, RngSource, seeded};
pub use spawn::{Edge, edge_position, spawn_dog, spawn_mouse};
pub use state::{Body, Cat, Dog, EndReason, GameEvent, GamePhase, GameState, Mouse, StageBounds};
pub use tick::{Direction, HeldDirections, TickInput, accepts_frames, sanitize_dt, tick};
