//! Platform abstraction layer
//!
//! Glue between the host and the simulation:
//! - Keyboard/touch events to held directions
//! - Animation-frame timestamps to frame deltas

pub mod input;
pub mod time;

pub use input::{InputState, KeyBindings};
pub use time::FrameClock;
