//! Demo-mode player
//!
//! Chases the nearest mouse and breaks off to run from any dog that gets
//! close. Used by the headless driver and handy for soak tests; it only ever
//! produces held directions, like a real player would.

use glam::Vec2;

use crate::sim::{GameState, HeldDirections};

/// Dogs closer than this (center to center, px) are fled from
pub const DANGER_RADIUS: f32 = 150.0;
/// Axis offsets smaller than this are treated as aligned
const DEAD_ZONE: f32 = 4.0;

/// Directions the demo player would hold this frame
pub fn autopilot_intent(state: &GameState) -> HeldDirections {
    let cat = state.cat.body.center();

    let nearest_dog = state
        .dogs
        .iter()
        .map(|d| d.body.center())
        .min_by(|a, b| {
            a.distance_squared(cat)
                .partial_cmp(&b.distance_squared(cat))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(dog) = nearest_dog.filter(|d| d.distance(cat) < DANGER_RADIUS) {
        let mut away = cat - dog;
        // Pinned against a wall: slide along it instead of pushing into it
        let max = state.stage.max_corner(state.cat.body.size);
        let pos = state.cat.body.pos;
        if (away.x < 0.0 && pos.x <= 0.0) || (away.x > 0.0 && pos.x >= max.x) {
            away.x = 0.0;
            if away.y.abs() < DEAD_ZONE {
                away.y = DEAD_ZONE * 2.0;
            }
        }
        if (away.y < 0.0 && pos.y <= 0.0) || (away.y > 0.0 && pos.y >= max.y) {
            away.y = 0.0;
            if away.x.abs() < DEAD_ZONE {
                away.x = DEAD_ZONE * 2.0;
            }
        }
        return toward(away);
    }

    let target = state
        .mice
        .iter()
        .map(|m| m.body.center())
        .min_by(|a, b| {
            a.distance_squared(cat)
                .partial_cmp(&b.distance_squared(cat))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| state.stage.center());

    toward(target - cat)
}

/// Quantize a desired direction onto the four held directions
fn toward(delta: Vec2) -> HeldDirections {
    HeldDirections {
        up: delta.y < -DEAD_ZONE,
        down: delta.y > DEAD_ZONE,
        left: delta.x < -DEAD_ZONE,
        right: delta.x > DEAD_ZONE,
    }
}
