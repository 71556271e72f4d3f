//! Spawn policy and stage-edge placement
//!
//! New mice and dogs enter from a random edge of the stage. Mice start running
//! roughly toward the middle; dogs start still and pick up speed from pursuit.

use glam::Vec2;

use super::catalog::{choose_dog_variant, choose_mouse_variant};
use super::rng::RandomSource;
use super::state::{Body, Dog, GameEvent, GameState, Mouse, StageBounds};
use crate::consts::{SPAWN_ANGLE_SPREAD, SPAWN_PADDING};
use crate::{from_heading, heading_of};

/// Stage edge a spawn enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random(rng: &mut (impl RandomSource + ?Sized)) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}

/// Top-left corner for a box of `size` placed on `edge`.
///
/// The box sits `SPAWN_PADDING` inside the edge with a uniform offset along
/// it. On a stage too small for the box the offset range collapses to zero
/// and the result is clamped into the stage.
pub fn edge_position(
    edge: Edge,
    stage: &StageBounds,
    size: Vec2,
    rng: &mut (impl RandomSource + ?Sized),
) -> Vec2 {
    let pad = SPAWN_PADDING;
    let span_x = (stage.width - size.x - pad * 2.0).max(0.0);
    let span_y = (stage.height - size.y - pad * 2.0).max(0.0);
    let far_x = stage.width - size.x - pad;
    let far_y = stage.height - size.y - pad;

    let pos = match edge {
        Edge::Top => Vec2::new(rng.range(0.0, span_x) + pad, pad),
        Edge::Right => Vec2::new(far_x, rng.range(0.0, span_y) + pad),
        Edge::Bottom => Vec2::new(rng.range(0.0, span_x) + pad, far_y),
        Edge::Left => Vec2::new(pad, rng.range(0.0, span_y) + pad),
    };

    let mut body = Body::new(pos, size);
    body.clamp_into(stage);
    body.pos
}

/// Spawn a mouse if there is room for one
pub fn spawn_mouse(state: &mut GameState, rng: &mut (impl RandomSource + ?Sized)) -> Option<u32> {
    if state.mice.len() >= state.profile.max_mice {
        return None;
    }

    let variant = choose_mouse_variant(state.profile.golden_mouse_chance, rng);
    let edge = Edge::random(rng);
    let pos = edge_position(edge, &state.stage, variant.size, rng);

    let speed = state.profile.mouse_base_speed * variant.speed_multiplier;
    let toward_center = heading_of(state.stage.center() - pos);
    let heading = toward_center + rng.range(-SPAWN_ANGLE_SPREAD, SPAWN_ANGLE_SPREAD);

    let id = state.next_entity_id();
    let mut body = Body::new(pos, variant.size);
    body.vel = from_heading(heading, speed);
    state.mice.push(Mouse {
        id,
        kind: variant.kind,
        body,
        speed,
        score: variant.score,
    });
    state.events.push(GameEvent::MouseSpawned {
        id,
        kind: variant.kind,
    });
    log::debug!("Spawned {} mouse #{id} on {edge:?} edge", variant.kind.as_str());
    Some(id)
}

/// Spawn a dog if there is room for one
pub fn spawn_dog(state: &mut GameState, rng: &mut (impl RandomSource + ?Sized)) -> Option<u32> {
    if state.dogs.len() >= state.profile.max_dogs {
        return None;
    }

    let variant = choose_dog_variant(rng);
    let edge = Edge::random(rng);
    let pos = edge_position(edge, &state.stage, variant.size, rng);

    let id = state.next_entity_id();
    state.dogs.push(Dog {
        id,
        kind: variant.kind,
        body: Body::new(pos, variant.size),
        speed: state.profile.dog_base_speed * variant.speed_multiplier,
    });
    state.events.push(GameEvent::DogSpawned {
        id,
        kind: variant.kind,
    });
    log::debug!("Spawned {} #{id} on {edge:?} edge", variant.kind.as_str());
    Some(id)
}
