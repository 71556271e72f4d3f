//! Game state and core simulation types
//!
//! The session owns everything here exclusively; renderers only ever see
//! snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{DogKind, MouseKind};
use super::collision::{Rect, clamp, max_offset};
use super::tick::HeldDirections;
use crate::consts::*;
use crate::tuning::{DifficultyKey, DifficultyProfile, MapTheme};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The countdown reached zero
    Time,
    /// A dog reached the cat
    Caught,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Before the first start, or after a reset
    #[default]
    Idle,
    /// Accepting frames
    Running,
    /// Frame loop halted, waiting for a restart
    Ended(EndReason),
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            GamePhase::Ended(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Stage dimensions as reported by the layout collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for StageBounds {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_WIDTH, DEFAULT_STAGE_HEIGHT)
    }
}

impl StageBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Largest valid top-left corner for a box of `size`
    #[inline]
    pub fn max_corner(&self, size: Vec2) -> Vec2 {
        Vec2::new(max_offset(self.width, size.x), max_offset(self.height, size.y))
    }
}

/// Position, extent and velocity shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Hard-wall clamp into the stage; velocity is left alone
    pub fn clamp_into(&mut self, stage: &StageBounds) {
        let max = stage.max_corner(self.size);
        self.pos.x = clamp(self.pos.x, 0.0, max.x);
        self.pos.y = clamp(self.pos.y, 0.0, max.y);
    }

    pub fn within(&self, stage: &StageBounds) -> bool {
        let max = stage.max_corner(self.size);
        (0.0..=max.x).contains(&self.pos.x) && (0.0..=max.y).contains(&self.pos.y)
    }
}

/// The player's cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: u32,
    pub body: Body,
}

impl Cat {
    pub fn centered(id: u32, stage: &StageBounds) -> Self {
        let size = Vec2::new(CAT_WIDTH, CAT_HEIGHT);
        let mut body = Body::new((stage.center() - size / 2.0).max(Vec2::ZERO), size);
        body.clamp_into(stage);
        Self { id, body }
    }
}

/// A mouse worth catching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    pub id: u32,
    pub kind: MouseKind,
    pub body: Body,
    /// Fixed travel speed; wander only turns the heading
    pub speed: f32,
    pub score: u32,
}

/// A dog hunting the cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: u32,
    pub kind: DogKind,
    pub body: Body,
    pub speed: f32,
}

/// Things the renderer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    MouseSpawned { id: u32, kind: MouseKind },
    DogSpawned { id: u32, kind: DogKind },
    MouseCaught { id: u32, kind: MouseKind, points: u32 },
    TimeChanged { remaining_seconds: u32 },
    SessionEnded { reason: EndReason, score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub stage: StageBounds,
    pub phase: GamePhase,
    /// Simulated time since start
    pub elapsed_ms: f64,
    pub remaining_seconds: u32,
    pub score: u32,
    pub difficulty: DifficultyKey,
    /// Bound at start, immutable while running
    pub profile: DifficultyProfile,
    pub map: MapTheme,
    /// Directions read on the most recent step
    pub held: HeldDirections,
    pub cat: Cat,
    /// Insertion order is spawn order
    pub mice: Vec<Mouse>,
    pub dogs: Vec<Dog>,
    pub mouse_spawn_timer_ms: f64,
    pub dog_spawn_timer_ms: f64,
    /// Pending events, drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh idle state on the given stage
    pub fn new(stage: StageBounds) -> Self {
        Self {
            stage,
            phase: GamePhase::Idle,
            elapsed_ms: 0.0,
            remaining_seconds: GAME_DURATION_SECONDS,
            score: 0,
            difficulty: DifficultyKey::default(),
            profile: DifficultyProfile::normal(),
            map: MapTheme::default(),
            held: HeldDirections::default(),
            cat: Cat::centered(0, &stage),
            mice: Vec::new(),
            dogs: Vec::new(),
            mouse_spawn_timer_ms: 0.0,
            dog_spawn_timer_ms: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop every ephemeral entity and rewind timers and score.
    ///
    /// Entity IDs keep counting so a renderer never confuses a new mouse with
    /// one from the previous round.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.elapsed_ms = 0.0;
        self.remaining_seconds = GAME_DURATION_SECONDS;
        self.score = 0;
        self.held = HeldDirections::default();
        self.mice.clear();
        self.dogs.clear();
        self.mouse_spawn_timer_ms = 0.0;
        self.dog_spawn_timer_ms = 0.0;
        self.events.clear();
        let id = self.cat.id;
        self.cat = Cat::centered(id, &self.stage);
    }

    /// Apply new stage bounds, re-clamping every entity.
    ///
    /// Velocities and timers are untouched. An ended session only records the
    /// new bounds: its final frame stays as it was until the next reset.
    pub fn resize(&mut self, stage: StageBounds) {
        if stage == self.stage {
            return;
        }
        log::debug!("Stage resized to {}x{}", stage.width, stage.height);
        self.stage = stage;
        if matches!(self.phase, GamePhase::Ended(_)) {
            return;
        }
        self.cat.body.clamp_into(&stage);
        for mouse in &mut self.mice {
            mouse.body.clamp_into(&stage);
        }
        for dog in &mut self.dogs {
            dog.body.clamp_into(&stage);
        }
    }

    pub fn end(&mut self, reason: EndReason) {
        self.phase = GamePhase::Ended(reason);
        self.events.push(GameEvent::SessionEnded {
            reason,
            score: self.score,
        });
        log::info!("Session ended ({reason:?}) with score {}", self.score);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
