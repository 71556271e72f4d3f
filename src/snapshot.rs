//! Read-only views handed to the renderer
//!
//! A snapshot is a plain copy: nothing in it points back into the session, so
//! a renderer cannot mutate simulation state through it.

use serde::{Deserialize, Serialize};

use crate::sim::{DogKind, EndReason, GamePhase, GameState, MouseKind, Rect};
use crate::tuning::{DifficultyKey, MapTheme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatView {
    pub id: u32,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseView {
    pub id: u32,
    pub kind: MouseKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogView {
    pub id: u32,
    pub kind: DogKind,
    pub rect: Rect,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub remaining_seconds: u32,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub difficulty: DifficultyKey,
    pub map: MapTheme,
}

impl Hud {
    /// Overlay text for a finished session
    pub fn final_message(&self) -> Option<String> {
        let reason = match self.end_reason? {
            EndReason::Time => "Time's up",
            EndReason::Caught => "Caught by a dog",
        };
        Some(format!("{reason}! Score: {}", self.score))
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stage_width: f32,
    pub stage_height: f32,
    pub cat: CatView,
    pub mice: Vec<MouseView>,
    pub dogs: Vec<DogView>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            stage_width: state.stage.width,
            stage_height: state.stage.height,
            cat: CatView {
                id: state.cat.id,
                rect: state.cat.body.rect(),
            },
            mice: state
                .mice
                .iter()
                .map(|m| MouseView {
                    id: m.id,
                    kind: m.kind,
                    rect: m.body.rect(),
                })
                .collect(),
            dogs: state
                .dogs
                .iter()
                .map(|d| DogView {
                    id: d.id,
                    kind: d.kind,
                    rect: d.body.rect(),
                })
                .collect(),
            hud: Hud {
                score: state.score,
                remaining_seconds: state.remaining_seconds,
                phase: state.phase,
                end_reason: state.phase.end_reason(),
                difficulty: state.difficulty,
                map: state.map,
            },
        }
    }
}
