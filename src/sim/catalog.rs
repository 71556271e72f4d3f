//! Mouse and dog variants
//!
//! Each kind carries a speed multiplier and a hitbox; mice also carry a score
//! value. Kinds are drawn by weight, with a rare golden mouse override.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Mouse kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseKind {
    Normal,
    Speedy,
    Fat,
    Golden,
}

/// Stats for a mouse kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseVariant {
    pub kind: MouseKind,
    pub speed_multiplier: f32,
    pub size: Vec2,
    pub score: u32,
    /// Selection weight (0 for kinds outside the weighted pool)
    pub weight: f32,
}

pub const NORMAL_MOUSE: MouseVariant = MouseVariant {
    kind: MouseKind::Normal,
    speed_multiplier: 1.0,
    size: Vec2::new(32.0, 32.0),
    score: 1,
    weight: 60.0,
};

pub const SPEEDY_MOUSE: MouseVariant = MouseVariant {
    kind: MouseKind::Speedy,
    speed_multiplier: 1.6,
    size: Vec2::new(28.0, 28.0),
    score: 1,
    weight: 20.0,
};

pub const FAT_MOUSE: MouseVariant = MouseVariant {
    kind: MouseKind::Fat,
    speed_multiplier: 0.7,
    size: Vec2::new(40.0, 40.0),
    score: 2,
    weight: 16.0,
};

pub const GOLDEN_MOUSE: MouseVariant = MouseVariant {
    kind: MouseKind::Golden,
    speed_multiplier: 1.3,
    size: Vec2::new(30.0, 30.0),
    score: 3,
    weight: 0.0,
};

/// Weighted pool for ordinary mouse spawns
pub const MOUSE_POOL: [MouseVariant; 3] = [NORMAL_MOUSE, SPEEDY_MOUSE, FAT_MOUSE];

impl MouseKind {
    pub fn variant(self) -> MouseVariant {
        match self {
            MouseKind::Normal => NORMAL_MOUSE,
            MouseKind::Speedy => SPEEDY_MOUSE,
            MouseKind::Fat => FAT_MOUSE,
            MouseKind::Golden => GOLDEN_MOUSE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MouseKind::Normal => "normal",
            MouseKind::Speedy => "speedy",
            MouseKind::Fat => "fat",
            MouseKind::Golden => "golden",
        }
    }
}

/// Dog kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DogKind {
    Bulldog,
    Greyhound,
    Wolf,
}

/// Stats for a dog kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DogVariant {
    pub kind: DogKind,
    pub speed_multiplier: f32,
    pub size: Vec2,
    pub weight: f32,
}

pub const DOG_POOL: [DogVariant; 3] = [
    DogVariant {
        kind: DogKind::Bulldog,
        speed_multiplier: 0.85,
        size: Vec2::new(56.0, 56.0),
        weight: 40.0,
    },
    DogVariant {
        kind: DogKind::Greyhound,
        speed_multiplier: 1.35,
        size: Vec2::new(60.0, 44.0),
        weight: 40.0,
    },
    DogVariant {
        kind: DogKind::Wolf,
        speed_multiplier: 1.15,
        size: Vec2::new(58.0, 58.0),
        weight: 20.0,
    },
];

impl DogKind {
    pub fn variant(self) -> DogVariant {
        match self {
            DogKind::Bulldog => DOG_POOL[0],
            DogKind::Greyhound => DOG_POOL[1],
            DogKind::Wolf => DOG_POOL[2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DogKind::Bulldog => "bulldog",
            DogKind::Greyhound => "greyhound",
            DogKind::Wolf => "wolf",
        }
    }
}

/// Pick one candidate with probability proportional to its weight.
///
/// Draws `u` in `[0, total)` and walks the list subtracting weights; the first
/// candidate that brings the remainder to `<= 0` wins. Float drift that never
/// crosses zero falls through to the last candidate. `None` only for an empty
/// list.
pub fn weighted_pick<'a, T>(
    candidates: &'a [T],
    weight: impl Fn(&T) -> f32,
    rng: &mut (impl RandomSource + ?Sized),
) -> Option<&'a T> {
    let total: f32 = candidates.iter().map(&weight).sum();
    let mut roll = rng.next_unit() * total;
    for candidate in candidates {
        roll -= weight(candidate);
        if roll <= 0.0 {
            return Some(candidate);
        }
    }
    candidates.last()
}

/// Choose the variant for a new mouse.
///
/// `golden_chance` is checked first with its own draw; the weighted pool is
/// only sampled when the golden roll misses.
pub fn choose_mouse_variant(
    golden_chance: f32,
    rng: &mut (impl RandomSource + ?Sized),
) -> MouseVariant {
    if rng.next_unit() < golden_chance {
        return GOLDEN_MOUSE;
    }
    weighted_pick(&MOUSE_POOL, |v| v.weight, rng)
        .copied()
        .unwrap_or(NORMAL_MOUSE)
}

/// Choose the variant for a new dog
pub fn choose_dog_variant(rng: &mut (impl RandomSource + ?Sized)) -> DogVariant {
    weighted_pick(&DOG_POOL, |v| v.weight, rng)
        .copied()
        .unwrap_or(DOG_POOL[0])
}
