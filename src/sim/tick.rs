//! Variable timestep simulation tick
//!
//! One call advances a running session by one display frame. The order of the
//! phases below matters: a dog catch ends the frame before any mouse moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::rects_overlap;
use super::rng::RandomSource;
use super::spawn::{spawn_dog, spawn_mouse};
use super::state::{EndReason, GameEvent, GamePhase, GameState, StageBounds};
use crate::consts::*;
use crate::{from_heading, heading_of};

/// A logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// The set of directions currently held by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn with(mut self, dir: Direction) -> Self {
        self.set(dir, true);
        self
    }

    pub fn contains(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Unit intent vector (screen space, +y down); opposite pairs cancel
    pub fn intent(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        d.normalize_or_zero()
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), HeldDirections::with)
    }
}

/// Everything the collaborators feed into one step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directions held this frame
    pub held: HeldDirections,
    /// Current stage size, when the layout reports one
    pub stage: Option<StageBounds>,
}

/// Turn a measured frame delta into the step size actually simulated.
///
/// Missing, non-finite or non-positive deltas become `FALLBACK_FRAME_DT`;
/// everything else is capped at `MAX_FRAME_DT`. Deltas stay `f64` so that
/// timer bookkeeping does not pick up single-precision error.
pub fn sanitize_dt(raw: Option<f64>) -> f64 {
    match raw {
        Some(dt) if dt.is_finite() && dt > 0.0 => dt.min(MAX_FRAME_DT),
        _ => FALLBACK_FRAME_DT,
    }
}

/// Advance a running session by `dt` seconds.
///
/// Does nothing unless the session is running. `dt` is passed through
/// [`sanitize_dt`] first, then rounded to whole microseconds for the session
/// and spawn timers so that repeated steps sum exactly.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f64,
    rng: &mut (impl RandomSource + ?Sized),
) {
    if !state.phase.is_running() {
        return;
    }
    let dt = sanitize_dt(Some(dt));
    let step_ms = (dt * 1_000_000.0).round() / 1000.0;

    if let Some(stage) = input.stage {
        state.resize(stage);
    }

    // Countdown
    state.elapsed_ms += step_ms;
    let whole_seconds = (state.elapsed_ms / 1000.0).floor() as u64;
    let remaining = u64::from(GAME_DURATION_SECONDS).saturating_sub(whole_seconds) as u32;
    if remaining < state.remaining_seconds {
        state.remaining_seconds = remaining;
        state.events.push(GameEvent::TimeChanged {
            remaining_seconds: remaining,
        });
    }
    if state.remaining_seconds == 0 {
        state.end(EndReason::Time);
        return;
    }

    // Positions integrate in single precision
    let dt = dt as f32;

    // Cat: velocity comes straight from input, no momentum
    state.held = input.held;
    state.cat.body.vel = input.held.intent() * state.profile.cat_speed;
    state.cat.body.pos += state.cat.body.vel * dt;
    state.cat.body.clamp_into(&state.stage);

    // Spawns
    state.mouse_spawn_timer_ms += step_ms;
    if state.mouse_spawn_timer_ms >= f64::from(state.profile.mouse_spawn_interval_ms) {
        state.mouse_spawn_timer_ms = 0.0;
        spawn_mouse(state, rng);
    }
    state.dog_spawn_timer_ms += step_ms;
    if state.dog_spawn_timer_ms >= f64::from(state.profile.dog_spawn_interval_ms) {
        state.dog_spawn_timer_ms = 0.0;
        spawn_dog(state, rng);
    }

    if update_dogs(state, dt) {
        state.end(EndReason::Caught);
        return;
    }

    update_mice(state, dt, rng);

    debug_assert!(state.cat.body.within(&state.stage));
    debug_assert!(state.mice.len() <= state.profile.max_mice);
    debug_assert!(state.dogs.len() <= state.profile.max_dogs);
}

/// Pure pursuit toward the cat. Returns true on the first dog that reaches
/// it; dogs after that one do not move this frame.
fn update_dogs(state: &mut GameState, dt: f32) -> bool {
    let cat_rect = state.cat.body.rect();
    let cat_center = state.cat.body.center();

    for dog in &mut state.dogs {
        let heading = (cat_center - dog.body.center()).normalize_or_zero();
        dog.body.vel = heading * dog.speed;
        dog.body.pos += dog.body.vel * dt;
        dog.body.clamp_into(&state.stage);

        if rects_overlap(&dog.body.rect(), &cat_rect) {
            log::debug!("{} #{} caught the cat", dog.kind.as_str(), dog.id);
            return true;
        }
    }
    false
}

/// Wander, bounce and capture. Walks newest to oldest so captured mice can be
/// removed in place.
fn update_mice(state: &mut GameState, dt: f32, rng: &mut (impl RandomSource + ?Sized)) {
    let cat_rect = state.cat.body.rect();
    let stage = state.stage;
    let drift = MOUSE_JITTER_RATE * dt;

    for i in (0..state.mice.len()).rev() {
        let mouse = &mut state.mice[i];

        let heading = heading_of(mouse.body.vel) + (rng.next_unit() - 0.5) * drift;
        mouse.body.vel = from_heading(heading, mouse.speed);
        mouse.body.pos += mouse.body.vel * dt;
        bounce_off_walls(&mut mouse.body.pos, &mut mouse.body.vel, mouse.body.size, &stage);

        if rects_overlap(&cat_rect, &mouse.body.rect()) {
            let caught = state.mice.remove(i);
            state.score += caught.score;
            state.events.push(GameEvent::MouseCaught {
                id: caught.id,
                kind: caught.kind,
                points: caught.score,
            });
            log::debug!(
                "Caught {} mouse #{} (+{}), score {}",
                caught.kind.as_str(),
                caught.id,
                caught.score,
                state.score
            );
        }
    }
}

/// Elastic bounce: reflect the velocity component into the stage on any wall
/// touched and pin the position to that wall
fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, stage: &StageBounds) {
    let max = stage.max_corner(size);
    if pos.x <= 0.0 {
        pos.x = 0.0;
        vel.x = vel.x.abs();
    }
    if pos.y <= 0.0 {
        pos.y = 0.0;
        vel.y = vel.y.abs();
    }
    if pos.x >= max.x {
        pos.x = max.x;
        vel.x = -vel.x.abs();
    }
    if pos.y >= max.y {
        pos.y = max.y;
        vel.y = -vel.y.abs();
    }
}

/// True when the session would accept another step
pub fn accepts_frames(state: &GameState) -> bool {
    state.phase == GamePhase::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{DogKind, MouseKind};
    use crate::sim::rng::scripted::Scripted;
    use crate::sim::rng::seeded;
    use crate::sim::state::{Body, Dog, Mouse};
    use crate::tuning::DifficultyProfile;

    /// Running state with no dogs and spawns pushed far into the future
    fn quiet_state() -> GameState {
        let mut state = GameState::new(StageBounds::new(800.0, 600.0));
        state.profile = DifficultyProfile {
            mouse_spawn_interval_ms: 1.0e9,
            dog_spawn_interval_ms: 1.0e9,
            ..DifficultyProfile::normal()
        };
        state.phase = GamePhase::Running;
        state
    }

    fn push_mouse(state: &mut GameState, kind: MouseKind, pos: Vec2, vel: Vec2) -> u32 {
        let variant = kind.variant();
        let id = state.next_entity_id();
        state.mice.push(Mouse {
            id,
            kind,
            body: Body {
                pos,
                size: variant.size,
                vel,
            },
            speed: vel.length(),
            score: variant.score,
        });
        id
    }

    fn push_dog(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.dogs.push(Dog {
            id,
            kind: DogKind::Bulldog,
            body: Body::new(pos, DogKind::Bulldog.variant().size),
            speed: 100.0,
        });
        id
    }

    fn held(dirs: &[Direction]) -> TickInput {
        TickInput {
            held: dirs.iter().copied().collect(),
            stage: None,
        }
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(Some(0.01)), 0.01);
        assert_eq!(sanitize_dt(Some(0.5)), MAX_FRAME_DT);
        assert_eq!(sanitize_dt(Some(0.0)), FALLBACK_FRAME_DT);
        assert_eq!(sanitize_dt(Some(-0.2)), FALLBACK_FRAME_DT);
        assert_eq!(sanitize_dt(Some(f64::NAN)), FALLBACK_FRAME_DT);
        assert_eq!(sanitize_dt(None), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_intent_cancels_opposites() {
        let both: HeldDirections = [Direction::Up, Direction::Down].into_iter().collect();
        assert_eq!(both.intent(), Vec2::ZERO);
        let all: HeldDirections = Direction::ALL.into_iter().collect();
        assert_eq!(all.intent(), Vec2::ZERO);
        let up_left: HeldDirections = [Direction::Up, Direction::Down, Direction::Left]
            .into_iter()
            .collect();
        assert_eq!(up_left.intent(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_up_right_velocity() {
        let mut state = quiet_state();
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &held(&[Direction::Up, Direction::Right]), 0.016, &mut rng);
        let v = state.cat.body.vel;
        assert!((v.x - 183.847_76).abs() < 0.01, "vx {}", v.x);
        assert!((v.y + 183.847_76).abs() < 0.01, "vy {}", v.y);
    }

    #[test]
    fn test_no_input_stops_cat_instantly() {
        let mut state = quiet_state();
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &held(&[Direction::Left]), 0.016, &mut rng);
        assert!(state.cat.body.vel.x < 0.0);
        let before = state.cat.body.pos;
        tick(&mut state, &held(&[]), 0.016, &mut rng);
        assert_eq!(state.cat.body.vel, Vec2::ZERO);
        assert_eq!(state.cat.body.pos, before);
    }

    #[test]
    fn test_cat_clamped_at_wall() {
        let mut state = quiet_state();
        let mut rng = Scripted::constant(0.5);
        for _ in 0..200 {
            tick(&mut state, &held(&[Direction::Right, Direction::Down]), 0.033, &mut rng);
        }
        assert_eq!(state.cat.body.pos, Vec2::new(752.0, 552.0));
    }

    #[test]
    fn test_overlapping_mouse_is_caught() {
        let mut state = quiet_state();
        let cat = state.cat.body.pos;
        // One pixel of overlap on both axes after this frame's motion
        let pos = cat + Vec2::new(47.0, 47.0);
        push_mouse(&mut state, MouseKind::Fat, pos, Vec2::new(1.0, 0.0));
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.001, &mut rng);
        assert!(state.mice.is_empty());
        assert_eq!(state.score, 2);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::MouseCaught {
                points: 2,
                kind: MouseKind::Fat,
                ..
            }
        )));
    }

    #[test]
    fn test_edge_touching_mouse_is_not_caught() {
        let mut state = quiet_state();
        let cat = state.cat.body.pos;
        // Moving away along y keeps x exactly on the cat's right edge
        let pos = cat + Vec2::new(48.0, 0.0);
        push_mouse(&mut state, MouseKind::Normal, pos, Vec2::new(0.0, 140.0));
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        assert_eq!(state.mice.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reverse_iteration_removes_correct_mice() {
        let mut state = quiet_state();
        let cat = state.cat.body.pos;
        let down = Vec2::new(0.0, 1.0);
        let far = push_mouse(&mut state, MouseKind::Normal, Vec2::new(100.0, 100.0), down);
        push_mouse(&mut state, MouseKind::Normal, cat + Vec2::new(10.0, 10.0), down);
        let far2 = push_mouse(&mut state, MouseKind::Speedy, Vec2::new(600.0, 100.0), down);
        push_mouse(&mut state, MouseKind::Golden, cat + Vec2::new(5.0, 5.0), Vec2::X);

        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        let ids: Vec<u32> = state.mice.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![far, far2]);
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_mouse_bounces_off_left_wall() {
        let mut state = quiet_state();
        push_mouse(&mut state, MouseKind::Normal, Vec2::new(1.0, 100.0), Vec2::new(-140.0, 0.0));
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        let m = &state.mice[0];
        assert_eq!(m.body.pos.x, 0.0);
        assert!(m.body.vel.x > 0.0);
        assert!((m.body.vel.length() - 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_mouse_bounces_off_bottom_wall() {
        let mut state = quiet_state();
        push_mouse(&mut state, MouseKind::Normal, Vec2::new(100.0, 567.0), Vec2::new(0.0, 140.0));
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        let m = &state.mice[0];
        assert_eq!(m.body.pos.y, 568.0);
        assert!(m.body.vel.y < 0.0);
    }

    #[test]
    fn test_mouse_wander_keeps_speed() {
        let mut state = quiet_state();
        push_mouse(&mut state, MouseKind::Normal, Vec2::new(100.0, 100.0), Vec2::new(140.0, 0.0));
        let mut rng = seeded(1);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.016, &mut rng);
            let m = &state.mice[0];
            assert!((m.body.vel.length() - 140.0).abs() < 1e-2);
        }
        // Drift per frame is at most 0.5 * 0.4 * dt radians
        let heading = heading_of(state.mice[0].body.vel).abs();
        assert!(heading <= 30.0 * 0.5 * MOUSE_JITTER_RATE * 0.016 + 1e-4);
    }

    #[test]
    fn test_dog_pursues_cat() {
        let mut state = quiet_state();
        push_dog(&mut state, Vec2::new(10.0, 10.0));
        let mut rng = Scripted::constant(0.5);
        let before = (state.cat.body.center() - state.dogs[0].body.center()).length();
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        let dog = &state.dogs[0];
        let after = (state.cat.body.center() - dog.body.center()).length();
        assert!(after < before);
        assert!((dog.body.vel.length() - 100.0).abs() < 1e-3);
        assert!(dog.body.vel.x > 0.0 && dog.body.vel.y > 0.0);
    }

    #[test]
    fn test_dog_catch_short_circuits_mice() {
        let mut state = quiet_state();
        let cat = state.cat.body.pos;
        let first = push_dog(&mut state, cat + Vec2::new(20.0, 0.0));
        let second = push_dog(&mut state, Vec2::new(10.0, 10.0));
        push_mouse(&mut state, MouseKind::Normal, cat + Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        let mouse_before = state.mice[0].body;
        let second_before = state.dogs[1].body.pos;

        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        assert_eq!(state.phase, GamePhase::Ended(EndReason::Caught));
        assert_eq!(state.score, 0);
        assert_eq!(state.mice.len(), 1);
        assert_eq!(state.mice[0].body, mouse_before);
        assert_eq!(state.dogs[1].body.pos, second_before);
        assert_ne!(first, second);
    }

    #[test]
    fn test_countdown_reaches_zero_and_ends() {
        for dt in [0.01_f64, 0.02, 0.03, 0.016] {
            let mut state = quiet_state();
            let mut rng = Scripted::constant(0.5);
            let steps = (60.0 / dt).round() as u32;
            for _ in 0..steps - 1 {
                tick(&mut state, &TickInput::default(), dt, &mut rng);
            }
            assert_eq!(state.phase, GamePhase::Running, "dt {dt}");
            assert_eq!(state.remaining_seconds, 1, "dt {dt}");

            tick(&mut state, &TickInput::default(), dt, &mut rng);
            assert_eq!(state.phase, GamePhase::Ended(EndReason::Time), "dt {dt}");
            assert_eq!(state.remaining_seconds, 0, "dt {dt}");
            assert_eq!(state.elapsed_ms, 60_000.0, "dt {dt}");
        }
    }

    #[test]
    fn test_time_events_count_down() {
        let mut state = quiet_state();
        let mut rng = Scripted::constant(0.5);
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), 0.03, &mut rng);
        }
        // 2.1 s simulated
        assert_eq!(state.remaining_seconds, 58);
        let changes: Vec<u32> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::TimeChanged { remaining_seconds } => Some(*remaining_seconds),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![59, 58]);
    }

    #[test]
    fn test_ended_state_is_frozen() {
        let mut state = quiet_state();
        let pos = Vec2::new(100.0, 100.0);
        push_mouse(&mut state, MouseKind::Normal, pos, Vec2::new(140.0, 0.0));
        state.phase = GamePhase::Ended(EndReason::Time);
        let snapshot = (state.cat.body, state.mice[0].body, state.elapsed_ms, state.score);
        let mut rng = seeded(3);
        tick(&mut state, &held(&[Direction::Left]), 0.016, &mut rng);
        assert_eq!(snapshot, (state.cat.body, state.mice[0].body, state.elapsed_ms, state.score));
    }

    #[test]
    fn test_mouse_spawn_timer() {
        let mut state = quiet_state();
        state.profile.mouse_spawn_interval_ms = 1100.0;
        let mut rng = seeded(4);
        // 33 frames of 33 ms = 1089 ms: not yet
        for _ in 0..33 {
            tick(&mut state, &TickInput::default(), 0.033, &mut rng);
        }
        assert!(state.mice.is_empty());
        tick(&mut state, &TickInput::default(), 0.033, &mut rng);
        assert_eq!(state.mice.len(), 1);
        assert_eq!(state.mouse_spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_stage_change_applied_before_motion() {
        let mut state = quiet_state();
        state.cat.body.pos = Vec2::new(700.0, 500.0);
        let input = TickInput {
            held: HeldDirections::none(),
            stage: Some(StageBounds::new(400.0, 300.0)),
        };
        let mut rng = Scripted::constant(0.5);
        tick(&mut state, &input, 0.016, &mut rng);
        assert_eq!(state.stage, StageBounds::new(400.0, 300.0));
        assert_eq!(state.cat.body.pos, Vec2::new(352.0, 252.0));
    }

    #[test]
    fn test_tiny_stage_never_panics() {
        let stage = StageBounds::new(10.0, 5.0);
        let mut state = GameState::new(stage);
        state.profile = DifficultyProfile {
            mouse_spawn_interval_ms: 50.0,
            dog_spawn_interval_ms: 1000.0,
            ..DifficultyProfile::normal()
        };
        state.phase = GamePhase::Running;
        let input = held(&[Direction::Right, Direction::Down]);
        let mut rng = seeded(21);

        for _ in 0..200 {
            if !accepts_frames(&state) {
                break;
            }
            tick(&mut state, &input, 0.016, &mut rng);
            assert_eq!(state.cat.body.pos, Vec2::ZERO);
            assert!(state.cat.body.within(&stage));
            for mouse in &state.mice {
                assert!(mouse.body.within(&stage), "{mouse:?}");
                assert!(mouse.body.vel.is_finite(), "{mouse:?}");
            }
            for dog in &state.dogs {
                assert!(dog.body.within(&stage), "{dog:?}");
                assert!(dog.body.vel.is_finite(), "{dog:?}");
            }
        }
        // Every mouse lands on the pinned cat; the first dog does too
        assert!(state.score > 0);
        assert_eq!(state.phase, GamePhase::Ended(EndReason::Caught));
    }

    #[test]
    fn test_bounce_on_collapsed_stage() {
        let stage = StageBounds::new(10.0, 5.0);
        let mut pos = Vec2::new(3.0, -2.0);
        let mut vel = Vec2::new(5.0, 5.0);
        bounce_off_walls(&mut pos, &mut vel, Vec2::splat(32.0), &stage);
        assert_eq!(pos, Vec2::ZERO);
        assert!(vel.is_finite());
        assert_eq!(vel.length(), Vec2::new(5.0, 5.0).length());
    }
}
