//! Session state machine and frame driver
//!
//! `Idle -> Running -> Ended(Time | Caught)`. Only [`Session::start`] leaves
//! `Ended`, and it behaves the same as the first start. The session never
//! schedules itself; a host driver calls [`Session::frame`] (or
//! [`Session::step`]) once per display refresh and stops as soon as either
//! returns that the session is no longer running.

use rand_pcg::Pcg32;

use crate::platform::FrameClock;
use crate::sim::{
    GameEvent, GamePhase, GameState, HeldDirections, RandomSource, StageBounds, TickInput,
    sanitize_dt, seeded, spawn_dog, tick,
};
use crate::snapshot::Snapshot;
use crate::tuning::{DifficultyKey, MapTheme, Tuning};

/// One player's game, from first start through any number of restarts
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = Pcg32> {
    state: GameState,
    rng: R,
    tuning: Tuning,
    clock: FrameClock,
}

impl Session<Pcg32> {
    /// Session driven by a seeded PCG generator
    pub fn new(seed: u64, stage: StageBounds) -> Self {
        Self::with_rng(seeded(seed), stage)
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_rng(rng: R, stage: StageBounds) -> Self {
        Self {
            state: GameState::new(stage),
            rng,
            tuning: Tuning::default(),
            clock: FrameClock::new(),
        }
    }

    /// Replace the difficulty table; takes effect on the next start
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase.is_running()
    }

    /// Start (or restart) with user-supplied keys; unknown keys fall back to
    /// the default difficulty and map
    pub fn start(&mut self, difficulty: &str, map: &str) {
        self.start_with(DifficultyKey::resolve(difficulty), MapTheme::resolve(map));
    }

    /// Start (or restart) with resolved keys.
    ///
    /// Valid from any phase; starting while running is an implicit restart.
    pub fn start_with(&mut self, difficulty: DifficultyKey, map: MapTheme) {
        if self.state.phase.is_running() {
            log::debug!("Restarting a running session");
        }
        self.state.reset();
        self.state.difficulty = difficulty;
        self.state.profile = self.tuning.profile(difficulty).clone();
        self.state.map = map;
        self.state.phase = GamePhase::Running;
        spawn_dog(&mut self.state, &mut self.rng);
        self.clock.rearm();
        log::info!(
            "Session started: difficulty {}, map {}",
            difficulty.as_str(),
            map.as_str()
        );
    }

    /// Back to idle, clearing every ephemeral entity
    pub fn reset(&mut self) {
        self.state.reset();
        self.clock.rearm();
    }

    /// Report a new stage size from the layout collaborator
    pub fn resize(&mut self, stage: StageBounds) {
        self.state.resize(stage);
    }

    /// Advance by a measured delta (seconds; `None` when unavailable).
    ///
    /// Returns whether the session is still running afterwards. Calling this
    /// outside `Running` does nothing.
    pub fn step(&mut self, dt: Option<f64>, held: HeldDirections) -> bool {
        let input = TickInput { held, stage: None };
        tick(&mut self.state, &input, sanitize_dt(dt), &mut self.rng);
        self.is_running()
    }

    /// Advance with full collaborator input
    pub fn step_with(&mut self, dt: Option<f64>, input: &TickInput) -> bool {
        tick(&mut self.state, input, sanitize_dt(dt), &mut self.rng);
        self.is_running()
    }

    /// Animation-frame entry point: `timestamp_ms` is the host's frame time.
    ///
    /// Returns whether the host should schedule another frame.
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> bool {
        if !self.is_running() {
            return false;
        }
        let dt = self.clock.delta(timestamp_ms);
        self.step_with(Some(dt), input)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

/// Drive a session with a fixed frame period until it ends or `max_frames`
/// frames have run. `intent` picks the held directions for each frame and
/// `on_frame` sees every snapshot after it is produced. Returns the number of
/// frames run.
pub fn run_headless<R: RandomSource>(
    session: &mut Session<R>,
    frame_period_ms: f64,
    max_frames: u64,
    mut intent: impl FnMut(&GameState) -> HeldDirections,
    mut on_frame: impl FnMut(&Snapshot, Vec<GameEvent>),
) -> u64 {
    let mut ts = 0.0;
    let mut frames = 0;
    session.clock.rearm_at(ts);
    while frames < max_frames && session.is_running() {
        ts += frame_period_ms;
        let input = TickInput {
            held: intent(session.state()),
            stage: None,
        };
        let more = session.frame(ts, &input);
        frames += 1;
        let events = session.drain_events();
        on_frame(&session.snapshot(), events);
        if !more {
            break;
        }
    }
    frames
}
