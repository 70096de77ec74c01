//! Game session driver
//!
//! Wraps a [`GameState`] with the frame clock and lifecycle hooks the host
//! loop needs. The host owns scheduling: call [`Simulation::frame`] (or
//! [`Simulation::advance`]) once per rendered frame and stop calling to cancel.

use rand::Rng;

use super::snapshot::RenderSnapshot;
use super::state::{GameEvent, GameState, RunSummary};
use super::tick::{TickInput, clamp_dt, tick};
use crate::settings::Settings;

/// Turns host timestamps (milliseconds) into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; the nominal frame on the first call
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let elapsed = self.last_ms.map(|last| ((now_ms - last) / 1000.0) as f32);
        self.last_ms = Some(now_ms);
        clamp_dt(elapsed.unwrap_or(0.0))
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// One game session: the current run plus its clock
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    clock: FrameClock,
    settings: Settings,
    runs: u32,
}

impl Simulation {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let state = GameState::with_particle_limit(seed, settings.max_particles());
        Self {
            state,
            clock: FrameClock::new(),
            settings,
            runs: 1,
        }
    }

    /// Start a new run, discarding all level, entity and stat state.
    ///
    /// The next seed is drawn from the current run's generator, so a seeded
    /// session replays the same sequence of runs.
    pub fn reset(&mut self) {
        let seed: u64 = self.state.rng.random();
        self.state = GameState::with_particle_limit(seed, self.settings.max_particles());
        self.clock.reset();
        self.runs += 1;
        log::info!("Run {} started", self.runs);
    }

    /// Advance one frame given a host timestamp in milliseconds
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Option<RunSummary> {
        let dt = self.clock.delta(now_ms);
        self.step(input, dt)
    }

    /// Advance one frame of `dt` seconds (clamped).
    ///
    /// Returns the run summary on the frame the end-of-run handoff fires.
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> Option<RunSummary> {
        self.step(input, clamp_dt(dt))
    }

    fn step(&mut self, input: &TickInput, dt: f32) -> Option<RunSummary> {
        let queued = self.state.events.len();
        tick(&mut self.state, input, dt);
        self.state.events[queued..].iter().find_map(|e| match e {
            GameEvent::RunEnded(summary) => Some(*summary),
            _ => None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Runs started this session (including the current one)
    pub fn runs(&self) -> u32 {
        self.runs
    }
}
