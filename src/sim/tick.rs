//! Fixed timestep simulation tick
//!
//! Advances a `GameState` by one millisecond. Order within a playing tick:
//! altitude, gate, liveness, then input, then the clock.

use rand_pcg::Pcg32;

use super::flight::{is_player_alive, next_player_altitude};
use super::gate::{RandomSource, first_gate, next_gate};
use super::state::{GamePhase, GameState, RngState, starting_altitude};
use crate::consts::*;

/// A single input delivered to a tick (at most one per tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInput {
    /// Upward boost (also starts the run)
    Impulse,
    /// Abort
    Quit,
}

/// Something that can move the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Impulse,
    Quit,
    /// Liveness check failed at a gate crossing
    Crash,
}

impl From<TickInput> for PhaseEvent {
    fn from(input: TickInput) -> Self {
        match input {
            TickInput::Impulse => PhaseEvent::Impulse,
            TickInput::Quit => PhaseEvent::Quit,
        }
    }
}

/// All phase changes live here
pub fn transition(phase: GamePhase, event: PhaseEvent) -> GamePhase {
    match (phase, event) {
        (GamePhase::Starting, PhaseEvent::Impulse) => GamePhase::Playing,
        (GamePhase::Starting | GamePhase::Playing, PhaseEvent::Quit) => GamePhase::Exiting,
        (GamePhase::Playing, PhaseEvent::Crash) => GamePhase::Dead,
        (phase, _) => phase,
    }
}

/// Advance the game state by one tick
pub fn tick<R: RandomSource + ?Sized>(
    state: GameState,
    input: Option<TickInput>,
    rng: &mut R,
) -> GameState {
    match state.phase {
        GamePhase::Playing => playing_tick(state, input, rng),
        _ => halted_tick(state, input, rng),
    }
}

fn playing_tick<R: RandomSource + ?Sized>(
    state: GameState,
    input: Option<TickInput>,
    rng: &mut R,
) -> GameState {
    let elapsed_ms = state.elapsed_ms();
    let mut next = state;

    next.altitude = next_player_altitude(state.altitude, state.since_impulse_ms);
    next.gate = next_gate(state.gate, elapsed_ms, rng);

    if !is_player_alive(next.gate, next.altitude, elapsed_ms) {
        next.phase = transition(next.phase, PhaseEvent::Crash);
        log::info!(
            "Missed gate {}..{} at altitude {} ({}ms)",
            next.gate.lower,
            next.gate.upper,
            next.altitude,
            elapsed_ms
        );
        return next;
    }

    next.since_impulse_ms += TICK_MS;
    if let Some(input) = input {
        if input == TickInput::Impulse {
            next.since_impulse_ms = 0;
        }
        next.phase = transition(next.phase, input.into());
        if next.phase == GamePhase::Exiting {
            log::info!("Mission aborted at {}ms", elapsed_ms);
        }
    }

    next.clock = next.clock.advanced(TICK_MS);
    next
}

fn halted_tick<R: RandomSource + ?Sized>(
    state: GameState,
    input: Option<TickInput>,
    rng: &mut R,
) -> GameState {
    let Some(input) = input else {
        return state;
    };

    let phase = transition(state.phase, input.into());
    if phase == state.phase {
        return state;
    }

    log::info!("Phase {} -> {}", state.phase.as_str(), phase.as_str());
    if phase == GamePhase::Playing {
        return start_run(rng);
    }

    GameState { phase, ..state }
}

/// State for the first playing tick: clock at zero, new gate and altitude
fn start_run<R: RandomSource + ?Sized>(rng: &mut R) -> GameState {
    let gate = first_gate(rng);
    let altitude = starting_altitude(rng);
    log::debug!(
        "Run start: altitude {}, gate {}..{}",
        altitude,
        gate.lower,
        gate.upper
    );
    GameState {
        phase: GamePhase::Playing,
        clock: Default::default(),
        since_impulse_ms: 0,
        altitude,
        gate,
    }
}

/// A seeded session: the current snapshot plus the RNG that feeds it
#[derive(Debug, Clone)]
pub struct Session {
    rng_state: RngState,
    state: GameState,
    rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let state = GameState::new(&mut rng);
        log::info!("Session seeded with {}", seed);
        Self {
            rng_state,
            state,
            rng,
        }
    }

    /// Seed the session was created with, for replaying the run
    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Run one tick and keep the result
    pub fn step(&mut self, input: Option<TickInput>) -> GameState {
        self.state = tick(self.state, input, &mut self.rng);
        self.state
    }
}
