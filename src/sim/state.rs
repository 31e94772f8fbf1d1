//! Game state and core simulation types
//!
//! The whole run lives in a small `Copy` snapshot. Each tick consumes one
//! snapshot and produces the next.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::flight::distance_to_next_gate;
use super::gate::{Gate, RandomSource, first_gate};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first impulse
    #[default]
    Starting,
    /// Active flight
    Playing,
    /// Missed a gate; terminal for this session
    Dead,
    /// Player aborted; terminal
    Exiting,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Starting => "Starting",
            GamePhase::Playing => "Playing",
            GamePhase::Dead => "Dead",
            GamePhase::Exiting => "Exiting",
        }
    }

    /// No further phase changes can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::Exiting)
    }
}

/// Millisecond run clock, reset when play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_ms: i64,
}

impl Stopwatch {
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    pub fn advanced(self, ms: i64) -> Self {
        Self {
            elapsed_ms: self.elapsed_ms + ms,
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Random starting altitude in `[MIN_HEIGHT, MAX_HEIGHT)`
pub fn starting_altitude<R: RandomSource + ?Sized>(rng: &mut R) -> i32 {
    rng.uniform(MIN_HEIGHT, MAX_HEIGHT)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Run clock
    pub clock: Stopwatch,
    /// Milliseconds since the last impulse (or since play started)
    pub since_impulse_ms: i64,
    pub altitude: i32,
    pub gate: Gate,
}

impl GameState {
    /// Fresh state in `Starting`, with a gate and altitude already drawn
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let gate = first_gate(rng);
        let altitude = starting_altitude(rng);
        Self {
            phase: GamePhase::Starting,
            clock: Stopwatch::default(),
            since_impulse_ms: 0,
            altitude,
            gate,
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.clock.elapsed_ms()
    }

    /// Read-only view handed to the renderer
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            altitude: self.altitude,
            gate_upper: self.gate.upper,
            gate_lower: self.gate.lower,
            distance_to_next_gate: distance_to_next_gate(self.elapsed_ms()),
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

/// Per-tick render input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub altitude: i32,
    pub gate_upper: i32,
    pub gate_lower: i32,
    pub distance_to_next_gate: i32,
    pub elapsed_ms: i64,
}
