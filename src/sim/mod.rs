//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed 1 ms timestep only
//! - Randomness only through an explicit `RandomSource`
//! - No rendering or platform dependencies

pub mod flight;
pub mod gate;
pub mod state;
pub mod tick;

pub use flight::{basic_altitude, distance_to_next_gate, is_player_alive, next_player_altitude};
pub use gate::{Gate, RandomSource, first_gate, is_at_gate, next_gate};
pub use state::{GamePhase, GameState, HudSnapshot, RngState, Stopwatch, starting_altitude};
pub use tick::{PhaseEvent, Session, TickInput, tick, transition};
