//! Gate Flight - fly through gates against falling altitude
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gates, flight, game state)
//! - `ui`: Key bindings and text views for the terminal
//! - `settings`: Driver preferences

pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Altitude floor
    pub const MIN_HEIGHT: i32 = 0;
    /// Altitude ceiling
    pub const MAX_HEIGHT: i32 = 1000;

    /// Vertical size of every gate opening
    pub const GATE_SIZE: i32 = 150;
    /// Milliseconds between gate crossings
    pub const GATE_DISTANCE_MS: i64 = 4 * 1000;
    /// Keeps spawned gates away from the floor and ceiling
    pub const GATE_PAD: i32 = 50;

    /// Peak height contributed by an impulse
    pub const JUMP_HEIGHT: i32 = 200;
    /// Milliseconds for the impulse curve to lose one unit of altitude
    pub const DECAY_MS_PER_UNIT: i64 = 10;

    /// Simulation timestep (one tick per millisecond)
    pub const TICK_MS: i64 = 1;
}
