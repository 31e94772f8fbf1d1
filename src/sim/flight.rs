//! Player flight and gate checks
//!
//! Altitude follows a linear decay curve that restarts at every impulse. All
//! functions here are pure integer arithmetic on values owned by the caller.

use super::gate::{Gate, is_at_gate};
use crate::consts::*;

/// Height contributed by the most recent impulse after `since_impulse_ms`
///
/// Starts at `JUMP_HEIGHT` and loses one unit every 10 ms, going negative once
/// the impulse is spent. Saturates at the `i32` range, which is only reached
/// after roughly 2.1e10 ms without an impulse.
#[inline]
pub fn basic_altitude(since_impulse_ms: i64) -> i32 {
    basic_altitude_wide(since_impulse_ms).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[inline]
fn basic_altitude_wide(since_impulse_ms: i64) -> i64 {
    JUMP_HEIGHT as i64 - since_impulse_ms / DECAY_MS_PER_UNIT
}

/// Player altitude for this tick
///
/// On the impulse tick the full jump height is added to `prev`. On every other
/// tick the curve advances by one step and the residual between `prev` and the
/// curve's previous value is carried along, so a clamp at the floor or ceiling
/// stays baked into the trajectory until the next impulse.
pub fn next_player_altitude(prev: i32, since_impulse_ms: i64) -> i32 {
    let current = basic_altitude_wide(since_impulse_ms);

    let altitude = if since_impulse_ms == 0 {
        prev as i64 + current
    } else {
        let offset = prev as i64 - basic_altitude_wide(since_impulse_ms.saturating_sub(1));
        current + offset
    };

    altitude.clamp(MIN_HEIGHT as i64, MAX_HEIGHT as i64) as i32
}

/// Milliseconds until the next gate crossing, in `(0, GATE_DISTANCE_MS]`
#[inline]
pub fn distance_to_next_gate(elapsed_ms: i64) -> i32 {
    (GATE_DISTANCE_MS - elapsed_ms.rem_euclid(GATE_DISTANCE_MS)) as i32
}

/// Collision check, only evaluated at the instant of crossing
pub fn is_player_alive(gate: Gate, altitude: i32, elapsed_ms: i64) -> bool {
    if is_at_gate(elapsed_ms) {
        gate.contains(altitude)
    } else {
        true
    }
}
