//! Gate generation
//!
//! Gates are vertical openings the player must be inside of at every
//! gate-crossing boundary. A new gate replaces the current one exactly on a
//! boundary tick; between boundaries the gate is left untouched.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Source of uniformly distributed integers
///
/// Gate placement and starting altitude draw through this capability so runs
/// can be replayed from a seed.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`
    fn uniform(&mut self, low: i32, high: i32) -> i32;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: i32, high: i32) -> i32 {
        self.random_range(low..high)
    }
}

/// A vertical opening, bounds in altitude units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub upper: i32,
    pub lower: i32,
}

impl Gate {
    /// Gate whose opening starts at `lower`
    pub fn from_lower(lower: i32) -> Self {
        Self {
            upper: lower + GATE_SIZE,
            lower,
        }
    }

    /// True if `altitude` is strictly inside the opening
    #[inline]
    pub fn contains(&self, altitude: i32) -> bool {
        self.lower < altitude && altitude < self.upper
    }
}

/// Lowest permitted gate floor (inclusive)
pub const GATE_LOWER_MIN: i32 = GATE_PAD;
/// Highest permitted gate floor (exclusive)
pub const GATE_LOWER_MAX: i32 = MAX_HEIGHT - GATE_PAD - GATE_SIZE;

/// Generate a gate at a random height
pub fn first_gate<R: RandomSource + ?Sized>(rng: &mut R) -> Gate {
    Gate::from_lower(rng.uniform(GATE_LOWER_MIN, GATE_LOWER_MAX))
}

/// Gate for the tick at `elapsed_ms`
///
/// Placement ignores `prev`, so two consecutive gates can be too far apart to
/// reach in one gate interval.
// TODO: bound the new gate by how far the player can climb or fall from `prev`
pub fn next_gate<R: RandomSource + ?Sized>(prev: Gate, elapsed_ms: i64, rng: &mut R) -> Gate {
    if is_at_gate(elapsed_ms) {
        let gate = first_gate(rng);
        log::debug!(
            "Gate at {}ms: {}..{} -> {}..{}",
            elapsed_ms,
            prev.lower,
            prev.upper,
            gate.lower,
            gate.upper
        );
        gate
    } else {
        prev
    }
}

/// True on gate-crossing boundary ticks (never at the starting instant)
#[inline]
pub fn is_at_gate(elapsed_ms: i64) -> bool {
    elapsed_ms != 0 && elapsed_ms % GATE_DISTANCE_MS == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_start_is_not_a_gate() {
        assert!(!is_at_gate(0));
        assert!(!is_at_gate(1));
        assert!(!is_at_gate(3999));
        assert!(is_at_gate(4000));
        assert!(is_at_gate(8000));
        assert!(!is_at_gate(8001));
    }

    #[test]
    fn test_first_gate_bounds() {
        assert_eq!(GATE_LOWER_MAX, 800);

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let gate = first_gate(&mut rng);
            assert_eq!(gate.upper - gate.lower, GATE_SIZE);
            assert!((50..800).contains(&gate.lower), "lower out of range: {}", gate.lower);
        }
    }

    #[test]
    fn test_first_gate_is_seeded() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(first_gate(&mut a), first_gate(&mut b));
        }
    }

    #[test]
    fn test_next_gate_keeps_gate_between_boundaries() {
        let mut rng = Pcg32::seed_from_u64(1);
        let gate = Gate::from_lower(400);
        for t in [0, 1, 1999, 3999, 4001, 7999] {
            assert_eq!(next_gate(gate, t, &mut rng), gate);
        }

        // No draws were consumed by the calls above
        let mut fresh = Pcg32::seed_from_u64(1);
        assert_eq!(first_gate(&mut rng), first_gate(&mut fresh));
    }

    #[test]
    fn test_next_gate_draws_on_boundary() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut expected_rng = Pcg32::seed_from_u64(3);
        let gate = Gate::from_lower(400);

        let next = next_gate(gate, 4000, &mut rng);
        assert_eq!(next, first_gate(&mut expected_rng));
    }

    #[test]
    fn test_gate_contains_is_strict() {
        let gate = Gate::from_lower(400);
        assert_eq!(gate.upper, 550);
        assert!(gate.contains(401));
        assert!(gate.contains(549));
        assert!(!gate.contains(400));
        assert!(!gate.contains(550));
    }

    proptest! {
        #[test]
        fn prop_is_at_gate_matches_modulo(t in any::<i64>()) {
            prop_assert_eq!(is_at_gate(t), t != 0 && t % 4000 == 0);
        }

        #[test]
        fn prop_generated_gates_in_range(seed in any::<u64>(), t in 0i64..100_000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let gate = next_gate(first_gate(&mut rng), t, &mut rng);
            prop_assert_eq!(gate.upper - gate.lower, 150);
            prop_assert!(gate.lower >= 50 && gate.lower < 800);
        }

        #[test]
        fn prop_next_gate_idempotent_off_boundary(lower in 50i32..800, t in 0i64..100_000) {
            prop_assume!(!is_at_gate(t));
            let mut rng = Pcg32::seed_from_u64(0);
            let gate = Gate::from_lower(lower);
            let once = next_gate(gate, t, &mut rng);
            let twice = next_gate(once, t, &mut rng);
            prop_assert_eq!(once, gate);
            prop_assert_eq!(twice, gate);
        }
    }
}
