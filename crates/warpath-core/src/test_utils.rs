//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::engine::Engine;
use crate::event::Ticks;
use crate::registry::MineSpec;

// ===========================================================================
// Spec constructor
// ===========================================================================

pub fn mine_spec(capacity: u32, unit_time: Ticks, refill_delay: Ticks) -> MineSpec {
    MineSpec {
        capacity,
        unit_time,
        refill_delay,
    }
}

// ===========================================================================
// Territory builders
// ===========================================================================

/// The canonical two-clan territory: Ashfall roads to Duskwatch (travel 5),
/// and Duskwatch is a mine with capacity 30, unit time 1, refill delay 10.
pub fn frontier_pair() -> Engine {
    let mut engine = Engine::new();
    engine.add_clan("Ashfall");
    engine.add_mine("Duskwatch", mine_spec(30, 1, 10));
    engine.add_road("Ashfall", "Duskwatch", 5);
    engine
}

/// Build an arbitrary territory in one call. Mines are given as
/// `(name, capacity, unit_time, refill_delay)`.
pub fn territory(
    clans: &[&str],
    mines: &[(&str, u32, Ticks, Ticks)],
    roads: &[(&str, &str, Ticks)],
) -> Engine {
    let mut engine = Engine::new();
    for name in clans {
        engine.add_clan(name);
    }
    for &(name, capacity, unit_time, refill_delay) in mines {
        engine.add_mine(name, mine_spec(capacity, unit_time, refill_delay));
    }
    for &(a, b, t) in roads {
        engine.add_road(a, b, t);
    }
    engine
}

/// A ring of `n` clans with `spacing`-tick roads between neighbors; every
/// fourth clan is a mine. Used by benchmarks and property tests that want a
/// territory bigger than a handful of names.
pub fn ring_territory(n: usize, spacing: Ticks) -> Engine {
    let mut engine = Engine::new();
    let names: Vec<String> = (0..n).map(|i| format!("clan{i}")).collect();
    for (i, name) in names.iter().enumerate() {
        if i % 4 == 0 {
            engine.add_mine(name, mine_spec(100, 1, 5));
        } else {
            engine.add_clan(name);
        }
    }
    for i in 0..n {
        engine.add_road(&names[i], &names[(i + 1) % n], spacing);
    }
    engine
}
