//! Road network and shortest travel time queries.
//!
//! The router exclusively owns the undirected weighted adjacency structure.
//! Roads are append-only: clans and edges may be added mid-run, but nothing
//! is ever removed or re-weighted, so `distance` recomputes from scratch on
//! every call instead of maintaining incremental shortest paths. Territories
//! are small enough that per-event Dijkstra is the intended design.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use slotmap::SecondaryMap;

use crate::event::Ticks;
use crate::id::ClanId;
use crate::registry::ClanRegistry;

/// One direction of an undirected road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Road {
    pub to: ClanId,
    pub travel_time: Ticks,
}

/// The road network.
#[derive(Debug, Clone, Default)]
pub struct Router {
    adjacency: SecondaryMap<ClanId, Vec<Road>>,
}

impl Router {
    /// Create an empty road network.
    pub fn new() -> Self {
        Self {
            adjacency: SecondaryMap::new(),
        }
    }

    /// Add an undirected road between two clans. Both directions are
    /// inserted; parallel roads are allowed and the shorter one simply wins
    /// during search.
    pub fn add_road(&mut self, a: ClanId, b: ClanId, travel_time: Ticks) {
        self.adjacency
            .entry(a)
            .expect("clan handle is live for the whole run")
            .or_default()
            .push(Road {
                to: b,
                travel_time,
            });
        self.adjacency
            .entry(b)
            .expect("clan handle is live for the whole run")
            .or_default()
            .push(Road {
                to: a,
                travel_time,
            });
    }

    /// Roads leaving a clan.
    pub fn roads_from(&self, clan: ClanId) -> &[Road] {
        self.adjacency.get(clan).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected roads in the network.
    pub fn road_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Shortest travel time from `from` to `to` at `tick`, or `None` when
    /// no path exists.
    ///
    /// A clan blocked at `tick` cannot be entered, which rules it out both
    /// as a waypoint and as the destination. The one exception is
    /// `from == to`: reaching yourself needs no traversal and always costs
    /// zero, blocked or not.
    pub fn distance(
        &self,
        registry: &ClanRegistry,
        tick: Ticks,
        from: ClanId,
        to: ClanId,
    ) -> Option<Ticks> {
        if from == to {
            return Some(0);
        }

        let mut best: SecondaryMap<ClanId, Ticks> = SecondaryMap::new();
        let mut heap: BinaryHeap<Reverse<(Ticks, ClanId)>> = BinaryHeap::new();
        best.insert(from, 0);
        heap.push(Reverse((0, from)));

        while let Some(Reverse((dist, clan))) = heap.pop() {
            if clan == to {
                return Some(dist);
            }
            // Stale heap entry for a clan already settled via a shorter path.
            if best.get(clan).is_some_and(|&b| dist > b) {
                continue;
            }
            for road in self.roads_from(clan) {
                if registry.is_blocked_at(road.to, tick) {
                    continue;
                }
                let next = dist + road.travel_time;
                if best.get(road.to).is_none_or(|&b| next < b) {
                    best.insert(road.to, next);
                    heap.push(Reverse((next, road.to)));
                }
            }
        }

        None
    }
}

// ===========================================================================
// Tests
// ===========================================================================
