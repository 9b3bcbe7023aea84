//! The simulation engine: owns all run state and drives the drain loop.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - A [`ClanRegistry`] (every clan's mutable state)
//! - A [`Router`] (the road network and travel time queries)
//! - An [`EventScheduler`] (the time-ordered pending event queue)
//! - A [`GoldLedger`] (captured value)
//!
//! # Control flow
//!
//! External events are injected with [`Engine::schedule`]; [`Engine::drain`]
//! then pops events in `(tick, insertion)` order and dispatches each to the
//! handler matching its kind. Handlers mutate the registry and router and
//! may schedule follow-up events -- a processing completion, a refill, an
//! unblock -- which re-enter the queue and drain in their own time order,
//! interleaved with whatever external events are still pending.
//!
//! Everything runs on the caller's thread. Delays are expressed by
//! scheduling a future event, never by waiting, and exactly one handler
//! runs at a time, so no state is ever shared or locked. A harness running
//! several independent timelines gives each its own `Engine`.
//!
//! # Error posture
//!
//! Handlers are total: an event naming an unknown clan is absorbed as a
//! no-op, an attack no mine can serve is dropped, and nothing inside the
//! drain loop returns an error or panics.

use crate::event::{Event, RoadSpec, Ticks};
use crate::id::ClanId;
use crate::ledger::GoldLedger;
use crate::query::{MineStatus, QueryOutput, QuerySink, StatusReport};
use crate::registry::{ClanRegistry, MineSpec};
use crate::router::Router;
use crate::scheduler::EventScheduler;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One simulation run's worth of state.
#[derive(Debug, Default)]
pub struct Engine {
    registry: ClanRegistry,
    router: Router,
    scheduler: EventScheduler,
    ledger: GoldLedger,
    current_tick: Ticks,
}

impl Engine {
    /// Create an engine with an empty territory at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Add a plain clan (idempotent).
    pub fn add_clan(&mut self, name: &str) -> ClanId {
        self.registry.lookup_or_create(name)
    }

    /// Add a clan with mine capability (idempotent; re-adding replaces the
    /// mine parameters).
    pub fn add_mine(&mut self, name: &str, spec: MineSpec) -> ClanId {
        let id = self.registry.lookup_or_create(name);
        self.registry.mark_mine(name, spec);
        id
    }

    /// Add an undirected road, creating either endpoint if needed.
    pub fn add_road(&mut self, a: &str, b: &str, travel_time: Ticks) {
        let a = self.registry.lookup_or_create(a);
        let b = self.registry.lookup_or_create(b);
        self.router.add_road(a, b, travel_time);
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// The clan registry (read-only).
    pub fn registry(&self) -> &ClanRegistry {
        &self.registry
    }

    /// The road network (read-only).
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The tick of the most recently dispatched event.
    pub fn current_tick(&self) -> Ticks {
        self.current_tick
    }

    /// Events still waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// The ledger total, without going through a query event.
    pub fn gold_total(&self) -> u64 {
        self.ledger.total()
    }

    /// Every mine's status at the current tick, without going through a
    /// query event.
    pub fn status_report(&self) -> StatusReport {
        self.build_status_report(self.current_tick)
    }

    // -----------------------------------------------------------------------
    // Event intake and drain
    // -----------------------------------------------------------------------

    /// Inject an event at an absolute tick.
    pub fn schedule(&mut self, tick: Ticks, event: Event) {
        self.scheduler.schedule(tick, event);
    }

    /// Drain the queue in time order until it is empty or a terminate event
    /// pops. Terminate stops the loop immediately and discards whatever is
    /// still queued.
    ///
    /// Query events emit their results into `sink`; pass `&mut ()` to
    /// discard them.
    pub fn drain(&mut self, sink: &mut dyn QuerySink) {
        while let Some((tick, event)) = self.scheduler.pop_next() {
            if tick > self.current_tick {
                self.current_tick = tick;
            }
            if matches!(event, Event::Terminate) {
                self.scheduler.clear();
                break;
            }
            self.dispatch(tick, event, sink);
        }
    }

    fn dispatch(&mut self, tick: Ticks, event: Event, sink: &mut dyn QuerySink) {
        match event {
            Event::Attack {
                target,
                demand,
                value,
            } => self.handle_attack(tick, &target, demand, value),
            Event::NewClan { name, roads } => self.handle_new_clan(&name, &roads),
            Event::NewMine {
                name,
                capacity,
                unit_time,
                refill_delay,
            } => self.handle_new_mine(
                &name,
                MineSpec {
                    capacity,
                    unit_time,
                    refill_delay,
                },
            ),
            Event::Block { name, duration } => self.handle_block(tick, &name, duration),
            Event::Unblock { name } => self.registry.clear_blocked(&name),
            Event::StartProcessing {
                mine,
                amount,
                value,
            } => self.handle_start_processing(tick, &mine, amount, value),
            Event::CompleteProcessing { mine, value } => {
                self.handle_complete_processing(tick, &mine, value)
            }
            Event::Refill { mine } => self.registry.refill(&mine),
            Event::StatusQuery => sink.emit(QueryOutput::Status(self.build_status_report(tick))),
            Event::GoldQuery => sink.emit(QueryOutput::Gold(self.ledger.total())),
            // Handled in the drain loop before dispatch.
            Event::Terminate => {}
        }
    }

    // -----------------------------------------------------------------------
    // Attack allocation
    // -----------------------------------------------------------------------

    /// Pick a mine for an attack and schedule its processing cycle.
    ///
    /// Candidates are the unblocked mines the router can reach from the
    /// target with spare capacity (a mid-cycle mine offers zero and drops
    /// out on its own). They rank by round-trip travel time -- the haul
    /// pays the road twice, out and back -- with ties keeping registry
    /// creation order. The first candidate whose availability covers the
    /// whole demand wins; partial allocation across several mines is
    /// deliberately not attempted. When no candidate qualifies the attack
    /// is dropped without a trace.
    fn handle_attack(&mut self, tick: Ticks, target: &str, demand: u32, value: u64) {
        let Some(target_id) = self.registry.id_of(target) else {
            // Attack on a clan nobody has declared: dropped.
            return;
        };

        let mut candidates: Vec<(Ticks, ClanId)> = Vec::new();
        for (id, clan) in self.registry.iter() {
            let Some(mine) = clan.mine.as_ref() else {
                continue;
            };
            if clan.is_blocked_at(tick) || mine.offerable() == 0 {
                continue;
            }
            if let Some(d) = self.router.distance(&self.registry, tick, target_id, id) {
                candidates.push((d, id));
            }
        }
        candidates.sort_by_key(|&(d, _)| d * 2);

        for (d, id) in candidates {
            let Some(clan) = self.registry.get(id) else {
                continue;
            };
            let Some(mine) = clan.mine.as_ref() else {
                continue;
            };
            if mine.offerable() >= demand {
                self.scheduler.schedule(
                    tick + d,
                    Event::StartProcessing {
                        mine: clan.name.clone(),
                        amount: demand,
                        value,
                    },
                );
                return;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Processing lifecycle
    // -----------------------------------------------------------------------

    fn handle_start_processing(&mut self, tick: Ticks, mine: &str, amount: u32, value: u64) {
        let Some(spec) = self.registry.begin_processing(mine, amount, tick) else {
            return;
        };
        let done = tick + u64::from(amount) * spec.unit_time;
        self.scheduler.schedule(
            done,
            Event::CompleteProcessing {
                mine: mine.to_string(),
                value,
            },
        );
    }

    fn handle_complete_processing(&mut self, tick: Ticks, mine: &str, value: u64) {
        if self.registry.complete_processing(mine).is_none() {
            return;
        }
        self.ledger.credit(value);
        if let Some(spec) = self.registry.mine_spec(mine) {
            self.scheduler.schedule(
                tick + spec.refill_delay,
                Event::Refill {
                    mine: mine.to_string(),
                },
            );
        }
    }

    // -----------------------------------------------------------------------
    // Registry and road events
    // -----------------------------------------------------------------------

    fn handle_new_clan(&mut self, name: &str, roads: &[RoadSpec]) {
        let id = self.registry.lookup_or_create(name);
        for road in roads {
            let other = self.registry.lookup_or_create(&road.to);
            self.router.add_road(id, other, road.travel_time);
        }
    }

    fn handle_new_mine(&mut self, name: &str, spec: MineSpec) {
        self.registry.lookup_or_create(name);
        self.registry.mark_mine(name, spec);
    }

    /// Blocks do not stack: a repeat block overwrites the recorded expiry,
    /// and whichever scheduled unblock fires first clears the flag even if
    /// another window would logically still apply.
    fn handle_block(&mut self, tick: Ticks, name: &str, duration: Ticks) {
        let until = tick + duration;
        self.registry.set_blocked(name, until);
        self.scheduler.schedule(
            until,
            Event::Unblock {
                name: name.to_string(),
            },
        );
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn build_status_report(&self, tick: Ticks) -> StatusReport {
        let mut mines: Vec<MineStatus> = self
            .registry
            .iter()
            .filter_map(|(_, clan)| {
                clan.mine.as_ref().map(|mine| MineStatus {
                    name: clan.name.clone(),
                    available: mine.reported_available(tick),
                    capacity: mine.spec.capacity,
                })
            })
            .collect();
        mines.sort_by(|a, b| a.name.cmp(&b.name));
        StatusReport { tick, mines }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
