//! Warpath Core -- event-driven simulation of a clan territory under raid.
//!
//! This crate models a territory of clans connected by weighted roads, some
//! clans owning resource mines, and simulates time-stamped events -- raids,
//! mine discoveries, clan formation, blockades, processing cycles, refills --
//! that mutate clan and mine state and accumulate captured gold.
//!
//! # Control flow
//!
//! External events are injected into the [`engine::Engine`]'s scheduler and
//! drained in strict `(tick, insertion)` order. Each event dispatches to the
//! handler for its kind; handlers mutate the registry and router and may
//! schedule follow-up events (a processing completion, a refill, an
//! unblock) that re-enter the queue and drain in their own time order.
//! Delays are always expressed as future events, never as waiting: the whole
//! simulation is logically timestamped and runs on one thread.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Owns one run's state and drives the drain loop.
//! - [`event::Event`] -- Tagged union of every event kind, with typed
//!   payloads; free-text parsing lives in front-end adapters, never here.
//! - [`scheduler::EventScheduler`] -- Time-ordered queue with an explicit
//!   FIFO tie-break at equal ticks.
//! - [`registry::ClanRegistry`] -- Every clan's mutable state; mutators on
//!   unknown names are documented silent no-ops.
//! - [`router::Router`] -- Road network and Dijkstra travel time queries,
//!   honoring blockades.
//! - [`ledger::GoldLedger`] -- Monotone captured-value accumulator.
//! - [`query::QuerySink`] -- The seam where status and gold query results
//!   leave the core as plain data.

#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod engine;
pub mod event;
pub mod id;
pub mod ledger;
pub mod query;
pub mod registry;
pub mod router;
pub mod scheduler;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
