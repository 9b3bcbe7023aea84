//! Typed simulation events.
//!
//! Every action in a run -- externally injected or generated by a handler --
//! is an [`Event`] scheduled at an absolute tick and consumed exactly once.
//! Payloads carry clan names rather than [`crate::id::ClanId`] handles:
//! events are allowed to refer to clans the registry has never seen, and
//! every handler treats an unknown name as a silent no-op rather than an
//! error.
//!
//! The timestamp is not part of the event itself; the scheduler owns it.
//! This keeps events reusable as plain data (they serialize without any
//! scheduling state attached).

/// The integer unit of simulated time.
pub type Ticks = u64;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A simulation event. External feeds inject the first five kinds plus the
/// queries; `StartProcessing`, `CompleteProcessing`, `Refill`, and `Unblock`
/// are normally generated by handlers as deferred follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    /// A raid on `target` demanding `demand` units. If some reachable mine
    /// can cover the whole demand, `value` is captured when that mine's
    /// processing cycle completes; otherwise the attack is dropped.
    Attack {
        target: String,
        demand: u32,
        value: u64,
    },

    /// Founds a clan (idempotently) and appends its declared roads. Roads
    /// to clans that do not exist yet create them as plain clans.
    NewClan { name: String, roads: Vec<RoadSpec> },

    /// Grants mine capability to a clan, creating it first if needed.
    /// A clan that is already a mine gets its parameters replaced and its
    /// availability reset.
    NewMine {
        name: String,
        capacity: u32,
        unit_time: Ticks,
        refill_delay: Ticks,
    },

    /// Marks a clan impassable for `duration` ticks. The handler schedules
    /// the matching `Unblock`.
    Block { name: String, duration: Ticks },

    /// Clears a clan's blocked flag.
    Unblock { name: String },

    /// Commits `amount` units on `mine` and starts its processing cycle.
    StartProcessing {
        mine: String,
        amount: u32,
        value: u64,
    },

    /// Ends `mine`'s processing cycle and credits `value` to the ledger.
    CompleteProcessing { mine: String, value: u64 },

    /// Restores `mine` to full capacity.
    Refill { mine: String },

    /// Reports every mine's current availability and capacity.
    StatusQuery,

    /// Reports the ledger total.
    GoldQuery,

    /// Stops the drain loop immediately, discarding later-queued events.
    Terminate,
}

/// A road declared inline by a [`Event::NewClan`] payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoadSpec {
    pub to: String,
    pub travel_time: Ticks,
}

// ---------------------------------------------------------------------------
// Discriminant
// ---------------------------------------------------------------------------

/// Discriminant tag for event kinds, used for dispatch tracing and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Attack,
    NewClan,
    NewMine,
    Block,
    Unblock,
    StartProcessing,
    CompleteProcessing,
    Refill,
    StatusQuery,
    GoldQuery,
    Terminate,
}

impl Event {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Attack { .. } => EventKind::Attack,
            Event::NewClan { .. } => EventKind::NewClan,
            Event::NewMine { .. } => EventKind::NewMine,
            Event::Block { .. } => EventKind::Block,
            Event::Unblock { .. } => EventKind::Unblock,
            Event::StartProcessing { .. } => EventKind::StartProcessing,
            Event::CompleteProcessing { .. } => EventKind::CompleteProcessing,
            Event::Refill { .. } => EventKind::Refill,
            Event::StatusQuery => EventKind::StatusQuery,
            Event::GoldQuery => EventKind::GoldQuery,
            Event::Terminate => EventKind::Terminate,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
