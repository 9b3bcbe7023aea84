use crate::event::Ticks;
use crate::id::ClanId;
use slotmap::SlotMap;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Mine state
// ---------------------------------------------------------------------------

/// Fixed parameters of a mine, set when the capability is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MineSpec {
    /// Maximum units allocatable to one processing cycle.
    pub capacity: u32,
    /// Ticks of processing per allocated unit.
    pub unit_time: Ticks,
    /// Ticks after a cycle completes until capacity resets.
    pub refill_delay: Ticks,
}

/// An in-flight processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingRun {
    pub amount: u32,
    pub started: Ticks,
}

/// Mine capability plus its mutable runtime state.
///
/// Invariant: while `processing` is set, `0 <= processing.amount <= capacity`
/// (guaranteed by candidate selection, which only commits what a mine
/// offers). `available` is authoritative only between cycles; mid-cycle the
/// stored value is stale until completion writes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mine {
    pub spec: MineSpec,
    pub available: u32,
    pub processing: Option<ProcessingRun>,
}

impl Mine {
    fn new(spec: MineSpec) -> Self {
        Self {
            spec,
            available: spec.capacity,
            processing: None,
        }
    }

    /// Units this mine can offer an attack right now. Zero mid-cycle, so a
    /// busy mine drops out of candidate selection without a separate check.
    pub fn offerable(&self) -> u32 {
        if self.processing.is_some() {
            0
        } else {
            self.available
        }
    }

    /// Availability as reported to a status query at `tick`.
    ///
    /// Mid-cycle the stored value is stale, so it is reconstructed as
    /// `capacity - (tick - started)`, never dropping below what the cycle
    /// actually committed.
    pub fn reported_available(&self, tick: Ticks) -> u32 {
        match self.processing {
            Some(run) => {
                let elapsed = tick.saturating_sub(run.started);
                let drained = elapsed.min(u64::from(run.amount)) as u32;
                self.spec.capacity.saturating_sub(drained)
            }
            None => self.available,
        }
    }
}

// ---------------------------------------------------------------------------
// Clan
// ---------------------------------------------------------------------------

/// A named entity in the territory. May carry mine capability; once granted
/// it is never revoked.
#[derive(Debug, Clone)]
pub struct Clan {
    pub name: String,
    /// Set by block handling, cleared by the matching unblock event.
    pub blocked: bool,
    /// Expiry tick of the most recent block. Eligibility checks compare
    /// against this so a clan becomes passable exactly at expiry even when
    /// the clearing unblock event drains later in the same tick.
    pub blocked_until: Ticks,
    pub mine: Option<Mine>,
}

impl Clan {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            blocked: false,
            blocked_until: 0,
            mine: None,
        }
    }

    /// Whether the clan has mine capability.
    pub fn is_mine(&self) -> bool {
        self.mine.is_some()
    }

    /// Whether the clan counts as blocked at `tick`.
    pub fn is_blocked_at(&self, tick: Ticks) -> bool {
        self.blocked && tick < self.blocked_until
    }
}

// ---------------------------------------------------------------------------
// ClanRegistry
// ---------------------------------------------------------------------------

/// Owns the mutable state of every clan and mine in one simulation run.
///
/// Lookup is by name -- the identity external events use -- while the router
/// keys its adjacency off the [`ClanId`] handles issued here. Clans are only
/// ever created, never removed, so iteration order is creation order and
/// stays stable for the whole run (candidate ranking ties depend on that).
///
/// Every name-addressed mutator is a deliberate no-op when the name is
/// unknown: the event stream is permissive about references to clans that
/// were never declared, and the simulation absorbs those events without
/// failing.
#[derive(Debug, Default)]
pub struct ClanRegistry {
    clans: SlotMap<ClanId, Clan>,
    by_name: HashMap<String, ClanId>,
}

impl ClanRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            clans: SlotMap::with_key(),
            by_name: HashMap::new(),
        }
    }

    /// Find a clan by name, creating a plain (non-mine) clan if absent.
    pub fn lookup_or_create(&mut self, name: &str) -> ClanId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = self.clans.insert(Clan::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up a clan's handle by name.
    pub fn id_of(&self, name: &str) -> Option<ClanId> {
        self.by_name.get(name).copied()
    }

    /// Get a clan by handle.
    pub fn get(&self, id: ClanId) -> Option<&Clan> {
        self.clans.get(id)
    }

    /// Get a clan by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Clan> {
        self.id_of(name).and_then(|id| self.clans.get(id))
    }

    /// The fixed parameters of a clan's mine, if it has the capability.
    pub fn mine_spec(&self, name: &str) -> Option<MineSpec> {
        self.get_by_name(name)
            .and_then(|clan| clan.mine.as_ref())
            .map(|mine| mine.spec)
    }

    /// Whether the clan at `id` counts as blocked at `tick`. Unknown
    /// handles count as unblocked.
    pub fn is_blocked_at(&self, id: ClanId, tick: Ticks) -> bool {
        self.clans.get(id).is_some_and(|c| c.is_blocked_at(tick))
    }

    /// Iterate all clans in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ClanId, &Clan)> {
        self.clans.iter()
    }

    /// Number of clans.
    pub fn len(&self) -> usize {
        self.clans.len()
    }

    /// Whether no clans exist.
    pub fn is_empty(&self) -> bool {
        self.clans.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutators (silent no-ops on unknown names)
    // -----------------------------------------------------------------------

    fn get_mut(&mut self, name: &str) -> Option<&mut Clan> {
        let id = self.by_name.get(name).copied()?;
        self.clans.get_mut(id)
    }

    /// Grant mine capability, replacing the parameters and resetting
    /// availability to full if the clan already is one. The capability is
    /// never revoked afterwards.
    pub fn mark_mine(&mut self, name: &str, spec: MineSpec) {
        if let Some(clan) = self.get_mut(name) {
            clan.mine = Some(Mine::new(spec));
        }
    }

    /// Mark a clan blocked until `until`.
    pub fn set_blocked(&mut self, name: &str, until: Ticks) {
        if let Some(clan) = self.get_mut(name) {
            clan.blocked = true;
            clan.blocked_until = until;
        }
    }

    /// Clear a clan's blocked flag.
    pub fn clear_blocked(&mut self, name: &str) {
        if let Some(clan) = self.get_mut(name) {
            clan.blocked = false;
        }
    }

    /// Begin a processing cycle of `amount` units at `started`. Returns the
    /// mine's parameters when the cycle started, `None` (and no state
    /// change) when the clan is unknown, not a mine, or already mid-cycle.
    pub fn begin_processing(
        &mut self,
        name: &str,
        amount: u32,
        started: Ticks,
    ) -> Option<MineSpec> {
        let mine = self.get_mut(name)?.mine.as_mut()?;
        if mine.processing.is_some() {
            return None;
        }
        mine.processing = Some(ProcessingRun { amount, started });
        Some(mine.spec)
    }

    /// End the in-flight processing cycle, leaving `capacity - amount`
    /// units available. Returns the committed amount, or `None` when the
    /// clan is unknown, not a mine, or not processing.
    pub fn complete_processing(&mut self, name: &str) -> Option<u32> {
        let mine = self.get_mut(name)?.mine.as_mut()?;
        let run = mine.processing.take()?;
        mine.available = mine.spec.capacity.saturating_sub(run.amount);
        Some(run.amount)
    }

    /// Restore a mine to full capacity, unconditionally.
    pub fn refill(&mut self, name: &str) {
        if let Some(mine) = self.get_mut(name).and_then(|c| c.mine.as_mut()) {
            mine.available = mine.spec.capacity;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
