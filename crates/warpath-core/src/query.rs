//! Read-only query outputs.
//!
//! Owned plain-data views handed to the presentation layer -- no references
//! into engine storage. The core never formats anything; a front end decides
//! how a [`StatusReport`] or a gold total looks on screen.

use crate::event::Ticks;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One mine's availability at the query instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineStatus {
    pub name: String,
    /// Reconstructed availability: mid-cycle mines report their draining
    /// capacity, idle mines their stored value.
    pub available: u32,
    pub capacity: u32,
}

/// Every mine's status, sorted by name for stable presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub tick: Ticks,
    pub mines: Vec<MineStatus>,
}

/// A single query result emitted during a drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutput {
    Status(StatusReport),
    Gold(u64),
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Receives query results in the order the drain loop produces them.
pub trait QuerySink {
    fn emit(&mut self, output: QueryOutput);
}

/// Discards every result, for runs where nobody is watching the queries.
impl QuerySink for () {
    fn emit(&mut self, _output: QueryOutput) {}
}

/// Collects results in order.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub outputs: Vec<QueryOutput>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gold totals reported so far, in emission order.
    pub fn gold_reports(&self) -> Vec<u64> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                QueryOutput::Gold(total) => Some(*total),
                _ => None,
            })
            .collect()
    }

    /// The status reports emitted so far, in emission order.
    pub fn status_reports(&self) -> Vec<&StatusReport> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                QueryOutput::Status(report) => Some(report),
                _ => None,
            })
            .collect()
    }
}

impl QuerySink for CollectSink {
    fn emit(&mut self, output: QueryOutput) {
        self.outputs.push(output);
    }
}
