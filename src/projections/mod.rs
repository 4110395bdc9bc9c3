//! Read models built from the population journal

pub mod diagram;
pub mod graph_summary;

pub use diagram::DiagramProjection;
pub use graph_summary::{GraphSummary, GraphSummaryProjection};

use crate::events::{Journal, JournalEntry};

/// A read model fed from journal entries
pub trait JournalProjection {
    /// Apply one entry to the projection
    fn handle_entry(&mut self, entry: &JournalEntry);

    /// Forget everything applied so far
    fn clear(&mut self);

    /// Sequence number of the last applied entry
    fn checkpoint(&self) -> Option<u64>;

    /// Apply every entry recorded after the checkpoint
    fn replay(&mut self, journal: &Journal) {
        let next = self.checkpoint().map_or(0, |sequence| sequence + 1);
        for entry in journal.since(next) {
            self.handle_entry(entry);
        }
    }
}
