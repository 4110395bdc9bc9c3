//! Population journal
//!
//! Every successful builder step appends an event. Failed builder calls
//! append nothing, so the journal is an exact record of the graph's
//! construction and feeds the projections.

use crate::address_space::{EdgeKind, NodeHandle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something the builder did to the address space or the indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AddressSpaceEvent {
    /// A node was created
    NodeCreated {
        /// The new node
        node: NodeHandle,
        /// Name of its metamodel type
        type_name: String,
        /// Its browse name
        browse_name: String,
    },
    /// An identifier was entered into the registry
    IdentifiableRegistered {
        /// The global identifier
        id: String,
        /// The registered node
        node: NodeHandle,
        /// Node that held the identifier before, under the overwrite policy
        replaced: Option<NodeHandle>,
    },
    /// A child was entered into its container's index
    ChildIndexed {
        /// The container
        parent: NodeHandle,
        /// Short name of the child
        id_short: String,
        /// The child
        child: NodeHandle,
        /// Presentation number in ordered containers
        order: Option<u64>,
        /// Node that held the name before, under the overwrite policy
        replaced: Option<NodeHandle>,
    },
    /// An edge was persisted
    EdgeCreated {
        /// Kind of the edge
        kind: EdgeKind,
        /// Source node
        from: NodeHandle,
        /// Target node
        to: NodeHandle,
    },
    /// A pointer slot was filled
    PointerAttached {
        /// The owner of the slot
        owner: NodeHandle,
        /// Slot name, e.g. "semanticId"
        name: String,
        /// The node the slot holds
        target: NodeHandle,
        /// Whether the target was supplied by the caller rather than created
        shared: bool,
    },
}

impl AddressSpaceEvent {
    /// Name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NodeCreated { .. } => "NodeCreated",
            Self::IdentifiableRegistered { .. } => "IdentifiableRegistered",
            Self::ChildIndexed { .. } => "ChildIndexed",
            Self::EdgeCreated { .. } => "EdgeCreated",
            Self::PointerAttached { .. } => "PointerAttached",
        }
    }
}

/// A journal event with its position and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, starting at 0
    pub sequence: u64,
    /// When the event was recorded
    pub recorded_at: DateTime<Utc>,
    /// The event
    pub event: AddressSpaceEvent,
}

/// Append-only record of builder steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn record(&mut self, event: AddressSpaceEvent) {
        tracing::trace!(event_type = event.event_type(), sequence = self.entries.len(), "journal");
        self.entries.push(JournalEntry {
            sequence: self.entries.len() as u64,
            recorded_at: Utc::now(),
            event,
        });
    }

    /// All entries in order
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Entries recorded at or after `sequence`
    pub fn since(&self, sequence: u64) -> &[JournalEntry] {
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(self.entries.len());
        &self.entries[start..]
    }

    /// Iterate over the events
    pub fn events(&self) -> impl Iterator<Item = &AddressSpaceEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
