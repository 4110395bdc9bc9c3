//! Graph summary projection
//!
//! Provides a summary view of a populated graph: node counts by type, edge
//! counts by category and the size of both indices.

use super::JournalProjection;
use crate::address_space::EdgeCategory;
use crate::events::{AddressSpaceEvent, JournalEntry};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary information about a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Id of the summarized graph
    pub graph_id: Uuid,
    /// Number of nodes
    pub node_count: usize,
    /// Number of nodes per metamodel type, in first-seen order
    pub nodes_by_type: IndexMap<String, usize>,
    /// Number of ownership edges
    pub containment_edges: usize,
    /// Number of domain-meaning edges
    pub semantic_edges: usize,
    /// Number of edges to shared pointer targets
    pub pointer_edges: usize,
    /// Number of distinct registered identifiers
    pub identifiable_count: usize,
    /// Number of distinct child index entries over all containers
    pub indexed_children: usize,
    /// Pointer slots filled with a Reference Node created for them
    pub inline_pointers: usize,
    /// Pointer slots filled with a caller-supplied node
    pub shared_pointers: usize,
    /// When the first event was recorded
    pub created_at: Option<DateTime<Utc>>,
    /// When the last event was recorded
    pub last_modified: Option<DateTime<Utc>>,
}

impl GraphSummary {
    fn new(graph_id: Uuid) -> Self {
        Self {
            graph_id,
            node_count: 0,
            nodes_by_type: IndexMap::new(),
            containment_edges: 0,
            semantic_edges: 0,
            pointer_edges: 0,
            identifiable_count: 0,
            indexed_children: 0,
            inline_pointers: 0,
            shared_pointers: 0,
            created_at: None,
            last_modified: None,
        }
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.containment_edges + self.semantic_edges + self.pointer_edges
    }
}

/// Projection that maintains the summary of one graph
#[derive(Debug, Clone)]
pub struct GraphSummaryProjection {
    summary: GraphSummary,
    checkpoint: Option<u64>,
}

impl GraphSummaryProjection {
    /// Create an empty projection for the graph with the given id
    pub fn new(graph_id: Uuid) -> Self {
        Self {
            summary: GraphSummary::new(graph_id),
            checkpoint: None,
        }
    }

    /// The current summary
    pub fn summary(&self) -> &GraphSummary {
        &self.summary
    }
}

impl JournalProjection for GraphSummaryProjection {
    fn handle_entry(&mut self, entry: &JournalEntry) {
        let summary = &mut self.summary;
        match &entry.event {
            AddressSpaceEvent::NodeCreated { type_name, .. } => {
                summary.node_count += 1;
                *summary.nodes_by_type.entry(type_name.clone()).or_insert(0) += 1;
            }
            AddressSpaceEvent::EdgeCreated { kind, .. } => match kind.category() {
                EdgeCategory::Containment => summary.containment_edges += 1,
                EdgeCategory::Semantic => summary.semantic_edges += 1,
                EdgeCategory::Pointer => summary.pointer_edges += 1,
            },
            AddressSpaceEvent::IdentifiableRegistered { replaced, .. } => {
                if replaced.is_none() {
                    summary.identifiable_count += 1;
                }
            }
            AddressSpaceEvent::ChildIndexed { replaced, .. } => {
                if replaced.is_none() {
                    summary.indexed_children += 1;
                }
            }
            AddressSpaceEvent::PointerAttached { shared, .. } => {
                if *shared {
                    summary.shared_pointers += 1;
                } else {
                    summary.inline_pointers += 1;
                }
            }
        }

        if summary.created_at.is_none() {
            summary.created_at = Some(entry.recorded_at);
        }
        summary.last_modified = Some(entry.recorded_at);
        self.checkpoint = Some(entry.sequence);
    }

    fn clear(&mut self) {
        self.summary = GraphSummary::new(self.summary.graph_id);
        self.checkpoint = None;
    }

    fn checkpoint(&self) -> Option<u64> {
        self.checkpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::{ContainmentKind, EdgeKind, NodeHandle};
    use crate::events::Journal;

    #[test]
    fn test_summary_counts() {
        let mut journal = Journal::new();
        journal.record(AddressSpaceEvent::NodeCreated {
            node: NodeHandle::new(0),
            type_name: "FolderType".to_string(),
            browse_name: "AASROOT".to_string(),
        });
        journal.record(AddressSpaceEvent::NodeCreated {
            node: NodeHandle::new(1),
            type_name: "AASSubmodelType".to_string(),
            browse_name: "Nameplate".to_string(),
        });
        journal.record(AddressSpaceEvent::EdgeCreated {
            kind: EdgeKind::Containment(ContainmentKind::OrganizedBy),
            from: NodeHandle::new(0),
            to: NodeHandle::new(1),
        });
        journal.record(AddressSpaceEvent::IdentifiableRegistered {
            id: "urn:sm:1".to_string(),
            node: NodeHandle::new(1),
            replaced: None,
        });

        let mut projection = GraphSummaryProjection::new(Uuid::new_v4());
        projection.replay(&journal);

        let summary = projection.summary();
        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.nodes_by_type.get("FolderType"), Some(&1));
        assert_eq!(summary.edge_count(), 1);
        assert_eq!(summary.identifiable_count, 1);
        assert_eq!(projection.checkpoint(), Some(3));

        // replaying again only picks up new entries
        projection.replay(&journal);
        assert_eq!(projection.summary().node_count, 2);

        projection.clear();
        assert_eq!(projection.summary().node_count, 0);
        assert_eq!(projection.checkpoint(), None);
    }
}
