//! Identity and lookup indices
//!
//! Two tiers: a graph-wide registry from global identifier to Identifiable,
//! and a per-container index from short name to immediate child. Both store
//! node handles only.

mod child_index;
mod registry;

pub use child_index::{ChildEntry, ChildIndex};
pub use registry::IdentifiableRegistry;

/// Lookup miss in one of the indices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No entry named {0:?}")]
pub struct NotFound(pub String);
