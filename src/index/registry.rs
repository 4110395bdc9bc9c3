use super::NotFound;
use crate::address_space::NodeHandle;
use indexmap::IndexMap;

/// Map from global identifier to the Identifiable that registered it
#[derive(Debug, Clone, Default)]
pub struct IdentifiableRegistry {
    entries: IndexMap<String, NodeHandle>,
}

impl IdentifiableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a mapping, returning the replaced node
    pub fn register(&mut self, id: impl Into<String>, node: NodeHandle) -> Option<NodeHandle> {
        self.entries.insert(id.into(), node)
    }

    /// Find the node registered under `id`
    pub fn lookup(&self, id: &str) -> Result<NodeHandle, NotFound> {
        self.entries
            .get(id)
            .copied()
            .ok_or_else(|| NotFound(id.to_string()))
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeHandle)> {
        self.entries.iter().map(|(id, node)| (id.as_str(), *node))
    }
}
