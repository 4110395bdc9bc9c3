use super::NotFound;
use crate::address_space::NodeHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A child slot in a container's index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry {
    /// The child node
    pub node: NodeHandle,
    /// Presentation position in ordered containers; no effect on lookup
    pub order: Option<u64>,
}

/// Per-container map from short name to immediate child
#[derive(Debug, Clone, Default)]
pub struct ChildIndex {
    children: IndexMap<String, ChildEntry>,
    ordered: bool,
    next_order: u64,
}

impl ChildIndex {
    /// Create an unordered index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index that numbers children in insertion order
    pub fn ordered() -> Self {
        Self {
            ordered: true,
            ..Self::default()
        }
    }

    /// Insert or replace a child, returning the replaced node
    pub fn put(&mut self, name: impl Into<String>, child: NodeHandle) -> Option<NodeHandle> {
        let order = if self.ordered {
            let order = self.next_order;
            self.next_order += 1;
            Some(order)
        } else {
            None
        };

        self.children
            .insert(name.into(), ChildEntry { node: child, order })
            .map(|previous| previous.node)
    }

    /// Find the child named `name`
    pub fn get(&self, name: &str) -> Result<NodeHandle, NotFound> {
        self.children
            .get(name)
            .map(|entry| entry.node)
            .ok_or_else(|| NotFound(name.to_string()))
    }

    /// Whether a child named `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Presentation number of a child in an ordered index
    pub fn order_of(&self, name: &str) -> Option<u64> {
        self.children.get(name).and_then(|entry| entry.order)
    }

    /// Whether children are numbered
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChildEntry)> {
        self.children.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Children sorted by presentation number; insertion order when unordered
    pub fn presentation_order(&self) -> Vec<(&str, NodeHandle)> {
        let mut entries: Vec<_> = self.iter().collect();
        if self.ordered {
            entries.sort_by_key(|(_, entry)| entry.order);
        }
        entries.into_iter().map(|(name, entry)| (name, entry.node)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_put_get() {
        let mut index = ChildIndex::new();
        index.put("temperature", NodeHandle::new(5));

        assert_eq!(index.get("temperature"), Ok(NodeHandle::new(5)));
        assert!(index.get("pressure").is_err());
        assert_eq!(index.order_of("temperature"), None);
    }

    #[test]
    fn test_ordered_counter_never_reuses_numbers() {
        let mut index = ChildIndex::ordered();
        index.put("a", NodeHandle::new(1));
        index.put("b", NodeHandle::new(2));
        assert_eq!(index.put("a", NodeHandle::new(3)), Some(NodeHandle::new(1)));
        index.put("c", NodeHandle::new(4));

        assert_eq!(index.order_of("b"), Some(1));
        assert_eq!(index.order_of("a"), Some(2));
        assert_eq!(index.order_of("c"), Some(3));

        let names: Vec<_> = index.presentation_order().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
