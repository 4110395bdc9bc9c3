//! In-memory address space backed by a petgraph arena

use super::{
    AddressSpace, AddressSpaceError, AddressSpaceResult, AttributeValue, EdgeKind, NodeHandle,
    TypeHandle, TypeTable,
};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

#[derive(Debug, Clone)]
struct StoredNode {
    type_handle: TypeHandle,
    browse_name: String,
    attributes: IndexMap<String, AttributeValue>,
}

/// Address space holding every node in a single `DiGraph` arena
#[derive(Debug, Clone)]
pub struct MemoryAddressSpace {
    graph: DiGraph<StoredNode, EdgeKind>,
    types: TypeTable,
}

impl Default for MemoryAddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAddressSpace {
    /// Create an empty address space with the AAS metamodel types
    pub fn new() -> Self {
        Self::with_types(TypeTable::metamodel())
    }

    /// Create an empty address space with a caller-supplied type table
    pub fn with_types(types: TypeTable) -> Self {
        Self {
            graph: DiGraph::new(),
            types,
        }
    }

    /// The type hierarchy
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    // Handles past the arena's `u32` index range name no node.
    fn node_index(&self, node: NodeHandle) -> Option<NodeIndex> {
        let index = u32::try_from(node.index()).ok().map(NodeIndex::from)?;
        self.graph.node_weight(index).map(|_| index)
    }

    fn index(&self, node: NodeHandle) -> AddressSpaceResult<NodeIndex> {
        self.node_index(node).ok_or(AddressSpaceError::UnknownNode(node))
    }

    fn stored(&self, node: NodeHandle) -> Option<&StoredNode> {
        self.node_index(node).and_then(|index| self.graph.node_weight(index))
    }
}

impl AddressSpace for MemoryAddressSpace {
    fn find_type(&self, name: &str) -> Option<TypeHandle> {
        self.types.find(name)
    }

    fn type_name(&self, type_handle: TypeHandle) -> Option<&str> {
        self.types.name(type_handle)
    }

    fn create_node(&mut self, type_handle: TypeHandle, browse_name: &str) -> AddressSpaceResult<NodeHandle> {
        let definition = self
            .types
            .get(type_handle)
            .ok_or_else(|| AddressSpaceError::UnknownType(format!("{}", type_handle.index())))?;
        if definition.is_abstract {
            return Err(AddressSpaceError::AbstractType(definition.name.clone()));
        }

        let index = self.graph.add_node(StoredNode {
            type_handle,
            browse_name: browse_name.to_string(),
            attributes: IndexMap::new(),
        });
        Ok(NodeHandle::new(index.index()))
    }

    fn create_attribute(&mut self, node: NodeHandle, name: &str, value: AttributeValue) -> AddressSpaceResult<()> {
        let index = self.index(node)?;
        if let Some(stored) = self.graph.node_weight_mut(index) {
            stored.attributes.insert(name.to_string(), value);
        }
        Ok(())
    }

    fn create_edge(&mut self, kind: EdgeKind, from: NodeHandle, to: NodeHandle) -> AddressSpaceResult<()> {
        let source = self.index(from)?;
        let target = self.index(to)?;

        if kind.is_containment() {
            if let Some(parent) = self.containment_parent(to) {
                return Err(AddressSpaceError::SecondContainmentParent { child: to, parent });
            }
        }

        self.graph.add_edge(source, target, kind);
        Ok(())
    }

    fn is_subtype(&self, ty: TypeHandle, expected: TypeHandle) -> bool {
        self.types.is_subtype(ty, expected)
    }

    fn contains(&self, node: NodeHandle) -> bool {
        self.stored(node).is_some()
    }

    fn type_of(&self, node: NodeHandle) -> Option<TypeHandle> {
        self.stored(node).map(|stored| stored.type_handle)
    }

    fn browse_name(&self, node: NodeHandle) -> Option<&str> {
        self.stored(node).map(|stored| stored.browse_name.as_str())
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Option<&AttributeValue> {
        self.stored(node).and_then(|stored| stored.attributes.get(name))
    }

    fn edges_from(&self, node: NodeHandle) -> Vec<(EdgeKind, NodeHandle)> {
        let Ok(index) = self.index(node) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest first
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.id().index(), edge.weight().clone(), NodeHandle::new(edge.target().index())))
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, kind, target)| (kind, target)).collect()
    }

    fn containment_parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        let index = self.index(node).ok()?;
        self.graph
            .edges_directed(index, Direction::Incoming)
            .find(|edge| edge.weight().is_containment())
            .map(|edge| NodeHandle::new(edge.source().index()))
    }

    fn node_handles(&self) -> Vec<NodeHandle> {
        self.graph
            .node_indices()
            .map(|index| NodeHandle::new(index.index()))
            .collect()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
