//! The AAS graph aggregate
//!
//! `AasGraph` owns the address space together with the two identity indices
//! and the population journal. Builder operations live in the sibling
//! modules; this file holds construction, read access and the validation and
//! creation primitives they share.

use super::attribute_names;
use super::node_entry::{ElementKind, NodeEntry};
use crate::address_space::{
    type_names, AddressSpace, AddressSpaceError, AttributeValue, ContainmentKind, EdgeKind,
    MemoryAddressSpace, NodeHandle, TypeHandle,
};
use crate::commands::{BuildError, BuildResult};
use crate::config::{DuplicatePolicy, GraphConfig};
use crate::events::{AddressSpaceEvent, Journal};
use crate::index::{ChildIndex, IdentifiableRegistry, NotFound};
use crate::value_objects::{Identifier, Key};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Browse names of the folders organizing the Identifiables
pub mod folder_names {
    /// Folder organizing administration shells
    pub const ADMINISTRATION_SHELLS: &str = "AdministrationShells";
    /// Folder organizing assets
    pub const ASSETS: &str = "Assets";
    /// Folder organizing submodels
    pub const SUBMODELS: &str = "Submodels";
    /// Folder organizing concept descriptions
    pub const CONCEPT_DESCRIPTIONS: &str = "ConceptDescriptions";
}

/// Folders below the root, one per kind of Identifiable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFolders {
    /// Administration shells
    pub shells: NodeHandle,
    /// Assets
    pub assets: NodeHandle,
    /// Submodels
    pub submodels: NodeHandle,
    /// Concept descriptions
    pub concept_descriptions: NodeHandle,
}

/// Typed AAS object graph built on an address space
#[derive(Debug, Clone)]
pub struct AasGraph<S: AddressSpace = MemoryAddressSpace> {
    id: Uuid,
    config: GraphConfig,
    space: S,
    registry: IdentifiableRegistry,
    entries: HashMap<NodeHandle, NodeEntry>,
    journal: Journal,
    root: NodeHandle,
    folders: RootFolders,
}

impl AasGraph<MemoryAddressSpace> {
    /// Create a graph on a fresh in-memory address space
    pub fn new() -> BuildResult<Self> {
        Self::with_config(GraphConfig::default())
    }

    /// Create a graph on a fresh in-memory address space with custom settings
    pub fn with_config(config: GraphConfig) -> BuildResult<Self> {
        Self::with_address_space(MemoryAddressSpace::new(), config)
    }
}

impl<S: AddressSpace> AasGraph<S> {
    /// Create a graph on a caller-supplied address space.
    ///
    /// The address space must know the metamodel types. The root folder and
    /// the four Identifiable folders are created immediately.
    pub fn with_address_space(space: S, config: GraphConfig) -> BuildResult<Self> {
        let placeholder = NodeHandle::new(0);
        let mut graph = Self {
            id: Uuid::new_v4(),
            config,
            space,
            registry: IdentifiableRegistry::new(),
            entries: HashMap::new(),
            journal: Journal::new(),
            root: placeholder,
            folders: RootFolders {
                shells: placeholder,
                assets: placeholder,
                submodels: placeholder,
                concept_descriptions: placeholder,
            },
        };

        let root_name = graph.config.root_name.clone();
        graph.root = graph.create_node(ElementKind::Folder, type_names::FOLDER, &root_name)?;
        graph.folders = RootFolders {
            shells: graph.create_folder(folder_names::ADMINISTRATION_SHELLS)?,
            assets: graph.create_folder(folder_names::ASSETS)?,
            submodels: graph.create_folder(folder_names::SUBMODELS)?,
            concept_descriptions: graph.create_folder(folder_names::CONCEPT_DESCRIPTIONS)?,
        };

        tracing::info!(graph_id = %graph.id, root = %graph.root, "AAS graph created");
        Ok(graph)
    }

    fn create_folder(&mut self, name: &str) -> BuildResult<NodeHandle> {
        let folder = self.create_node(ElementKind::Folder, type_names::FOLDER, name)?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::OrganizedBy), self.root, folder)?;
        Ok(folder)
    }

    /// Unique id of this graph instance
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Settings the graph was built with
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The underlying address space
    pub fn address_space(&self) -> &S {
        &self.space
    }

    /// The graph-wide Identifiable registry
    pub fn registry(&self) -> &IdentifiableRegistry {
        &self.registry
    }

    /// Root folder
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Identifiable folders below the root
    pub fn folders(&self) -> RootFolders {
        self.folders
    }

    /// Builder bookkeeping for a node
    pub fn entry(&self, node: NodeHandle) -> Option<&NodeEntry> {
        self.entries.get(&node)
    }

    /// Child index of a node, if it can own Referable children
    pub fn child_index(&self, node: NodeHandle) -> Option<&ChildIndex> {
        self.entries.get(&node).and_then(NodeEntry::child_index)
    }

    /// Node held by the owner's pointer slot
    pub fn pointer(&self, owner: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.entries.get(&owner).and_then(|entry| entry.pointer(name))
    }

    /// Key sequence stored on a Reference Node
    pub fn keys_of(&self, node: NodeHandle) -> Option<&[Key]> {
        self.space
            .attribute(node, attribute_names::KEYS)
            .and_then(AttributeValue::as_keys)
    }

    /// Name of the node's metamodel type
    pub fn type_name_of(&self, node: NodeHandle) -> Option<&str> {
        self.space
            .type_of(node)
            .and_then(|ty| self.space.type_name(ty))
    }

    /// Record of every successful builder step
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Number of nodes in the address space
    pub fn node_count(&self) -> usize {
        self.space.node_count()
    }

    /// Enter an existing Identifiable into the registry under `id`
    pub fn register_identifiable(&mut self, id: &str, node: NodeHandle) -> BuildResult<()> {
        if id.trim().is_empty() {
            return Err(BuildError::InvalidIdentifier(id.to_string()));
        }
        self.check_type("registered node", node, type_names::IDENTIFIABLE)?;
        if self.config.identifier_policy == DuplicatePolicy::Reject {
            if let Ok(existing) = self.registry.lookup(id) {
                if existing != node {
                    return Err(BuildError::DuplicateIdentifier {
                        id: id.to_string(),
                        existing,
                    });
                }
            }
        }
        self.register(id, node);
        Ok(())
    }

    /// Node registered under a global identifier
    pub fn lookup_identifiable(&self, id: &str) -> Result<NodeHandle, NotFound> {
        self.registry.lookup(id)
    }

    pub(crate) fn type_handle(&self, name: &str) -> BuildResult<TypeHandle> {
        self.space
            .find_type(name)
            .ok_or_else(|| AddressSpaceError::UnknownType(name.to_string()).into())
    }

    pub(crate) fn require_node(&self, node: NodeHandle) -> BuildResult<()> {
        if self.space.contains(node) {
            Ok(())
        } else {
            Err(BuildError::UnknownNode(node))
        }
    }

    /// Fail unless `node` exists and its type is `expected` or a subtype
    pub(crate) fn check_type(&self, context: &str, node: NodeHandle, expected: &str) -> BuildResult<()> {
        self.require_node(node)?;
        let expected_type = self.type_handle(expected)?;
        if self.space.is_subtype_of(node, expected_type) {
            return Ok(());
        }
        Err(BuildError::TypeMismatch {
            context: context.to_string(),
            expected: expected.to_string(),
            found: self.type_name_of(node).unwrap_or("unknown").to_string(),
        })
    }

    pub(crate) fn check_id_short(&self, id_short: &str) -> BuildResult<()> {
        if id_short.is_empty() || id_short.chars().any(char::is_whitespace) {
            return Err(BuildError::InvalidIdShort(id_short.to_string()));
        }
        Ok(())
    }

    pub(crate) fn check_identifier(&self, identifier: &Identifier) -> BuildResult<()> {
        let id = identifier.id();
        if id.trim().is_empty() {
            return Err(BuildError::InvalidIdentifier(id.to_string()));
        }
        if self.config.identifier_policy == DuplicatePolicy::Reject {
            if let Ok(existing) = self.registry.lookup(id) {
                return Err(BuildError::DuplicateIdentifier {
                    id: id.to_string(),
                    existing,
                });
            }
        }
        Ok(())
    }

    /// Fail unless `parent` has a child index that can take `id_short`
    pub(crate) fn check_child_slot(&self, parent: NodeHandle, id_short: &str) -> BuildResult<()> {
        self.require_node(parent)?;
        let index = self
            .child_index(parent)
            .ok_or(BuildError::NotAContainer(parent))?;
        if self.config.id_short_policy == DuplicatePolicy::Reject {
            if let Ok(existing) = index.get(id_short) {
                return Err(BuildError::DuplicateIdShort {
                    parent,
                    id_short: id_short.to_string(),
                    existing,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn validate_keys(&self, keys: &[Key]) -> BuildResult<()> {
        if keys.is_empty() {
            return Err(BuildError::InvalidReference("empty key sequence".to_string()));
        }
        if let Some(position) = keys.iter().position(|key| !key.is_well_formed()) {
            return Err(BuildError::InvalidReference(format!(
                "key {position} has an empty value"
            )));
        }
        Ok(())
    }

    pub(crate) fn create_node(
        &mut self,
        element: ElementKind,
        type_name: &str,
        browse_name: &str,
    ) -> BuildResult<NodeHandle> {
        let type_handle = self.type_handle(type_name)?;
        let node = self.space.create_node(type_handle, browse_name)?;
        let id_short = element.key_kind().map(|_| browse_name);
        self.entries.insert(node, NodeEntry::new(element, id_short));

        tracing::debug!(%node, type_name, browse_name, "node created");
        self.journal.record(AddressSpaceEvent::NodeCreated {
            node,
            type_name: type_name.to_string(),
            browse_name: browse_name.to_string(),
        });
        Ok(node)
    }

    pub(crate) fn set_attribute(&mut self, node: NodeHandle, name: &str, value: AttributeValue) -> BuildResult<()> {
        self.space.create_attribute(node, name, value)?;
        Ok(())
    }

    pub(crate) fn set_text(&mut self, node: NodeHandle, name: &str, value: Option<&str>) -> BuildResult<()> {
        match value {
            Some(text) => self.set_attribute(node, name, AttributeValue::Text(text.to_string())),
            None => Ok(()),
        }
    }

    pub(crate) fn create_edge(&mut self, kind: EdgeKind, from: NodeHandle, to: NodeHandle) -> BuildResult<()> {
        self.space.create_edge(kind.clone(), from, to)?;
        tracing::debug!(%kind, %from, %to, "edge created");
        self.journal.record(AddressSpaceEvent::EdgeCreated { kind, from, to });
        Ok(())
    }

    pub(crate) fn register(&mut self, id: &str, node: NodeHandle) {
        let replaced = self.registry.register(id, node);
        match replaced {
            Some(previous) if previous != node => {
                tracing::warn!(id, %previous, %node, "identifier reassigned")
            }
            _ => tracing::info!(id, %node, "identifiable registered"),
        }
        self.journal.record(AddressSpaceEvent::IdentifiableRegistered {
            id: id.to_string(),
            node,
            replaced,
        });
    }

    /// Enter a fully built child into its parent's index
    pub(crate) fn index_child(&mut self, parent: NodeHandle, id_short: &str, child: NodeHandle) -> BuildResult<()> {
        let index = self
            .entries
            .get_mut(&parent)
            .and_then(|entry| entry.child_index.as_mut())
            .ok_or(BuildError::NotAContainer(parent))?;
        let replaced = index.put(id_short, child);
        let order = index.order_of(id_short);

        if let Some(previous) = replaced {
            tracing::warn!(%parent, id_short, %previous, %child, "short name reassigned");
        }
        self.journal.record(AddressSpaceEvent::ChildIndexed {
            parent,
            id_short: id_short.to_string(),
            child,
            order,
            replaced,
        });
        Ok(())
    }

    pub(crate) fn record_pointer(&mut self, owner: NodeHandle, name: &str, target: NodeHandle, shared: bool) {
        if let Some(entry) = self.entries.get_mut(&owner) {
            entry.pointers.insert(name.to_string(), target);
        }
        tracing::debug!(%owner, name, %target, shared, "pointer attached");
        self.journal.record(AddressSpaceEvent::PointerAttached {
            owner,
            name: name.to_string(),
            target,
            shared,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddSubmodel;
    use crate::value_objects::{KeyElements, KeyType};

    #[test]
    fn test_new_graph_has_folders() {
        let graph = AasGraph::new().unwrap();
        let space = graph.address_space();

        assert_eq!(space.browse_name(graph.root()), Some("AASROOT"));
        assert_eq!(space.containment_parent(graph.folders().submodels), Some(graph.root()));
        assert_eq!(graph.node_count(), 5);
        assert!(graph.registry().is_empty());
        assert_eq!(graph.journal().len(), 9);
    }

    #[test]
    fn test_custom_root_name() {
        let config = GraphConfig {
            root_name: "Plant".to_string(),
            ..GraphConfig::default()
        };
        let graph = AasGraph::with_config(config).unwrap();
        assert_eq!(graph.address_space().browse_name(graph.root()), Some("Plant"));
    }

    #[test]
    fn test_register_identifiable_requires_identifiable_type() {
        let mut graph = AasGraph::new().unwrap();
        let folder = graph.folders().assets;
        assert!(matches!(
            graph.register_identifiable("urn:x", folder),
            Err(BuildError::TypeMismatch { .. })
        ));
        assert!(graph.lookup_identifiable("urn:x").is_err());
    }

    fn graph_with_submodels(config: GraphConfig) -> (AasGraph, NodeHandle, NodeHandle) {
        let mut graph = AasGraph::with_config(config).unwrap();
        let first = graph
            .add_submodel(AddSubmodel::new("First", Identifier::iri("urn:sm:1")))
            .unwrap();
        let second = graph
            .add_submodel(AddSubmodel::new("Second", Identifier::iri("urn:sm:2")))
            .unwrap();
        (graph, first, second)
    }

    #[test]
    fn test_register_identifiable_alias_resolves() {
        let (mut graph, first, _) = graph_with_submodels(GraphConfig::default());
        graph.register_identifiable("urn:alias:nameplate", first).unwrap();

        assert_eq!(graph.lookup_identifiable("urn:alias:nameplate"), Ok(first));
        assert_eq!(graph.lookup_identifiable("urn:sm:1"), Ok(first));
        let keys = [Key::new(KeyElements::Submodel, true, KeyType::Iri, "urn:alias:nameplate")];
        assert_eq!(graph.resolve_keys(&keys), Ok(first));
    }

    #[test]
    fn test_register_identifiable_rejects_taken_id() {
        let (mut graph, first, second) = graph_with_submodels(GraphConfig::default());
        let journal_len = graph.journal().len();

        assert_eq!(
            graph.register_identifiable("urn:sm:1", second),
            Err(BuildError::DuplicateIdentifier {
                id: "urn:sm:1".to_string(),
                existing: first,
            })
        );
        assert_eq!(graph.lookup_identifiable("urn:sm:1"), Ok(first));
        assert_eq!(graph.journal().len(), journal_len);
    }

    #[test]
    fn test_register_identifiable_same_node_again() {
        let (mut graph, first, _) = graph_with_submodels(GraphConfig::default());
        assert_eq!(graph.register_identifiable("urn:sm:1", first), Ok(()));
        assert_eq!(graph.lookup_identifiable("urn:sm:1"), Ok(first));
        assert_eq!(graph.registry().len(), 2);
    }

    #[test]
    fn test_register_identifiable_last_writer_wins() {
        let (mut graph, first, second) = graph_with_submodels(GraphConfig::permissive());
        graph.register_identifiable("urn:sm:1", second).unwrap();

        assert_eq!(graph.lookup_identifiable("urn:sm:1"), Ok(second));
        assert!(graph.address_space().contains(first));
        assert_eq!(graph.registry().len(), 2);
    }

    #[test]
    fn test_handle_beyond_index_range_is_unknown() {
        let (mut graph, first, _) = graph_with_submodels(GraphConfig::default());
        let wide = NodeHandle::new((1usize << 32) + first.index());

        assert_eq!(
            graph.register_identifiable("urn:wide", wide),
            Err(BuildError::UnknownNode(wide))
        );
        assert!(graph.type_name_of(wide).is_none());
        assert!(graph.lookup_identifiable("urn:wide").is_err());
    }

    #[test]
    fn test_validate_keys() {
        let graph = AasGraph::new().unwrap();
        assert!(matches!(graph.validate_keys(&[]), Err(BuildError::InvalidReference(_))));
        let blank = Key::id_short(KeyElements::Property, "");
        assert!(matches!(
            graph.validate_keys(&[blank]),
            Err(BuildError::InvalidReference(_))
        ));
    }
}
