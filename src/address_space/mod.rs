//! Address space abstraction
//!
//! The address space owns physical node storage: node creation, attribute
//! storage and edge persistence. The AAS graph decides *which* nodes and
//! edges exist and how they are indexed, and delegates storage to an
//! [`AddressSpace`] implementation.

mod memory;
mod type_table;

pub use memory::MemoryAddressSpace;
pub use type_table::{type_names, TypeDefinition, TypeTable};

use crate::value_objects::{Identifier, Key};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a node stored in an address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(usize);

impl NodeHandle {
    /// Create a handle from a raw arena index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a node type registered in a [`TypeTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle(usize);

impl TypeHandle {
    /// Create a handle from a raw type table index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw type table index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ownership edges. Stored parent -> child; a node has at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainmentKind {
    /// Child is a component of its parent
    ComponentOf,
    /// Child is organized by a folder
    OrganizedBy,
}

/// Domain-meaning edges: many-to-many and additive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticKind {
    /// Administration shell describes an asset
    HasAsset,
    /// Administration shell aggregates a submodel
    HasSubmodel,
    /// Referable is defined by a concept description
    HasSemantic,
    /// Submodel instance follows a submodel template
    HasSubmodelSemantic,
    /// Concept description corresponds to an external definition
    IsCaseOf,
    /// Administration shell derives from another shell
    IsDerivedFrom,
    /// Node carries an embedded data specification
    HasEmbeddedDataSpecification,
    /// Concept dictionary lists a concept description
    HasConceptDescription,
    /// View selects an element
    ContainsElement,
}

impl SemanticKind {
    /// Get the string representation of the edge kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticKind::HasAsset => "HasAsset",
            SemanticKind::HasSubmodel => "HasSubmodel",
            SemanticKind::HasSemantic => "HasSemantic",
            SemanticKind::HasSubmodelSemantic => "HasSubmodelSemantic",
            SemanticKind::IsCaseOf => "IsCaseOf",
            SemanticKind::IsDerivedFrom => "IsDerivedFrom",
            SemanticKind::HasEmbeddedDataSpecification => "HasEmbeddedDataSpecification",
            SemanticKind::HasConceptDescription => "HasConceptDescription",
            SemanticKind::ContainsElement => "ContainsElement",
        }
    }

    /// Type name the source of the edge must be a subtype of
    pub fn source_type(&self) -> &'static str {
        match self {
            SemanticKind::HasAsset | SemanticKind::HasSubmodel | SemanticKind::IsDerivedFrom => {
                type_names::ADMINISTRATION_SHELL
            }
            SemanticKind::HasSemantic => type_names::REFERABLE,
            SemanticKind::HasSubmodelSemantic => type_names::SUBMODEL,
            SemanticKind::IsCaseOf => type_names::CONCEPT_DESCRIPTION,
            SemanticKind::HasEmbeddedDataSpecification => type_names::BASE_OBJECT,
            SemanticKind::HasConceptDescription => type_names::CONCEPT_DICTIONARY,
            SemanticKind::ContainsElement => type_names::VIEW,
        }
    }

    /// Type name the target of the edge must be a subtype of
    pub fn target_type(&self) -> &'static str {
        match self {
            SemanticKind::HasAsset => type_names::ASSET,
            SemanticKind::HasSubmodel | SemanticKind::HasSubmodelSemantic => type_names::SUBMODEL,
            SemanticKind::HasSemantic | SemanticKind::HasConceptDescription => {
                type_names::CONCEPT_DESCRIPTION
            }
            SemanticKind::IsCaseOf => type_names::REFERENCE,
            SemanticKind::IsDerivedFrom => type_names::ADMINISTRATION_SHELL,
            SemanticKind::HasEmbeddedDataSpecification => type_names::EMBEDDED_DATA_SPECIFICATION,
            SemanticKind::ContainsElement => type_names::REFERABLE,
        }
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three edge categories consumers must tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeCategory {
    /// Ownership structure
    Containment,
    /// Domain meaning
    Semantic,
    /// Named pointer slot holding a Reference Node
    Pointer,
}

/// Kind of an edge stored in the address space
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Ownership edge
    Containment(ContainmentKind),
    /// Domain-meaning edge
    Semantic(SemanticKind),
    /// Pointer slot edge, named after the slot. May be shared by many owners.
    Pointer(String),
}

impl EdgeKind {
    /// Category of this edge
    pub fn category(&self) -> EdgeCategory {
        match self {
            EdgeKind::Containment(_) => EdgeCategory::Containment,
            EdgeKind::Semantic(_) => EdgeCategory::Semantic,
            EdgeKind::Pointer(_) => EdgeCategory::Pointer,
        }
    }

    /// Whether this edge establishes ownership
    pub fn is_containment(&self) -> bool {
        matches!(self, EdgeKind::Containment(_))
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Containment(ContainmentKind::ComponentOf) => f.write_str("componentOf"),
            EdgeKind::Containment(ContainmentKind::OrganizedBy) => f.write_str("organizedBy"),
            EdgeKind::Semantic(kind) => write!(f, "{kind}"),
            EdgeKind::Pointer(name) => write!(f, "pointer:{name}"),
        }
    }
}

/// Value stored in a node attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Free text
    Text(String),
    /// Flag
    Boolean(bool),
    /// Integer
    Integer(i64),
    /// Global identifier of an Identifiable
    Identifier(Identifier),
    /// Key sequence of a Reference Node
    Keys(Vec<Key>),
}

impl AttributeValue {
    /// Text content, if this is a text attribute
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Key sequence, if this is a keys attribute
    pub fn as_keys(&self) -> Option<&[Key]> {
        match self {
            AttributeValue::Keys(keys) => Some(keys),
            _ => None,
        }
    }

    /// Identifier, if this is an identifier attribute
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            AttributeValue::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }
}

/// Errors raised by address space storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressSpaceError {
    #[error("Node not found: {0}")]
    UnknownNode(NodeHandle),

    #[error("Type not found: {0}")]
    UnknownType(String),

    #[error("Type already registered: {0}")]
    DuplicateType(String),

    #[error("Cannot instantiate abstract type: {0}")]
    AbstractType(String),

    #[error("Node {child} already has containment parent {parent}")]
    SecondContainmentParent {
        child: NodeHandle,
        parent: NodeHandle,
    },
}

/// Result type for address space operations
pub type AddressSpaceResult<T> = Result<T, AddressSpaceError>;

/// Storage collaborator the AAS graph builds into
pub trait AddressSpace {
    /// Find a node type by name
    fn find_type(&self, name: &str) -> Option<TypeHandle>;

    /// Name of a node type
    fn type_name(&self, type_handle: TypeHandle) -> Option<&str>;

    /// Create a node of a concrete type
    fn create_node(&mut self, type_handle: TypeHandle, browse_name: &str) -> AddressSpaceResult<NodeHandle>;

    /// Store an attribute on a node
    fn create_attribute(&mut self, node: NodeHandle, name: &str, value: AttributeValue) -> AddressSpaceResult<()>;

    /// Persist an edge `from -> to`
    fn create_edge(&mut self, kind: EdgeKind, from: NodeHandle, to: NodeHandle) -> AddressSpaceResult<()>;

    /// Whether `ty` is `expected` or one of its subtypes
    fn is_subtype(&self, ty: TypeHandle, expected: TypeHandle) -> bool;

    /// Whether the node's type is `expected` or one of its subtypes
    fn is_subtype_of(&self, node: NodeHandle, expected: TypeHandle) -> bool {
        self.type_of(node)
            .map(|ty| self.is_subtype(ty, expected))
            .unwrap_or(false)
    }

    /// Whether the node exists
    fn contains(&self, node: NodeHandle) -> bool;

    /// Type of a node
    fn type_of(&self, node: NodeHandle) -> Option<TypeHandle>;

    /// Browse name of a node
    fn browse_name(&self, node: NodeHandle) -> Option<&str>;

    /// Attribute of a node
    fn attribute(&self, node: NodeHandle, name: &str) -> Option<&AttributeValue>;

    /// Outgoing edges in creation order
    fn edges_from(&self, node: NodeHandle) -> Vec<(EdgeKind, NodeHandle)>;

    /// Owner of a node through a containment edge
    fn containment_parent(&self, node: NodeHandle) -> Option<NodeHandle>;

    /// All nodes in creation order
    fn node_handles(&self) -> Vec<NodeHandle>;

    /// Number of stored nodes
    fn node_count(&self) -> usize;

    /// Number of stored edges
    fn edge_count(&self) -> usize;
}
