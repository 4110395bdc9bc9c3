//! Builder commands
//!
//! Commands describe the intent to add one element to the AAS graph. They are
//! processed by the builder operations on [`AasGraph`](crate::AasGraph), which
//! validate every input before anything is created.

use crate::address_space::{AddressSpaceError, NodeHandle};
use crate::value_objects::{
    AdministrativeInformation, AssetKind, EntityType, Identifier, Key, ModelingKind,
};
use serde::{Deserialize, Serialize};

/// Value for a pointer slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerArgument {
    /// Key sequence; the builder creates a Reference Node owned by the slot owner
    Inline(Vec<Key>),
    /// Node created earlier; attached as-is and may be shared between owners
    Existing(NodeHandle),
}

impl From<Vec<Key>> for PointerArgument {
    fn from(keys: Vec<Key>) -> Self {
        PointerArgument::Inline(keys)
    }
}

impl From<NodeHandle> for PointerArgument {
    fn from(node: NodeHandle) -> Self {
        PointerArgument::Existing(node)
    }
}

/// Create an administration shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAdministrationShell {
    /// Short name of the shell
    pub id_short: String,
    /// Global identifier
    pub identification: Identifier,
    /// Human-readable description
    pub description: Option<String>,
    /// Version information
    pub administration: Option<AdministrativeInformation>,
    /// `derivedFrom` pointer
    pub derived_from: Option<PointerArgument>,
    /// Shell this one derives from, wired with `IsDerivedFrom`
    pub derived_from_shell: Option<NodeHandle>,
    /// Asset the shell describes, wired with `HasAsset`
    pub asset: Option<NodeHandle>,
}

impl AddAdministrationShell {
    /// Shell with only the mandatory fields
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            description: None,
            administration: None,
            derived_from: None,
            derived_from_shell: None,
            asset: None,
        }
    }

    /// Set the described asset
    pub fn with_asset(mut self, asset: NodeHandle) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Set the `derivedFrom` pointer
    pub fn with_derived_from(mut self, argument: impl Into<PointerArgument>) -> Self {
        self.derived_from = Some(argument.into());
        self
    }
}

/// Create an asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAsset {
    /// Short name of the asset
    pub id_short: String,
    /// Global identifier
    pub identification: Identifier,
    /// Type or instance
    pub kind: AssetKind,
    /// Human-readable description
    pub description: Option<String>,
    /// Version information
    pub administration: Option<AdministrativeInformation>,
    /// `assetIdentificationModel` pointer
    pub asset_identification_model: Option<PointerArgument>,
    /// `billOfMaterial` pointer
    pub bill_of_material: Option<PointerArgument>,
}

impl AddAsset {
    /// Asset instance with only the mandatory fields
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            kind: AssetKind::Instance,
            description: None,
            administration: None,
            asset_identification_model: None,
            bill_of_material: None,
        }
    }
}

/// Create a submodel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubmodel {
    /// Short name of the submodel
    pub id_short: String,
    /// Global identifier
    pub identification: Identifier,
    /// Template or instance
    pub kind: ModelingKind,
    /// Human-readable description
    pub description: Option<String>,
    /// Version information
    pub administration: Option<AdministrativeInformation>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddSubmodel {
    /// Submodel instance with only the mandatory fields
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            kind: ModelingKind::Instance,
            description: None,
            administration: None,
            semantic_id: None,
        }
    }

    /// Set the `semanticId` pointer
    pub fn with_semantic_id(mut self, argument: impl Into<PointerArgument>) -> Self {
        self.semantic_id = Some(argument.into());
        self
    }
}

/// Create a concept description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddConceptDescription {
    /// Short name of the concept description
    pub id_short: String,
    /// Global identifier
    pub identification: Identifier,
    /// Human-readable description
    pub description: Option<String>,
    /// Version information
    pub administration: Option<AdministrativeInformation>,
    /// External definitions this concept corresponds to; one Reference Node each
    pub is_case_of: Vec<Vec<Key>>,
}

impl AddConceptDescription {
    /// Concept description with only the mandatory fields
    pub fn new(id_short: impl Into<String>, identification: Identifier) -> Self {
        Self {
            id_short: id_short.into(),
            identification,
            description: None,
            administration: None,
            is_case_of: Vec::new(),
        }
    }
}

/// Create a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProperty {
    /// Short name, unique within the parent
    pub id_short: String,
    /// XSD value type, e.g. "double"
    pub value_type: String,
    /// Initial value in lexical form
    pub value: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
    /// `valueId` pointer
    pub value_id: Option<PointerArgument>,
}

impl AddProperty {
    /// Property without value or pointers
    pub fn new(id_short: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            value_type: value_type.into(),
            value: None,
            description: None,
            semantic_id: None,
            value_id: None,
        }
    }

    /// Set the initial value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the `semanticId` pointer
    pub fn with_semantic_id(mut self, argument: impl Into<PointerArgument>) -> Self {
        self.semantic_id = Some(argument.into());
        self
    }

    /// Set the `valueId` pointer
    pub fn with_value_id(mut self, argument: impl Into<PointerArgument>) -> Self {
        self.value_id = Some(argument.into());
        self
    }
}

/// Create a file element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFile {
    /// Short name, unique within the parent
    pub id_short: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Path or URI of the content
    pub value: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddFile {
    /// File element without content location
    pub fn new(id_short: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            mime_type: mime_type.into(),
            value: None,
            description: None,
            semantic_id: None,
        }
    }
}

/// Create a reference element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReferenceElement {
    /// Short name, unique within the parent
    pub id_short: String,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
    /// `value` pointer: what the element refers to
    pub value: Option<PointerArgument>,
}

impl AddReferenceElement {
    /// Reference element pointing at `value`
    pub fn new(id_short: impl Into<String>, value: impl Into<PointerArgument>) -> Self {
        Self {
            id_short: id_short.into(),
            description: None,
            semantic_id: None,
            value: Some(value.into()),
        }
    }
}

/// Create a submodel element collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubmodelElementCollection {
    /// Short name, unique within the parent
    pub id_short: String,
    /// Whether children get presentation numbers
    pub ordered: bool,
    /// Informational flag carried as an attribute
    pub allow_duplicates: bool,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddSubmodelElementCollection {
    /// Unordered collection
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            ordered: false,
            allow_duplicates: false,
            description: None,
            semantic_id: None,
        }
    }

    /// Ordered collection
    pub fn ordered(id_short: impl Into<String>) -> Self {
        Self {
            ordered: true,
            ..Self::new(id_short)
        }
    }
}

/// Create a relationship element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRelationshipElement {
    /// Short name, unique within the parent
    pub id_short: String,
    /// `first` pointer
    pub first: PointerArgument,
    /// `second` pointer
    pub second: PointerArgument,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddRelationshipElement {
    /// Relationship between `first` and `second`
    pub fn new(
        id_short: impl Into<String>,
        first: impl Into<PointerArgument>,
        second: impl Into<PointerArgument>,
    ) -> Self {
        Self {
            id_short: id_short.into(),
            first: first.into(),
            second: second.into(),
            description: None,
            semantic_id: None,
        }
    }
}

/// Create an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEntity {
    /// Short name, unique within the parent
    pub id_short: String,
    /// Co-managed or self-managed
    pub entity_type: EntityType,
    /// `asset` pointer
    pub asset: Option<PointerArgument>,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddEntity {
    /// Co-managed entity without asset
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            entity_type: EntityType::CoManagedEntity,
            asset: None,
            description: None,
            semantic_id: None,
        }
    }
}

/// Create a view of a shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddView {
    /// Short name, unique within the shell
    pub id_short: String,
    /// Human-readable description
    pub description: Option<String>,
    /// `semanticId` pointer
    pub semantic_id: Option<PointerArgument>,
}

impl AddView {
    /// View without pointers
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            description: None,
            semantic_id: None,
        }
    }
}

/// Create a standalone Reference Node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReference {
    /// Browse name of the node
    pub browse_name: String,
    /// Path the reference denotes; must not be empty
    pub keys: Vec<Key>,
    /// Subtype of the reference type to instantiate; the base type when `None`
    pub type_name: Option<String>,
}

impl AddReference {
    /// Reference of the base reference type
    pub fn new(browse_name: impl Into<String>, keys: Vec<Key>) -> Self {
        Self {
            browse_name: browse_name.into(),
            keys,
            type_name: None,
        }
    }
}

/// Result type for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while building the graph.
///
/// A builder call that fails leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Pointer {name} is already set on {owner}")]
    DuplicateAttribute { owner: NodeHandle, name: String },

    #[error("Type mismatch for {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    #[error("Identifier {id} is already registered to {existing}")]
    DuplicateIdentifier { id: String, existing: NodeHandle },

    #[error("Short name {id_short} is already used under {parent} by {existing}")]
    DuplicateIdShort {
        parent: NodeHandle,
        id_short: String,
        existing: NodeHandle,
    },

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid short name: {0:?}")]
    InvalidIdShort(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Node {0} cannot own indexed children")]
    NotAContainer(NodeHandle),

    #[error("Unknown pointer slot: {0}")]
    UnknownPointer(String),

    #[error("Node not found: {0}")]
    UnknownNode(NodeHandle),

    #[error(transparent)]
    AddressSpace(#[from] AddressSpaceError),
}
