//! Asset Administration Shell address-space graph
//!
//! Builds a typed, in-memory object graph of administration shells, assets,
//! submodels and their elements on top of an address space, and resolves
//! key paths back to the nodes they name. Identifiables are found through a
//! graph-wide registry; Referables through the child index of their
//! container.

pub mod address_space;
pub mod aggregate;
pub mod commands;
pub mod config;
pub mod events;
pub mod index;
pub mod projections;
pub mod queries;
pub mod value_objects;

// Re-export main types
pub use aggregate::{pointer_names, AasGraph, ElementKind, NodeEntry, RootFolders};

pub use address_space::{
    AddressSpace, AddressSpaceError, AddressSpaceResult, AttributeValue, ContainmentKind,
    EdgeCategory, EdgeKind, MemoryAddressSpace, NodeHandle, SemanticKind, TypeHandle, TypeTable,
};

pub use commands::{
    AddAdministrationShell, AddAsset, AddConceptDescription, AddEntity, AddFile, AddProperty,
    AddReference, AddReferenceElement, AddRelationshipElement, AddSubmodel,
    AddSubmodelElementCollection, AddView, BuildError, BuildResult, PointerArgument,
};

pub use config::{ConfigError, DuplicatePolicy, GraphConfig};
pub use events::{AddressSpaceEvent, Journal, JournalEntry};
pub use index::{ChildIndex, IdentifiableRegistry, NotFound};
pub use queries::{ResolveError, ResolveResult};

pub use projections::{DiagramProjection, GraphSummary, GraphSummaryProjection, JournalProjection};

pub use value_objects::{
    AdministrativeInformation, AssetKind, EntityType, Identifier, IdentifierType, Key,
    KeyElements, KeyType, ModelingKind,
};
