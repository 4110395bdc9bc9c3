//! AAS graph aggregate and its builder operations

mod aas_graph;
mod elements;
mod identifiables;
mod node_entry;
mod pointers;

pub use aas_graph::{folder_names, AasGraph, RootFolders};
pub use node_entry::{ElementKind, NodeEntry};
pub use pointers::pointer_names;

/// Attribute names written by the builder
pub mod attribute_names {
    /// Short name of a Referable
    pub const ID_SHORT: &str = "idShort";
    /// Global identifier of an Identifiable
    pub const IDENTIFICATION: &str = "identification";
    /// Free-text description
    pub const DESCRIPTION: &str = "description";
    /// Key sequence of a Reference Node
    pub const KEYS: &str = "keys";
    pub const VALUE: &str = "value";
    pub const VALUE_TYPE: &str = "valueType";
    pub const MIME_TYPE: &str = "mimeType";
    /// Asset kind or modeling kind
    pub const KIND: &str = "kind";
    pub const ORDERED: &str = "ordered";
    pub const ALLOW_DUPLICATES: &str = "allowDuplicates";
    pub const ENTITY_TYPE: &str = "entityType";
    pub const VERSION: &str = "version";
    pub const REVISION: &str = "revision";
}
