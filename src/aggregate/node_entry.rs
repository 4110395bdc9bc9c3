//! Per-node bookkeeping kept alongside the address space

use crate::address_space::{type_names, NodeHandle};
use crate::index::ChildIndex;
use crate::value_objects::KeyElements;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metamodel element a node was built as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Organizing folder
    Folder,
    /// Reference Node holding a key sequence
    Reference,
    /// Version information
    AdministrativeInformation,
    /// Embedded data specification
    EmbeddedDataSpecification,
    /// Administration shell
    AdministrationShell,
    /// Asset
    Asset,
    /// Submodel
    Submodel,
    /// Concept description
    ConceptDescription,
    /// View of a shell
    View,
    /// Concept dictionary of a shell
    ConceptDictionary,
    /// Property
    Property,
    /// File element
    File,
    /// Reference element
    ReferenceElement,
    /// Submodel element collection
    SubmodelElementCollection {
        /// Whether children get presentation numbers
        ordered: bool,
    },
    /// Relationship element
    RelationshipElement,
    /// Entity
    Entity,
}

impl ElementKind {
    /// Metamodel type the element is instantiated from
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Folder => type_names::FOLDER,
            ElementKind::Reference => type_names::REFERENCE,
            ElementKind::AdministrativeInformation => type_names::ADMINISTRATIVE_INFORMATION,
            ElementKind::EmbeddedDataSpecification => type_names::EMBEDDED_DATA_SPECIFICATION,
            ElementKind::AdministrationShell => type_names::ADMINISTRATION_SHELL,
            ElementKind::Asset => type_names::ASSET,
            ElementKind::Submodel => type_names::SUBMODEL,
            ElementKind::ConceptDescription => type_names::CONCEPT_DESCRIPTION,
            ElementKind::View => type_names::VIEW,
            ElementKind::ConceptDictionary => type_names::CONCEPT_DICTIONARY,
            ElementKind::Property => type_names::PROPERTY,
            ElementKind::File => type_names::FILE,
            ElementKind::ReferenceElement => type_names::REFERENCE_ELEMENT,
            ElementKind::SubmodelElementCollection { ordered: false } => {
                type_names::SUBMODEL_ELEMENT_COLLECTION
            }
            ElementKind::SubmodelElementCollection { ordered: true } => {
                type_names::ORDERED_SUBMODEL_ELEMENT_COLLECTION
            }
            ElementKind::RelationshipElement => type_names::RELATIONSHIP_ELEMENT,
            ElementKind::Entity => type_names::ENTITY,
        }
    }

    /// Whether the element carries a global identifier
    pub fn is_identifiable(&self) -> bool {
        matches!(
            self,
            ElementKind::AdministrationShell
                | ElementKind::Asset
                | ElementKind::Submodel
                | ElementKind::ConceptDescription
        )
    }

    /// Whether the element is a submodel element
    pub fn is_submodel_element(&self) -> bool {
        matches!(
            self,
            ElementKind::Property
                | ElementKind::File
                | ElementKind::ReferenceElement
                | ElementKind::SubmodelElementCollection { .. }
                | ElementKind::RelationshipElement
                | ElementKind::Entity
        )
    }

    /// Child index for elements that own Referable children
    pub fn new_child_index(&self) -> Option<ChildIndex> {
        match self {
            ElementKind::SubmodelElementCollection { ordered: true } => Some(ChildIndex::ordered()),
            ElementKind::AdministrationShell
            | ElementKind::Submodel
            | ElementKind::View
            | ElementKind::ConceptDictionary
            | ElementKind::SubmodelElementCollection { ordered: false }
            | ElementKind::RelationshipElement
            | ElementKind::Entity => Some(ChildIndex::new()),
            _ => None,
        }
    }

    /// Key kind that names this element exactly
    pub fn key_kind(&self) -> Option<KeyElements> {
        let kind = match self {
            ElementKind::AdministrationShell => KeyElements::AssetAdministrationShell,
            ElementKind::Asset => KeyElements::Asset,
            ElementKind::Submodel => KeyElements::Submodel,
            ElementKind::ConceptDescription => KeyElements::ConceptDescription,
            ElementKind::View => KeyElements::View,
            ElementKind::ConceptDictionary => KeyElements::ConceptDictionary,
            ElementKind::Property => KeyElements::Property,
            ElementKind::File => KeyElements::File,
            ElementKind::ReferenceElement => KeyElements::ReferenceElement,
            ElementKind::SubmodelElementCollection { .. } => KeyElements::SubmodelElementCollection,
            ElementKind::RelationshipElement => KeyElements::RelationshipElement,
            ElementKind::Entity => KeyElements::Entity,
            ElementKind::Folder
            | ElementKind::Reference
            | ElementKind::AdministrativeInformation
            | ElementKind::EmbeddedDataSpecification => return None,
        };
        Some(kind)
    }

    /// Whether a key declaring `kind` may land on this element
    pub fn matches_key(&self, kind: KeyElements) -> bool {
        if kind == KeyElements::SubmodelElement {
            return self.is_submodel_element();
        }
        self.key_kind() == Some(kind)
    }
}

/// What the builder knows about one node
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub(crate) element: ElementKind,
    pub(crate) id_short: Option<String>,
    pub(crate) child_index: Option<ChildIndex>,
    pub(crate) pointers: IndexMap<String, NodeHandle>,
}

impl NodeEntry {
    pub(crate) fn new(element: ElementKind, id_short: Option<&str>) -> Self {
        Self {
            element,
            id_short: id_short.map(str::to_string),
            child_index: element.new_child_index(),
            pointers: IndexMap::new(),
        }
    }

    /// Element the node was built as
    pub fn element(&self) -> ElementKind {
        self.element
    }

    /// Short name, for Referables
    pub fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    /// Index of Referable children; `None` when the node cannot own any
    pub fn child_index(&self) -> Option<&ChildIndex> {
        self.child_index.as_ref()
    }

    /// Node held by a pointer slot
    pub fn pointer(&self, name: &str) -> Option<NodeHandle> {
        self.pointers.get(name).copied()
    }

    /// Filled pointer slots in attachment order
    pub fn pointers(&self) -> impl Iterator<Item = (&str, NodeHandle)> {
        self.pointers.iter().map(|(name, node)| (name.as_str(), *node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_capability() {
        assert!(ElementKind::Submodel.new_child_index().is_some());
        assert!(ElementKind::AdministrationShell.new_child_index().is_some());
        assert!(ElementKind::Property.new_child_index().is_none());
        assert!(ElementKind::Asset.new_child_index().is_none());
        assert!(ElementKind::SubmodelElementCollection { ordered: true }
            .new_child_index()
            .is_some_and(|index| index.is_ordered()));
    }

    #[test]
    fn test_key_matching() {
        assert!(ElementKind::Property.matches_key(KeyElements::Property));
        assert!(ElementKind::Property.matches_key(KeyElements::SubmodelElement));
        assert!(!ElementKind::Submodel.matches_key(KeyElements::SubmodelElement));
        assert!(ElementKind::SubmodelElementCollection { ordered: true }
            .matches_key(KeyElements::SubmodelElementCollection));
        assert!(!ElementKind::Reference.matches_key(KeyElements::GlobalReference));
    }
}
