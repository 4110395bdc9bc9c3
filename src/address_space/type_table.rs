//! Node type hierarchy of the AAS metamodel

use super::{AddressSpaceError, AddressSpaceResult, TypeHandle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Names of the metamodel types seeded by [`TypeTable::metamodel`]
pub mod type_names {
    pub const BASE_OBJECT: &str = "BaseObjectType";
    pub const FOLDER: &str = "FolderType";
    pub const REFERENCE: &str = "AASReferenceType";
    pub const ADMINISTRATIVE_INFORMATION: &str = "AASAdministrativeInformationType";
    pub const EMBEDDED_DATA_SPECIFICATION: &str = "AASEmbeddedDataSpecificationType";
    pub const REFERABLE: &str = "AASReferableType";
    pub const IDENTIFIABLE: &str = "AASIdentifiableType";
    pub const ADMINISTRATION_SHELL: &str = "AASAssetAdministrationShellType";
    pub const ASSET: &str = "AASAssetType";
    pub const SUBMODEL: &str = "AASSubmodelType";
    pub const CONCEPT_DESCRIPTION: &str = "AASConceptDescriptionType";
    pub const VIEW: &str = "AASViewType";
    pub const CONCEPT_DICTIONARY: &str = "AASConceptDictionaryType";
    pub const SUBMODEL_ELEMENT: &str = "AASSubmodelElementType";
    pub const PROPERTY: &str = "AASPropertyType";
    pub const FILE: &str = "AASFileType";
    pub const REFERENCE_ELEMENT: &str = "AASReferenceElementType";
    pub const SUBMODEL_ELEMENT_COLLECTION: &str = "AASSubmodelElementCollectionType";
    pub const ORDERED_SUBMODEL_ELEMENT_COLLECTION: &str = "AASOrderedSubmodelElementCollectionType";
    pub const RELATIONSHIP_ELEMENT: &str = "AASRelationshipElementType";
    pub const ENTITY: &str = "AASEntityType";
}

/// A registered node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Unique type name
    pub name: String,
    /// Direct supertype; `None` only for the root type
    pub supertype: Option<TypeHandle>,
    /// Abstract types cannot be instantiated
    pub is_abstract: bool,
}

/// Single-inheritance type hierarchy, indexed by [`TypeHandle`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeTable {
    types: IndexMap<String, TypeDefinition>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Create a table holding only the root type
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        types.insert(
            type_names::BASE_OBJECT.to_string(),
            TypeDefinition {
                name: type_names::BASE_OBJECT.to_string(),
                supertype: None,
                is_abstract: false,
            },
        );
        Self { types }
    }

    /// Create a table seeded with the AAS metamodel types
    pub fn metamodel() -> Self {
        use type_names::*;

        let mut table = Self::new();
        // (name, supertype, abstract) in dependency order
        let seed: [(&str, &str, bool); 20] = [
            (FOLDER, BASE_OBJECT, false),
            (REFERENCE, BASE_OBJECT, false),
            (ADMINISTRATIVE_INFORMATION, BASE_OBJECT, false),
            (EMBEDDED_DATA_SPECIFICATION, BASE_OBJECT, false),
            (REFERABLE, BASE_OBJECT, true),
            (IDENTIFIABLE, REFERABLE, true),
            (ADMINISTRATION_SHELL, IDENTIFIABLE, false),
            (ASSET, IDENTIFIABLE, false),
            (SUBMODEL, IDENTIFIABLE, false),
            (CONCEPT_DESCRIPTION, IDENTIFIABLE, false),
            (VIEW, REFERABLE, false),
            (CONCEPT_DICTIONARY, REFERABLE, false),
            (SUBMODEL_ELEMENT, REFERABLE, true),
            (PROPERTY, SUBMODEL_ELEMENT, false),
            (FILE, SUBMODEL_ELEMENT, false),
            (REFERENCE_ELEMENT, SUBMODEL_ELEMENT, false),
            (SUBMODEL_ELEMENT_COLLECTION, SUBMODEL_ELEMENT, false),
            (ORDERED_SUBMODEL_ELEMENT_COLLECTION, SUBMODEL_ELEMENT_COLLECTION, false),
            (RELATIONSHIP_ELEMENT, SUBMODEL_ELEMENT, false),
            (ENTITY, SUBMODEL_ELEMENT, false),
        ];
        for (name, supertype, is_abstract) in seed {
            // Seed entries are unique and ordered after their supertypes.
            let registered = table.register(name, supertype, is_abstract);
            debug_assert!(registered.is_ok(), "metamodel seed {name}: {registered:?}");
        }
        table
    }

    /// Register a new type below an existing supertype
    pub fn register(&mut self, name: &str, supertype: &str, is_abstract: bool) -> AddressSpaceResult<TypeHandle> {
        if self.types.contains_key(name) {
            return Err(AddressSpaceError::DuplicateType(name.to_string()));
        }
        let supertype = self
            .find(supertype)
            .ok_or_else(|| AddressSpaceError::UnknownType(supertype.to_string()))?;

        let (index, _) = self.types.insert_full(
            name.to_string(),
            TypeDefinition {
                name: name.to_string(),
                supertype: Some(supertype),
                is_abstract,
            },
        );
        Ok(TypeHandle::new(index))
    }

    /// Find a type by name
    pub fn find(&self, name: &str) -> Option<TypeHandle> {
        self.types.get_index_of(name).map(TypeHandle::new)
    }

    /// Get a type definition
    pub fn get(&self, handle: TypeHandle) -> Option<&TypeDefinition> {
        self.types.get_index(handle.index()).map(|(_, definition)| definition)
    }

    /// Name of a type
    pub fn name(&self, handle: TypeHandle) -> Option<&str> {
        self.get(handle).map(|definition| definition.name.as_str())
    }

    /// Whether `ty` is `expected` or transitively derives from it
    pub fn is_subtype(&self, ty: TypeHandle, expected: TypeHandle) -> bool {
        let mut current = Some(ty);
        while let Some(handle) = current {
            if handle == expected {
                return true;
            }
            current = self.get(handle).and_then(|definition| definition.supertype);
        }
        false
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether only the root type exists
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metamodel_hierarchy() {
        let table = TypeTable::metamodel();
        let ordered = table.find(type_names::ORDERED_SUBMODEL_ELEMENT_COLLECTION).unwrap();
        let collection = table.find(type_names::SUBMODEL_ELEMENT_COLLECTION).unwrap();
        let referable = table.find(type_names::REFERABLE).unwrap();
        let reference = table.find(type_names::REFERENCE).unwrap();

        assert!(table.is_subtype(ordered, collection));
        assert!(table.is_subtype(ordered, referable));
        assert!(!table.is_subtype(collection, ordered));
        assert!(!table.is_subtype(reference, referable));
        assert_eq!(table.len(), 21);
    }

    #[test]
    fn test_register_custom_subtype() {
        let mut table = TypeTable::metamodel();
        let vendor = table
            .register("VendorReferenceType", type_names::REFERENCE, false)
            .unwrap();
        let reference = table.find(type_names::REFERENCE).unwrap();
        assert!(table.is_subtype(vendor, reference));
        assert_eq!(table.name(vendor), Some("VendorReferenceType"));
    }

    #[test]
    fn test_register_rejects_duplicates_and_unknown_supertypes() {
        let mut table = TypeTable::metamodel();
        assert_eq!(
            table.register(type_names::PROPERTY, type_names::SUBMODEL_ELEMENT, false),
            Err(AddressSpaceError::DuplicateType(type_names::PROPERTY.to_string()))
        );
        assert_eq!(
            table.register("X", "NoSuchType", false),
            Err(AddressSpaceError::UnknownType("NoSuchType".to_string()))
        );
    }
}
