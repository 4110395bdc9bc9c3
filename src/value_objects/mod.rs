//! AAS value objects
//!
//! Value objects are immutable types used as identity and path-segment tokens.
//! They are compared by value rather than identity and encapsulate validation
//! of their textual forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when parsing value objects from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
    #[error("Unknown identifier type: {0}")]
    UnknownIdentifierType(String),

    #[error("Unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("Unknown key element: {0}")]
    UnknownKeyElement(String),

    #[error("Malformed key: {0}")]
    MalformedKey(String),
}

/// Kind of global identifier carried by an Identifiable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierType {
    /// International Registration Data Identifier (ISO 29002-5)
    Irdi,
    /// Internationalized Resource Identifier (URI/URL/URN)
    Iri,
    /// Proprietary identifier
    Custom,
}

impl IdentifierType {
    /// Get the string representation of the identifier type
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Irdi => "IRDI",
            IdentifierType::Iri => "IRI",
            IdentifierType::Custom => "Custom",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierType {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "irdi" => Ok(IdentifierType::Irdi),
            "iri" | "uri" => Ok(IdentifierType::Iri),
            "custom" => Ok(IdentifierType::Custom),
            _ => Err(ValueObjectError::UnknownIdentifierType(s.to_string())),
        }
    }
}

/// Globally unique name of an Identifiable node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The identifier string, unique across the whole graph
    pub id: String,
    /// How `id` is to be interpreted
    pub id_type: IdentifierType,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(id: impl Into<String>, id_type: IdentifierType) -> Self {
        Self {
            id: id.into(),
            id_type,
        }
    }

    /// Create an IRI identifier
    pub fn iri(id: impl Into<String>) -> Self {
        Self::new(id, IdentifierType::Iri)
    }

    /// Create an IRDI identifier
    pub fn irdi(id: impl Into<String>) -> Self {
        Self::new(id, IdentifierType::Irdi)
    }

    /// Create a custom identifier
    pub fn custom(id: impl Into<String>) -> Self {
        Self::new(id, IdentifierType::Custom)
    }

    /// The identifier string
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.id_type, self.id)
    }
}

/// How the value of a key is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Short local name of a Referable
    IdShort,
    /// IRDI identifier
    Irdi,
    /// IRI identifier
    Iri,
    /// Proprietary identifier
    Custom,
    /// Fragment inside an external document
    FragmentId,
}

impl KeyType {
    /// Get the string representation of the key type
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::IdShort => "IdShort",
            KeyType::Irdi => "IRDI",
            KeyType::Iri => "IRI",
            KeyType::Custom => "Custom",
            KeyType::FragmentId => "FragmentId",
        }
    }
}

impl From<IdentifierType> for KeyType {
    fn from(id_type: IdentifierType) -> Self {
        match id_type {
            IdentifierType::Irdi => KeyType::Irdi,
            IdentifierType::Iri => KeyType::Iri,
            IdentifierType::Custom => KeyType::Custom,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idshort" => Ok(KeyType::IdShort),
            "irdi" => Ok(KeyType::Irdi),
            "iri" | "uri" => Ok(KeyType::Iri),
            "custom" => Ok(KeyType::Custom),
            "fragmentid" => Ok(KeyType::FragmentId),
            _ => Err(ValueObjectError::UnknownKeyType(s.to_string())),
        }
    }
}

/// Kind of entity a key segment is expected to denote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyElements {
    /// Reference to something outside the graph
    GlobalReference,
    /// Fragment of an external document
    FragmentReference,
    /// Administration shell
    AssetAdministrationShell,
    /// Asset
    Asset,
    /// Submodel
    Submodel,
    /// Concept description
    ConceptDescription,
    /// Concept dictionary of a shell
    ConceptDictionary,
    /// View of a shell
    View,
    /// Any submodel element
    SubmodelElement,
    /// Property
    Property,
    /// File element
    File,
    /// Reference element
    ReferenceElement,
    /// Submodel element collection, ordered or not
    SubmodelElementCollection,
    /// Relationship element
    RelationshipElement,
    /// Entity
    Entity,
}

impl KeyElements {
    /// Get the string representation of the key element
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyElements::GlobalReference => "GlobalReference",
            KeyElements::FragmentReference => "FragmentReference",
            KeyElements::AssetAdministrationShell => "AssetAdministrationShell",
            KeyElements::Asset => "Asset",
            KeyElements::Submodel => "Submodel",
            KeyElements::ConceptDescription => "ConceptDescription",
            KeyElements::ConceptDictionary => "ConceptDictionary",
            KeyElements::View => "View",
            KeyElements::SubmodelElement => "SubmodelElement",
            KeyElements::Property => "Property",
            KeyElements::File => "File",
            KeyElements::ReferenceElement => "ReferenceElement",
            KeyElements::SubmodelElementCollection => "SubmodelElementCollection",
            KeyElements::RelationshipElement => "RelationshipElement",
            KeyElements::Entity => "Entity",
        }
    }

    /// Whether the element kind names an Identifiable
    pub fn is_identifiable(&self) -> bool {
        matches!(
            self,
            KeyElements::AssetAdministrationShell
                | KeyElements::Asset
                | KeyElements::Submodel
                | KeyElements::ConceptDescription
        )
    }
}

impl fmt::Display for KeyElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyElements {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "GlobalReference" => KeyElements::GlobalReference,
            "FragmentReference" => KeyElements::FragmentReference,
            "AssetAdministrationShell" => KeyElements::AssetAdministrationShell,
            "Asset" => KeyElements::Asset,
            "Submodel" => KeyElements::Submodel,
            "ConceptDescription" => KeyElements::ConceptDescription,
            "ConceptDictionary" => KeyElements::ConceptDictionary,
            "View" => KeyElements::View,
            "SubmodelElement" => KeyElements::SubmodelElement,
            "Property" => KeyElements::Property,
            "File" => KeyElements::File,
            "ReferenceElement" => KeyElements::ReferenceElement,
            "SubmodelElementCollection" => KeyElements::SubmodelElementCollection,
            "RelationshipElement" => KeyElements::RelationshipElement,
            "Entity" => KeyElements::Entity,
            _ => return Err(ValueObjectError::UnknownKeyElement(s.to_string())),
        };
        Ok(kind)
    }
}

/// One segment of a reference path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// How `value` is to be interpreted
    pub id_type: KeyType,
    /// Whether the segment is resolved inside this graph
    pub local: bool,
    /// Kind of entity the segment denotes
    #[serde(rename = "type")]
    pub kind: KeyElements,
    /// Lookup token: an identifier string or a short name
    pub value: String,
}

impl Key {
    /// Create a new key
    pub fn new(kind: KeyElements, local: bool, id_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            id_type,
            local,
            kind,
            value: value.into(),
        }
    }

    /// Key addressing an Identifiable of this graph by its identifier
    pub fn identifiable(kind: KeyElements, identifier: &Identifier) -> Self {
        Self::new(kind, true, identifier.id_type.into(), identifier.id.clone())
    }

    /// Key addressing a local child by short name
    pub fn id_short(kind: KeyElements, value: impl Into<String>) -> Self {
        Self::new(kind, true, KeyType::IdShort, value)
    }

    /// Key addressing something outside the graph
    pub fn global(id_type: KeyType, value: impl Into<String>) -> Self {
        Self::new(KeyElements::GlobalReference, false, id_type, value)
    }

    /// Whether the key carries a usable lookup token
    pub fn is_well_formed(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = if self.local { "local" } else { "no-local" };
        write!(f, "({})[{}][{}]{}", self.kind, local, self.id_type, self.value)
    }
}

/// Parses `(Kind)[local|no-local][IdType]value`
impl FromStr for Key {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueObjectError::MalformedKey(s.to_string());

        let rest = s.strip_prefix('(').ok_or_else(malformed)?;
        let (kind, rest) = rest.split_once(')').ok_or_else(malformed)?;
        let rest = rest.strip_prefix('[').ok_or_else(malformed)?;
        let (local, rest) = rest.split_once(']').ok_or_else(malformed)?;
        let rest = rest.strip_prefix('[').ok_or_else(malformed)?;
        let (id_type, value) = rest.split_once(']').ok_or_else(malformed)?;

        let local = match local {
            "local" => true,
            "no-local" => false,
            _ => return Err(malformed()),
        };
        if value.trim().is_empty() {
            return Err(malformed());
        }

        Ok(Key::new(kind.parse()?, local, id_type.parse()?, value))
    }
}

/// Version information of an Identifiable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdministrativeInformation {
    /// Version of the element
    pub version: String,
    /// Revision within the version
    pub revision: String,
}

impl AdministrativeInformation {
    /// Create version information
    pub fn new(version: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            revision: revision.into(),
        }
    }
}

/// Whether an asset is a type or an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AssetKind {
    /// Asset type
    Type,
    /// Concrete asset instance
    #[default]
    Instance,
}

impl AssetKind {
    /// Get the string representation of the asset kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Type => "Type",
            AssetKind::Instance => "Instance",
        }
    }
}

/// Whether a model element is a template or an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelingKind {
    /// Template for instances
    Template,
    /// Concrete instance
    #[default]
    Instance,
}

impl ModelingKind {
    /// Get the string representation of the modeling kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelingKind::Template => "Template",
            ModelingKind::Instance => "Instance",
        }
    }
}

/// Management style of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntityType {
    /// Entity without its own administration shell
    #[default]
    CoManagedEntity,
    /// Entity with its own administration shell
    SelfManagedEntity,
}

impl EntityType {
    /// Get the string representation of the entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::CoManagedEntity => "CoManagedEntity",
            EntityType::SelfManagedEntity => "SelfManagedEntity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        let id = Identifier::iri("urn:asset:1");
        assert_eq!(id.to_string(), "[IRI]urn:asset:1");
        assert_eq!(id.id(), "urn:asset:1");
    }

    #[test]
    fn test_key_text_form() {
        let key: Key = "(Submodel)[local][IRI]urn:sm:1".parse().unwrap();
        assert_eq!(key.kind, KeyElements::Submodel);
        assert!(key.local);
        assert_eq!(key.id_type, KeyType::Iri);
        assert_eq!(key.value, "urn:sm:1");
        assert_eq!(key.to_string(), "(Submodel)[local][IRI]urn:sm:1");
    }

    #[test]
    fn test_key_value_may_contain_brackets() {
        let key: Key = "(GlobalReference)[no-local][Custom]a[0](b)".parse().unwrap();
        assert!(!key.local);
        assert_eq!(key.value, "a[0](b)");
    }

    #[test]
    fn test_malformed_keys() {
        assert!(matches!(
            "Submodel[local][IRI]x".parse::<Key>(),
            Err(ValueObjectError::MalformedKey(_))
        ));
        assert!(matches!(
            "(Submodel)[maybe][IRI]x".parse::<Key>(),
            Err(ValueObjectError::MalformedKey(_))
        ));
        assert!(matches!(
            "(Gadget)[local][IRI]x".parse::<Key>(),
            Err(ValueObjectError::UnknownKeyElement(_))
        ));
        assert!(matches!(
            "(Property)[local][Name]x".parse::<Key>(),
            Err(ValueObjectError::UnknownKeyType(_))
        ));
    }

    #[test]
    fn test_blank_key_value_is_malformed() {
        assert!(matches!(
            "(Property)[local][IdShort]".parse::<Key>(),
            Err(ValueObjectError::MalformedKey(_))
        ));
        assert!(matches!(
            "(Property)[local][IdShort]   ".parse::<Key>(),
            Err(ValueObjectError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_key_from_identifier() {
        let key = Key::identifiable(KeyElements::Asset, &Identifier::irdi("0173-1#01-AAA"));
        assert_eq!(key.id_type, KeyType::Irdi);
        assert!(key.local);
        assert!(key.is_well_formed());
        assert!(!Key::id_short(KeyElements::Property, "  ").is_well_formed());
    }

    #[test]
    fn test_key_serializes_kind_as_type() {
        let key = Key::id_short(KeyElements::Property, "temperature");
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["type"], "Property");
        assert_eq!(json["value"], "temperature");
    }
}
