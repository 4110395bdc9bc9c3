//! Pointer slots, Reference Nodes and semantic edges

use super::attribute_names;
use super::node_entry::ElementKind;
use super::AasGraph;
use crate::address_space::{
    type_names, AddressSpace, AttributeValue, ContainmentKind, EdgeKind, NodeHandle, SemanticKind,
};
use crate::commands::{AddReference, BuildError, BuildResult, PointerArgument};
use crate::value_objects::{AdministrativeInformation, Key};

/// Names of the pointer slots
pub mod pointer_names {
    /// Concept defining the element
    pub const SEMANTIC_ID: &str = "semanticId";
    /// Shell a shell derives from
    pub const DERIVED_FROM: &str = "derivedFrom";
    /// Containing element
    pub const PARENT: &str = "parent";
    /// Coded value of a property
    pub const VALUE_ID: &str = "valueId";
    /// Submodel identifying an asset
    pub const ASSET_IDENTIFICATION_MODEL: &str = "assetIdentificationModel";
    /// Submodel listing an asset's parts
    pub const BILL_OF_MATERIAL: &str = "billOfMaterial";
    /// Asset of an entity
    pub const ASSET: &str = "asset";
    /// First end of a relationship
    pub const FIRST: &str = "first";
    /// Second end of a relationship
    pub const SECOND: &str = "second";
    /// Target of a reference element
    pub const VALUE: &str = "value";
    /// Specification template of an embedded data specification
    pub const DATA_SPECIFICATION: &str = "dataSpecification";
    /// Version information
    pub const ADMINISTRATION: &str = "administration";
}

struct PointerSlot {
    name: &'static str,
    target_type: &'static str,
    browse_name: Option<&'static str>,
}

impl PointerSlot {
    const fn reference(name: &'static str) -> Self {
        Self {
            name,
            target_type: type_names::REFERENCE,
            browse_name: None,
        }
    }

    fn accepts_inline(&self) -> bool {
        self.target_type == type_names::REFERENCE
    }
}

const SLOTS: &[PointerSlot] = &[
    PointerSlot::reference(pointer_names::SEMANTIC_ID),
    PointerSlot::reference(pointer_names::DERIVED_FROM),
    PointerSlot::reference(pointer_names::PARENT),
    PointerSlot::reference(pointer_names::VALUE_ID),
    PointerSlot::reference(pointer_names::ASSET_IDENTIFICATION_MODEL),
    PointerSlot::reference(pointer_names::BILL_OF_MATERIAL),
    PointerSlot::reference(pointer_names::ASSET),
    PointerSlot::reference(pointer_names::FIRST),
    PointerSlot::reference(pointer_names::SECOND),
    PointerSlot::reference(pointer_names::VALUE),
    PointerSlot::reference(pointer_names::DATA_SPECIFICATION),
    PointerSlot {
        name: pointer_names::ADMINISTRATION,
        target_type: type_names::ADMINISTRATIVE_INFORMATION,
        browse_name: Some(pointer_names::ADMINISTRATION),
    },
];

fn slot(name: &str) -> BuildResult<&'static PointerSlot> {
    SLOTS
        .iter()
        .find(|slot| slot.name == name)
        .ok_or_else(|| BuildError::UnknownPointer(name.to_string()))
}

impl<S: AddressSpace> AasGraph<S> {
    /// Fill a pointer slot on `owner`. Returns `owner` for chaining.
    ///
    /// An inline key sequence becomes a new Reference Node owned by `owner`.
    /// An existing node is attached as-is after a type check and may be shared
    /// with other owners.
    pub fn attach_pointer(
        &mut self,
        owner: NodeHandle,
        name: &str,
        argument: PointerArgument,
    ) -> BuildResult<NodeHandle> {
        self.check_pointer(owner, name, &argument)?;
        self.wire_pointer(owner, name, &argument)?;
        Ok(owner)
    }

    /// Add a checked semantic edge `from -> to`.
    ///
    /// Semantic edges never enter either index. Adding an edge that already
    /// exists is a no-op.
    pub fn attach_semantic_edge(&mut self, kind: SemanticKind, from: NodeHandle, to: NodeHandle) -> BuildResult<()> {
        self.check_type(&format!("source of {kind}"), from, kind.source_type())?;
        self.check_type(&format!("target of {kind}"), to, kind.target_type())?;

        let edge = EdgeKind::Semantic(kind);
        if self
            .address_space()
            .edges_from(from)
            .iter()
            .any(|(existing, target)| *existing == edge && *target == to)
        {
            tracing::debug!(%kind, %from, %to, "semantic edge already present");
            return Ok(());
        }
        self.create_edge(edge, from, to)
    }

    /// Declare that a shell describes an asset
    pub fn link_asset(&mut self, shell: NodeHandle, asset: NodeHandle) -> BuildResult<()> {
        self.attach_semantic_edge(SemanticKind::HasAsset, shell, asset)
    }

    /// Declare that a shell aggregates a submodel
    pub fn link_submodel(&mut self, shell: NodeHandle, submodel: NodeHandle) -> BuildResult<()> {
        self.attach_semantic_edge(SemanticKind::HasSubmodel, shell, submodel)
    }

    /// Create a standalone Reference Node owned by `parent`.
    ///
    /// The node is not entered into any index; callers can hand it to several
    /// owners through [`PointerArgument::Existing`].
    pub fn add_reference(&mut self, parent: NodeHandle, cmd: AddReference) -> BuildResult<NodeHandle> {
        self.require_node(parent)?;
        self.validate_keys(&cmd.keys)?;
        let type_name = cmd.type_name.as_deref().unwrap_or(type_names::REFERENCE);
        let type_handle = self.type_handle(type_name)?;
        let reference_type = self.type_handle(type_names::REFERENCE)?;
        if !self.address_space().is_subtype(type_handle, reference_type) {
            return Err(BuildError::TypeMismatch {
                context: format!("reference {}", cmd.browse_name),
                expected: type_names::REFERENCE.to_string(),
                found: type_name.to_string(),
            });
        }

        self.create_reference_node(parent, &cmd.browse_name, cmd.keys, type_name)
    }

    /// Attach version information to an Identifiable
    pub fn add_administrative_information(
        &mut self,
        owner: NodeHandle,
        administration: AdministrativeInformation,
    ) -> BuildResult<NodeHandle> {
        self.check_type("owner of administration", owner, type_names::IDENTIFIABLE)?;
        self.check_slot_free(owner, pointer_names::ADMINISTRATION)?;
        self.build_administrative_information(owner, &administration)
    }

    /// Attach an embedded data specification whose template is named by `keys`
    pub fn add_embedded_data_specification(&mut self, owner: NodeHandle, keys: Vec<Key>) -> BuildResult<NodeHandle> {
        self.require_node(owner)?;
        self.validate_keys(&keys)?;

        let specification = self.create_node(
            ElementKind::EmbeddedDataSpecification,
            type_names::EMBEDDED_DATA_SPECIFICATION,
            "embeddedDataSpecification",
        )?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::ComponentOf), owner, specification)?;
        self.create_edge(
            EdgeKind::Semantic(SemanticKind::HasEmbeddedDataSpecification),
            owner,
            specification,
        )?;
        self.wire_pointer(
            specification,
            pointer_names::DATA_SPECIFICATION,
            &PointerArgument::Inline(keys),
        )?;
        Ok(specification)
    }

    pub(crate) fn check_slot_free(&self, owner: NodeHandle, name: &str) -> BuildResult<()> {
        if self.pointer(owner, name).is_some() {
            return Err(BuildError::DuplicateAttribute {
                owner,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Validate a pointer argument for a slot on a node that may not exist yet
    pub(crate) fn check_pointer_argument(&self, name: &str, argument: &PointerArgument) -> BuildResult<()> {
        let slot = slot(name)?;
        match argument {
            PointerArgument::Inline(keys) => {
                if !slot.accepts_inline() {
                    return Err(BuildError::TypeMismatch {
                        context: format!("pointer {name}"),
                        expected: slot.target_type.to_string(),
                        found: "inline key sequence".to_string(),
                    });
                }
                self.validate_keys(keys)
            }
            PointerArgument::Existing(node) => {
                self.check_type(&format!("pointer {name}"), *node, slot.target_type)?;
                match slot.browse_name {
                    Some(required) if self.address_space().browse_name(*node) != Some(required) => {
                        Err(BuildError::TypeMismatch {
                            context: format!("browse name of pointer {name}"),
                            expected: required.to_string(),
                            found: self
                                .address_space()
                                .browse_name(*node)
                                .unwrap_or_default()
                                .to_string(),
                        })
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Validate every optional pointer argument of a builder call
    pub(crate) fn check_pointer_arguments(&self, arguments: &[(&str, Option<&PointerArgument>)]) -> BuildResult<()> {
        for (name, argument) in arguments {
            if let Some(argument) = argument {
                self.check_pointer_argument(name, argument)?;
            }
        }
        Ok(())
    }

    fn check_pointer(&self, owner: NodeHandle, name: &str, argument: &PointerArgument) -> BuildResult<()> {
        self.require_node(owner)?;
        slot(name)?;
        self.check_slot_free(owner, name)?;
        self.check_pointer_argument(name, argument)
    }

    /// Fill a slot whose argument was already checked
    pub(crate) fn wire_pointer(
        &mut self,
        owner: NodeHandle,
        name: &str,
        argument: &PointerArgument,
    ) -> BuildResult<NodeHandle> {
        let (target, shared) = match argument {
            PointerArgument::Inline(keys) => {
                let reference = self.create_reference_node(owner, name, keys.clone(), type_names::REFERENCE)?;
                (reference, false)
            }
            PointerArgument::Existing(node) => {
                self.create_edge(EdgeKind::Pointer(name.to_string()), owner, *node)?;
                (*node, true)
            }
        };
        self.record_pointer(owner, name, target, shared);
        Ok(target)
    }

    pub(crate) fn wire_pointers(
        &mut self,
        owner: NodeHandle,
        arguments: &[(&str, Option<&PointerArgument>)],
    ) -> BuildResult<()> {
        for (name, argument) in arguments {
            if let Some(argument) = argument {
                self.wire_pointer(owner, name, argument)?;
            }
        }
        Ok(())
    }

    pub(crate) fn create_reference_node(
        &mut self,
        parent: NodeHandle,
        browse_name: &str,
        keys: Vec<Key>,
        type_name: &str,
    ) -> BuildResult<NodeHandle> {
        let reference = self.create_node(ElementKind::Reference, type_name, browse_name)?;
        self.set_attribute(reference, attribute_names::KEYS, AttributeValue::Keys(keys))?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::ComponentOf), parent, reference)?;
        Ok(reference)
    }

    pub(crate) fn build_administrative_information(
        &mut self,
        owner: NodeHandle,
        administration: &AdministrativeInformation,
    ) -> BuildResult<NodeHandle> {
        let node = self.create_node(
            ElementKind::AdministrativeInformation,
            type_names::ADMINISTRATIVE_INFORMATION,
            pointer_names::ADMINISTRATION,
        )?;
        self.set_text(node, attribute_names::VERSION, Some(&administration.version))?;
        self.set_text(node, attribute_names::REVISION, Some(&administration.revision))?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::ComponentOf), owner, node)?;
        self.record_pointer(owner, pointer_names::ADMINISTRATION, node, false);
        Ok(node)
    }
}
