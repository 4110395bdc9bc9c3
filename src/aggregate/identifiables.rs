//! Builder operations for Identifiables

use super::attribute_names;
use super::node_entry::ElementKind;
use super::pointers::pointer_names;
use super::AasGraph;
use crate::address_space::{
    type_names, AddressSpace, AttributeValue, ContainmentKind, EdgeKind, NodeHandle, SemanticKind,
};
use crate::commands::{
    AddAdministrationShell, AddAsset, AddConceptDescription, AddSubmodel, BuildResult,
};
use crate::value_objects::{AdministrativeInformation, Identifier};

impl<S: AddressSpace> AasGraph<S> {
    /// Create an administration shell below the shells folder
    pub fn add_administration_shell(&mut self, cmd: AddAdministrationShell) -> BuildResult<NodeHandle> {
        let pointers = [(pointer_names::DERIVED_FROM, cmd.derived_from.as_ref())];
        self.check_identifiable(&cmd.id_short, &cmd.identification)?;
        self.check_pointer_arguments(&pointers)?;
        if let Some(base) = cmd.derived_from_shell {
            self.check_type("shell derived from", base, type_names::ADMINISTRATION_SHELL)?;
        }
        if let Some(asset) = cmd.asset {
            self.check_type("asset of shell", asset, type_names::ASSET)?;
        }

        let folder = self.folders().shells;
        let shell = self.create_identifiable(
            ElementKind::AdministrationShell,
            folder,
            &cmd.id_short,
            &cmd.identification,
            cmd.description.as_deref(),
            cmd.administration.as_ref(),
        )?;
        self.wire_pointers(shell, &pointers)?;
        if let Some(base) = cmd.derived_from_shell {
            self.create_edge(EdgeKind::Semantic(SemanticKind::IsDerivedFrom), shell, base)?;
        }
        if let Some(asset) = cmd.asset {
            self.create_edge(EdgeKind::Semantic(SemanticKind::HasAsset), shell, asset)?;
        }

        tracing::info!(%shell, id = cmd.identification.id(), "administration shell added");
        Ok(shell)
    }

    /// Create an asset below the assets folder
    pub fn add_asset(&mut self, cmd: AddAsset) -> BuildResult<NodeHandle> {
        let pointers = [
            (
                pointer_names::ASSET_IDENTIFICATION_MODEL,
                cmd.asset_identification_model.as_ref(),
            ),
            (pointer_names::BILL_OF_MATERIAL, cmd.bill_of_material.as_ref()),
        ];
        self.check_identifiable(&cmd.id_short, &cmd.identification)?;
        self.check_pointer_arguments(&pointers)?;

        let folder = self.folders().assets;
        let asset = self.create_identifiable(
            ElementKind::Asset,
            folder,
            &cmd.id_short,
            &cmd.identification,
            cmd.description.as_deref(),
            cmd.administration.as_ref(),
        )?;
        self.set_text(asset, attribute_names::KIND, Some(cmd.kind.as_str()))?;
        self.wire_pointers(asset, &pointers)?;

        tracing::info!(%asset, id = cmd.identification.id(), "asset added");
        Ok(asset)
    }

    /// Create a submodel below the submodels folder
    pub fn add_submodel(&mut self, cmd: AddSubmodel) -> BuildResult<NodeHandle> {
        let pointers = [(pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref())];
        self.check_identifiable(&cmd.id_short, &cmd.identification)?;
        self.check_pointer_arguments(&pointers)?;

        let folder = self.folders().submodels;
        let submodel = self.create_identifiable(
            ElementKind::Submodel,
            folder,
            &cmd.id_short,
            &cmd.identification,
            cmd.description.as_deref(),
            cmd.administration.as_ref(),
        )?;
        self.set_text(submodel, attribute_names::KIND, Some(cmd.kind.as_str()))?;
        self.wire_pointers(submodel, &pointers)?;

        tracing::info!(%submodel, id = cmd.identification.id(), "submodel added");
        Ok(submodel)
    }

    /// Create a concept description below the concept descriptions folder.
    ///
    /// Every `is_case_of` path becomes its own Reference Node, owned by the
    /// concept description and linked with `IsCaseOf`.
    pub fn add_concept_description(&mut self, cmd: AddConceptDescription) -> BuildResult<NodeHandle> {
        self.check_identifiable(&cmd.id_short, &cmd.identification)?;
        for keys in &cmd.is_case_of {
            self.validate_keys(keys)?;
        }

        let folder = self.folders().concept_descriptions;
        let concept = self.create_identifiable(
            ElementKind::ConceptDescription,
            folder,
            &cmd.id_short,
            &cmd.identification,
            cmd.description.as_deref(),
            cmd.administration.as_ref(),
        )?;
        for keys in cmd.is_case_of {
            let reference = self.create_reference_node(concept, "isCaseOf", keys, type_names::REFERENCE)?;
            self.create_edge(EdgeKind::Semantic(SemanticKind::IsCaseOf), concept, reference)?;
        }

        tracing::info!(%concept, id = cmd.identification.id(), "concept description added");
        Ok(concept)
    }

    fn check_identifiable(&self, id_short: &str, identification: &Identifier) -> BuildResult<()> {
        self.check_id_short(id_short)?;
        self.check_identifier(identification)
    }

    /// Create the node and register it before anything else is attached
    fn create_identifiable(
        &mut self,
        element: ElementKind,
        folder: NodeHandle,
        id_short: &str,
        identification: &Identifier,
        description: Option<&str>,
        administration: Option<&AdministrativeInformation>,
    ) -> BuildResult<NodeHandle> {
        let node = self.create_node(element, element.type_name(), id_short)?;
        self.register(identification.id(), node);

        self.set_text(node, attribute_names::ID_SHORT, Some(id_short))?;
        self.set_attribute(
            node,
            attribute_names::IDENTIFICATION,
            AttributeValue::Identifier(identification.clone()),
        )?;
        self.set_text(node, attribute_names::DESCRIPTION, description)?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::OrganizedBy), folder, node)?;
        if let Some(administration) = administration {
            self.build_administrative_information(node, administration)?;
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{BuildError, PointerArgument};
    use crate::config::GraphConfig;
    use crate::value_objects::{Key, KeyElements, KeyType};

    #[test]
    fn test_identifiables_are_registered_and_organized() {
        let mut graph = AasGraph::new().unwrap();
        let asset = graph
            .add_asset(AddAsset::new("Pump", Identifier::iri("urn:asset:1")))
            .unwrap();
        let shell = graph
            .add_administration_shell(
                AddAdministrationShell::new("PumpShell", Identifier::iri("urn:aas:1")).with_asset(asset),
            )
            .unwrap();

        assert_eq!(graph.lookup_identifiable("urn:asset:1"), Ok(asset));
        assert_eq!(graph.lookup_identifiable("urn:aas:1"), Ok(shell));
        assert_eq!(
            graph.address_space().containment_parent(asset),
            Some(graph.folders().assets)
        );
        assert!(graph
            .address_space()
            .edges_from(shell)
            .contains(&(EdgeKind::Semantic(SemanticKind::HasAsset), asset)));
    }

    #[test]
    fn test_duplicate_identifier_rejected_without_trace() {
        let mut graph = AasGraph::new().unwrap();
        let first = graph
            .add_submodel(AddSubmodel::new("A", Identifier::iri("urn:sm:1")))
            .unwrap();
        let nodes = graph.node_count();
        let journal = graph.journal().len();

        assert_eq!(
            graph.add_submodel(AddSubmodel::new("B", Identifier::iri("urn:sm:1"))),
            Err(BuildError::DuplicateIdentifier {
                id: "urn:sm:1".to_string(),
                existing: first,
            })
        );
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.journal().len(), journal);
    }

    #[test]
    fn test_duplicate_identifier_overwrites_when_permissive() {
        let mut graph = AasGraph::with_config(GraphConfig::permissive()).unwrap();
        graph
            .add_submodel(AddSubmodel::new("A", Identifier::iri("urn:sm:1")))
            .unwrap();
        let second = graph
            .add_submodel(AddSubmodel::new("B", Identifier::iri("urn:sm:1")))
            .unwrap();
        assert_eq!(graph.lookup_identifiable("urn:sm:1"), Ok(second));
    }

    #[test]
    fn test_bad_pointer_leaves_no_shell() {
        let mut graph = AasGraph::new().unwrap();
        let nodes = graph.node_count();
        let cmd = AddAdministrationShell::new("Shell", Identifier::iri("urn:aas:1"))
            .with_derived_from(PointerArgument::Inline(Vec::new()));

        assert!(matches!(
            graph.add_administration_shell(cmd),
            Err(BuildError::InvalidReference(_))
        ));
        assert_eq!(graph.node_count(), nodes);
        assert!(graph.lookup_identifiable("urn:aas:1").is_err());
    }

    #[test]
    fn test_concept_description_is_case_of() {
        let mut graph = AasGraph::new().unwrap();
        let mut cmd = AddConceptDescription::new("MaxTemp", Identifier::irdi("0173-1#02-AAA001#001"));
        cmd.is_case_of = vec![
            vec![Key::global(KeyType::Irdi, "0173-1#02-AAA001#001")],
            vec![Key::new(KeyElements::GlobalReference, false, KeyType::Iri, "urn:ext:temp")],
        ];
        let concept = graph.add_concept_description(cmd).unwrap();

        let cases: Vec<_> = graph
            .address_space()
            .edges_from(concept)
            .into_iter()
            .filter(|(kind, _)| *kind == EdgeKind::Semantic(SemanticKind::IsCaseOf))
            .collect();
        assert_eq!(cases.len(), 2);
        assert!(graph.child_index(concept).is_none());
    }

    #[test]
    fn test_administration_on_creation() {
        let mut graph = AasGraph::new().unwrap();
        let mut cmd = AddSubmodel::new("Nameplate", Identifier::iri("urn:sm:1"));
        cmd.administration = Some(AdministrativeInformation::new("2", "1"));
        let submodel = graph.add_submodel(cmd).unwrap();

        let info = graph.pointer(submodel, pointer_names::ADMINISTRATION).unwrap();
        assert_eq!(
            graph
                .address_space()
                .attribute(info, attribute_names::VERSION)
                .and_then(AttributeValue::as_text),
            Some("2")
        );
    }
}
