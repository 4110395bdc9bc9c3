//! Builder operations for Referable children
//!
//! Every element is created, given its attributes, edges and pointers, and
//! only then entered into its parent's child index.

use super::attribute_names;
use super::node_entry::ElementKind;
use super::pointers::pointer_names;
use super::AasGraph;
use crate::address_space::{
    type_names, AddressSpace, AttributeValue, ContainmentKind, EdgeKind, NodeHandle, SemanticKind,
};
use crate::commands::{
    AddEntity, AddFile, AddProperty, AddReferenceElement, AddRelationshipElement,
    AddSubmodelElementCollection, AddView, BuildError, BuildResult, PointerArgument,
};

type PointerArguments<'a> = [(&'static str, Option<&'a PointerArgument>)];

impl<S: AddressSpace> AasGraph<S> {
    /// Add a property under a submodel, collection, entity or relationship
    pub fn add_property(&mut self, parent: NodeHandle, cmd: AddProperty) -> BuildResult<NodeHandle> {
        let pointers = [
            (pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref()),
            (pointer_names::VALUE_ID, cmd.value_id.as_ref()),
        ];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let property = self.start_child(parent, ElementKind::Property, &cmd.id_short, cmd.description.as_deref())?;
        self.set_text(property, attribute_names::VALUE_TYPE, Some(&cmd.value_type))?;
        self.set_text(property, attribute_names::VALUE, cmd.value.as_deref())?;
        self.finish_child(parent, &cmd.id_short, property, &pointers)
    }

    /// Add a file element
    pub fn add_file(&mut self, parent: NodeHandle, cmd: AddFile) -> BuildResult<NodeHandle> {
        let pointers = [(pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref())];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let file = self.start_child(parent, ElementKind::File, &cmd.id_short, cmd.description.as_deref())?;
        self.set_text(file, attribute_names::MIME_TYPE, Some(&cmd.mime_type))?;
        self.set_text(file, attribute_names::VALUE, cmd.value.as_deref())?;
        self.finish_child(parent, &cmd.id_short, file, &pointers)
    }

    /// Add a reference element
    pub fn add_reference_element(&mut self, parent: NodeHandle, cmd: AddReferenceElement) -> BuildResult<NodeHandle> {
        let pointers = [
            (pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref()),
            (pointer_names::VALUE, cmd.value.as_ref()),
        ];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let element = self.start_child(
            parent,
            ElementKind::ReferenceElement,
            &cmd.id_short,
            cmd.description.as_deref(),
        )?;
        self.finish_child(parent, &cmd.id_short, element, &pointers)
    }

    /// Add a submodel element collection; ordered collections number their children
    pub fn add_submodel_element_collection(
        &mut self,
        parent: NodeHandle,
        cmd: AddSubmodelElementCollection,
    ) -> BuildResult<NodeHandle> {
        let pointers = [(pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref())];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let element = ElementKind::SubmodelElementCollection { ordered: cmd.ordered };
        let collection = self.start_child(parent, element, &cmd.id_short, cmd.description.as_deref())?;
        self.set_attribute(collection, attribute_names::ORDERED, AttributeValue::Boolean(cmd.ordered))?;
        self.set_attribute(
            collection,
            attribute_names::ALLOW_DUPLICATES,
            AttributeValue::Boolean(cmd.allow_duplicates),
        )?;
        self.finish_child(parent, &cmd.id_short, collection, &pointers)
    }

    /// Add a relationship element; it can own annotation elements
    pub fn add_relationship_element(
        &mut self,
        parent: NodeHandle,
        cmd: AddRelationshipElement,
    ) -> BuildResult<NodeHandle> {
        let pointers = [
            (pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref()),
            (pointer_names::FIRST, Some(&cmd.first)),
            (pointer_names::SECOND, Some(&cmd.second)),
        ];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let relationship = self.start_child(
            parent,
            ElementKind::RelationshipElement,
            &cmd.id_short,
            cmd.description.as_deref(),
        )?;
        self.finish_child(parent, &cmd.id_short, relationship, &pointers)
    }

    /// Add an entity; it can own statement elements
    pub fn add_entity(&mut self, parent: NodeHandle, cmd: AddEntity) -> BuildResult<NodeHandle> {
        let pointers = [
            (pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref()),
            (pointer_names::ASSET, cmd.asset.as_ref()),
        ];
        self.check_element(parent, &cmd.id_short, &pointers)?;

        let entity = self.start_child(parent, ElementKind::Entity, &cmd.id_short, cmd.description.as_deref())?;
        self.set_text(entity, attribute_names::ENTITY_TYPE, Some(cmd.entity_type.as_str()))?;
        self.finish_child(parent, &cmd.id_short, entity, &pointers)
    }

    /// Add a view to a shell
    pub fn add_view(&mut self, shell: NodeHandle, cmd: AddView) -> BuildResult<NodeHandle> {
        let pointers = [(pointer_names::SEMANTIC_ID, cmd.semantic_id.as_ref())];
        self.check_shell_child(shell, &cmd.id_short)?;
        self.check_pointer_arguments(&pointers)?;

        let view = self.start_child(shell, ElementKind::View, &cmd.id_short, cmd.description.as_deref())?;
        self.finish_child(shell, &cmd.id_short, view, &pointers)
    }

    /// Select an element for a view
    pub fn add_view_element(&mut self, view: NodeHandle, element: NodeHandle) -> BuildResult<()> {
        self.attach_semantic_edge(SemanticKind::ContainsElement, view, element)
    }

    /// Add a concept dictionary to a shell
    pub fn add_concept_dictionary(&mut self, shell: NodeHandle, id_short: &str) -> BuildResult<NodeHandle> {
        self.check_shell_child(shell, id_short)?;

        let dictionary = self.start_child(shell, ElementKind::ConceptDictionary, id_short, None)?;
        self.finish_child(shell, id_short, dictionary, &[])
    }

    /// List a concept description in a dictionary
    pub fn add_dictionary_entry(&mut self, dictionary: NodeHandle, concept: NodeHandle) -> BuildResult<()> {
        self.attach_semantic_edge(SemanticKind::HasConceptDescription, dictionary, concept)
    }

    fn check_element(&self, parent: NodeHandle, id_short: &str, pointers: &PointerArguments<'_>) -> BuildResult<()> {
        self.check_id_short(id_short)?;
        self.require_node(parent)?;
        let entry = self.entry(parent).ok_or(BuildError::UnknownNode(parent))?;
        if entry.child_index().is_none() {
            return Err(BuildError::NotAContainer(parent));
        }
        let element = entry.element();
        if element != ElementKind::Submodel && !element.is_submodel_element() {
            return Err(BuildError::TypeMismatch {
                context: format!("parent of submodel element {id_short}"),
                expected: type_names::SUBMODEL.to_string(),
                found: element.type_name().to_string(),
            });
        }
        self.check_child_slot(parent, id_short)?;
        self.check_pointer_arguments(pointers)
    }

    fn check_shell_child(&self, shell: NodeHandle, id_short: &str) -> BuildResult<()> {
        self.check_id_short(id_short)?;
        self.check_type(
            &format!("parent of {id_short}"),
            shell,
            type_names::ADMINISTRATION_SHELL,
        )?;
        self.check_child_slot(shell, id_short)
    }

    fn start_child(
        &mut self,
        parent: NodeHandle,
        element: ElementKind,
        id_short: &str,
        description: Option<&str>,
    ) -> BuildResult<NodeHandle> {
        let node = self.create_node(element, element.type_name(), id_short)?;
        self.set_text(node, attribute_names::ID_SHORT, Some(id_short))?;
        self.set_text(node, attribute_names::DESCRIPTION, description)?;
        self.create_edge(EdgeKind::Containment(ContainmentKind::ComponentOf), parent, node)?;
        Ok(node)
    }

    fn finish_child(
        &mut self,
        parent: NodeHandle,
        id_short: &str,
        node: NodeHandle,
        pointers: &PointerArguments<'_>,
    ) -> BuildResult<NodeHandle> {
        self.wire_pointers(node, pointers)?;
        self.index_child(parent, id_short, node)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddSubmodel;
    use crate::config::GraphConfig;
    use crate::value_objects::{Identifier, Key, KeyElements};

    fn graph_with_submodel(config: GraphConfig) -> (AasGraph, NodeHandle) {
        let mut graph = AasGraph::with_config(config).unwrap();
        let submodel = graph
            .add_submodel(AddSubmodel::new("Operational", Identifier::iri("urn:sm:op")))
            .unwrap();
        (graph, submodel)
    }

    #[test]
    fn test_property_is_indexed_after_construction() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let property = graph
            .add_property(
                submodel,
                AddProperty::new("temperature", "double")
                    .with_value("21.5")
                    .with_semantic_id(vec![Key::id_short(KeyElements::ConceptDescription, "t")]),
            )
            .unwrap();

        assert_eq!(graph.child_index(submodel).unwrap().get("temperature"), Ok(property));
        assert!(graph.pointer(property, pointer_names::SEMANTIC_ID).is_some());
        assert_eq!(graph.address_space().containment_parent(property), Some(submodel));

        let journal = graph.journal().entries();
        let indexed = journal
            .iter()
            .position(|entry| entry.event.event_type() == "ChildIndexed")
            .unwrap();
        let pointer = journal
            .iter()
            .position(|entry| entry.event.event_type() == "PointerAttached")
            .unwrap();
        assert!(pointer < indexed);
    }

    #[test]
    fn test_property_cannot_own_children() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let property = graph
            .add_property(submodel, AddProperty::new("p", "int"))
            .unwrap();
        assert_eq!(
            graph.add_property(property, AddProperty::new("q", "int")),
            Err(BuildError::NotAContainer(property))
        );
    }

    #[test]
    fn test_duplicate_id_short_rejected() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let first = graph.add_file(submodel, AddFile::new("manual", "application/pdf")).unwrap();
        let nodes = graph.node_count();
        assert_eq!(
            graph.add_property(submodel, AddProperty::new("manual", "string")),
            Err(BuildError::DuplicateIdShort {
                parent: submodel,
                id_short: "manual".to_string(),
                existing: first,
            })
        );
        assert_eq!(graph.node_count(), nodes);
    }

    #[test]
    fn test_duplicate_id_short_overwrites_when_permissive() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::permissive());
        graph.add_property(submodel, AddProperty::new("p", "int")).unwrap();
        let second = graph.add_property(submodel, AddProperty::new("p", "int")).unwrap();
        assert_eq!(graph.child_index(submodel).unwrap().get("p"), Ok(second));
    }

    #[test]
    fn test_nested_containers() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let collection = graph
            .add_submodel_element_collection(submodel, AddSubmodelElementCollection::ordered("Readings"))
            .unwrap();
        let entity = graph.add_entity(collection, AddEntity::new("Motor")).unwrap();
        let statement = graph
            .add_property(entity, AddProperty::new("rpm", "int"))
            .unwrap();

        assert_eq!(graph.child_index(collection).unwrap().order_of("Motor"), Some(0));
        assert_eq!(graph.child_index(entity).unwrap().get("rpm"), Ok(statement));
    }

    #[test]
    fn test_relationship_requires_both_ends() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let first = vec![Key::id_short(KeyElements::Property, "a")];
        let result = graph.add_relationship_element(
            submodel,
            AddRelationshipElement::new("link", first, Vec::<Key>::new()),
        );
        assert!(matches!(result, Err(BuildError::InvalidReference(_))));
        assert!(graph.child_index(submodel).unwrap().is_empty());
    }

    #[test]
    fn test_views_only_under_shells() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        assert!(matches!(
            graph.add_view(submodel, AddView::new("Maintenance")),
            Err(BuildError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_view_and_dictionary() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let shell = graph
            .add_administration_shell(crate::commands::AddAdministrationShell::new(
                "Shell",
                Identifier::iri("urn:aas:1"),
            ))
            .unwrap();
        let property = graph.add_property(submodel, AddProperty::new("p", "int")).unwrap();

        let view = graph.add_view(shell, AddView::new("Maintenance")).unwrap();
        graph.add_view_element(view, property).unwrap();
        let dictionary = graph.add_concept_dictionary(shell, "Dictionary").unwrap();

        assert_eq!(graph.child_index(shell).unwrap().len(), 2);
        assert!(graph.child_index(view).unwrap().is_empty());
        assert!(matches!(
            graph.add_dictionary_entry(dictionary, property),
            Err(BuildError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_view_and_dictionary_indices_stay_empty() {
        let (mut graph, submodel) = graph_with_submodel(GraphConfig::default());
        let shell = graph
            .add_administration_shell(crate::commands::AddAdministrationShell::new(
                "Shell",
                Identifier::iri("urn:aas:1"),
            ))
            .unwrap();
        let property = graph.add_property(submodel, AddProperty::new("p", "int")).unwrap();
        let view = graph.add_view(shell, AddView::new("Maintenance")).unwrap();
        let dictionary = graph.add_concept_dictionary(shell, "Dictionary").unwrap();

        assert!(matches!(
            graph.add_property(view, AddProperty::new("q", "int")),
            Err(BuildError::TypeMismatch { .. })
        ));
        assert!(matches!(
            graph.add_property(dictionary, AddProperty::new("q", "int")),
            Err(BuildError::TypeMismatch { .. })
        ));
        graph.add_view_element(view, property).unwrap();

        assert!(graph.child_index(view).unwrap().is_empty());
        assert!(graph.child_index(dictionary).unwrap().is_empty());
    }
}
