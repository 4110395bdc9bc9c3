//! Property-based tests for registry, child index and resolution

use cim_aas_graph::{
    AasGraph, AddProperty, AddSubmodel, AddSubmodelElementCollection, GraphConfig, Identifier,
    Key, KeyElements, KeyType,
};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

fn id_short() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,11}"
}

proptest! {
    #[test]
    fn distinct_identifiers_lookup_their_node(ids in btree_set("urn:[a-z0-9:]{1,16}", 1..20)) {
        let mut graph = AasGraph::new().unwrap();
        let mut created = Vec::new();
        for (i, id) in ids.iter().enumerate() {
            let node = graph
                .add_submodel(AddSubmodel::new(format!("sm{i}"), Identifier::iri(id.clone())))
                .unwrap();
            created.push((id.clone(), node));
        }

        for (id, node) in created {
            prop_assert_eq!(graph.lookup_identifiable(&id), Ok(node));
        }
        prop_assert_eq!(graph.registry().len(), ids.len());
    }

    #[test]
    fn indexed_children_resolve_by_path(names in btree_set(id_short(), 1..16)) {
        let mut graph = AasGraph::new().unwrap();
        let submodel = graph
            .add_submodel(AddSubmodel::new("Data", Identifier::iri("urn:sm:1")))
            .unwrap();
        let collection = graph
            .add_submodel_element_collection(submodel, AddSubmodelElementCollection::new("Group"))
            .unwrap();

        for name in &names {
            let property = graph
                .add_property(collection, AddProperty::new(name.clone(), "string"))
                .unwrap();
            let keys = vec![
                Key::new(KeyElements::Submodel, true, KeyType::Iri, "urn:sm:1"),
                Key::id_short(KeyElements::SubmodelElementCollection, "Group"),
                Key::id_short(KeyElements::Property, name.clone()),
            ];
            prop_assert_eq!(graph.resolve_keys(&keys), Ok(property));
        }
    }

    #[test]
    fn ordered_numbers_are_never_reused(names in vec(prop::sample::select(vec!["a", "b", "c", "d"]), 1..30)) {
        let mut graph = AasGraph::with_config(GraphConfig::permissive()).unwrap();
        let submodel = graph
            .add_submodel(AddSubmodel::new("Data", Identifier::iri("urn:sm:1")))
            .unwrap();
        let collection = graph
            .add_submodel_element_collection(submodel, AddSubmodelElementCollection::ordered("Series"))
            .unwrap();

        for (step, name) in names.iter().enumerate() {
            graph
                .add_property(collection, AddProperty::new(*name, "double"))
                .unwrap();
            let index = graph.child_index(collection).unwrap();
            prop_assert_eq!(index.order_of(name), Some(step as u64));
        }

        let index = graph.child_index(collection).unwrap();
        let mut orders: Vec<u64> = index.iter().filter_map(|(_, entry)| entry.order).collect();
        orders.sort_unstable();
        orders.dedup();
        prop_assert_eq!(orders.len(), index.len());
    }
}
