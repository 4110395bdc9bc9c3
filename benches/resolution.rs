//! Resolution cost by path depth and registry size

use cim_aas_graph::{
    AasGraph, AddProperty, AddSubmodel, AddSubmodelElementCollection, Identifier, Key, KeyElements,
    KeyType, NodeHandle,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A submodel with a chain of `depth` nested collections ending in a property
fn nested_graph(depth: usize, submodels: usize) -> (AasGraph, Vec<Key>) {
    let mut graph = AasGraph::new().expect("graph");
    for i in 0..submodels {
        graph
            .add_submodel(AddSubmodel::new(format!("Filler{i}"), Identifier::iri(format!("urn:sm:filler:{i}"))))
            .expect("filler submodel");
    }

    let mut current: NodeHandle = graph
        .add_submodel(AddSubmodel::new("Root", Identifier::iri("urn:sm:root")))
        .expect("submodel");
    let mut keys = vec![Key::new(KeyElements::Submodel, true, KeyType::Iri, "urn:sm:root")];

    for level in 0..depth {
        let name = format!("Level{level}");
        current = graph
            .add_submodel_element_collection(current, AddSubmodelElementCollection::new(name.clone()))
            .expect("collection");
        keys.push(Key::id_short(KeyElements::SubmodelElementCollection, name));
    }
    graph
        .add_property(current, AddProperty::new("Leaf", "string"))
        .expect("property");
    keys.push(Key::id_short(KeyElements::Property, "Leaf"));

    (graph, keys)
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_depth");
    for depth in [1, 4, 16, 64] {
        let (graph, keys) = nested_graph(depth, 0);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &keys, |b, keys| {
            b.iter(|| graph.resolve_keys(black_box(keys)))
        });
    }
    group.finish();
}

fn bench_registry_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_registry_size");
    for submodels in [10, 1_000, 10_000] {
        let (graph, keys) = nested_graph(2, submodels);
        group.bench_with_input(BenchmarkId::from_parameter(submodels), &keys, |b, keys| {
            b.iter(|| graph.resolve_keys(black_box(keys)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_depth, bench_registry_size);
criterion_main!(benches);
