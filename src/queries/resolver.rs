//! Reference resolution
//!
//! A reference is resolved by a single left-to-right walk: the first key is
//! looked up in the Identifiable registry, every further key in the child
//! index of the node reached so far. There is no backtracking.

use super::{ResolveError, ResolveResult};
use crate::address_space::{AddressSpace, NodeHandle};
use crate::aggregate::{AasGraph, ElementKind};
use crate::value_objects::Key;

impl<S: AddressSpace> AasGraph<S> {
    /// Resolve the path held by a Reference Node
    pub fn resolve(&self, reference: NodeHandle) -> ResolveResult<NodeHandle> {
        let is_reference = self
            .entry(reference)
            .is_some_and(|entry| entry.element() == ElementKind::Reference);
        let keys = self
            .keys_of(reference)
            .filter(|_| is_reference)
            .ok_or(ResolveError::NotAReference(reference))?;
        self.resolve_keys(keys)
    }

    /// Resolve a key path directly
    pub fn resolve_keys(&self, keys: &[Key]) -> ResolveResult<NodeHandle> {
        self.walk(keys).inspect_err(|error| {
            tracing::debug!(%error, keys = keys.len(), "reference not resolved");
        })
    }

    /// Resolve whatever Reference Node the owner's pointer slot holds
    pub fn resolve_pointer(&self, owner: NodeHandle, name: &str) -> ResolveResult<NodeHandle> {
        let reference = self
            .pointer(owner, name)
            .ok_or_else(|| ResolveError::PointerNotSet {
                owner,
                name: name.to_string(),
            })?;
        self.resolve(reference)
    }

    fn walk(&self, keys: &[Key]) -> ResolveResult<NodeHandle> {
        let (first, rest) = keys.split_first().ok_or(ResolveError::EmptyReference)?;

        let mut current = self
            .lookup_identifiable(&first.value)
            .map_err(|_| ResolveError::NotFound {
                position: 0,
                value: first.value.clone(),
            })?;
        self.verify_kind(0, first, current)?;

        for (offset, key) in rest.iter().enumerate() {
            let position = offset + 1;
            let index = self
                .child_index(current)
                .ok_or_else(|| ResolveError::NotIndexable {
                    position,
                    value: key.value.clone(),
                })?;
            current = index.get(&key.value).map_err(|_| ResolveError::NotFound {
                position,
                value: key.value.clone(),
            })?;
            self.verify_kind(position, key, current)?;
        }

        Ok(current)
    }

    fn verify_kind(&self, position: usize, key: &Key, node: NodeHandle) -> ResolveResult<()> {
        if !self.config().verify_key_kinds {
            return Ok(());
        }
        match self.entry(node) {
            Some(entry) if entry.element().matches_key(key.kind) => Ok(()),
            entry => Err(ResolveError::KindMismatch {
                position,
                expected: key.kind,
                found: entry
                    .map(|entry| entry.element().type_name())
                    .unwrap_or("unknown")
                    .to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddAsset, AddProperty, AddReference, AddSubmodel, AddSubmodelElementCollection};
    use crate::config::GraphConfig;
    use crate::value_objects::{Identifier, KeyElements, KeyType};

    fn nameplate(config: GraphConfig) -> (AasGraph, NodeHandle, NodeHandle) {
        let mut graph = AasGraph::with_config(config).unwrap();
        let submodel = graph
            .add_submodel(AddSubmodel::new("Nameplate", Identifier::iri("urn:sm:1")))
            .unwrap();
        let collection = graph
            .add_submodel_element_collection(submodel, AddSubmodelElementCollection::new("Address"))
            .unwrap();
        let street = graph
            .add_property(collection, AddProperty::new("Street", "string"))
            .unwrap();
        (graph, submodel, street)
    }

    fn path() -> Vec<Key> {
        vec![
            Key::new(KeyElements::Submodel, true, KeyType::Iri, "urn:sm:1"),
            Key::id_short(KeyElements::SubmodelElementCollection, "Address"),
            Key::id_short(KeyElements::Property, "Street"),
        ]
    }

    #[test]
    fn test_resolve_nested_path() {
        let (graph, _, street) = nameplate(GraphConfig::default());
        assert_eq!(graph.resolve_keys(&path()), Ok(street));
    }

    #[test]
    fn test_not_indexable() {
        let (graph, _, _) = nameplate(GraphConfig::default());
        let mut keys = path();
        keys.push(Key::id_short(KeyElements::Property, "Number"));
        assert_eq!(
            graph.resolve_keys(&keys),
            Err(ResolveError::NotIndexable {
                position: 3,
                value: "Number".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_keys() {
        let (graph, _, _) = nameplate(GraphConfig::default());
        assert_eq!(graph.resolve_keys(&[]), Err(ResolveError::EmptyReference));
    }

    #[test]
    fn test_kind_mismatch_only_when_verifying() {
        let mut keys = path();
        keys[2].kind = KeyElements::File;

        let (lenient, _, street) = nameplate(GraphConfig::default());
        assert_eq!(lenient.resolve_keys(&keys), Ok(street));

        let strict_config = GraphConfig {
            verify_key_kinds: true,
            ..GraphConfig::default()
        };
        let (strict, _, _) = nameplate(strict_config);
        assert_eq!(
            strict.resolve_keys(&keys),
            Err(ResolveError::KindMismatch {
                position: 2,
                expected: KeyElements::File,
                found: "AASPropertyType".to_string(),
            })
        );
    }

    #[test]
    fn test_resolve_rejects_non_references() {
        let (graph, submodel, _) = nameplate(GraphConfig::default());
        assert_eq!(graph.resolve(submodel), Err(ResolveError::NotAReference(submodel)));
    }

    #[test]
    fn test_resolve_reference_node_and_pointer() {
        let (mut graph, submodel, street) = nameplate(GraphConfig::default());
        let asset = graph
            .add_asset(AddAsset::new("Pump", Identifier::iri("urn:asset:1")))
            .unwrap();
        let reference = graph
            .add_reference(submodel, AddReference::new("street", path()))
            .unwrap();
        assert_eq!(graph.resolve(reference), Ok(street));

        graph
            .attach_pointer(asset, "assetIdentificationModel", reference.into())
            .unwrap();
        assert_eq!(graph.resolve_pointer(asset, "assetIdentificationModel"), Ok(street));
        assert_eq!(
            graph.resolve_pointer(asset, "billOfMaterial"),
            Err(ResolveError::PointerNotSet {
                owner: asset,
                name: "billOfMaterial".to_string(),
            })
        );
    }
}
