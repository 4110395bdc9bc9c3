//! Graph queries
//!
//! Read-only access to a populated graph. Resolution takes `&AasGraph`, so no
//! builder call can run while a query is in progress.

mod resolver;

use crate::address_space::NodeHandle;
use crate::value_objects::KeyElements;

/// Result type for reference resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why a reference could not be resolved.
///
/// `position` is the zero-based index of the offending key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Key {position} ({value:?}) not found")]
    NotFound { position: usize, value: String },

    #[error("Key {position} ({value:?}) follows a node without children")]
    NotIndexable { position: usize, value: String },

    #[error("Key {position} declares {expected} but reached {found}")]
    KindMismatch {
        position: usize,
        expected: KeyElements,
        found: String,
    },

    #[error("Node {0} is not a reference")]
    NotAReference(NodeHandle),

    #[error("Pointer {name} is not set on {owner}")]
    PointerNotSet { owner: NodeHandle, name: String },

    #[error("Reference has no keys")]
    EmptyReference,
}
