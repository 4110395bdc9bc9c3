//! Graph configuration
//!
//! Governs how the builder treats duplicate names and how strictly the
//! resolver checks key kinds. Loadable from JSON; every field has a default.

use serde::{Deserialize, Serialize};

/// What to do when an identifier or short name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the builder call
    #[default]
    Reject,
    /// Last writer wins; the earlier node stays in the graph but is no longer indexed
    Overwrite,
}

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid graph configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Builder and resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Policy for identifier collisions in the registry
    pub identifier_policy: DuplicatePolicy,
    /// Policy for short-name collisions in a child index
    pub id_short_policy: DuplicatePolicy,
    /// Require every resolved node to match its key's declared kind
    pub verify_key_kinds: bool,
    /// Browse name of the root folder
    pub root_name: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            identifier_policy: DuplicatePolicy::Reject,
            id_short_policy: DuplicatePolicy::Reject,
            verify_key_kinds: false,
            root_name: "AASROOT".to_string(),
        }
    }
}

impl GraphConfig {
    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Last-writer-wins for both indices
    pub fn permissive() -> Self {
        Self {
            identifier_policy: DuplicatePolicy::Overwrite,
            id_short_policy: DuplicatePolicy::Overwrite,
            ..Self::default()
        }
    }
}
