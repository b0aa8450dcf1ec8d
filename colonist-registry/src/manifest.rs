//! JSON settler manifests.

use colonist_core::error::DiscoveryError;
use colonist_core::settler::SettlerInfo;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A settler scope described as data.
///
/// ```json
/// {
///   "settlers": [
///     { "id": "ants::Worker", "markers": ["ant"] },
///     { "id": "ants::Soldier", "markers": ["ant"], "supertypes": ["ants::Worker"] }
///   ]
/// }
/// ```
///
/// Entry order is discovery order.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlerManifest {
    /// Declared settler types.
    #[serde(default)]
    pub settlers: Vec<SettlerInfo>,
}

impl SettlerManifest {
    /// A manifest listing `settlers`.
    pub fn new(settlers: Vec<SettlerInfo>) -> Self {
        Self { settlers }
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DiscoveryError> {
        serde_json::from_str(json).map_err(|e| DiscoveryError::Manifest(e.to_string()))
    }

    /// Read and parse a manifest file.
    ///
    /// A missing or unreadable file means the scope is unavailable.
    pub fn load(path: &Path) -> Result<Self, DiscoveryError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DiscoveryError::ScopeUnavailable(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }
}
