//! Application manifest parsing
//!
//! Every application in the apps tree is described by a JSON manifest that
//! declares its identity, descriptive text and the releases to build.
//! Manifests are curated input: they are parsed, never validated further.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ManifestError;

/// Per-application manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Globally unique application identity
    pub unique_id: String,

    /// One-line description
    #[serde(default)]
    pub short_description: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Git URL of the application source
    #[serde(default)]
    pub source: String,

    /// Banner image path, relative to the manifest's directory
    #[serde(default)]
    pub banner: String,

    /// Release tags advertised as supported
    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_releases: Vec<String>,

    /// Release tag to build recipe
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: BTreeMap<String, ReleaseSpec>,
}

/// Build recipe for one release tag
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseSpec {
    /// Container image the build runs in
    #[serde(default)]
    pub image: String,

    /// Shell command producing the bundle inside the container
    #[serde(default)]
    pub command: String,
}

impl AppManifest {
    /// Parse from JSON string
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
