//! Catalog document
//!
//! The catalog (`meta.json`) aggregates every application's metadata and the
//! build records of every release built so far. A build record's presence is
//! the only "already built" marker; records are never changed once written.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::defaults;
use crate::core::layout;
use crate::core::manifest::{null_as_default, AppManifest};
use crate::error::CatalogError;

/// Root catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    /// Application identity to entry
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: BTreeMap<String, CatalogEntry>,
}

/// One application in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Display name
    pub name: String,

    /// Application identity
    pub unique_id: String,

    /// One-line description
    pub short_description: String,

    /// Long description
    pub description: String,

    /// Git URL of the application source
    pub source: String,

    /// Publish-relative banner path (`<app>/<banner>`)
    pub banner: String,

    /// Release tags advertised as supported
    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_releases: Vec<String>,

    /// Release tag to completed build
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: BTreeMap<String, BuildRecord>,
}

/// Proof that one release was built and published
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildRecord {
    /// Container image the release was built in
    pub image: String,

    /// Build command that produced the bundle
    pub command: String,

    /// Publish-relative source archive path
    #[serde(rename = "sourceTarball")]
    pub source_tarball: String,

    /// Publish-relative bundle path
    #[serde(rename = "WebXDCDownload")]
    pub bundle: String,

    /// SHA-512 of the bundle
    #[serde(rename = "xdcsha512sum")]
    pub bundle_sha512: String,

    /// SHA-512 of the source archive
    #[serde(rename = "tarsha512sum")]
    pub source_sha512: String,
}

impl CatalogEntry {
    /// Create an entry from a manifest, with no builds
    pub fn from_manifest(manifest: &AppManifest) -> Self {
        let mut entry = Self::default();
        entry.update_metadata(manifest);
        entry
    }

    /// Overwrite every descriptive field, leaving build records alone
    pub fn update_metadata(&mut self, manifest: &AppManifest) {
        self.name.clone_from(&manifest.name);
        self.unique_id.clone_from(&manifest.unique_id);
        self.short_description.clone_from(&manifest.short_description);
        self.description.clone_from(&manifest.description);
        self.source.clone_from(&manifest.source);
        self.banner = layout::banner_rel(&manifest.unique_id, &manifest.banner);
        self.supported_releases.clone_from(&manifest.supported_releases);
    }

    /// Whether a build record exists for `tag`
    pub fn has_build(&self, tag: &str) -> bool {
        self.releases.contains_key(tag)
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON string
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Serialize to indented JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(defaults::CATALOG_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|e| CatalogError::SerializeError {
                error: e.to_string(),
            })?;
        String::from_utf8(buf).map_err(|e| CatalogError::SerializeError {
            error: e.to_string(),
        })
    }

    /// Upsert the entry for `manifest.unique_id`
    ///
    /// Descriptive fields always take the manifest's values; existing build
    /// records are kept as they are.
    pub fn merge(&mut self, manifest: &AppManifest) -> &CatalogEntry {
        self.apps
            .entry(manifest.unique_id.clone())
            .and_modify(|entry| entry.update_metadata(manifest))
            .or_insert_with(|| CatalogEntry::from_manifest(manifest))
    }

    /// Look up an application entry
    pub fn get(&self, app: &str) -> Option<&CatalogEntry> {
        self.apps.get(app)
    }

    /// Whether `app` has a build record for `tag`
    pub fn has_build(&self, app: &str, tag: &str) -> bool {
        self.apps.get(app).is_some_and(|entry| entry.has_build(tag))
    }

    /// Record a completed build
    ///
    /// Build records are write-once; a second insert for the same key is an error.
    pub fn insert_build(
        &mut self,
        app: &str,
        tag: &str,
        record: BuildRecord,
    ) -> Result<(), CatalogError> {
        let entry = self
            .apps
            .get_mut(app)
            .ok_or_else(|| CatalogError::UnknownApp {
                app: app.to_string(),
            })?;
        if entry.releases.contains_key(tag) {
            return Err(CatalogError::DuplicateBuild {
                app: app.to_string(),
                tag: tag.to_string(),
            });
        }
        entry.releases.insert(tag.to_string(), record);
        Ok(())
    }

    /// Number of build records across all applications
    pub fn build_count(&self) -> usize {
        self.apps.values().map(|entry| entry.releases.len()).sum()
    }
}
