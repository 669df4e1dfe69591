//! Catalog persistence
//!
//! [`CatalogStore`] owns the in-memory [`Catalog`] and its document on disk.
//! Every save writes the complete catalog and atomically replaces the
//! previous document, serialized by a single lock.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::catalog::{BuildRecord, Catalog};
use crate::core::manifest::AppManifest;
use crate::error::CatalogError;
use crate::infra::filesystem;

/// Persistent catalog handle
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
    save_lock: Mutex<()>,
}

impl CatalogStore {
    /// Load the catalog at `path`, or start empty if there is none yet
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
            Catalog::from_json(&content).map_err(|e| CatalogError::ParseError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?
        } else {
            tracing::info!("no catalog at {}, starting empty", path.display());
            Catalog::new()
        };

        Ok(Self::with_catalog(path, catalog))
    }

    /// Wrap an existing in-memory catalog
    pub fn with_catalog(path: &Path, catalog: Catalog) -> Self {
        Self {
            path: path.to_path_buf(),
            catalog,
            save_lock: Mutex::new(()),
        }
    }

    /// Location of the catalog document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Upsert the manifest's entry, keeping its build records
    pub fn merge(&mut self, manifest: &AppManifest) {
        self.catalog.merge(manifest);
    }

    /// Record a completed build
    pub fn insert_build(
        &mut self,
        app: &str,
        tag: &str,
        record: BuildRecord,
    ) -> Result<(), CatalogError> {
        self.catalog.insert_build(app, tag, record)
    }

    /// Write the full catalog to disk
    pub fn save(&self) -> Result<(), CatalogError> {
        let _guard = self
            .save_lock
            .lock()
            .map_err(|_| CatalogError::LockPoisoned)?;

        let json = self.catalog.to_json()?;
        filesystem::write_file_atomic(&self.path, json.as_bytes()).map_err(|e| {
            CatalogError::WriteError {
                path: self.path.clone(),
                error: e.to_string(),
            }
        })?;
        tracing::debug!(apps = self.catalog.apps.len(), "saved {}", self.path.display());
        Ok(())
    }
}
