//! Manifest discovery
//!
//! Walks the apps tree and yields every manifest found, lazily and in a
//! stable order (entries sorted by file name within each directory). Any
//! non-directory whose name ends in `.json` is a manifest.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults;
use crate::core::manifest::AppManifest;
use crate::error::ScanError;

/// A parsed manifest and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedManifest {
    /// Parsed manifest
    pub manifest: AppManifest,
    /// Directory containing the manifest file
    pub dir: PathBuf,
    /// Manifest file path
    pub path: PathBuf,
}

/// Restartable manifest scanner over one apps tree
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    root: PathBuf,
}

impl ManifestScanner {
    /// Create a scanner rooted at the apps directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Apps directory being scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh walk
    ///
    /// Manifests that fail to read or parse are yielded as errors, as are
    /// traversal failures; consumers decide which of them end the run.
    pub fn scan(&self) -> impl Iterator<Item = Result<ScannedManifest, ScanError>> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Err(e) => Some(Err(ScanError::Walk {
                    error: e.to_string(),
                })),
                Ok(entry) if is_manifest(&entry) => Some(load(&entry)),
                Ok(_) => None,
            })
    }
}

fn is_manifest(entry: &walkdir::DirEntry) -> bool {
    !entry.file_type().is_dir()
        && entry
            .file_name()
            .to_string_lossy()
            .ends_with(defaults::MANIFEST_SUFFIX)
}

fn load(entry: &walkdir::DirEntry) -> Result<ScannedManifest, ScanError> {
    let path = entry.path();
    let size = entry.metadata().ok().map(|m| m.len());
    tracing::info!(size, "manifest {}", path.display());

    let manifest = AppManifest::load(path)?;
    Ok(ScannedManifest {
        manifest,
        dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        path: path.to_path_buf(),
    })
}
