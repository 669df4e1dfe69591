//! Publish tree layout
//!
//! Path derivation for everything placed in the publish directory:
//!
//! ```text
//! <publish>/meta.json
//! <publish>/<app>/<banner>
//! <publish>/<app>/<tag>/<app>.tar.gz
//! <publish>/<app>/<tag>/<app>.xdc
//! ```
//!
//! Catalog entries store the publish-relative form (always `/`-separated);
//! the filesystem form is the same path joined onto the publish root.

use std::path::{Path, PathBuf};

use crate::config::defaults;

/// Publish-relative banner path: `<app>/<banner>`
pub fn banner_rel(app: &str, banner: &str) -> String {
    join_rel(&[app, banner])
}

/// Publish-relative source archive path: `<app>/<tag>/<app>.tar.gz`
pub fn source_archive_rel(app: &str, tag: &str) -> String {
    join_rel(&[
        app,
        tag,
        &format!("{app}.{}", defaults::SOURCE_ARCHIVE_EXT),
    ])
}

/// Publish-relative bundle path: `<app>/<tag>/<app>.xdc`
pub fn bundle_rel(app: &str, tag: &str) -> String {
    join_rel(&[app, tag, &format!("{app}.{}", defaults::BUNDLE_EXT)])
}

/// Join path segments with `/` and normalize `.`, `..` and empty segments
fn join_rel(segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in segments.iter().flat_map(|s| s.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Filesystem view of the publish directory
#[derive(Debug, Clone)]
pub struct PublishLayout {
    root: PathBuf,
}

impl PublishLayout {
    /// Create a layout rooted at the publish directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Publish directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Catalog document path
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(defaults::CATALOG_FILE)
    }

    /// Resolve a publish-relative path onto the filesystem
    pub fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/').fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Directory holding one release's artifacts
    pub fn release_dir(&self, app: &str, tag: &str) -> PathBuf {
        self.resolve(&join_rel(&[app, tag]))
    }
}
