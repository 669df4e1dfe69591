//! Published artifact verification
//!
//! Re-hashes every artifact the catalog points to and reports what is
//! missing or altered. Generation never does this: a build record is trusted
//! once written. This check is read-only and repairs nothing.

use std::path::PathBuf;

use crate::core::catalog::Catalog;
use crate::core::layout::PublishLayout;
use crate::error::ChecksumError;
use crate::infra::checksum;

/// Problem found with one published artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    /// Application identity
    pub app: String,
    /// Release tag
    pub tag: String,
    /// Artifact location on disk
    pub path: PathBuf,
    /// What is wrong
    pub kind: DiscrepancyKind,
}

/// Kind of artifact problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscrepancyKind {
    /// File is gone
    Missing,
    /// File content no longer matches the recorded digest
    Mismatch { expected: String, actual: String },
    /// File exists but could not be read
    Unreadable { error: String },
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.display();
        match &self.kind {
            DiscrepancyKind::Missing => write!(f, "{} {}: missing {path}", self.app, self.tag),
            DiscrepancyKind::Mismatch { expected, actual } => write!(
                f,
                "{} {}: {path} has sha512 {actual}, catalog says {expected}",
                self.app, self.tag
            ),
            DiscrepancyKind::Unreadable { error } => {
                write!(f, "{} {}: cannot read {path}: {error}", self.app, self.tag)
            }
        }
    }
}

/// Verification result
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Number of artifacts checked
    pub checked: usize,
    /// Problems found
    pub discrepancies: Vec<Discrepancy>,
}

impl VerifyReport {
    /// Whether every artifact matched
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Check every recorded artifact against its digest
///
/// `on_artifact` is called before each artifact is hashed, for progress display.
pub fn verify_catalog(
    catalog: &Catalog,
    layout: &PublishLayout,
    mut on_artifact: impl FnMut(&str, &str),
) -> VerifyReport {
    let mut report = VerifyReport::default();

    for (app, entry) in &catalog.apps {
        for (tag, record) in &entry.releases {
            let artifacts = [
                (&record.source_tarball, &record.source_sha512),
                (&record.bundle, &record.bundle_sha512),
            ];
            for (rel, expected) in artifacts {
                on_artifact(app, tag);
                report.checked += 1;
                let path = layout.resolve(rel);
                let kind = match checksum::sha512_file(&path) {
                    Ok(actual) if actual == expected.to_lowercase() => continue,
                    Ok(actual) => DiscrepancyKind::Mismatch {
                        expected: expected.clone(),
                        actual,
                    },
                    Err(ChecksumError::OpenError { .. }) if !path.exists() => {
                        DiscrepancyKind::Missing
                    }
                    Err(e) => DiscrepancyKind::Unreadable {
                        error: e.to_string(),
                    },
                };
                tracing::warn!(app = %app, tag = %tag, "artifact check failed: {}", path.display());
                report.discrepancies.push(Discrepancy {
                    app: app.clone(),
                    tag: tag.clone(),
                    path,
                    kind,
                });
            }
        }
    }

    report
}
