//! Release resolution
//!
//! Decides which of a manifest's releases still need a build. A tag with a
//! build record is done for good: it is never rebuilt or re-verified here.

use crate::core::catalog::Catalog;
use crate::core::manifest::{AppManifest, ReleaseSpec};

/// Outcome of resolving one manifest against the catalog
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Releases without a build record, in manifest order
    pub pending: Vec<(&'a str, &'a ReleaseSpec)>,
    /// Tags that already have a build record
    pub built: Vec<&'a str>,
}

/// Split a manifest's releases into pending and already-built ones
pub fn resolve<'a>(catalog: &Catalog, manifest: &'a AppManifest) -> Resolution<'a> {
    let mut resolution = Resolution::default();
    for (tag, spec) in &manifest.releases {
        if catalog.has_build(&manifest.unique_id, tag) {
            resolution.built.push(tag.as_str());
        } else {
            resolution.pending.push((tag.as_str(), spec));
        }
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::BuildRecord;

    fn manifest(tags: &[&str]) -> AppManifest {
        AppManifest {
            unique_id: "app1".to_string(),
            releases: tags
                .iter()
                .map(|tag| ((*tag).to_string(), ReleaseSpec::default()))
                .collect(),
            ..AppManifest::default()
        }
    }

    #[test]
    fn test_unknown_app_has_everything_pending() {
        let catalog = Catalog::new();
        let manifest = manifest(&["v1", "v2"]);
        let resolution = resolve(&catalog, &manifest);
        let pending: Vec<&str> = resolution.pending.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(pending, vec!["v1", "v2"]);
        assert!(resolution.built.is_empty());
    }

    #[test]
    fn test_built_tags_are_skipped() {
        let mut catalog = Catalog::new();
        let manifest = manifest(&["v1", "v2"]);
        catalog.merge(&manifest);
        catalog
            .insert_build("app1", "v1", BuildRecord::default())
            .unwrap();

        let resolution = resolve(&catalog, &manifest);
        let pending: Vec<&str> = resolution.pending.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(pending, vec!["v2"]);
        assert_eq!(resolution.built, vec!["v1"]);
    }

    #[test]
    fn test_records_for_undeclared_tags_are_ignored() {
        let mut catalog = Catalog::new();
        let manifest = manifest(&["v2"]);
        catalog.merge(&manifest);
        catalog
            .insert_build("app1", "v1", BuildRecord::default())
            .unwrap();

        let resolution = resolve(&catalog, &manifest);
        assert_eq!(resolution.pending.len(), 1);
        assert!(resolution.built.is_empty());
    }
}
