//! Catalog generation
//!
//! Drives the scan → merge → build loop. The catalog is saved after each
//! manifest's metadata merge and again after every completed build, so an
//! interrupted run loses at most the build in flight and a rerun picks up
//! exactly where it stopped.

use crate::core::builder::{BuildCapability, ReleaseBuilder};
use crate::core::resolve;
use crate::core::scanner::ScannedManifest;
use crate::core::store::CatalogStore;
use crate::error::{RepoError, ScanError};

/// What a generation run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Manifests merged into the catalog
    pub manifests: usize,
    /// (app, tag) pairs built during this run
    pub built: Vec<(String, String)>,
    /// Releases skipped because they were already built
    pub skipped: usize,
    /// Traversal error that cut the scan short, if any
    pub walk_error: Option<String>,
}

/// Merges manifests into the catalog and builds missing releases
pub struct Orchestrator<'a, B> {
    store: &'a mut CatalogStore,
    builder: ReleaseBuilder<B>,
}

impl<'a, B: BuildCapability> Orchestrator<'a, B> {
    /// Create an orchestrator over a loaded catalog
    pub fn new(store: &'a mut CatalogStore, builder: ReleaseBuilder<B>) -> Self {
        Self { store, builder }
    }

    /// Process a sequence of scanned manifests
    ///
    /// Manifest errors abort the run. A traversal error stops the scan but
    /// the run still succeeds with everything processed before it.
    pub fn run<I>(&mut self, manifests: I) -> Result<RunSummary, RepoError>
    where
        I: IntoIterator<Item = Result<ScannedManifest, ScanError>>,
    {
        let mut summary = RunSummary::default();

        for item in manifests {
            match item {
                Ok(scanned) => self.process(&scanned, &mut summary)?,
                Err(ScanError::Manifest(e)) => return Err(e.into()),
                Err(ScanError::Walk { error }) => {
                    tracing::error!("{error}");
                    summary.walk_error = Some(error);
                    break;
                }
            }
        }

        Ok(summary)
    }

    fn process(
        &mut self,
        scanned: &ScannedManifest,
        summary: &mut RunSummary,
    ) -> Result<(), RepoError> {
        let manifest = &scanned.manifest;
        let app = manifest.unique_id.as_str();

        self.store.merge(manifest);
        self.store.save()?;
        summary.manifests += 1;

        let resolution = resolve::resolve(self.store.catalog(), manifest);
        for tag in resolution.built {
            tracing::info!(app, tag, "repo contains build, skipping");
            summary.skipped += 1;
        }

        for (tag, spec) in resolution.pending {
            let record = self
                .builder
                .build_release(manifest, &scanned.dir, tag, spec)?;
            self.store.insert_build(app, tag, record)?;
            self.store.save()?;
            summary.built.push((app.to_string(), tag.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::BuildRequest;
    use crate::core::catalog::{BuildRecord, Catalog};
    use crate::core::layout::PublishLayout;
    use crate::core::manifest::{AppManifest, ReleaseSpec};
    use crate::error::{BuildError, ManifestError};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Produces artifacts and counts invocations per (app, tag)
    #[derive(Default)]
    struct CountingCapability {
        calls: RefCell<Vec<(String, String)>>,
        fail_on: Option<String>,
    }

    impl CountingCapability {
        fn failing_on(tag: &str) -> Self {
            Self {
                fail_on: Some(tag.to_string()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.borrow().clone()
        }
    }

    impl BuildCapability for CountingCapability {
        fn build(&self, request: &BuildRequest<'_>) -> Result<(), BuildError> {
            self.calls
                .borrow_mut()
                .push((request.app.to_string(), request.tag.to_string()));
            if self.fail_on.as_deref() == Some(request.tag) {
                return Err(BuildError::CommandFailed {
                    app: request.app.to_string(),
                    tag: request.tag.to_string(),
                    status: "exit status: 2".to_string(),
                });
            }
            let tag = request.tag;
            std::fs::write(request.output_dir.join("source.tar.gz"), format!("src {tag}")).unwrap();
            std::fs::write(request.output_dir.join("app.xdc"), format!("xdc {tag}")).unwrap();
            Ok(())
        }
    }

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir_all(dir.path().join("build")).unwrap();
            Self { dir }
        }

        fn publish(&self) -> PathBuf {
            self.dir.path().join("build")
        }

        fn catalog_path(&self) -> PathBuf {
            self.publish().join("meta.json")
        }

        /// Synthetic manifest whose banner exists on disk
        fn manifest(&self, id: &str, description: &str, tags: &[&str]) -> ScannedManifest {
            let dir = self.dir.path().join("apps").join(id);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("banner.png"), b"png").unwrap();
            ScannedManifest {
                manifest: AppManifest {
                    name: id.to_string(),
                    unique_id: id.to_string(),
                    description: description.to_string(),
                    source: format!("https://example.com/{id}.git"),
                    banner: "banner.png".to_string(),
                    supported_releases: tags.iter().map(ToString::to_string).collect(),
                    releases: tags
                        .iter()
                        .map(|tag| {
                            (
                                (*tag).to_string(),
                                ReleaseSpec {
                                    image: "node:20".to_string(),
                                    command: "make".to_string(),
                                },
                            )
                        })
                        .collect(),
                    ..AppManifest::default()
                },
                path: dir.join("manifest.json"),
                dir,
            }
        }

        fn run(
            &self,
            capability: &CountingCapability,
            manifests: Vec<ScannedManifest>,
        ) -> Result<RunSummary, RepoError> {
            let mut store = CatalogStore::load(&self.catalog_path()).unwrap();
            let builder = ReleaseBuilder::new(capability, PublishLayout::new(self.publish()));
            Orchestrator::new(&mut store, builder).run(manifests.into_iter().map(Ok))
        }

        fn on_disk(&self) -> Catalog {
            CatalogStore::load(&self.catalog_path())
                .unwrap()
                .catalog()
                .clone()
        }
    }

    fn read(path: &Path) -> Vec<u8> {
        std::fs::read(path).unwrap()
    }

    #[test]
    fn test_first_run_builds_every_release() {
        let fx = Fixture::new();
        let capability = CountingCapability::default();

        let summary = fx
            .run(&capability, vec![fx.manifest("app1", "text", &["v1", "v2"])])
            .unwrap();

        assert_eq!(summary.manifests, 1);
        assert_eq!(summary.built.len(), 2);
        assert_eq!(capability.calls().len(), 2);
        let catalog = fx.on_disk();
        assert!(catalog.has_build("app1", "v1"));
        assert!(catalog.has_build("app1", "v2"));
        assert_eq!(read(&fx.publish().join("app1/v2/app1.xdc")), b"xdc v2");
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let fx = Fixture::new();
        let manifests = || vec![fx.manifest("app1", "text", &["v1", "v2"])];
        fx.run(&CountingCapability::default(), manifests()).unwrap();
        let before = read(&fx.catalog_path());

        let capability = CountingCapability::failing_on("v1");
        let summary = fx.run(&capability, manifests()).unwrap();

        assert!(capability.calls().is_empty());
        assert_eq!(summary.skipped, 2);
        assert!(summary.built.is_empty());
        assert_eq!(read(&fx.catalog_path()), before);
    }

    #[test]
    fn test_rescan_keeps_old_build_and_queues_new_tag() {
        let fx = Fixture::new();
        fx.run(&CountingCapability::default(), vec![fx.manifest("app1", "old", &["v1"])])
            .unwrap();
        let v1_record: BuildRecord = fx.on_disk().get("app1").unwrap().releases["v1"].clone();

        let capability = CountingCapability::default();
        fx.run(&capability, vec![fx.manifest("app1", "new", &["v1", "v2"])])
            .unwrap();

        assert_eq!(capability.calls(), vec![("app1".to_string(), "v2".to_string())]);
        let catalog = fx.on_disk();
        let entry = catalog.get("app1").unwrap();
        assert_eq!(entry.description, "new");
        assert_eq!(entry.releases["v1"], v1_record);
        assert!(entry.has_build("v2"));
    }

    #[test]
    fn test_failed_build_keeps_last_saved_catalog() {
        let fx = Fixture::new();
        let capability = CountingCapability::failing_on("v2");

        let err = fx
            .run(&capability, vec![fx.manifest("app1", "text", &["v1", "v2", "v3"])])
            .unwrap_err();

        assert!(matches!(err, RepoError::Build(BuildError::CommandFailed { .. })));
        let catalog = fx.on_disk();
        assert!(catalog.has_build("app1", "v1"));
        assert!(!catalog.has_build("app1", "v2"));
        assert!(!catalog.has_build("app1", "v3"));
        assert_eq!(catalog.get("app1").unwrap().description, "text");
    }

    #[test]
    fn test_interrupted_run_resumes_pending_build_once() {
        let fx = Fixture::new();
        fx.run(&CountingCapability::failing_on("v2"), vec![fx.manifest("app1", "text", &["v1", "v2"])])
            .unwrap_err();

        let capability = CountingCapability::default();
        let summary = fx
            .run(&capability, vec![fx.manifest("app1", "text", &["v1", "v2"])])
            .unwrap();

        assert_eq!(capability.calls(), vec![("app1".to_string(), "v2".to_string())]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(fx.on_disk().build_count(), 2);
        assert_eq!(fx.on_disk().apps.len(), 1);
    }

    #[test]
    fn test_duplicate_identity_last_wins_and_releases_union() {
        let fx = Fixture::new();
        let first = fx.manifest("app1", "first", &["v1"]);
        let second = fx.manifest("app1", "second", &["v2"]);

        let capability = CountingCapability::default();
        fx.run(&capability, vec![first, second]).unwrap();

        let catalog = fx.on_disk();
        let entry = catalog.get("app1").unwrap();
        assert_eq!(entry.description, "second");
        assert!(entry.has_build("v1"));
        assert!(entry.has_build("v2"));
        assert_eq!(capability.calls().len(), 2);
    }

    #[test]
    fn test_manifest_error_aborts_run() {
        let fx = Fixture::new();
        let capability = CountingCapability::default();
        let mut store = CatalogStore::load(&fx.catalog_path()).unwrap();
        let builder = ReleaseBuilder::new(&capability, PublishLayout::new(fx.publish()));

        let items = vec![
            Ok(fx.manifest("app1", "text", &[])),
            Err(ScanError::Manifest(ManifestError::ParseError {
                path: PathBuf::from("apps/bad.json"),
                error: "expected value".to_string(),
            })),
            Ok(fx.manifest("app2", "text", &[])),
        ];
        let err = Orchestrator::new(&mut store, builder).run(items).unwrap_err();

        assert!(matches!(err, RepoError::Manifest(_)));
        let catalog = fx.on_disk();
        assert!(catalog.get("app1").is_some());
        assert!(catalog.get("app2").is_none());
    }

    #[test]
    fn test_walk_error_finishes_with_prior_progress() {
        let fx = Fixture::new();
        let capability = CountingCapability::default();
        let mut store = CatalogStore::load(&fx.catalog_path()).unwrap();
        let builder = ReleaseBuilder::new(&capability, PublishLayout::new(fx.publish()));

        let items = vec![
            Ok(fx.manifest("app1", "text", &["v1"])),
            Err(ScanError::Walk {
                error: "permission denied".to_string(),
            }),
            Ok(fx.manifest("app2", "text", &["v1"])),
        ];
        let summary = Orchestrator::new(&mut store, builder).run(items).unwrap();

        assert_eq!(summary.manifests, 1);
        assert_eq!(summary.walk_error.as_deref(), Some("permission denied"));
        assert!(fx.on_disk().has_build("app1", "v1"));
        assert!(fx.on_disk().get("app2").is_none());
    }
}
