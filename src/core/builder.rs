//! Release building
//!
//! [`ReleaseBuilder`] turns one (application, tag) pair into published
//! artifacts and the [`BuildRecord`] describing them. The actual build runs
//! behind the [`BuildCapability`] trait; the container implementation lives
//! in [`crate::infra::sandbox`].

use std::path::Path;

use crate::config::defaults;
use crate::core::catalog::BuildRecord;
use crate::core::layout::{self, PublishLayout};
use crate::core::manifest::{AppManifest, ReleaseSpec};
use crate::error::{BuildError, FilesystemError, RepoError};
use crate::infra::{checksum, filesystem};

/// Everything the build capability needs for one release
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    /// Application identity (for diagnostics)
    pub app: &'a str,
    /// Git URL to clone
    pub source: &'a str,
    /// Release tag to check out
    pub tag: &'a str,
    /// Container image
    pub image: &'a str,
    /// Opaque build command
    pub command: &'a str,
    /// Ephemeral directory that must receive `source.tar.gz` and `app.xdc`
    pub output_dir: &'a Path,
}

/// External build capability
///
/// Implementations clone `source` at `tag`, write `source.tar.gz` of the tree
/// (without VCS metadata) into `output_dir`, then run `command`, which must
/// leave `app.xdc` there. Any failure is reported as an error.
pub trait BuildCapability {
    /// Run one release build
    fn build(&self, request: &BuildRequest<'_>) -> Result<(), BuildError>;
}

impl<T: BuildCapability + ?Sized> BuildCapability for &T {
    fn build(&self, request: &BuildRequest<'_>) -> Result<(), BuildError> {
        (**self).build(request)
    }
}

/// Builds releases and places their artifacts in the publish tree
#[derive(Debug)]
pub struct ReleaseBuilder<B> {
    capability: B,
    layout: PublishLayout,
}

impl<B: BuildCapability> ReleaseBuilder<B> {
    /// Create a builder publishing into `layout`
    pub fn new(capability: B, layout: PublishLayout) -> Self {
        Self { capability, layout }
    }

    /// Publish layout in use
    pub fn layout(&self) -> &PublishLayout {
        &self.layout
    }

    /// Build one release and publish its artifacts
    ///
    /// Nothing is recorded here; the returned record is only produced after
    /// both artifacts sit at their final location and have been hashed.
    pub fn build_release(
        &self,
        manifest: &AppManifest,
        manifest_dir: &Path,
        tag: &str,
        spec: &ReleaseSpec,
    ) -> Result<BuildRecord, RepoError> {
        let app = manifest.unique_id.as_str();
        tracing::info!(app, tag, "build");

        let workspace = tempfile::Builder::new()
            .prefix(defaults::TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|e| FilesystemError::CreateTempDir {
                error: e.to_string(),
            })?;
        tracing::debug!(app, tag, workspace = %workspace.path().display(), "build workspace");

        self.capability.build(&BuildRequest {
            app,
            source: &manifest.source,
            tag,
            image: &spec.image,
            command: &spec.command,
            output_dir: workspace.path(),
        })?;

        let source_rel = layout::source_archive_rel(app, tag);
        let bundle_rel = layout::bundle_rel(app, tag);
        let source_path = self.layout.resolve(&source_rel);
        let bundle_path = self.layout.resolve(&bundle_rel);

        filesystem::create_dir_all(&self.layout.release_dir(app, tag))?;
        relocate(
            app,
            tag,
            &workspace.path().join(defaults::BUILD_SOURCE_ARCHIVE),
            &source_path,
        )?;
        relocate(
            app,
            tag,
            &workspace.path().join(defaults::BUILD_BUNDLE),
            &bundle_path,
        )?;

        self.publish_banner(manifest, manifest_dir)?;

        let record = BuildRecord {
            image: spec.image.clone(),
            command: spec.command.clone(),
            source_tarball: source_rel,
            bundle: bundle_rel,
            bundle_sha512: checksum::sha512_file(&bundle_path)?,
            source_sha512: checksum::sha512_file(&source_path)?,
        };
        tracing::info!(app, tag, sha512 = %record.bundle_sha512, "built");
        Ok(record)
    }

    /// Copy the manifest's banner next to the application's releases
    pub fn publish_banner(
        &self,
        manifest: &AppManifest,
        manifest_dir: &Path,
    ) -> Result<(), FilesystemError> {
        let from = manifest_dir.join(&manifest.banner);
        let to = self
            .layout
            .resolve(&layout::banner_rel(&manifest.unique_id, &manifest.banner));
        tracing::debug!(app = %manifest.unique_id, "copy {} -> {}", from.display(), to.display());
        filesystem::copy_file(&from, &to)
    }
}

/// Move a build output into the publish tree
fn relocate(app: &str, tag: &str, from: &Path, to: &Path) -> Result<(), RepoError> {
    if !from.is_file() {
        return Err(BuildError::MissingArtifact {
            app: app.to_string(),
            tag: tag.to_string(),
            path: from.to_path_buf(),
        }
        .into());
    }
    tracing::debug!(app, tag, "move {} -> {}", from.display(), to.display());
    filesystem::move_file(from, to)?;
    Ok(())
}
