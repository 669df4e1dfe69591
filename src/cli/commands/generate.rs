//! Generate command implementation
//!
//! Implements `xdcrepo generate`: scan manifests, merge them into the
//! catalog and build every release that has no build record yet.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::output::status;
use crate::config::ProjectConfig;
use crate::core::builder::ReleaseBuilder;
use crate::core::layout::PublishLayout;
use crate::core::orchestrator::{Orchestrator, RunSummary};
use crate::core::scanner::ManifestScanner;
use crate::core::store::CatalogStore;
use crate::error::ConfigError;
use crate::infra::sandbox::{ContainerBuilder, ContainerRuntime};

/// Generate options
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Apps directory override
    pub apps: Option<PathBuf>,
    /// Publish directory override
    pub build: Option<PathBuf>,
    /// Container runtime override
    pub runtime: Option<String>,
    /// Suppress the summary
    pub quiet: bool,
}

/// Execute the generate command
pub async fn execute(project_dir: &Path, options: GenerateOptions) -> Result<()> {
    let config = ProjectConfig::load(project_dir)?.with_overrides(
        options.apps,
        options.build,
        options.runtime,
    );

    let apps_dir = config.apps_dir(project_dir);
    let build_dir = config.build_dir(project_dir);
    if !apps_dir.is_dir() {
        return Err(ConfigError::AppsDirMissing { path: apps_dir }.into());
    }
    if !build_dir.is_dir() {
        return Err(ConfigError::BuildDirMissing { path: build_dir }.into());
    }

    let runtime = config
        .sandbox
        .runtime
        .as_deref()
        .map(ContainerRuntime::parse)
        .transpose()?;
    let capability = ContainerBuilder::new(runtime, config.shell());

    tracing::info!(
        "generating catalog from {} into {}",
        apps_dir.display(),
        build_dir.display()
    );

    // Builds block on child processes for minutes at a time
    let summary = tokio::task::spawn_blocking(move || -> Result<RunSummary> {
        let layout = PublishLayout::new(build_dir);
        let mut store = CatalogStore::load(&layout.catalog_path())
            .with_context(|| "Failed to load catalog")?;
        let builder = ReleaseBuilder::new(capability, layout);
        let scanner = ManifestScanner::new(apps_dir);
        Ok(Orchestrator::new(&mut store, builder).run(scanner.scan())?)
    })
    .await
    .with_context(|| "Generation task failed")??;

    if let Some(error) = &summary.walk_error {
        eprintln!("{} Scan stopped early: {error}", status::WARNING);
    }

    if !options.quiet {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

/// Human-readable run summary
fn render_summary(summary: &RunSummary) -> String {
    let mut out = if summary.walk_error.is_some() {
        format!("{} Catalog updated from a partial scan\n", status::WARNING)
    } else {
        format!("{} Catalog up to date\n", status::SUCCESS)
    };
    out.push_str(&format!("  Manifests: {}\n", summary.manifests));
    out.push_str(&format!("  Built: {}\n", summary.built.len()));
    for (app, tag) in &summary.built {
        out.push_str(&format!("    {app} {tag}\n"));
    }
    out.push_str(&format!("  Already built: {}\n", summary.skipped));
    out
}
