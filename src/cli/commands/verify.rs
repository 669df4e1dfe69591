//! Verify command implementation
//!
//! Implements `xdcrepo verify`: re-hash every artifact the catalog records
//! and report missing or modified files. Never writes to the publish tree.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::output::{create_spinner, status};
use crate::config::ProjectConfig;
use crate::core::layout::PublishLayout;
use crate::core::store::CatalogStore;
use crate::core::verify::verify_catalog;
use crate::error::ConfigError;

/// Execute the verify command
pub async fn execute(project_dir: &Path, build: Option<PathBuf>, quiet: bool) -> Result<()> {
    let config = ProjectConfig::load(project_dir)?.with_overrides(None, build, None);
    let build_dir = config.build_dir(project_dir);
    if !build_dir.is_dir() {
        return Err(ConfigError::BuildDirMissing { path: build_dir }.into());
    }

    let layout = PublishLayout::new(build_dir);
    let store = CatalogStore::load(&layout.catalog_path())
        .with_context(|| "Failed to load catalog")?;

    let spinner = create_spinner("Verifying artifacts", quiet);
    let report = verify_catalog(store.catalog(), &layout, |app, tag| {
        spinner.set_message(format!("Verifying {app} {tag}"));
    });
    spinner.finish_and_clear();

    for discrepancy in &report.discrepancies {
        eprintln!("{} {discrepancy}", status::WARNING);
    }

    if !report.is_clean() {
        bail!(
            "{} of {} artifacts failed verification",
            report.discrepancies.len(),
            report.checked
        );
    }

    if !quiet {
        println!(
            "{} {} artifacts match the catalog",
            status::SUCCESS,
            report.checked
        );
    }
    Ok(())
}
