//! CLI implementation for `xdcrepo status`
//!
//! Lists the catalog's applications, their built releases and any
//! supported releases that have not been built yet.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::core::catalog::Catalog;
use crate::core::layout::PublishLayout;
use crate::core::store::CatalogStore;

/// Execute the status command
pub async fn execute(project_dir: &Path, build: Option<PathBuf>, json: bool) -> Result<()> {
    let config = ProjectConfig::load(project_dir)?.with_overrides(None, build, None);
    let layout = PublishLayout::new(config.build_dir(project_dir));

    let store = CatalogStore::load(&layout.catalog_path())
        .with_context(|| format!("Failed to load catalog from {}", layout.root().display()))?;

    if json {
        println!("{}", store.catalog().to_json()?);
    } else {
        print!("{}", render(store.catalog()));
    }
    Ok(())
}

/// Human-readable catalog listing
fn render(catalog: &Catalog) -> String {
    if catalog.apps.is_empty() {
        return "No applications in catalog\n".to_string();
    }

    let mut out = String::new();
    for (id, entry) in &catalog.apps {
        out.push_str(&format!("{id} ({})\n", entry.name));
        let built: Vec<&str> = entry.releases.keys().map(String::as_str).collect();
        if built.is_empty() {
            out.push_str("  built: none\n");
        } else {
            out.push_str(&format!("  built: {}\n", built.join(", ")));
        }
        let unbuilt: Vec<&str> = entry
            .supported_releases
            .iter()
            .filter(|tag| !entry.has_build(tag))
            .map(String::as_str)
            .collect();
        if !unbuilt.is_empty() {
            out.push_str(&format!("  not built: {}\n", unbuilt.join(", ")));
        }
    }
    out
}
