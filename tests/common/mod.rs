//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory laid out like a catalog repository
/// (`apps/` for manifests, `build/` for the publish tree).
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new empty test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a test project with empty `apps/` and `build/` directories
    pub fn with_layout() -> Self {
        let project = Self::new();
        project.create_dir("apps");
        project.create_dir("build");
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write a manifest with a banner next to it
    pub fn add_app(&self, dir: &str, manifest: &str) {
        self.create_file(&format!("{dir}/app.json"), manifest);
        self.create_file(&format!("{dir}/banner.png"), "png");
    }

    /// Parsed catalog document
    pub fn catalog(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_file("build/meta.json")).expect("Invalid catalog JSON")
    }

    /// Run xdcrepo in the project directory
    ///
    /// PATH points at an empty directory so no container runtime is found;
    /// any attempted build fails instead of reaching a real runtime.
    pub fn run(&self, args: &[&str]) -> Output {
        let empty_path = self.dir.path().join(".no-bin");
        std::fs::create_dir_all(&empty_path).expect("Failed to create empty PATH dir");

        Command::new(env!("CARGO_BIN_EXE_xdcrepo"))
            .current_dir(self.path())
            .args(args)
            .env("PATH", &empty_path)
            .env_remove("RUST_LOG")
            .env_remove("XDCREPO_APPS_DIR")
            .env_remove("XDCREPO_BUILD_DIR")
            .env_remove("XDCREPO_RUNTIME")
            .output()
            .expect("Failed to execute xdcrepo")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest without releases
#[allow(dead_code)]
pub fn manifest_without_releases(id: &str, description: &str) -> String {
    format!(
        r#"{{
    "name": "{id} app",
    "uniqueId": "{id}",
    "shortDescription": "short",
    "description": "{description}",
    "source": "https://example.com/{id}.git",
    "banner": "banner.png",
    "supportedReleases": [],
    "releases": {{}}
}}"#
    )
}

/// Manifest declaring the given release tags
#[allow(dead_code)]
pub fn manifest_with_releases(id: &str, description: &str, tags: &[&str]) -> String {
    let releases: Vec<String> = tags
        .iter()
        .map(|tag| format!(r#""{tag}": {{"image": "node:20", "command": "make xdc"}}"#))
        .collect();
    let supported: Vec<String> = tags.iter().map(|tag| format!("\"{tag}\"")).collect();
    format!(
        r#"{{
    "name": "{id} app",
    "uniqueId": "{id}",
    "shortDescription": "short",
    "description": "{description}",
    "source": "https://example.com/{id}.git",
    "banner": "banner.png",
    "supportedReleases": [{}],
    "releases": {{{}}}
}}"#,
        supported.join(", "),
        releases.join(", ")
    )
}

/// Hex SHA-512 of `data`
#[allow(dead_code)]
pub fn sha512_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha512};
    hex::encode(Sha512::digest(data))
}

/// Catalog with a completed build of `app1` tag `v1`
#[allow(dead_code)]
pub fn catalog_with_build(bundle_sha512: &str, source_sha512: &str) -> String {
    format!(
        r#"{{
    "apps": {{
        "app1": {{
            "name": "old name",
            "uniqueId": "app1",
            "shortDescription": "short",
            "description": "old text",
            "source": "https://example.com/app1.git",
            "banner": "app1/banner.png",
            "supportedReleases": ["v1"],
            "releases": {{
                "v1": {{
                    "image": "node:20",
                    "command": "make xdc",
                    "sourceTarball": "app1/v1/app1.tar.gz",
                    "WebXDCDownload": "app1/v1/app1.xdc",
                    "xdcsha512sum": "{bundle_sha512}",
                    "tarsha512sum": "{source_sha512}"
                }}
            }}
        }}
    }}
}}"#
    )
}
