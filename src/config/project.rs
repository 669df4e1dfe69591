//! Project configuration
//!
//! Reads optional settings from `xdcrepo.toml` in the working directory.
//! Every setting has a built-in default; command-line flags override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::ConfigError;

/// Project configuration for xdcrepo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Build container settings
    #[serde(default)]
    pub sandbox: SandboxSettings,
}

/// Input and output locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory containing manifest subtrees
    pub apps: Option<PathBuf>,

    /// Publish directory
    pub build: Option<PathBuf>,
}

/// Build container settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxSettings {
    /// Container runtime name (`docker` or `podman`), auto-detected if unset
    pub runtime: Option<String>,

    /// Shell used inside the container
    pub shell: Option<String>,
}

impl ProjectConfig {
    /// Load `xdcrepo.toml` from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from_path(&project_dir.join(defaults::CONFIG_FILE))
    }

    /// Load configuration from a specific path
    ///
    /// A missing file yields the default configuration; an invalid one is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Apply command-line overrides on top of the file settings
    #[must_use]
    pub fn with_overrides(
        mut self,
        apps: Option<PathBuf>,
        build: Option<PathBuf>,
        runtime: Option<String>,
    ) -> Self {
        if apps.is_some() {
            self.paths.apps = apps;
        }
        if build.is_some() {
            self.paths.build = build;
        }
        if runtime.is_some() {
            self.sandbox.runtime = runtime;
        }
        self
    }

    /// Effective apps directory, relative paths resolved against `project_dir`
    #[must_use]
    pub fn apps_dir(&self, project_dir: &Path) -> PathBuf {
        let dir = self
            .paths
            .apps
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_APPS_DIR));
        project_dir.join(dir)
    }

    /// Effective publish directory, relative paths resolved against `project_dir`
    #[must_use]
    pub fn build_dir(&self, project_dir: &Path) -> PathBuf {
        let dir = self
            .paths
            .build
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_BUILD_DIR));
        project_dir.join(dir)
    }

    /// Effective container shell
    #[must_use]
    pub fn shell(&self) -> &str {
        self.sandbox
            .shell
            .as_deref()
            .unwrap_or(defaults::DEFAULT_SHELL)
    }
}
