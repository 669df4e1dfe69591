//! Release builds in Docker/Podman containers
//!
//! Each release is built in a throwaway container: the source is cloned at
//! the release tag, archived, and the manifest's build command is run. The
//! only host directory the container sees is the build's output directory.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::defaults;
use crate::core::builder::{BuildCapability, BuildRequest};
use crate::error::{BuildError, ConfigError};

/// Container runtime type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRuntime {
    /// Docker container runtime
    Docker,
    /// Podman container runtime
    Podman,
}

impl ContainerRuntime {
    /// Get the command name for this runtime
    pub fn command(&self) -> &'static str {
        match self {
            ContainerRuntime::Docker => "docker",
            ContainerRuntime::Podman => "podman",
        }
    }

    /// Parse a runtime name from configuration
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(ContainerRuntime::Docker),
            "podman" => Ok(ContainerRuntime::Podman),
            _ => Err(ConfigError::UnknownRuntime {
                name: name.to_string(),
            }),
        }
    }

    /// Detect an available container runtime, Docker first
    pub fn detect() -> Option<Self> {
        [ContainerRuntime::Docker, ContainerRuntime::Podman]
            .into_iter()
            .find(|runtime| runtime.is_available())
    }

    /// Check if this runtime is on PATH
    pub fn is_available(&self) -> bool {
        which::which(self.command()).is_ok()
    }
}

/// Mount configuration for container volumes
#[derive(Debug, Clone, PartialEq)]
pub struct MountConfig {
    /// Host path to mount
    pub host_path: PathBuf,
    /// Container path to mount to
    pub container_path: PathBuf,
}

impl MountConfig {
    /// Create a new read-write mount
    pub fn read_write(host_path: PathBuf, container_path: PathBuf) -> Self {
        Self {
            host_path,
            container_path,
        }
    }
}

/// Container configuration for one build
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Container image to use
    pub image: String,
    /// Mount configurations
    pub mounts: Vec<MountConfig>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            image: "alpine:latest".to_string(),
            mounts: Vec::new(),
        }
    }
}

impl SandboxConfig {
    /// Create a new sandbox config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container image
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Add a mount configuration
    #[must_use]
    pub fn with_mount(mut self, mount: MountConfig) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Build the container run command arguments
    pub fn run_args(&self, command: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string(), "-i".to_string()];

        for mount in &self.mounts {
            args.push(format!(
                "-v={}:{}",
                mount.host_path.display(),
                mount.container_path.display()
            ));
        }

        args.push(self.image.clone());
        args.extend(command.iter().cloned());
        args
    }
}

/// Build the in-container script for a release
///
/// Clones the source, checks out the tag, archives the tree without VCS
/// metadata into the output mount, then runs the release's build command.
pub fn build_script(request: &BuildRequest<'_>) -> Result<String, BuildError> {
    let quote = |value: &str| {
        shlex::try_quote(value)
            .map(|quoted| quoted.into_owned())
            .map_err(|e| BuildError::InvalidRequest {
                app: request.app.to_string(),
                tag: request.tag.to_string(),
                error: e.to_string(),
            })
    };

    let src = defaults::CONTAINER_SOURCE_DIR;
    let out = defaults::CONTAINER_OUTPUT_DIR;
    Ok(format!(
        "git clone {source} {src} && cd {src} && git checkout {tag} && \
         tar --exclude-vcs -zcvf {out}/{archive} . && {command}",
        source = quote(request.source)?,
        tag = quote(request.tag)?,
        archive = defaults::BUILD_SOURCE_ARCHIVE,
        command = request.command,
    ))
}

/// Build capability backed by a container runtime
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    /// Runtime to use; detected on first build when unset
    runtime: Option<ContainerRuntime>,
    /// Shell that runs the build script
    shell: String,
}

impl ContainerBuilder {
    /// Create a builder for an explicit or auto-detected runtime
    pub fn new(runtime: Option<ContainerRuntime>, shell: impl Into<String>) -> Self {
        Self {
            runtime,
            shell: shell.into(),
        }
    }

    fn resolve_runtime(&self) -> Result<ContainerRuntime, BuildError> {
        match self.runtime {
            Some(runtime) => Ok(runtime),
            None => ContainerRuntime::detect().ok_or(BuildError::RuntimeNotFound),
        }
    }

    /// Full argument list for `<runtime> run ...`
    pub fn run_args(&self, request: &BuildRequest<'_>) -> Result<Vec<String>, BuildError> {
        let script = build_script(request)?;
        let config = SandboxConfig::new()
            .with_image(request.image)
            .with_mount(MountConfig::read_write(
                request.output_dir.to_path_buf(),
                PathBuf::from(defaults::CONTAINER_OUTPUT_DIR),
            ));
        Ok(config.run_args(&[self.shell.clone(), "-c".to_string(), script]))
    }
}

impl BuildCapability for ContainerBuilder {
    fn build(&self, request: &BuildRequest<'_>) -> Result<(), BuildError> {
        let runtime = self.resolve_runtime()?;
        let args = self.run_args(request)?;

        tracing::info!(
            app = request.app,
            tag = request.tag,
            "run: {} {}",
            runtime.command(),
            args.join(" ")
        );

        let status = Command::new(runtime.command())
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| BuildError::SpawnFailed {
                program: runtime.command().to_string(),
                app: request.app.to_string(),
                tag: request.tag.to_string(),
                error: e.to_string(),
            })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                app: request.app.to_string(),
                tag: request.tag.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
