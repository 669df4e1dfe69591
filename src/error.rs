//! Error types for xdcrepo
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and environment errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Apps directory is missing
    #[error("'{path}' directory is not available, are you in the correct repository?")]
    AppsDirMissing { path: PathBuf },

    /// Build (publish) directory is missing
    #[error("'{path}' directory is not available, are you in the correct repository?")]
    BuildDirMissing { path: PathBuf },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Unknown container runtime name
    #[error("Unknown container runtime '{name}' (expected 'docker' or 'podman')")]
    UnknownRuntime { name: String },
}

/// Manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest could not be read
    #[error("Failed to read manifest '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Manifest is not a valid document
    #[error("Failed to parse manifest '{path}': {error}")]
    ParseError { path: PathBuf, error: String },
}

/// Catalog persistence errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog could not be read
    #[error("Failed to read catalog '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Catalog is not a valid document
    #[error("Failed to parse catalog '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Catalog could not be serialized
    #[error("Failed to serialize catalog: {error}")]
    SerializeError { error: String },

    /// Catalog could not be written
    #[error("Failed to write catalog '{path}': {error}")]
    WriteError { path: PathBuf, error: String },

    /// Save lock was poisoned by a panicking writer
    #[error("Catalog save lock is poisoned")]
    LockPoisoned,

    /// Application is not in the catalog
    #[error("Application '{app}' is not in the catalog")]
    UnknownApp { app: String },

    /// Build record already present
    #[error("Build record for '{app}' tag '{tag}' already exists")]
    DuplicateBuild { app: String, tag: String },
}

/// Checksum errors
#[derive(Error, Debug)]
pub enum ChecksumError {
    /// File could not be opened
    #[error("Failed to open '{path}' for hashing: {error}")]
    OpenError { path: PathBuf, error: String },

    /// File could not be read
    #[error("Failed to read '{path}' while hashing: {error}")]
    ReadError { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to create temporary directory
    #[error("Failed to create temporary directory: {error}")]
    CreateTempDir { error: String },

    /// Failed to move file
    #[error("Failed to move '{from}' to '{to}': {error}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },
}

/// Build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// No container runtime available
    #[error("Neither Docker nor Podman found in PATH")]
    RuntimeNotFound,

    /// Request cannot be turned into a build script
    #[error("Invalid build request for '{app}' tag '{tag}': {error}")]
    InvalidRequest {
        app: String,
        tag: String,
        error: String,
    },

    /// Container process could not be started
    #[error("Failed to start '{program}' for '{app}' tag '{tag}': {error}")]
    SpawnFailed {
        program: String,
        app: String,
        tag: String,
        error: String,
    },

    /// Container process exited unsuccessfully
    #[error("Build of '{app}' tag '{tag}' failed with {status}")]
    CommandFailed {
        app: String,
        tag: String,
        status: String,
    },

    /// Build finished but an expected artifact is missing
    #[error("Build of '{app}' tag '{tag}' did not produce '{path}'")]
    MissingArtifact {
        app: String,
        tag: String,
        path: PathBuf,
    },
}

/// Manifest scanning errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// Directory traversal failed; the walk stops here
    #[error("Directory walk failed: {error}")]
    Walk { error: String },

    /// Manifest failed to load
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Top-level xdcrepo error type
#[derive(Error, Debug)]
pub enum RepoError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Checksum error
    #[error("Checksum error: {0}")]
    Checksum(#[from] ChecksumError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
