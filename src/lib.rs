//! xdcrepo - Incremental app catalog generator
//!
//! This library scans a tree of application manifests, builds every release
//! not yet in the catalog inside a container, and publishes the resulting
//! bundles together with a checksummed catalog document.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Catalog, manifests and the generation loop
//! - [`infra`] - Infrastructure layer (filesystem, hashing, containers)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
