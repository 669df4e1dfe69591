//! Configuration and constants
//!
//! - [`defaults`] - Built-in names, paths and layout constants
//! - [`project`] - Optional `xdcrepo.toml` project settings

pub mod defaults;
pub mod project;

pub use project::ProjectConfig;
