//! Core catalog logic
//!
//! Everything between "a directory of manifests" and "a published catalog".
//! Filesystem and process side effects go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`manifest`] - Application manifest parsing
//! - [`catalog`] - Catalog document and merge rules
//! - [`layout`] - Publish tree path derivation
//! - [`scanner`] - Manifest discovery
//! - [`store`] - Catalog persistence
//! - [`resolve`] - Which releases still need a build
//! - [`builder`] - Release builds and artifact publishing
//! - [`orchestrator`] - The scan → merge → build loop
//! - [`verify`] - Published artifact verification

pub mod builder;
pub mod catalog;
pub mod layout;
pub mod manifest;
pub mod orchestrator;
pub mod resolve;
pub mod scanner;
pub mod store;
pub mod verify;
