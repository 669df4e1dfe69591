//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, hashing and external processes.

pub mod checksum;
pub mod filesystem;
pub mod sandbox;
