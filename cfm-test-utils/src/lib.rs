//! Test utilities for the Confium hash plugin
//!
//! This crate provides an in-process mock host that drives the plugin only
//! through its C ABI, plus published digest vectors.

pub mod host;
pub mod vectors;

// Re-export commonly used types
pub use host::{HostDigest, TestHost, check};
pub use vectors::{KNOWN_VECTORS, Vector};
