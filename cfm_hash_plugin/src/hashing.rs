//! Digest primitives backing the hash capability
//!
//! This is the trusted library the engine dispatches to. It knows nothing
//! about handles or the C ABI.

mod algorithms;
mod registry;
mod traits;

pub use registry::AlgorithmRegistry;
pub use traits::{HashAlgorithmImpl, StreamingHasher};

/// Static description of one supported algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub output_length: usize,
    pub block_size: usize,
}

/// Describe every algorithm the plugin accepts, sorted by name
pub fn supported_algorithms() -> Vec<AlgorithmInfo> {
    let registry = AlgorithmRegistry::global();
    registry
        .list()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|algorithm| AlgorithmInfo {
            name: algorithm.id(),
            output_length: algorithm.output_length(),
            block_size: algorithm.block_size(),
        })
        .collect()
}
