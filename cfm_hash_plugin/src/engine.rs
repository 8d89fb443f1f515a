//! Hash engine: per-handle digest state
//!
//! The engine performs no cryptography itself. It resolves algorithm names,
//! checks the output buffer before finalizing and owns the state a handle
//! refers to. The C ABI in [`crate::ffi::operations`] is a thin layer over
//! [`HashState`].

use crate::error::{Result, UsageError, ValidationError};
use crate::hashing::{AlgorithmRegistry, HashAlgorithmImpl, StreamingHasher};
use std::fmt;
use std::sync::Arc;

/// One in-progress hash computation
pub struct HashState {
    algorithm: Arc<dyn HashAlgorithmImpl>,
    hasher: Box<dyn StreamingHasher>,
}

impl HashState {
    /// Create an empty state for the algorithm with canonical name `name`
    pub fn create(name: &str) -> Result<Self> {
        let algorithm = AlgorithmRegistry::global()
            .get(name)
            .ok_or_else(|| ValidationError::unsupported_algorithm(name))?;
        let hasher = algorithm.create_hasher();
        Ok(Self { algorithm, hasher })
    }

    /// Canonical algorithm name
    pub fn name(&self) -> &'static str {
        self.algorithm.id()
    }

    /// Digest length in bytes
    pub fn output_size(&self) -> usize {
        self.algorithm.output_length()
    }

    /// Internal block size in bytes
    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    /// Absorb `data` into the running digest
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Return to the just-created state
    pub fn reset(&mut self) {
        self.hasher.reset();
    }

    /// Independent copy of the absorbed state
    pub fn snapshot(&self) -> Self {
        Self {
            algorithm: Arc::clone(&self.algorithm),
            hasher: self.hasher.box_clone(),
        }
    }

    /// Write the digest to the front of `out` and return its length.
    ///
    /// Fails without touching `out` or the absorbed state when `out` is
    /// shorter than [`output_size`](Self::output_size). On success the state
    /// is reset and can absorb a new message.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let required = self.output_size();
        if out.len() < required {
            return Err(UsageError::insufficient_buffer(required, out.len()).into());
        }
        self.hasher.finalize_reset(&mut out[..required]);
        Ok(required)
    }

    /// Finalize into a freshly allocated vector
    pub fn finalize_vec(&mut self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_size()];
        self.hasher.finalize_reset(&mut out);
        out
    }
}

impl Clone for HashState {
    fn clone(&self) -> Self {
        self.snapshot()
    }
}

impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("algorithm", &self.name())
            .field("output_size", &self.output_size())
            .field("block_size", &self.block_size())
            .finish_non_exhaustive()
    }
}
