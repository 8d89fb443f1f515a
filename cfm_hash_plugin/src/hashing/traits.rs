//! Core traits for the hash algorithm extensibility system

/// Core trait that all hash algorithms must implement
pub trait HashAlgorithmImpl: Send + Sync {
    /// Canonical identifier, matched case-sensitively by `cfmp_hash_create`
    fn id(&self) -> &'static str;

    /// Digest length in bytes
    fn output_length(&self) -> usize;

    /// Internal block size in bytes, 0 for functions that are not block based
    fn block_size(&self) -> usize;

    /// Create a new streaming hasher in its initial state
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate the digest of in-memory data
    fn hash_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        let mut out = vec![0u8; self.output_length()];
        hasher.finalize_reset(&mut out);
        out
    }
}

/// Trait for streaming hash calculation
///
/// Unlike a one-shot hasher this state survives finalization: after
/// [`finalize_reset`](StreamingHasher::finalize_reset) it is back in its
/// initial condition and can absorb a new message.
pub trait StreamingHasher: Send {
    /// Absorb more input
    fn update(&mut self, data: &[u8]);

    /// Write the digest into `out` and reset the state.
    ///
    /// `out` must be exactly the algorithm's output length.
    fn finalize_reset(&mut self, out: &mut [u8]);

    /// Discard absorbed input
    fn reset(&mut self);

    /// Deep copy of the current absorbed state
    fn box_clone(&self) -> Box<dyn StreamingHasher>;
}
