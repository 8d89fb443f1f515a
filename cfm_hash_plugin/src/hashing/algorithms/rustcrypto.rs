//! Adapter from RustCrypto `digest` implementations to the plugin's hasher traits

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use digest::core_api::BlockSizeUser;
use digest::{Digest, FixedOutputReset};
use std::marker::PhantomData;
use zeroize::Zeroize;

/// Any fixed-output RustCrypto hash registered under a canonical name
pub struct DigestAlgorithm<D> {
    id: &'static str,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestAlgorithm<D> {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            _digest: PhantomData,
        }
    }
}

/// Streaming state wrapping one digest instance
struct DigestStreamingHasher<D> {
    hasher: D,
}

impl<D> StreamingHasher for DigestStreamingHasher<D>
where
    D: Digest + FixedOutputReset + Clone + Send + 'static,
{
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize_reset(&mut self, out: &mut [u8]) {
        let mut digest = Digest::finalize_reset(&mut self.hasher);
        out.copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.hasher);
    }

    fn box_clone(&self) -> Box<dyn StreamingHasher> {
        Box::new(Self {
            hasher: self.hasher.clone(),
        })
    }
}

impl<D> HashAlgorithmImpl for DigestAlgorithm<D>
where
    D: Digest + FixedOutputReset + BlockSizeUser + Clone + Send + 'static,
{
    fn id(&self) -> &'static str {
        self.id
    }

    fn output_length(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn block_size(&self) -> usize {
        <D as BlockSizeUser>::block_size()
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(DigestStreamingHasher {
            hasher: <D as Digest>::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_resets_state() {
        let algorithm = DigestAlgorithm::<sha2::Sha256>::new("SHA-256");
        let mut hasher = algorithm.create_hasher();
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];

        hasher.update(b"abc");
        hasher.finalize_reset(&mut first);
        hasher.update(b"abc");
        hasher.finalize_reset(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_box_clone_is_a_snapshot() {
        let algorithm = DigestAlgorithm::<md5::Md5>::new("MD5");
        let mut original = algorithm.create_hasher();
        original.update(b"te");

        let mut copy = original.box_clone();
        original.update(b"st");
        copy.update(b"xx");

        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        original.finalize_reset(&mut a);
        copy.finalize_reset(&mut b);

        assert_eq!(hex::encode(a), "098f6bcd4621d373cade4e832627b4f6");
        assert_eq!(b.to_vec(), algorithm.hash_bytes(b"texx"));
    }
}
