//! CRC32 checksum exposed through the hash interface

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use crc32fast::Hasher as Crc32Hasher;

pub struct Crc32Algorithm;

/// CRC32 streaming hasher
#[derive(Clone)]
struct Crc32StreamingHasher {
    hasher: Crc32Hasher,
}

impl Crc32StreamingHasher {
    fn new() -> Self {
        Self {
            hasher: Crc32Hasher::new(),
        }
    }
}

impl StreamingHasher for Crc32StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    // Checksum is emitted big-endian
    fn finalize_reset(&mut self, out: &mut [u8]) {
        let checksum = std::mem::take(&mut self.hasher).finalize();
        out.copy_from_slice(&checksum.to_be_bytes());
    }

    fn reset(&mut self) {
        self.hasher.reset();
    }

    fn box_clone(&self) -> Box<dyn StreamingHasher> {
        Box::new(self.clone())
    }
}

impl HashAlgorithmImpl for Crc32Algorithm {
    fn id(&self) -> &'static str {
        "CRC32"
    }

    fn output_length(&self) -> usize {
        4
    }

    fn block_size(&self) -> usize {
        0
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Crc32StreamingHasher::new())
    }
}
