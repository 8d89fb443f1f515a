//! Hash algorithm implementations
//!
//! Names follow the canonical identifiers hosts already use for these
//! functions, including the parameter suffixes (`SHA-3(256)`, `Tiger(24,3)`).

use super::registry::AlgorithmRegistry;
use digest::consts::U32;

mod crc32;
mod rustcrypto;

use rustcrypto::DigestAlgorithm;

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(DigestAlgorithm::<md4::Md4>::new("MD4"));
    registry.register(DigestAlgorithm::<md5::Md5>::new("MD5"));
    registry.register(DigestAlgorithm::<sha1::Sha1>::new("SHA-1"));

    registry.register(DigestAlgorithm::<sha2::Sha224>::new("SHA-224"));
    registry.register(DigestAlgorithm::<sha2::Sha256>::new("SHA-256"));
    registry.register(DigestAlgorithm::<sha2::Sha384>::new("SHA-384"));
    registry.register(DigestAlgorithm::<sha2::Sha512>::new("SHA-512"));
    registry.register(DigestAlgorithm::<sha2::Sha512_256>::new("SHA-512-256"));

    registry.register(DigestAlgorithm::<sha3::Sha3_224>::new("SHA-3(224)"));
    registry.register(DigestAlgorithm::<sha3::Sha3_256>::new("SHA-3(256)"));
    registry.register(DigestAlgorithm::<sha3::Sha3_384>::new("SHA-3(384)"));
    registry.register(DigestAlgorithm::<sha3::Sha3_512>::new("SHA-3(512)"));
    registry.register(DigestAlgorithm::<sha3::Keccak256>::new("Keccak-1600(256)"));

    registry.register(DigestAlgorithm::<tiger::Tiger>::new("Tiger(24,3)"));

    registry.register(DigestAlgorithm::<blake2::Blake2b<U32>>::new("BLAKE2b(256)"));
    registry.register(DigestAlgorithm::<blake2::Blake2b512>::new("BLAKE2b(512)"));
    registry.register(DigestAlgorithm::<blake2::Blake2s256>::new("BLAKE2s(256)"));

    registry.register(crc32::Crc32Algorithm);
}
