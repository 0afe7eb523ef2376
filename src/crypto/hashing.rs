use sha3::{Digest, Sha3_256 as Sha3_256Hasher};

use super::params::SHARED_SECRET_BYTES;

/// Collision-resistant 256-bit hash used for key derivation
pub trait Hash256 {
    fn hash(input: &[u8]) -> [u8; SHARED_SECRET_BYTES];
}

/// SHA3-256 (FIPS 202)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sha3_256;

impl Hash256 for Sha3_256 {
    fn hash(input: &[u8]) -> [u8; SHARED_SECRET_BYTES] {
        sha3_256(input)
    }
}

/// One-shot SHA3-256
pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256Hasher::new();
    hasher.update(input);
    hasher.finalize().into()
}
