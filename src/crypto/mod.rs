pub mod combiner;
pub mod constant_time;
pub mod curve;
pub mod hashing;
mod kdf;
pub mod lattice;
pub mod params;
pub mod types;

pub use combiner::{
    CombinerError, CombinerSuite, HybridCombiner, XWing, XWingCiphertext, XWingPublicKey,
    XWingSecretKey, XWingSuite,
};
pub use curve::{Ecdh, X25519};
pub use hashing::{Hash256, Sha3_256};
pub use lattice::{LatticeError, LatticeKem, MlKem768Kem};
pub use types::{CombinedCiphertext, CombinedPublicKey, CombinedSecretKey, SharedSecret};
