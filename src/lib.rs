//! # xwing-combiner
//!
//! **A deterministic hybrid KEM combiner: ML-KEM-768 + X25519, folded through SHA3-256.**
//!
//! The shared secret stays IND-CCA2 secure as long as *either* the lattice KEM
//! or the curve exchange remains unbroken:
//!
//! ```text
//! ss = SHA3-256( "\.//^\" || ss_ML-KEM || ss_X25519 || ct_X25519 || pk_X25519 )
//! ```
//!
//! The combiner never draws randomness on its own. Key generation takes a
//! 96-byte seed and encapsulation takes 64 bytes of coins; the `keypair` and
//! `encapsulate` helpers fill those from an RNG handed in by the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use xwing_combiner::{XWing, XWING_COINS_BYTES, XWING_SEED_BYTES};
//!
//! let seed = [7u8; XWING_SEED_BYTES];
//! let coins = [9u8; XWING_COINS_BYTES];
//!
//! let (pk, sk) = XWing::keypair_derand(&seed).unwrap();
//! let (ct, sender_secret) = XWing::encapsulate_derand(&pk, &coins).unwrap();
//! let receiver_secret = XWing::decapsulate(&sk, &ct).unwrap();
//!
//! assert_eq!(sender_secret, receiver_secret);
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`crypto::combiner`] | KeyGen / Encapsulate / Decapsulate over a [`CombinerSuite`] |
//! | [`crypto::types`] | Fixed-layout public key, secret key, ciphertext, shared secret |
//! | [`crypto::lattice`] | ML-KEM-768 collaborator (FIPS 203) |
//! | [`crypto::curve`] | X25519 collaborator (RFC 7748) |
//! | [`crypto::hashing`] | SHA3-256 collaborator (FIPS 202) |
//! | [`crypto::params`] | Label and size constants |
//!
//! ## Byte layouts
//!
//! | Buffer | Layout | Length |
//! |--------|--------|--------|
//! | Public key | `ML-KEM pk (1184) ‖ X25519 pk (32)` | 1216 |
//! | Secret key | `ML-KEM sk (2400) ‖ X25519 sk (32) ‖ X25519 pk (32)` | 2464 |
//! | Ciphertext | `ML-KEM ct (1088) ‖ X25519 ephemeral pk (32)` | 1120 |
//! | Shared secret | raw | 32 |

// ── Public modules ──────────────────────────────────────────────────────────

/// Hybrid combiner, its collaborators, and the combined byte layouts.
pub mod crypto;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use crypto::params::{
    XWING_CIPHERTEXT_BYTES, XWING_COINS_BYTES, XWING_LABEL, XWING_PUBLIC_KEY_BYTES,
    XWING_SECRET_KEY_BYTES, XWING_SEED_BYTES,
};
pub use crypto::{
    CombinedCiphertext, CombinedPublicKey, CombinedSecretKey, CombinerError, CombinerSuite,
    HybridCombiner, SharedSecret, XWing, XWingCiphertext, XWingPublicKey, XWingSecretKey,
    XWingSuite,
};

// ── Library metadata ────────────────────────────────────────────────────────

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────
