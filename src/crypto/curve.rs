use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::params::{DH_BYTES, X25519_PUBLIC_KEY_BYTES, X25519_SECRET_KEY_BYTES};

/// Elliptic-curve Diffie-Hellman capability.
///
/// Both operations are total over 32-byte inputs; the scalar is used as-is
/// (clamping is the primitive's business, not the caller's).
pub trait Ecdh {
    fn scalar_base_mult(scalar: &[u8; X25519_SECRET_KEY_BYTES]) -> [u8; X25519_PUBLIC_KEY_BYTES];

    fn scalar_mult(
        scalar: &[u8; X25519_SECRET_KEY_BYTES],
        point: &[u8; X25519_PUBLIC_KEY_BYTES],
    ) -> Zeroizing<[u8; DH_BYTES]>;
}

/// X25519 (RFC 7748)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct X25519;

impl Ecdh for X25519 {
    /// Derive the public key for a 32-byte private scalar
    fn scalar_base_mult(scalar: &[u8; X25519_SECRET_KEY_BYTES]) -> [u8; X25519_PUBLIC_KEY_BYTES] {
        let secret = StaticSecret::from(*scalar);
        PublicKey::from(&secret).to_bytes()
    }

    /// Diffie-Hellman of our scalar against their point
    fn scalar_mult(
        scalar: &[u8; X25519_SECRET_KEY_BYTES],
        point: &[u8; X25519_PUBLIC_KEY_BYTES],
    ) -> Zeroizing<[u8; DH_BYTES]> {
        let secret = StaticSecret::from(*scalar);
        let public = PublicKey::from(*point);

        let shared_secret = secret.diffie_hellman(&public);

        Zeroizing::new(shared_secret.to_bytes())
    }
}
