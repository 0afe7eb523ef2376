/// Combined key, ciphertext, and shared-secret types
///
/// Byte layouts (fixed offsets, no length prefixes):
/// - public key:  `LatticePK || CurvePK(32)`
/// - secret key:  `LatticeSK || CurveScalar(32) || CurvePK(32)`
/// - ciphertext:  `LatticeCT || CurveEphemeralPK(32)`
///
/// Each type keeps one named field per sub-buffer; `from_bytes` is the only
/// way to decode and it validates the total length.
use std::fmt;
use std::marker::PhantomData;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::combiner::{check_length, CombinerError, Result};
use super::constant_time;
use super::lattice::LatticeKem;
use super::params::{SHARED_SECRET_BYTES, X25519_PUBLIC_KEY_BYTES, X25519_SECRET_KEY_BYTES};

/// Copy a length-checked 32-byte sub-slice
fn curve_bytes(context: &'static str, bytes: &[u8]) -> Result<[u8; 32]> {
    <[u8; 32]>::try_from(bytes).map_err(|_| CombinerError::InvalidLength {
        context,
        expected: 32,
        actual: bytes.len(),
    })
}

fn decode_hex(hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str).map_err(|_| CombinerError::InvalidHex)
}

/// Hex string for human-readable formats, raw bytes otherwise
fn serialize_layout<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&hex::encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

fn deserialize_layout<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<u8>, D::Error> {
    if deserializer.is_human_readable() {
        let hex_str = String::deserialize(deserializer)?;
        hex::decode(hex_str).map_err(D::Error::custom)
    } else {
        Vec::<u8>::deserialize(deserializer)
    }
}

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// Combined public key: `LatticePK || CurvePK`
pub struct CombinedPublicKey<L: LatticeKem> {
    lattice: Vec<u8>,
    curve: [u8; X25519_PUBLIC_KEY_BYTES],
    _lattice: PhantomData<fn() -> L>,
}

impl<L: LatticeKem> CombinedPublicKey<L> {
    /// Serialized length: `LatticePKLen + 32`
    pub const LEN: usize = L::PUBLIC_KEY_LEN + X25519_PUBLIC_KEY_BYTES;

    pub(crate) fn from_parts(
        lattice: Vec<u8>,
        curve: [u8; X25519_PUBLIC_KEY_BYTES],
    ) -> Result<Self> {
        check_length("CombinedPublicKey.lattice", L::PUBLIC_KEY_LEN, lattice.len())?;
        Ok(Self {
            lattice,
            curve,
            _lattice: PhantomData,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length("CombinedPublicKey", Self::LEN, bytes.len())?;
        let (lattice, curve) = bytes.split_at(L::PUBLIC_KEY_LEN);
        Self::from_parts(
            lattice.to_vec(),
            curve_bytes("CombinedPublicKey.curve", curve)?,
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(Self::LEN);
        result.extend_from_slice(&self.lattice);
        result.extend_from_slice(&self.curve);
        result
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(hex_str)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn lattice_public_key(&self) -> &[u8] {
        &self.lattice
    }

    pub fn curve_public_key(&self) -> &[u8; X25519_PUBLIC_KEY_BYTES] {
        &self.curve
    }
}

impl<L: LatticeKem> Clone for CombinedPublicKey<L> {
    fn clone(&self) -> Self {
        Self {
            lattice: self.lattice.clone(),
            curve: self.curve,
            _lattice: PhantomData,
        }
    }
}

impl<L: LatticeKem> PartialEq for CombinedPublicKey<L> {
    fn eq(&self, other: &Self) -> bool {
        self.lattice == other.lattice && self.curve == other.curve
    }
}

impl<L: LatticeKem> Eq for CombinedPublicKey<L> {}

impl<L: LatticeKem> fmt::Debug for CombinedPublicKey<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedPublicKey")
            .field("lattice_len", &self.lattice.len())
            .field("curve", &hex::encode(self.curve))
            .finish()
    }
}

impl<L: LatticeKem> Serialize for CombinedPublicKey<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_layout(&self.to_bytes(), serializer)
    }
}

impl<'de, L: LatticeKem> Deserialize<'de> for CombinedPublicKey<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bytes = deserialize_layout(deserializer)?;
        Self::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Secret key
// ---------------------------------------------------------------------------

/// Combined secret key: `LatticeSK || CurveScalar || CurvePK`
///
/// `CurvePK` is redundant with `CurveScalar`; it is kept so decapsulation
/// does not pay for a base-point multiplication.
///
/// Deliberately not `Serialize`: export goes through [`Self::to_bytes`].
pub struct CombinedSecretKey<L: LatticeKem> {
    lattice: Zeroizing<Vec<u8>>,
    curve_scalar: Zeroizing<[u8; X25519_SECRET_KEY_BYTES]>,
    curve_public: [u8; X25519_PUBLIC_KEY_BYTES],
    _lattice: PhantomData<fn() -> L>,
}

impl<L: LatticeKem> CombinedSecretKey<L> {
    /// Serialized length: `LatticeSKLen + 64`
    pub const LEN: usize = L::SECRET_KEY_LEN + X25519_SECRET_KEY_BYTES + X25519_PUBLIC_KEY_BYTES;

    pub(crate) fn from_parts(
        lattice: Zeroizing<Vec<u8>>,
        curve_scalar: Zeroizing<[u8; X25519_SECRET_KEY_BYTES]>,
        curve_public: [u8; X25519_PUBLIC_KEY_BYTES],
    ) -> Result<Self> {
        check_length("CombinedSecretKey.lattice", L::SECRET_KEY_LEN, lattice.len())?;
        Ok(Self {
            lattice,
            curve_scalar,
            curve_public,
            _lattice: PhantomData,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length("CombinedSecretKey", Self::LEN, bytes.len())?;
        let (lattice, rest) = bytes.split_at(L::SECRET_KEY_LEN);
        let (scalar, public) = rest.split_at(X25519_SECRET_KEY_BYTES);

        let mut curve_scalar = Zeroizing::new([0u8; X25519_SECRET_KEY_BYTES]);
        curve_scalar.copy_from_slice(scalar);

        Self::from_parts(
            Zeroizing::new(lattice.to_vec()),
            curve_scalar,
            curve_bytes("CombinedSecretKey.curve_public", public)?,
        )
    }

    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut result = Zeroizing::new(Vec::with_capacity(Self::LEN));
        result.extend_from_slice(&self.lattice);
        result.extend_from_slice(self.curve_scalar.as_slice());
        result.extend_from_slice(&self.curve_public);
        result
    }

    pub fn lattice_secret_key(&self) -> &[u8] {
        &self.lattice
    }

    pub fn curve_scalar(&self) -> &[u8; X25519_SECRET_KEY_BYTES] {
        &self.curve_scalar
    }

    pub fn curve_public_key(&self) -> &[u8; X25519_PUBLIC_KEY_BYTES] {
        &self.curve_public
    }

    /// Rebuild the matching public key (lattice part is embedded in `LatticeSK`)
    pub fn public_key(&self) -> Result<CombinedPublicKey<L>> {
        let lattice = L::public_key_from_secret_key(&self.lattice)?;
        CombinedPublicKey::from_parts(lattice, self.curve_public)
    }
}

impl<L: LatticeKem> Clone for CombinedSecretKey<L> {
    fn clone(&self) -> Self {
        Self {
            lattice: self.lattice.clone(),
            curve_scalar: self.curve_scalar.clone(),
            curve_public: self.curve_public,
            _lattice: PhantomData,
        }
    }
}

impl<L: LatticeKem> fmt::Debug for CombinedSecretKey<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedSecretKey")
            .field("lattice", &"[REDACTED]")
            .field("curve_scalar", &"[REDACTED]")
            .field("curve_public", &hex::encode(self.curve_public))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Ciphertext
// ---------------------------------------------------------------------------

/// Combined ciphertext: `LatticeCT || CurveEphemeralPK`
pub struct CombinedCiphertext<L: LatticeKem> {
    lattice: Vec<u8>,
    curve_ephemeral: [u8; X25519_PUBLIC_KEY_BYTES],
    _lattice: PhantomData<fn() -> L>,
}

impl<L: LatticeKem> CombinedCiphertext<L> {
    /// Serialized length: `LatticeCTLen + 32`
    pub const LEN: usize = L::CIPHERTEXT_LEN + X25519_PUBLIC_KEY_BYTES;

    pub(crate) fn from_parts(
        lattice: Vec<u8>,
        curve_ephemeral: [u8; X25519_PUBLIC_KEY_BYTES],
    ) -> Result<Self> {
        check_length("CombinedCiphertext.lattice", L::CIPHERTEXT_LEN, lattice.len())?;
        Ok(Self {
            lattice,
            curve_ephemeral,
            _lattice: PhantomData,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length("CombinedCiphertext", Self::LEN, bytes.len())?;
        let (lattice, curve_ephemeral) = bytes.split_at(L::CIPHERTEXT_LEN);
        Self::from_parts(
            lattice.to_vec(),
            curve_bytes("CombinedCiphertext.curve_ephemeral", curve_ephemeral)?,
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(Self::LEN);
        result.extend_from_slice(&self.lattice);
        result.extend_from_slice(&self.curve_ephemeral);
        result
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(hex_str)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn lattice_ciphertext(&self) -> &[u8] {
        &self.lattice
    }

    pub fn curve_ephemeral_key(&self) -> &[u8; X25519_PUBLIC_KEY_BYTES] {
        &self.curve_ephemeral
    }
}

impl<L: LatticeKem> Clone for CombinedCiphertext<L> {
    fn clone(&self) -> Self {
        Self {
            lattice: self.lattice.clone(),
            curve_ephemeral: self.curve_ephemeral,
            _lattice: PhantomData,
        }
    }
}

impl<L: LatticeKem> PartialEq for CombinedCiphertext<L> {
    fn eq(&self, other: &Self) -> bool {
        self.lattice == other.lattice && self.curve_ephemeral == other.curve_ephemeral
    }
}

impl<L: LatticeKem> Eq for CombinedCiphertext<L> {}

impl<L: LatticeKem> fmt::Debug for CombinedCiphertext<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedCiphertext")
            .field("lattice_len", &self.lattice.len())
            .field("curve_ephemeral", &hex::encode(self.curve_ephemeral))
            .finish()
    }
}

impl<L: LatticeKem> Serialize for CombinedCiphertext<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_layout(&self.to_bytes(), serializer)
    }
}

impl<'de, L: LatticeKem> Deserialize<'de> for CombinedCiphertext<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bytes = deserialize_layout(deserializer)?;
        Self::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Shared secret
// ---------------------------------------------------------------------------

/// 32-byte combined shared secret. Wiped on drop, compared in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_BYTES]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        &self.0
    }
}

impl From<[u8; SHARED_SECRET_BYTES]> for SharedSecret {
    fn from(bytes: [u8; SHARED_SECRET_BYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        constant_time::eq_32(&self.0, &other.0)
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
