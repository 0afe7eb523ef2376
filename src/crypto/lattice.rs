/// Lattice KEM collaborator: ML-KEM-768 (NIST FIPS 203)
///
/// Exposes the derandomized ("internal") FIPS 203 entry points so the combiner
/// can drive key generation and encapsulation from caller-supplied bytes.
///
/// Key sizes (ML-KEM-768):
/// - Encapsulation key (public):  1184 bytes
/// - Decapsulation key (secret):  2400 bytes
/// - Ciphertext:                  1088 bytes
/// - Shared secret:               32 bytes
use ml_kem::kem::{Decapsulate, DecapsulationKey, EncapsulationKey};
use ml_kem::{
    Ciphertext, EncapsulateDeterministic, Encoded, EncodedSizeUser, KemCore, MlKem768,
    MlKem768Params, B32,
};
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

use super::constant_time;
use super::hashing::sha3_256;
use super::params::{
    MLKEM768_COINS_BYTES, MLKEM768_CT_BYTES, MLKEM768_DK_BYTES, MLKEM768_EK_BYTES,
    MLKEM768_SEED_BYTES, SHARED_SECRET_BYTES, SYM_BYTES,
};

/// ML-KEM modulus
const MLKEM_Q: u16 = 3329;
/// `dk_PKE` prefix of the decapsulation key (k = 3 polynomials of 384 bytes)
const MLKEM768_DK_PKE_BYTES: usize = 1152;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("Invalid key generation seed length")]
    InvalidSeedLength,
    #[error("Invalid encapsulation coins length")]
    InvalidCoinsLength,
    #[error("Invalid public key length")]
    InvalidPublicKeyLength,
    #[error("Invalid secret key length")]
    InvalidSecretKeyLength,
    #[error("Invalid ciphertext length")]
    InvalidCiphertextLength,
    #[error("Public key failed the ML-KEM modulus check")]
    InvalidPublicKey,
    #[error("Secret key failed the ML-KEM hash check")]
    InvalidSecretKey,
    #[error("ML-KEM encapsulation failed")]
    EncapsulateFailed,
    #[error("ML-KEM decapsulation failed")]
    DecapsulateFailed,
}

pub type Result<T> = std::result::Result<T, LatticeError>;

/// Capability surface the combiner needs from a lattice-based KEM.
///
/// All buffers are opaque bytes of the declared lengths. `decapsulate` must use
/// implicit rejection: a malformed ciphertext yields a pseudorandom but
/// deterministic secret, never an error.
pub trait LatticeKem {
    const SEED_LEN: usize;
    const COINS_LEN: usize;
    const PUBLIC_KEY_LEN: usize;
    const SECRET_KEY_LEN: usize;
    const CIPHERTEXT_LEN: usize;

    fn keypair_derand(seed: &[u8]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    fn encapsulate_derand(
        public_key: &[u8],
        coins: &[u8],
    ) -> Result<(Vec<u8>, Zeroizing<[u8; SHARED_SECRET_BYTES]>)>;

    fn decapsulate(
        secret_key: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<[u8; SHARED_SECRET_BYTES]>>;

    fn public_key_from_secret_key(secret_key: &[u8]) -> Result<Vec<u8>>;
}

/// ML-KEM-768 backed by the RustCrypto `ml-kem` crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MlKem768Kem;

impl MlKem768Kem {
    /// FIPS 203 §7.2 encapsulation key check: every 12-bit coefficient of
    /// `t_hat` must already be reduced mod q.
    pub fn check_public_key(public_key: &[u8]) -> Result<()> {
        if public_key.len() != MLKEM768_EK_BYTES {
            return Err(LatticeError::InvalidPublicKeyLength);
        }

        let t_hat = &public_key[..MLKEM768_EK_BYTES - SYM_BYTES];
        for chunk in t_hat.chunks_exact(3) {
            let c0 = u16::from(chunk[0]) | (u16::from(chunk[1] & 0x0f) << 8);
            let c1 = u16::from(chunk[1] >> 4) | (u16::from(chunk[2]) << 4);
            if c0 >= MLKEM_Q || c1 >= MLKEM_Q {
                return Err(LatticeError::InvalidPublicKey);
            }
        }

        Ok(())
    }

    /// FIPS 203 §7.3 decapsulation key check: the embedded `H(ek)` must match
    /// the embedded encapsulation key.
    pub fn check_secret_key(secret_key: &[u8]) -> Result<()> {
        if secret_key.len() != MLKEM768_DK_BYTES {
            return Err(LatticeError::InvalidSecretKeyLength);
        }

        let (ek, h) = Self::embedded_public_key(secret_key);
        if !constant_time::eq_slices(&sha3_256(ek), h) {
            return Err(LatticeError::InvalidSecretKey);
        }

        Ok(())
    }

    /// Splits `dk_PKE || ek || H(ek) || z` into `(ek, H(ek))`. Caller checks the length.
    fn embedded_public_key(secret_key: &[u8]) -> (&[u8], &[u8]) {
        let rest = &secret_key[MLKEM768_DK_PKE_BYTES..];
        let (ek, rest) = rest.split_at(MLKEM768_EK_BYTES);
        (ek, &rest[..SYM_BYTES])
    }
}

impl LatticeKem for MlKem768Kem {
    const SEED_LEN: usize = MLKEM768_SEED_BYTES;
    const COINS_LEN: usize = MLKEM768_COINS_BYTES;
    const PUBLIC_KEY_LEN: usize = MLKEM768_EK_BYTES;
    const SECRET_KEY_LEN: usize = MLKEM768_DK_BYTES;
    const CIPHERTEXT_LEN: usize = MLKEM768_CT_BYTES;

    /// Seed layout: `d (32) || z (32)`
    fn keypair_derand(seed: &[u8]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        if seed.len() != Self::SEED_LEN {
            return Err(LatticeError::InvalidSeedLength);
        }

        let (d, z) = seed.split_at(SYM_BYTES);
        let mut d = B32::try_from(d).map_err(|_| LatticeError::InvalidSeedLength)?;
        let mut z = B32::try_from(z).map_err(|_| LatticeError::InvalidSeedLength)?;

        let (dk, ek) = MlKem768::generate_deterministic(&d, &z);
        d.as_mut_slice().zeroize();
        z.as_mut_slice().zeroize();

        let mut dk_bytes = dk.as_bytes();
        let secret_key = Zeroizing::new(dk_bytes.to_vec());
        dk_bytes.as_mut_slice().zeroize();

        Ok((ek.as_bytes().to_vec(), secret_key))
    }

    /// Coins layout: `m (32)`
    fn encapsulate_derand(
        public_key: &[u8],
        coins: &[u8],
    ) -> Result<(Vec<u8>, Zeroizing<[u8; SHARED_SECRET_BYTES]>)> {
        Self::check_public_key(public_key)?;
        if coins.len() != Self::COINS_LEN {
            return Err(LatticeError::InvalidCoinsLength);
        }

        let ek_encoded = Encoded::<EncapsulationKey<MlKem768Params>>::try_from(public_key)
            .map_err(|_| LatticeError::InvalidPublicKeyLength)?;
        let ek = EncapsulationKey::<MlKem768Params>::from_bytes(&ek_encoded);

        let mut m = B32::try_from(coins).map_err(|_| LatticeError::InvalidCoinsLength)?;
        let encapsulated = ek.encapsulate_deterministic(&m);
        m.as_mut_slice().zeroize();

        let (ct, mut ss) = encapsulated.map_err(|_| LatticeError::EncapsulateFailed)?;
        let mut shared = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
        shared.copy_from_slice(ss.as_slice());
        ss.as_mut_slice().zeroize();

        Ok((ct.as_slice().to_vec(), shared))
    }

    fn decapsulate(
        secret_key: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<[u8; SHARED_SECRET_BYTES]>> {
        Self::check_secret_key(secret_key)?;
        if ciphertext.len() != Self::CIPHERTEXT_LEN {
            return Err(LatticeError::InvalidCiphertextLength);
        }

        let mut dk_encoded = Encoded::<DecapsulationKey<MlKem768Params>>::try_from(secret_key)
            .map_err(|_| LatticeError::InvalidSecretKeyLength)?;
        let dk = DecapsulationKey::<MlKem768Params>::from_bytes(&dk_encoded);
        dk_encoded.as_mut_slice().zeroize();

        let ct = Ciphertext::<MlKem768>::try_from(ciphertext)
            .map_err(|_| LatticeError::InvalidCiphertextLength)?;

        // Implicit rejection happens inside: a bad ciphertext still returns Ok.
        let mut ss = dk
            .decapsulate(&ct)
            .map_err(|_| LatticeError::DecapsulateFailed)?;
        let mut shared = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
        shared.copy_from_slice(ss.as_slice());
        ss.as_mut_slice().zeroize();

        Ok(shared)
    }

    fn public_key_from_secret_key(secret_key: &[u8]) -> Result<Vec<u8>> {
        Self::check_secret_key(secret_key)?;
        let (ek, _) = Self::embedded_public_key(secret_key);
        Ok(ek.to_vec())
    }
}
