/// Hybrid KEM combiner
/// Folds a lattice KEM and an ECDH exchange into one 32-byte shared secret
///
/// Security: IND-CCA2 as long as EITHER component remains unbroken
/// (combine-then-hash, `Hash256` modeled as a random oracle)
///
/// Every operation is a pure function of its inputs. Randomness is only ever
/// supplied by the caller, either as seed/coin bytes or as an RNG handle.
use std::marker::PhantomData;

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;
use zeroize::Zeroizing;

use super::curve::{Ecdh, X25519};
use super::hashing::{Hash256, Sha3_256};
use super::kdf::KdfInput;
use super::lattice::{LatticeError, LatticeKem, MlKem768Kem};
use super::params::{LABEL_BYTES, X25519_SECRET_KEY_BYTES, XWING_LABEL};
use super::types::{CombinedCiphertext, CombinedPublicKey, CombinedSecretKey, SharedSecret};

#[derive(Error, Debug)]
pub enum CombinerError {
    #[error("Invalid {context} length (expected {expected} bytes, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Lattice KEM error: {0}")]
    Lattice(#[from] LatticeError),
    #[error("Invalid hex encoding")]
    InvalidHex,
}

pub type Result<T> = std::result::Result<T, CombinerError>;

pub(crate) fn check_length(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        log::warn!("Rejected {}: expected {} bytes, got {}", context, expected, actual);
        return Err(CombinerError::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Binds the three collaborators and the domain-separation label
pub trait CombinerSuite {
    type Lattice: LatticeKem;
    type Curve: Ecdh;
    type Hash: Hash256;

    const LABEL: [u8; LABEL_BYTES];
}

/// ML-KEM-768 + X25519 + SHA3-256 under the X-Wing label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XWingSuite;

impl CombinerSuite for XWingSuite {
    type Lattice = MlKem768Kem;
    type Curve = X25519;
    type Hash = Sha3_256;

    const LABEL: [u8; LABEL_BYTES] = XWING_LABEL;
}

/// Stateless combiner over a [`CombinerSuite`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HybridCombiner<S: CombinerSuite> {
    _suite: PhantomData<fn() -> S>,
}

pub type XWing = HybridCombiner<XWingSuite>;
pub type XWingPublicKey = CombinedPublicKey<MlKem768Kem>;
pub type XWingSecretKey = CombinedSecretKey<MlKem768Kem>;
pub type XWingCiphertext = CombinedCiphertext<MlKem768Kem>;

type PublicKeyOf<S> = CombinedPublicKey<<S as CombinerSuite>::Lattice>;
type SecretKeyOf<S> = CombinedSecretKey<<S as CombinerSuite>::Lattice>;
type CiphertextOf<S> = CombinedCiphertext<<S as CombinerSuite>::Lattice>;

impl<S: CombinerSuite> HybridCombiner<S> {
    /// KeyGen seed: `LatticeSeed(2·SymBytes) || CurveSeed(32)`
    pub const SEED_LEN: usize =
        <S::Lattice as LatticeKem>::SEED_LEN + X25519_SECRET_KEY_BYTES;
    /// Encapsulation coins: `LatticeCoins(SymBytes) || CurveScalar(32)`
    pub const COINS_LEN: usize =
        <S::Lattice as LatticeKem>::COINS_LEN + X25519_SECRET_KEY_BYTES;

    /// Deterministic key generation
    ///
    /// The last 32 bytes of `seed` become the curve private scalar directly.
    ///
    /// # Returns
    /// `(pk, sk)` with `pk = LatticePK || CurvePK` and
    /// `sk = LatticeSK || CurveScalar || CurvePK`
    pub fn keypair_derand(seed: &[u8]) -> Result<(PublicKeyOf<S>, SecretKeyOf<S>)> {
        check_length("keygen seed", Self::SEED_LEN, seed.len())?;
        let (lattice_seed, curve_seed) = seed.split_at(<S::Lattice as LatticeKem>::SEED_LEN);

        let mut curve_scalar = Zeroizing::new([0u8; X25519_SECRET_KEY_BYTES]);
        curve_scalar.copy_from_slice(curve_seed);

        let (lattice_pk, lattice_sk) = S::Lattice::keypair_derand(lattice_seed)?;
        let curve_pk = S::Curve::scalar_base_mult(&curve_scalar);

        log::debug!(
            "Generated hybrid keypair (pk {} bytes, sk {} bytes)",
            PublicKeyOf::<S>::LEN,
            SecretKeyOf::<S>::LEN
        );

        Ok((
            CombinedPublicKey::from_parts(lattice_pk, curve_pk)?,
            CombinedSecretKey::from_parts(lattice_sk, curve_scalar, curve_pk)?,
        ))
    }

    /// Key generation with seed bytes drawn from a caller-supplied RNG
    pub fn keypair<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> Result<(PublicKeyOf<S>, SecretKeyOf<S>)> {
        let mut seed = Zeroizing::new(vec![0u8; Self::SEED_LEN]);
        rng.fill_bytes(&mut seed);
        Self::keypair_derand(&seed)
    }

    /// Deterministic encapsulation
    ///
    /// # Returns
    /// `(ct, ss)` with `ct = LatticeCT || CurveEphemeralPK` and
    /// `ss = Hash256(Label || latticeSS || dhShared || CurveEphemeralPK || pk.CurvePK)`
    pub fn encapsulate_derand(
        public_key: &PublicKeyOf<S>,
        coins: &[u8],
    ) -> Result<(CiphertextOf<S>, SharedSecret)> {
        check_length("encapsulation coins", Self::COINS_LEN, coins.len())?;
        let (lattice_coins, curve_coins) =
            coins.split_at(<S::Lattice as LatticeKem>::COINS_LEN);

        let mut ephemeral_scalar = Zeroizing::new([0u8; X25519_SECRET_KEY_BYTES]);
        ephemeral_scalar.copy_from_slice(curve_coins);

        let (lattice_ct, lattice_ss) =
            S::Lattice::encapsulate_derand(public_key.lattice_public_key(), lattice_coins)?;

        let curve_ephemeral = S::Curve::scalar_base_mult(&ephemeral_scalar);
        let dh_shared = S::Curve::scalar_mult(&ephemeral_scalar, public_key.curve_public_key());

        let shared_secret = KdfInput::new(
            &S::LABEL,
            &lattice_ss,
            &dh_shared,
            &curve_ephemeral,
            public_key.curve_public_key(),
        )
        .derive::<S::Hash>();

        log::debug!("Encapsulated hybrid ciphertext ({} bytes)", CiphertextOf::<S>::LEN);

        Ok((
            CombinedCiphertext::from_parts(lattice_ct, curve_ephemeral)?,
            shared_secret,
        ))
    }

    /// Encapsulation with coins drawn from a caller-supplied RNG
    pub fn encapsulate<R: RngCore + CryptoRng>(
        public_key: &PublicKeyOf<S>,
        rng: &mut R,
    ) -> Result<(CiphertextOf<S>, SharedSecret)> {
        let mut coins = Zeroizing::new(vec![0u8; Self::COINS_LEN]);
        rng.fill_bytes(&mut coins);
        Self::encapsulate_derand(public_key, &coins)
    }

    /// Decapsulation
    ///
    /// Never fails on a malformed ciphertext: the lattice KEM rejects
    /// implicitly and the curve operation is total, so a bad ciphertext just
    /// yields a stable, unrelated secret. Errors only come from the lattice
    /// collaborator refusing the secret key.
    pub fn decapsulate(
        secret_key: &SecretKeyOf<S>,
        ciphertext: &CiphertextOf<S>,
    ) -> Result<SharedSecret> {
        let lattice_ss = S::Lattice::decapsulate(
            secret_key.lattice_secret_key(),
            ciphertext.lattice_ciphertext(),
        )?;

        let dh_shared =
            S::Curve::scalar_mult(secret_key.curve_scalar(), ciphertext.curve_ephemeral_key());

        // Ephemeral key first, then the static key, exactly as in encapsulation
        let shared_secret = KdfInput::new(
            &S::LABEL,
            &lattice_ss,
            &dh_shared,
            ciphertext.curve_ephemeral_key(),
            secret_key.curve_public_key(),
        )
        .derive::<S::Hash>();

        log::debug!("Decapsulated hybrid ciphertext");

        Ok(shared_secret)
    }

    /// Byte-level encapsulation: validates and decodes `public_key` first
    pub fn encapsulate_bytes(public_key: &[u8], coins: &[u8]) -> Result<(Vec<u8>, SharedSecret)> {
        let public_key = PublicKeyOf::<S>::from_bytes(public_key)?;
        let (ciphertext, shared_secret) = Self::encapsulate_derand(&public_key, coins)?;
        Ok((ciphertext.to_bytes(), shared_secret))
    }

    /// Byte-level decapsulation: wrong-length inputs are reported before any
    /// primitive runs
    pub fn decapsulate_bytes(secret_key: &[u8], ciphertext: &[u8]) -> Result<SharedSecret> {
        let secret_key = SecretKeyOf::<S>::from_bytes(secret_key)?;
        let ciphertext = CiphertextOf::<S>::from_bytes(ciphertext)?;
        Self::decapsulate(&secret_key, &ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hashing::sha3_256;
    use crate::crypto::params::{
        MLKEM768_COINS_BYTES, MLKEM768_CT_BYTES, MLKEM768_DK_BYTES, MLKEM768_EK_BYTES,
        MLKEM768_SEED_BYTES,
        XWING_CIPHERTEXT_BYTES, XWING_COINS_BYTES, XWING_PUBLIC_KEY_BYTES,
        XWING_SECRET_KEY_BYTES, XWING_SEED_BYTES,
    };
    use hex_literal::hex;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;
    use sha3::{Digest, Sha3_512};

    // RFC 7748 §6.1
    const ALICE_SECRET: [u8; 32] =
        hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    const ALICE_PUBLIC: [u8; 32] =
        hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
    const BOB_SECRET: [u8; 32] =
        hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
    const BOB_PUBLIC: [u8; 32] =
        hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
    const X25519_SHARED: [u8; 32] =
        hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

    /// Same primitives as X-Wing, different label
    struct RelabeledSuite;

    impl CombinerSuite for RelabeledSuite {
        type Lattice = MlKem768Kem;
        type Curve = X25519;
        type Hash = Sha3_256;

        const LABEL: [u8; LABEL_BYTES] = *b"/^\\.//";
    }

    fn seed(lattice_fill: u8, curve: [u8; 32]) -> Vec<u8> {
        let mut seed = vec![lattice_fill; MLKEM768_SEED_BYTES];
        seed.extend_from_slice(&curve);
        seed
    }

    fn coins(lattice_fill: u8, curve: [u8; 32]) -> Vec<u8> {
        let mut coins = vec![lattice_fill; MLKEM768_COINS_BYTES];
        coins.extend_from_slice(&curve);
        coins
    }

    #[test]
    fn test_hybrid_kem_roundtrip() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

        for _ in 0..8 {
            let (pk, sk) = XWing::keypair(&mut rng).unwrap();
            let (ct, ss1) = XWing::encapsulate(&pk, &mut rng).unwrap();
            let ss2 = XWing::decapsulate(&sk, &ct).unwrap();

            // Both parties derive same secret
            assert_eq!(ss1, ss2);
        }
    }

    #[test]
    fn test_keypair_deterministic() {
        let seed = seed(1, [2u8; 32]);
        let (pk1, sk1) = XWing::keypair_derand(&seed).unwrap();
        let (pk2, sk2) = XWing::keypair_derand(&seed).unwrap();

        assert_eq!(pk1, pk2);
        assert_eq!(*sk1.to_bytes(), *sk2.to_bytes());
    }

    #[test]
    fn test_encapsulate_deterministic() {
        let (pk, _) = XWing::keypair_derand(&seed(1, [2u8; 32])).unwrap();
        let coins = coins(3, [4u8; 32]);

        let (ct1, ss1) = XWing::encapsulate_derand(&pk, &coins).unwrap();
        let (ct2, ss2) = XWing::encapsulate_derand(&pk, &coins).unwrap();
        assert_eq!(ct1, ct2);
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_layout_lengths() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..4 {
            let (pk, sk) = XWing::keypair(&mut rng).unwrap();
            let (ct, ss) = XWing::encapsulate(&pk, &mut rng).unwrap();

            assert_eq!(pk.to_bytes().len(), XWING_PUBLIC_KEY_BYTES);
            assert_eq!(sk.to_bytes().len(), XWING_SECRET_KEY_BYTES);
            assert_eq!(ct.to_bytes().len(), XWING_CIPHERTEXT_BYTES);
            assert_eq!(ss.as_bytes().len(), 32);
        }
        assert_eq!(XWing::SEED_LEN, XWING_SEED_BYTES);
        assert_eq!(XWing::COINS_LEN, XWING_COINS_BYTES);
    }

    #[test]
    fn test_secret_key_stores_curve_material() {
        let (pk, sk) = XWing::keypair_derand(&seed(0, ALICE_SECRET)).unwrap();

        let sk_bytes = sk.to_bytes();
        let tail = &sk_bytes[sk_bytes.len() - 64..];
        assert_eq!(&tail[..32], &ALICE_SECRET);
        assert_eq!(&tail[32..], pk.curve_public_key());
    }

    #[test]
    fn test_known_answer_curve_components() {
        // d = 0x11.., z = 0x22..; recipient's curve scalar is Alice's
        let mut keygen_seed = vec![0x11u8; 32];
        keygen_seed.extend_from_slice(&[0x22u8; 32]);
        keygen_seed.extend_from_slice(&ALICE_SECRET);

        let (pk, sk) = XWing::keypair_derand(&keygen_seed).unwrap();
        assert_eq!(pk.curve_public_key(), &ALICE_PUBLIC);
        assert_eq!(sk.curve_public_key(), &ALICE_PUBLIC);
        assert_eq!(&pk.to_bytes()[MLKEM768_EK_BYTES..], &ALICE_PUBLIC);

        // FIPS 203 KeyGen_internal: rho = G(d || k)[..32] closes ek, z closes dk
        let rho = Sha3_512::digest([&[0x11u8; 32][..], &[3u8][..]].concat());
        assert_eq!(&pk.lattice_public_key()[MLKEM768_EK_BYTES - 32..], &rho[..32]);
        assert_eq!(&sk.lattice_secret_key()[MLKEM768_DK_BYTES - 32..], &[0x22u8; 32]);

        // Sender's ephemeral scalar is Bob's
        let coins = coins(0x42, BOB_SECRET);
        let (ct, ss) = XWing::encapsulate_derand(&pk, &coins).unwrap();
        assert_eq!(ct.curve_ephemeral_key(), &BOB_PUBLIC);
        assert_eq!(&ct.to_bytes()[MLKEM768_CT_BYTES..], &BOB_PUBLIC);

        // FIPS 203 Encaps_internal: K = G(m || H(ek))[..32]
        let lattice_ss = Sha3_512::digest(
            [&[0x42u8; 32][..], &sha3_256(pk.lattice_public_key())[..]].concat(),
        );

        let mut kdf_input = Vec::new();
        kdf_input.extend_from_slice(b"\\.//^\\");
        kdf_input.extend_from_slice(&lattice_ss[..32]);
        kdf_input.extend_from_slice(&X25519_SHARED);
        kdf_input.extend_from_slice(&BOB_PUBLIC);
        kdf_input.extend_from_slice(&ALICE_PUBLIC);
        assert_eq!(kdf_input.len(), 134);
        assert_eq!(ss.as_bytes(), &sha3_256(&kdf_input));

        assert_eq!(XWing::decapsulate(&sk, &ct).unwrap(), ss);
    }

    #[test]
    fn test_bit_flip_changes_secret() {
        let (pk, sk) = XWing::keypair_derand(&seed(9, [10u8; 32])).unwrap();
        let (ct, ss) = XWing::encapsulate_derand(&pk, &coins(11, [12u8; 32])).unwrap();
        let ct_bytes = ct.to_bytes();

        let lattice_bits = (0..MLKEM768_CT_BYTES * 8).step_by(61);
        let curve_bits = (MLKEM768_CT_BYTES * 8..XWING_CIPHERTEXT_BYTES * 8).step_by(7);

        for bit in lattice_bits.chain(curve_bits) {
            let mut tampered = ct_bytes.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);

            // No explicit error, only a different secret
            let recovered = XWing::decapsulate_bytes(&sk.to_bytes(), &tampered).unwrap();
            assert_ne!(recovered, ss, "bit {} did not affect the secret", bit);
        }
    }

    #[test]
    fn test_top_curve_bit_flip_changes_secret() {
        // X25519 ignores bit 255 of u, but the raw ephemeral key is hashed
        let (pk, sk) = XWing::keypair_derand(&seed(9, [10u8; 32])).unwrap();
        let (ct, ss) = XWing::encapsulate_derand(&pk, &coins(11, [12u8; 32])).unwrap();

        let mut tampered = ct.to_bytes();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x80;

        let recovered = XWing::decapsulate_bytes(&sk.to_bytes(), &tampered).unwrap();
        assert_ne!(recovered, ss);
    }

    #[test]
    fn test_malformed_ciphertext_is_stable() {
        let (_, sk) = XWing::keypair_derand(&seed(5, [6u8; 32])).unwrap();
        let garbage = XWingCiphertext::from_bytes(&[0x5au8; XWING_CIPHERTEXT_BYTES]).unwrap();

        let ss1 = XWing::decapsulate(&sk, &garbage).unwrap();
        let ss2 = XWing::decapsulate(&sk, &garbage).unwrap();
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_domain_separation() {
        let seed = seed(1, [2u8; 32]);
        let coins = coins(3, [4u8; 32]);

        let (pk, sk) = XWing::keypair_derand(&seed).unwrap();
        let (ct, ss) = XWing::encapsulate_derand(&pk, &coins).unwrap();

        let (other_pk, other_sk) = HybridCombiner::<RelabeledSuite>::keypair_derand(&seed).unwrap();
        let (other_ct, other_ss) =
            HybridCombiner::<RelabeledSuite>::encapsulate_derand(&other_pk, &coins).unwrap();

        // Same keys and ciphertext, different label, different secret
        assert_eq!(pk, other_pk);
        assert_eq!(ct, other_ct);
        assert_ne!(ss, other_ss);

        assert_eq!(XWing::decapsulate(&sk, &ct).unwrap(), ss);
        assert_eq!(
            HybridCombiner::<RelabeledSuite>::decapsulate(&other_sk, &other_ct).unwrap(),
            other_ss
        );
    }

    #[test]
    fn test_wrong_secret_key_fails() {
        let (pk1, _) = XWing::keypair_derand(&seed(1, [1u8; 32])).unwrap();
        let (_, sk2) = XWing::keypair_derand(&seed(2, [2u8; 32])).unwrap();

        let (ct, ss1) = XWing::encapsulate_derand(&pk1, &coins(3, [3u8; 32])).unwrap();
        let ss2 = XWing::decapsulate(&sk2, &ct).unwrap();

        // Secrets should NOT match (different keys)
        assert_ne!(ss1, ss2);
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        let err = XWing::keypair_derand(&[0u8; XWING_SEED_BYTES - 1]).unwrap_err();
        assert!(matches!(
            err,
            CombinerError::InvalidLength { expected: 96, actual: 95, .. }
        ));

        let (pk, sk) = XWing::keypair_derand(&seed(1, [2u8; 32])).unwrap();
        let err = XWing::encapsulate_derand(&pk, &[0u8; XWING_COINS_BYTES + 1]).unwrap_err();
        assert!(matches!(
            err,
            CombinerError::InvalidLength { expected: 64, actual: 65, .. }
        ));

        let err = XWing::decapsulate_bytes(&sk.to_bytes(), &[0u8; XWING_CIPHERTEXT_BYTES - 1])
            .unwrap_err();
        assert!(matches!(
            err,
            CombinerError::InvalidLength { expected: 1120, actual: 1119, .. }
        ));

        assert!(XWing::encapsulate_bytes(&pk.to_bytes()[1..], &[0u8; 64]).is_err());
    }

    #[test]
    fn test_lattice_errors_propagate() {
        let (pk, sk) = XWing::keypair_derand(&seed(1, [2u8; 32])).unwrap();

        let mut bad_pk = pk.to_bytes();
        bad_pk[0] = 0xff;
        bad_pk[1] = 0xff;
        let err = XWing::encapsulate_bytes(&bad_pk, &[0u8; 64]).unwrap_err();
        assert!(matches!(
            err,
            CombinerError::Lattice(LatticeError::InvalidPublicKey)
        ));

        let (ct, _) = XWing::encapsulate_derand(&pk, &[0u8; 64]).unwrap();
        let mut bad_sk = sk.to_bytes().to_vec();
        bad_sk[1500] ^= 0x01;
        let err = XWing::decapsulate_bytes(&bad_sk, &ct.to_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CombinerError::Lattice(LatticeError::InvalidSecretKey)
        ));
    }

    /// Delegates to ML-KEM-768 but returns short secret keys and ciphertexts
    struct TruncatingKem;

    impl LatticeKem for TruncatingKem {
        const SEED_LEN: usize = MlKem768Kem::SEED_LEN;
        const COINS_LEN: usize = MlKem768Kem::COINS_LEN;
        const PUBLIC_KEY_LEN: usize = MlKem768Kem::PUBLIC_KEY_LEN;
        const SECRET_KEY_LEN: usize = MlKem768Kem::SECRET_KEY_LEN;
        const CIPHERTEXT_LEN: usize = MlKem768Kem::CIPHERTEXT_LEN;

        fn keypair_derand(
            seed: &[u8],
        ) -> std::result::Result<(Vec<u8>, Zeroizing<Vec<u8>>), LatticeError> {
            let (pk, mut sk) = MlKem768Kem::keypair_derand(seed)?;
            sk.truncate(Self::SECRET_KEY_LEN - 1);
            Ok((pk, sk))
        }

        fn encapsulate_derand(
            public_key: &[u8],
            coins: &[u8],
        ) -> std::result::Result<(Vec<u8>, Zeroizing<[u8; 32]>), LatticeError> {
            let (mut ct, ss) = MlKem768Kem::encapsulate_derand(public_key, coins)?;
            ct.truncate(Self::CIPHERTEXT_LEN - 1);
            Ok((ct, ss))
        }

        fn decapsulate(
            secret_key: &[u8],
            ciphertext: &[u8],
        ) -> std::result::Result<Zeroizing<[u8; 32]>, LatticeError> {
            MlKem768Kem::decapsulate(secret_key, ciphertext)
        }

        fn public_key_from_secret_key(
            secret_key: &[u8],
        ) -> std::result::Result<Vec<u8>, LatticeError> {
            MlKem768Kem::public_key_from_secret_key(secret_key)
        }
    }

    struct TruncatingSuite;

    impl CombinerSuite for TruncatingSuite {
        type Lattice = TruncatingKem;
        type Curve = X25519;
        type Hash = Sha3_256;

        const LABEL: [u8; LABEL_BYTES] = XWING_LABEL;
    }

    #[test]
    fn test_rejects_misbehaving_lattice_output() {
        let err = HybridCombiner::<TruncatingSuite>::keypair_derand(&seed(1, [2u8; 32]))
            .unwrap_err();
        assert!(matches!(
            err,
            CombinerError::InvalidLength {
                context: "CombinedSecretKey.lattice",
                expected: 2400,
                actual: 2399,
            }
        ));

        let (pk, _) = XWing::keypair_derand(&seed(1, [2u8; 32])).unwrap();
        let pk = CombinedPublicKey::<TruncatingKem>::from_bytes(&pk.to_bytes()).unwrap();
        let err =
            HybridCombiner::<TruncatingSuite>::encapsulate_derand(&pk, &coins(3, [4u8; 32]))
                .unwrap_err();
        assert!(matches!(
            err,
            CombinerError::InvalidLength {
                context: "CombinedCiphertext.lattice",
                expected: 1088,
                actual: 1087,
            }
        ));
    }

    #[test]
    fn test_bytes_api_matches_typed_api() {
        let (pk, sk) = XWing::keypair_derand(&seed(8, [9u8; 32])).unwrap();
        let coins = coins(10, [11u8; 32]);

        let (ct_bytes, ss1) = XWing::encapsulate_bytes(&pk.to_bytes(), &coins).unwrap();
        let (ct, ss2) = XWing::encapsulate_derand(&pk, &coins).unwrap();
        assert_eq!(ct_bytes, ct.to_bytes());
        assert_eq!(ss1, ss2);

        let ss3 = XWing::decapsulate_bytes(&sk.to_bytes(), &ct_bytes).unwrap();
        assert_eq!(ss1, ss3);
    }

    #[test]
    fn test_public_key_from_secret_key() {
        let (pk, sk) = XWing::keypair_derand(&seed(4, [5u8; 32])).unwrap();
        assert_eq!(sk.public_key().unwrap(), pk);

        let restored = XWingSecretKey::from_bytes(&sk.to_bytes()).unwrap();
        assert_eq!(restored.public_key().unwrap(), pk);
    }

    #[test]
    fn test_serialized_keys_still_decapsulate() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let (pk, sk) = XWing::keypair(&mut rng).unwrap();

        let pk = XWingPublicKey::from_hex(&pk.to_hex()).unwrap();
        let sk = XWingSecretKey::from_bytes(&sk.to_bytes()).unwrap();

        let (ct, ss1) = XWing::encapsulate(&pk, &mut rng).unwrap();
        let ct = XWingCiphertext::from_bytes(&ct.to_bytes()).unwrap();
        let ss2 = XWing::decapsulate(&sk, &ct).unwrap();
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XWingPublicKey>();
        assert_send_sync::<XWingSecretKey>();
        assert_send_sync::<XWingCiphertext>();
        assert_send_sync::<SharedSecret>();
        assert_send_sync::<XWing>();
    }
}
