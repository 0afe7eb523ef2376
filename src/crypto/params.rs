/// X-Wing parameter constants
/// ML-KEM-768 (NIST FIPS 203) + X25519 (RFC 7748) + SHA3-256 (FIPS 202)

/// Symmetric-domain size used by the lattice primitive for seeds and coins
pub const SYM_BYTES: usize = 32;

/// ML-KEM-768 parameter constants
pub const MLKEM768_EK_BYTES: usize = 1184;
pub const MLKEM768_DK_BYTES: usize = 2400;
pub const MLKEM768_CT_BYTES: usize = 1088;
pub const MLKEM768_SS_BYTES: usize = 32;
/// `d || z` consumed by `ML-KEM.KeyGen_internal`
pub const MLKEM768_SEED_BYTES: usize = 2 * SYM_BYTES;
/// `m` consumed by `ML-KEM.Encaps_internal`
pub const MLKEM768_COINS_BYTES: usize = SYM_BYTES;

/// X25519 parameter constants
pub const X25519_PUBLIC_KEY_BYTES: usize = 32;
pub const X25519_SECRET_KEY_BYTES: usize = 32;
pub const DH_BYTES: usize = 32;

/// Every shared secret in this crate, lattice or combined, is 32 bytes
pub const SHARED_SECRET_BYTES: usize = 32;

/// Domain-separation label prefixed to every key-derivation input: `\.//^\`
pub const XWING_LABEL: [u8; LABEL_BYTES] = *b"\\.//^\\";
pub const LABEL_BYTES: usize = 6;

/// `Label || latticeSS || dhShared || curveEphemeralPK || curvePK`
pub const KDF_INPUT_BYTES: usize = LABEL_BYTES + MLKEM768_SS_BYTES + 3 * DH_BYTES;

/// Combined X-Wing sizes
pub const XWING_PUBLIC_KEY_BYTES: usize = MLKEM768_EK_BYTES + X25519_PUBLIC_KEY_BYTES;
pub const XWING_SECRET_KEY_BYTES: usize =
    MLKEM768_DK_BYTES + X25519_SECRET_KEY_BYTES + X25519_PUBLIC_KEY_BYTES;
pub const XWING_CIPHERTEXT_BYTES: usize = MLKEM768_CT_BYTES + X25519_PUBLIC_KEY_BYTES;
pub const XWING_SEED_BYTES: usize = MLKEM768_SEED_BYTES + X25519_SECRET_KEY_BYTES;
pub const XWING_COINS_BYTES: usize = MLKEM768_COINS_BYTES + X25519_SECRET_KEY_BYTES;
