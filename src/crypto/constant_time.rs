//! Constant-time comparison for secret-derived values (shared secrets, key hashes).

use subtle::ConstantTimeEq;

/// Constant-time equality for 32-byte arrays.
#[inline(always)]
pub fn eq_32(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time equality for slices. Length is not secret.
#[inline(always)]
pub fn eq_slices(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
