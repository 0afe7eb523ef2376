//! Combine-then-hash key derivation shared by encapsulation and decapsulation.
//!
//! `ss = Hash256(Label || latticeSS || dhShared || curveEphemeralPK || curvePK)`
//!
//! Both sides build the same [`KdfInput`], so the operand order cannot drift
//! between the two paths.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::hashing::Hash256;
use super::params::{DH_BYTES, KDF_INPUT_BYTES, LABEL_BYTES, MLKEM768_SS_BYTES};
use super::types::SharedSecret;

/// Key-derivation input, one named field per hashed component
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct KdfInput {
    label: [u8; LABEL_BYTES],
    lattice_shared: [u8; MLKEM768_SS_BYTES],
    dh_shared: [u8; DH_BYTES],
    curve_ephemeral: [u8; DH_BYTES],
    curve_public: [u8; DH_BYTES],
}

impl KdfInput {
    pub(crate) fn new(
        label: &[u8; LABEL_BYTES],
        lattice_shared: &[u8; MLKEM768_SS_BYTES],
        dh_shared: &[u8; DH_BYTES],
        curve_ephemeral: &[u8; DH_BYTES],
        curve_public: &[u8; DH_BYTES],
    ) -> Self {
        Self {
            label: *label,
            lattice_shared: *lattice_shared,
            dh_shared: *dh_shared,
            curve_ephemeral: *curve_ephemeral,
            curve_public: *curve_public,
        }
    }

    /// Fixed-width concatenation; the buffer is wiped when dropped
    fn encode(&self) -> Zeroizing<[u8; KDF_INPUT_BYTES]> {
        let mut buf = Zeroizing::new([0u8; KDF_INPUT_BYTES]);

        let (label, rest) = buf.split_at_mut(LABEL_BYTES);
        let (lattice_shared, rest) = rest.split_at_mut(MLKEM768_SS_BYTES);
        let (dh_shared, rest) = rest.split_at_mut(DH_BYTES);
        let (curve_ephemeral, curve_public) = rest.split_at_mut(DH_BYTES);

        label.copy_from_slice(&self.label);
        lattice_shared.copy_from_slice(&self.lattice_shared);
        dh_shared.copy_from_slice(&self.dh_shared);
        curve_ephemeral.copy_from_slice(&self.curve_ephemeral);
        curve_public.copy_from_slice(&self.curve_public);

        buf
    }

    pub(crate) fn derive<H: Hash256>(&self) -> SharedSecret {
        let encoded = self.encode();
        SharedSecret::from(H::hash(encoded.as_slice()))
    }
}
