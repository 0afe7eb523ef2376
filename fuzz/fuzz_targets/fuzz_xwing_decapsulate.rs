#![no_main]
use libfuzzer_sys::fuzz_target;
use xwing_combiner::{
    XWing, XWingSecretKey, XWING_CIPHERTEXT_BYTES, XWING_SECRET_KEY_BYTES, XWING_SEED_BYTES,
};

fuzz_target!(|data: &[u8]| {
    // Arbitrary byte slices as key/ciphertext must not panic
    let _ = XWing::decapsulate_bytes(data, data);
    let _ = XWing::encapsulate_bytes(data, data);
    let _ = XWingSecretKey::from_bytes(data);

    // Arbitrary ciphertext against a fixed, valid secret key must never error
    if data.len() >= XWING_CIPHERTEXT_BYTES {
        let (_, sk) = XWing::keypair_derand(&[0x24u8; XWING_SEED_BYTES])
            .expect("keygen over a fixed seed");
        let ct = &data[..XWING_CIPHERTEXT_BYTES];
        let first = XWing::decapsulate_bytes(&sk.to_bytes(), ct)
            .expect("implicit rejection never errors");
        let second = XWing::decapsulate_bytes(&sk.to_bytes(), ct)
            .expect("implicit rejection never errors");
        assert_eq!(first, second, "Decapsulation is not deterministic");
    }

    // Arbitrary secret-key bytes: either rejected or usable, never a panic
    if data.len() >= XWING_SECRET_KEY_BYTES + XWING_CIPHERTEXT_BYTES {
        let (sk, ct) = data.split_at(XWING_SECRET_KEY_BYTES);
        let _ = XWing::decapsulate_bytes(sk, &ct[..XWING_CIPHERTEXT_BYTES]);
    }
});
