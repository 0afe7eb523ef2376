#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xwing_combiner::{XWing, XWING_COINS_BYTES, XWING_SEED_BYTES};

#[derive(Arbitrary, Debug)]
struct RoundtripInput {
    seed: [u8; XWING_SEED_BYTES],
    coins: [u8; XWING_COINS_BYTES],
    /// Ciphertext bit to flip after the honest round-trip
    flip_bit: u16,
}

fuzz_target!(|input: RoundtripInput| {
    // Every seed is valid: keygen must not fail
    let (pk, sk) = XWing::keypair_derand(&input.seed).expect("keygen over a well-sized seed");

    // Every coin string is valid against an honestly generated key
    let (ct, ss) = XWing::encapsulate_derand(&pk, &input.coins)
        .expect("encapsulation against a generated key");

    let recovered = XWing::decapsulate(&sk, &ct).expect("decapsulation with a generated key");
    assert_eq!(ss, recovered, "Shared secret mismatch");

    // A single flipped bit is silently rejected
    let mut tampered = ct.to_bytes();
    let bit = usize::from(input.flip_bit) % (tampered.len() * 8);
    tampered[bit / 8] ^= 1 << (bit % 8);
    let rejected = XWing::decapsulate_bytes(&sk.to_bytes(), &tampered)
        .expect("decapsulation never errors on a malformed ciphertext");
    assert_ne!(ss, rejected, "Tampered ciphertext reproduced the secret");
});
