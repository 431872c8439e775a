use std::time::Duration;

use attractor::{DigestWidth, HardenedLorenzHasher, HierarchicalSalt};
use bolero::check;

#[test]
fn fuzz_verification_logic() {
    let hasher = HardenedLorenzHasher::new(256)
        .unwrap()
        .with_min_compute_time(Duration::ZERO);
    let salt = HierarchicalSalt::derive(vec![0xA5; 32], 2, DigestWidth::W256, 0).unwrap();

    check!().with_type::<Vec<u8>>().for_each(|data| {
        // =================================================================
        // POSITIVE TEST
        // =================================================================

        let stored = hasher.compute_with_salt(data, salt.clone()).unwrap();
        assert!(hasher.verify(data, &stored).unwrap(), "verify() failed on correct data");

        // =================================================================
        // NEGATIVE TESTS (CORRUPTION)
        // =================================================================

        // 1. Data Corruption
        if !data.is_empty() {
            let mut corrupted = data.clone();
            corrupted[0] ^= 0x01;
            assert!(
                !hasher.verify(&corrupted, &stored).unwrap(),
                "verify() succeeded on corrupted data"
            );
        }

        // 2. Hash Corruption
        let mut bad = stored;
        bad.final_hash[0] ^= 0xFF;
        assert!(
            !hasher.verify(data, &bad).unwrap(),
            "verify() succeeded on corrupted hash"
        );
    });
}
