#![no_main]

use libfuzzer_sys::fuzz_target;
use chunkprint::{
    Blake3Hasher, ChunkHasher, ChunkPlan, FingerprintConfig, Fingerprinter, Sha256Hasher,
};

fuzz_target!(|data: Vec<u8>| {
    let chunk_sizes = [1, 7, 64, 4096, chunkprint::DEFAULT_CHUNK_SIZE];

    for chunk_size in chunk_sizes {
        let plan = ChunkPlan::new(data.len() as u64, chunk_size).unwrap();

        // Verify: specs cover the input exactly once
        let mut expected_start = 0u64;
        for spec in plan.specs() {
            assert_eq!(spec.start, expected_start);
            assert!(spec.len() <= chunk_size as u64);
            expected_start = spec.end;
        }
        assert_eq!(expected_start, data.len() as u64);

        // Verify: worker count never changes the fingerprint
        let mut fingerprints = Vec::new();
        for workers in [1, 3] {
            let config = FingerprintConfig::new(chunk_size).unwrap().with_workers(workers);
            let fingerprinter = Fingerprinter::<Sha256Hasher>::new(config);
            fingerprints.push(fingerprinter.fingerprint_bytes(&data).unwrap());
        }
        assert_eq!(fingerprints[0], fingerprints[1]);

        // Verify: the fingerprint is the digest of the ordered chunk digests
        let concatenated: Vec<u8> = data
            .chunks(chunk_size)
            .flat_map(|chunk| Sha256Hasher::digest(chunk).as_bytes().to_vec())
            .collect();
        assert_eq!(fingerprints[0], Sha256Hasher::digest(&concatenated));
    }

    // Blake3 backend follows the same construction
    let config = FingerprintConfig::new(64).unwrap().with_workers(2);
    let a = Fingerprinter::<Blake3Hasher>::new(config).fingerprint_bytes(&data).unwrap();
    let b = Fingerprinter::<Blake3Hasher>::new(config).fingerprint_bytes(&data).unwrap();
    assert_eq!(a, b);
});
