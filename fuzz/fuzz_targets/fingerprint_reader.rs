#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use chunkprint::{FingerprintConfig, FingerprintError, Fingerprinter, Sha256Hasher};

/// Reader that returns short reads whose sizes come from the fuzz input.
struct Uneven<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    turn: usize,
}

impl Read for Uneven<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = match self.steps.get(self.turn % self.steps.len().max(1)) {
            Some(&s) => usize::from(s).max(1),
            None => buf.len(),
        };
        self.turn += 1;
        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8)| {
    let (data, steps, declared_delta) = input;

    for chunk_size in [1, 13, 256, 4096] {
        let config = FingerprintConfig::new(chunk_size).unwrap().with_workers(2);
        let fingerprinter = Fingerprinter::<Sha256Hasher>::new(config);

        // Verify: short reads never change the fingerprint
        let reader = Uneven { data: &data, steps: &steps, turn: 0 };
        let streamed = fingerprinter
            .fingerprint_reader(reader, data.len() as u64)
            .unwrap();
        assert_eq!(streamed, fingerprinter.fingerprint_bytes(&data).unwrap());

        // Verify: a wrong declared size is always rejected
        if declared_delta > 0 {
            let declared = data.len() as u64 + u64::from(declared_delta);
            let reader = Uneven { data: &data, steps: &steps, turn: 0 };
            let err = fingerprinter.fingerprint_reader(reader, declared).unwrap_err();
            assert!(matches!(err, FingerprintError::LengthMismatch { .. }));
        }
    }
});
