//! Core fingerprint engine - Fingerprinter.
//!
//! This module wires the pieces together: plan the chunks, build a worker
//! pool, dispatch one hash task per chunk, and fold the ordered chunk
//! digests into the fingerprint.
//!
//! # Example
//!
//! ```
//! use chunkprint::{Fingerprinter, FingerprintConfig, Sha256Hasher};
//!
//! let fingerprinter = Fingerprinter::<Sha256Hasher>::new(FingerprintConfig::default());
//! let fingerprint = fingerprinter.fingerprint_bytes(b"package contents")?;
//! println!("{fingerprint}");
//! # Ok::<(), chunkprint::FingerprintError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

use crate::aggregate::fold;
use crate::chunk::{ChunkPlan, Digest};
use crate::config::FingerprintConfig;
use crate::dispatch::{CancelToken, dispatch};
use crate::error::FingerprintError;
use crate::hash::{ChunkHasher, Sha256Hasher};
use crate::source::{ReaderSource, SliceSource};

/// Computes two-level chunked fingerprints.
///
/// `Fingerprinter` holds a configuration and a hash backend. It keeps no
/// state between calls: every fingerprint plans its chunks, builds its
/// worker pool and allocates its digest slots from scratch.
///
/// # Determinism
///
/// The fingerprint depends only on the input bytes, the chunk size and the
/// hash backend. Worker count and scheduling never change it, and the
/// buffer and file entry points agree on the same bytes.
///
/// # Example
///
/// ```
/// use chunkprint::{Fingerprinter, FingerprintConfig, Sha256Hasher};
///
/// let config = FingerprintConfig::new(4)?.with_workers(2);
/// let fingerprinter = Fingerprinter::<Sha256Hasher>::new(config);
///
/// let a = fingerprinter.fingerprint_bytes(b"0123456789")?;
/// let b = fingerprinter.fingerprint_reader(&b"0123456789"[..], 10)?;
/// assert_eq!(a, b);
/// # Ok::<(), chunkprint::FingerprintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Fingerprinter<H = Sha256Hasher> {
    config: FingerprintConfig,
    cancel: Option<CancelToken>,
    hasher: PhantomData<fn() -> H>,
}

impl<H: ChunkHasher> Fingerprinter<H> {
    /// Creates a new fingerprinter with the given configuration.
    ///
    /// The configuration is validated on every call, not here.
    pub fn new(config: FingerprintConfig) -> Self {
        Self {
            config,
            cancel: None,
            hasher: PhantomData,
        }
    }

    /// Observes `token` between chunk submissions.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Returns the cancellation token, if one is set.
    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Returns the chunk plan this fingerprinter would use for `total_len` bytes.
    pub fn plan(&self, total_len: u64) -> Result<ChunkPlan, FingerprintError> {
        self.config.validate()?;
        ChunkPlan::new(total_len, self.config.chunk_size())
    }

    /// Fingerprints an in-memory buffer.
    ///
    /// Chunks are borrowed slices of `data`; nothing is copied.
    #[tracing::instrument(level = "debug", skip_all, fields(len = data.len(), algorithm = H::ALGORITHM))]
    pub fn fingerprint_bytes(&self, data: &[u8]) -> Result<Digest, FingerprintError> {
        let plan = self.plan(data.len() as u64)?;
        let digests = dispatch::<H, _>(
            SliceSource::new(data, plan)?,
            self.config.worker_capacity(plan.count()),
            self.cancel.as_ref(),
        )?;
        Ok(fold::<H>(&digests))
    }

    /// Fingerprints a sequential stream holding exactly `size` bytes.
    ///
    /// `size` pre-sizes the digest slots; a stream that ends early or runs
    /// past it fails with [`FingerprintError::LengthMismatch`].
    #[tracing::instrument(level = "debug", skip_all, fields(size = size, algorithm = H::ALGORITHM))]
    pub fn fingerprint_reader<R: Read>(
        &self,
        reader: R,
        size: u64,
    ) -> Result<Digest, FingerprintError> {
        let plan = self.plan(size)?;
        let digests = dispatch::<H, _>(
            ReaderSource::new(reader, plan),
            self.config.worker_capacity(plan.count()),
            self.cancel.as_ref(),
        )?;
        Ok(fold::<H>(&digests))
    }

    /// Fingerprints an open file positioned at its start.
    ///
    /// The file length from its metadata is the declared size.
    pub fn fingerprint_open_file(&self, file: &File) -> Result<Digest, FingerprintError> {
        let size = file.metadata()?.len();
        self.fingerprint_reader(file, size)
    }

    /// Fingerprints the file at `path`.
    pub fn fingerprint_file(&self, path: impl AsRef<Path>) -> Result<Digest, FingerprintError> {
        let file = File::open(path)?;
        self.fingerprint_open_file(&file)
    }

    /// Checks `data` against an expected fingerprint.
    pub fn verify_bytes(&self, data: &[u8], expected: &Digest) -> Result<(), FingerprintError> {
        check(expected, self.fingerprint_bytes(data)?)
    }

    /// Checks the file at `path` against an expected fingerprint.
    pub fn verify_file(
        &self,
        path: impl AsRef<Path>,
        expected: &Digest,
    ) -> Result<(), FingerprintError> {
        check(expected, self.fingerprint_file(path)?)
    }
}

impl Default for Fingerprinter<Sha256Hasher> {
    fn default() -> Self {
        Self::new(FingerprintConfig::default())
    }
}

fn check(expected: &Digest, actual: Digest) -> Result<(), FingerprintError> {
    if *expected != actual {
        return Err(FingerprintError::Mismatch {
            expected: *expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn small() -> Fingerprinter {
        Fingerprinter::new(FingerprintConfig::new(16).unwrap().with_workers(3))
    }

    #[test]
    fn test_empty_input() {
        let fp = small().fingerprint_bytes(b"").unwrap();
        assert_eq!(fp, Sha256Hasher::digest(b""));
    }

    #[test]
    fn test_single_chunk_is_hash_of_hash() {
        let data = [0u8; 16];
        let fp = small().fingerprint_bytes(&data).unwrap();
        let chunk = Sha256Hasher::digest(&data);
        assert_eq!(fp, Sha256Hasher::digest(chunk.as_bytes()));
    }

    #[test]
    fn test_bytes_and_reader_agree() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();
        let fingerprinter = small();
        let a = fingerprinter.fingerprint_bytes(&data).unwrap();
        let b = fingerprinter
            .fingerprint_reader(Cursor::new(&data), data.len() as u64)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_chunk_size() {
        let fingerprinter: Fingerprinter =
            Fingerprinter::new(FingerprintConfig::default().with_chunk_size(0));
        assert!(matches!(
            fingerprinter.fingerprint_bytes(b"abc"),
            Err(FingerprintError::InvalidInput { .. })
        ));
        assert!(matches!(
            fingerprinter.fingerprint_bytes(b""),
            Err(FingerprintError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_verify_bytes() {
        let fingerprinter = small();
        let fp = fingerprinter.fingerprint_bytes(b"identity").unwrap();
        assert!(fingerprinter.verify_bytes(b"identity", &fp).is_ok());

        let err = fingerprinter.verify_bytes(b"identitY", &fp).unwrap_err();
        assert!(matches!(err, FingerprintError::Mismatch { expected, .. } if expected == fp));
    }

    #[test]
    fn test_plan() {
        let plan = small().plan(33).unwrap();
        assert_eq!(plan.count(), 3);
        assert_eq!(plan.chunk_size(), 16);
    }
}
