//! Hash backends for chunk and fingerprint digests.
//!
//! - [`ChunkHasher`] - Incremental 32-byte hash with a one-shot [`ChunkHasher::digest`]
//! - [`Sha256Hasher`] - SHA-256, the reference backend
//! - [`Blake3Hasher`] - BLAKE3 (requires `hash-blake3` feature)
//!
//! The plain helpers ([`digest_bytes`], [`digest_reader`], [`digest_file`])
//! hash the whole input in one pass, without chunking. They produce the
//! ordinary checksum of the algorithm, not a fingerprint.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::chunk::Digest;

mod sha256;

#[cfg(feature = "hash-blake3")]
mod blake3;

pub use sha256::Sha256Hasher;

#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Hasher;

/// Read size used by the plain single-pass helpers.
const PLAIN_READ_SIZE: usize = 64 * 1024;

/// A cryptographic hash with 32-byte output.
///
/// Every value owns its own hash state. The dispatcher creates a fresh
/// hasher for each chunk, so implementations never share mutable state
/// between workers.
pub trait ChunkHasher: Default + Send + 'static {
    /// Algorithm name, as written into checksum fields.
    const ALGORITHM: &'static str;

    /// Feeds more data into the hash state.
    fn update(&mut self, data: &[u8]);

    /// Consumes the state and returns the digest.
    fn finalize(self) -> Digest;

    /// Hashes `data` in one shot.
    fn digest(data: &[u8]) -> Digest {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Hashes `data` in a single pass.
pub fn digest_bytes<H: ChunkHasher>(data: &[u8]) -> Digest {
    H::digest(data)
}

/// Hashes everything `reader` yields in a single pass.
pub fn digest_reader<H: ChunkHasher, R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = H::default();
    let mut buf = vec![0u8; PLAIN_READ_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize())
}

/// Hashes the file at `path` in a single pass.
pub fn digest_file<H: ChunkHasher>(path: impl AsRef<Path>) -> io::Result<Digest> {
    digest_reader::<H, _>(File::open(path)?)
}
