//! chunkprint
//!
//! Two-level parallel content fingerprints for Rust.
//!
//! `chunkprint` computes one digest over a large input (an in-memory buffer
//! or a file, potentially gigabytes) by splitting it into fixed-size chunks,
//! hashing the chunks concurrently, and hashing the ordered concatenation of
//! the chunk digests:
//!
//! ```text
//! fingerprint = H( H(chunk[0]) ++ H(chunk[1]) ++ ... ++ H(chunk[n-1]) )
//! ```
//!
//! The result is an unauthenticated content digest. It is designed for:
//!
//! - package identity in SBOM documents
//! - input to a signature function
//! - integrity checks of large artifacts (ISO images, archives)
//!
//! The fingerprint depends on the chunk size (1 MiB by default) and the
//! hash backend (SHA-256 by default). It never depends on worker count or
//! scheduling.
//!
//! # Sync
//!
//! ```no_run
//! use chunkprint::FingerprintError;
//!
//! fn main() -> Result<(), FingerprintError> {
//!     let fingerprint = chunkprint::fingerprint_file("package.deb")?;
//!     println!("{fingerprint}");
//!
//!     let same = chunkprint::fingerprint_bytes(&std::fs::read("package.deb")?)?;
//!     assert_eq!(fingerprint, same);
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use chunkprint::{fingerprint_async, FingerprintConfig, Sha256Hasher};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R, size: u64) -> Result<(), chunkprint::FingerprintError> {
//!     let config = FingerprintConfig::default();
//!     let fingerprint = fingerprint_async::<Sha256Hasher, _>(reader, size, &config, None).await?;
//!     println!("{fingerprint}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::Path;

mod aggregate;
mod chunk;
mod config;
mod dispatch;
mod error;
mod fingerprint;
mod hash;
mod source;

mod buffer; // internal (read-loop buffer)
mod util;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use aggregate::aggregate;
pub use chunk::{Chunk, ChunkPlan, ChunkSpec, ChunkSpecs, Digest};
pub use config::{DEFAULT_CHUNK_SIZE, FingerprintConfig};
pub use dispatch::{CancelToken, DigestSlots, Slot, SlotClaims, WorkerPool, dispatch};
pub use error::FingerprintError;
pub use fingerprint::Fingerprinter;
pub use hash::{ChunkHasher, Sha256Hasher, digest_bytes, digest_file, digest_reader};
pub use source::{ChunkSource, ReaderSource, SliceSource};

#[cfg(feature = "hash-blake3")]
pub use hash::Blake3Hasher;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, fingerprint_async};

/// Fingerprints an in-memory buffer with the default configuration (SHA-256, 1 MiB chunks).
pub fn fingerprint_bytes(data: &[u8]) -> Result<Digest, FingerprintError> {
    Fingerprinter::<Sha256Hasher>::default().fingerprint_bytes(data)
}

/// Fingerprints the file at `path` with the default configuration (SHA-256, 1 MiB chunks).
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<Digest, FingerprintError> {
    Fingerprinter::<Sha256Hasher>::default().fingerprint_file(path)
}
