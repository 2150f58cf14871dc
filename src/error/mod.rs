//! Error types for chunkprint.

use thiserror::Error;

use crate::chunk::Digest;

/// Errors that can occur while computing or checking a fingerprint.
///
/// A returned error always means "no fingerprint was produced". Callers must
/// never substitute an empty or zeroed digest.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FingerprintError {
    /// The worker pool could not be created.
    ///
    /// Raised before any chunk is read or hashed.
    #[error("worker pool unavailable: {reason}")]
    ResourceExhaustion {
        /// What the pool builder reported.
        reason: String,
    },

    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The call was rejected at the API boundary.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A streaming source delivered a different number of bytes than declared.
    #[error("stream length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// The declared total length.
        expected: u64,
        /// The number of bytes actually read.
        actual: u64,
    },

    /// A source produced a different number of chunks than planned.
    #[error("chunk count mismatch: planned {expected}, produced {actual}")]
    ChunkCountMismatch {
        /// The planned chunk count.
        expected: usize,
        /// The number of chunks produced so far.
        actual: usize,
    },

    /// The computation was cancelled between chunk submissions.
    #[error("fingerprint computation cancelled")]
    Cancelled,

    /// A worker went away without delivering the digest of a chunk.
    #[error("worker lost while hashing chunk {index}")]
    WorkerLost {
        /// Index of the chunk whose digest never arrived.
        index: usize,
    },

    /// A computed fingerprint did not match the expected one.
    #[error("fingerprint mismatch: expected {expected}, computed {actual}")]
    Mismatch {
        /// The fingerprint the caller expected.
        expected: Digest,
        /// The fingerprint that was computed.
        actual: Digest,
    },
}
