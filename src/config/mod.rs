//! Configuration for fingerprint computation.
//!
//! - [`FingerprintConfig`] - Chunk size and worker-pool limit

use std::num::NonZeroUsize;
use std::thread;

use crate::error::FingerprintError;

/// Default chunk size (1 MiB).
///
/// The fingerprint depends on the chunk size: the same bytes fingerprinted
/// with a different chunk size give a different digest.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Configuration for a fingerprint computation.
///
/// Worker limit:
/// - `None`: the host's available parallelism
/// - `Some(n)`: at most `n` workers; `Some(0)` makes pool creation fail
///
/// The pool created for one invocation never has more workers than the
/// input has chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerprintConfig {
    chunk_size: usize,
    workers: Option<usize>,
}

impl FingerprintConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// Returns error if the chunk size is zero.
    pub fn new(chunk_size: usize) -> Result<Self, FingerprintError> {
        let config = Self {
            chunk_size,
            workers: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Caps the worker pool at `workers` threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sizes the worker pool from the host's available parallelism.
    pub fn with_auto_workers(mut self) -> Self {
        self.workers = None;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the explicit worker limit, if set.
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Returns the pool capacity to use for an input of `chunk_count` chunks.
    pub fn worker_capacity(&self, chunk_count: usize) -> usize {
        let limit = self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        limit.min(chunk_count)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.chunk_size == 0 {
            return Err(FingerprintError::InvalidInput {
                message: "chunk size must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: None,
        }
    }
}
