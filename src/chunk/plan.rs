//! Fixed-size chunk planning.
//!
//! A [`ChunkPlan`] splits `[0, total_len)` into `ceil(total_len / chunk_size)`
//! contiguous ranges. Every range is exactly `chunk_size` bytes except
//! possibly the last one.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::FingerprintError;

/// The byte range owned by one chunk index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSpec {
    /// Position of the chunk in the input.
    pub index: usize,
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl ChunkSpec {
    /// Returns the length of the range in bytes.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Returns true if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Chunk layout for an input of known length.
///
/// # Example
///
/// ```
/// use chunkprint::ChunkPlan;
///
/// let plan = ChunkPlan::new(10, 4)?;
/// assert_eq!(plan.count(), 3);
/// assert_eq!(plan.spec(2).unwrap().range(), 8..10);
/// # Ok::<(), chunkprint::FingerprintError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPlan {
    total_len: u64,
    chunk_size: usize,
    count: usize,
}

impl ChunkPlan {
    /// Plans the chunks for `total_len` bytes.
    ///
    /// Returns error if `chunk_size` is zero or the chunk count does not fit
    /// in `usize`.
    pub fn new(total_len: u64, chunk_size: usize) -> Result<Self, FingerprintError> {
        if chunk_size == 0 {
            return Err(FingerprintError::InvalidInput {
                message: "chunk size must be non-zero",
            });
        }

        let count = usize::try_from(total_len.div_ceil(chunk_size as u64)).map_err(|_| {
            FingerprintError::InvalidInput {
                message: "input has more chunks than this platform can address",
            }
        })?;

        Ok(Self {
            total_len,
            chunk_size,
            count,
        })
    }

    /// Returns the total input length.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of chunks. Zero iff the input is empty.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the range of chunk `index`, or `None` past the last chunk.
    pub fn spec(&self, index: usize) -> Option<ChunkSpec> {
        if index >= self.count {
            return None;
        }
        let size = self.chunk_size as u64;
        let start = index as u64 * size;
        let end = (start + size).min(self.total_len);
        Some(ChunkSpec { index, start, end })
    }

    /// Iterates over all chunk ranges in index order.
    pub fn specs(&self) -> ChunkSpecs {
        ChunkSpecs {
            plan: *self,
            next: 0,
        }
    }
}

impl IntoIterator for &ChunkPlan {
    type Item = ChunkSpec;
    type IntoIter = ChunkSpecs;

    fn into_iter(self) -> ChunkSpecs {
        self.specs()
    }
}

/// Iterator over the ranges of a [`ChunkPlan`].
#[derive(Debug, Clone)]
pub struct ChunkSpecs {
    plan: ChunkPlan,
    next: usize,
}

impl Iterator for ChunkSpecs {
    type Item = ChunkSpec;

    fn next(&mut self) -> Option<ChunkSpec> {
        let spec = self.plan.spec(self.next)?;
        self.next += 1;
        Some(spec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkSpecs {}

impl FusedIterator for ChunkSpecs {}
