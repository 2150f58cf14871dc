//! The Chunk type - one indexed piece of an input.

use bytes::Bytes;
use std::fmt;

use super::ChunkSpec;

/// An indexed chunk handed from a source to the dispatcher.
///
/// `D` is the payload: a borrowed slice for in-memory inputs, or an owned
/// [`Bytes`] copy for streamed inputs.
///
/// # Example
///
/// ```
/// use chunkprint::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk::new(0, 0, Bytes::from_static(b"hello world"));
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 0..11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<D = Bytes> {
    /// Position of the chunk in the input. Selects the digest slot.
    pub index: usize,

    /// The offset in the original input.
    pub offset: u64,

    /// The chunk data.
    pub data: D,
}

impl<D: AsRef<[u8]>> Chunk<D> {
    /// Creates a new chunk.
    pub fn new(index: usize, offset: u64, data: D) -> Self {
        Self {
            index,
            offset,
            data,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Returns the byte range this chunk covers.
    pub fn spec(&self) -> ChunkSpec {
        ChunkSpec {
            index: self.index,
            start: self.offset,
            end: self.end(),
        }
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> D {
        self.data
    }
}

impl<D: AsRef<[u8]>> fmt::Display for Chunk<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk#{}({} bytes @ {})",
            self.index,
            self.len(),
            self.offset
        )
    }
}
