//! Streaming chunk source.

use std::io::Read;

use bytes::Bytes;

use crate::buffer::ReadBuffer;
use crate::chunk::{Chunk, ChunkPlan};
use crate::error::FingerprintError;

use super::ChunkSource;

/// Reads a stream sequentially, one chunk-size increment at a time.
///
/// The declared length only pre-sizes the digest slots; the stream must
/// deliver exactly that many bytes or the source fails with
/// [`FingerprintError::LengthMismatch`].
///
/// Indices are assigned in read order starting at zero. Each increment is
/// copied out of the reusable read buffer before it is yielded, and a short
/// final read yields only the bytes actually read.
pub struct ReaderSource<R> {
    reader: R,
    plan: ChunkPlan,
    buffer: ReadBuffer,
    next_index: usize,
    bytes_read: u64,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a source reading `reader`, which must hold `plan.total_len()` bytes.
    pub fn new(reader: R, plan: ChunkPlan) -> Self {
        Self {
            reader,
            buffer: ReadBuffer::new(plan.chunk_size()),
            plan,
            next_index: 0,
            bytes_read: 0,
        }
    }

    /// Returns the number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Consumes the source, returning the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    type Data = Bytes;

    fn plan(&self) -> &ChunkPlan {
        &self.plan
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk<Bytes>>, FingerprintError> {
        let n = self.buffer.fill_from(&mut self.reader)?;
        if n == 0 {
            return Ok(None);
        }

        let offset = self.bytes_read;
        self.bytes_read += n as u64;
        if self.bytes_read > self.plan.total_len() {
            return Err(FingerprintError::LengthMismatch {
                expected: self.plan.total_len(),
                actual: self.bytes_read,
            });
        }

        let index = self.next_index;
        self.next_index += 1;
        Ok(Some(Chunk::new(index, offset, self.buffer.detach(n))))
    }

    fn finish(&mut self) -> Result<(), FingerprintError> {
        if self.bytes_read != self.plan.total_len() {
            return Err(FingerprintError::LengthMismatch {
                expected: self.plan.total_len(),
                actual: self.bytes_read,
            });
        }
        Ok(())
    }
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("plan", &self.plan)
            .field("next_index", &self.next_index)
            .field("bytes_read", &self.bytes_read)
            .finish_non_exhaustive()
    }
}
