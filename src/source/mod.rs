//! Chunk sources feeding the dispatcher.
//!
//! - [`SliceSource`] - Slices an in-memory buffer by planned offsets
//! - [`ReaderSource`] - Reads a stream sequentially in chunk-size increments

mod memory;
mod stream;

pub use memory::SliceSource;
pub use stream::ReaderSource;

use crate::chunk::{Chunk, ChunkPlan};
use crate::error::FingerprintError;

/// Something that yields the chunks of one input, in index order.
///
/// The dispatcher pulls chunks on the calling thread; only the chunk payload
/// crosses into a worker, so `Data` must be `Send` while the source itself
/// need not be.
pub trait ChunkSource {
    /// The chunk payload handed to a worker.
    type Data: AsRef<[u8]> + Send;

    /// Returns the plan the source was built for.
    fn plan(&self) -> &ChunkPlan;

    /// Returns the next chunk, or `None` once the input is exhausted.
    fn next_chunk(&mut self) -> Result<Option<Chunk<Self::Data>>, FingerprintError>;

    /// Checks that the whole declared input was delivered.
    ///
    /// Called after `next_chunk` has returned `None`.
    fn finish(&mut self) -> Result<(), FingerprintError> {
        Ok(())
    }
}
