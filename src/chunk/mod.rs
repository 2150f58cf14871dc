//! Chunk types.
//!
//! - [`ChunkPlan`] - Fixed-size chunk layout for an input of known length
//! - [`ChunkSpec`] - The byte range owned by one chunk index
//! - [`Chunk`] - Indexed chunk payload handed to the dispatcher
//! - [`Digest`] - 32-byte digest value

mod data;
mod digest;
mod plan;

pub use data::Chunk;
pub use digest::Digest;
pub use plan::{ChunkPlan, ChunkSpec, ChunkSpecs};
