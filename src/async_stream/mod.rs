//! Async streaming support for fingerprinting.
//!
//! This module reads through the `futures-io::AsyncRead` trait, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes. Hashing still runs on a dedicated worker pool; the async
//! task only reads and awaits results.
//!
//! - [`ChunkStream`] - Stream of owned fixed-size chunks from an async reader
//! - [`fingerprint_async`] - Fingerprints an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ChunkStream, fingerprint_async};
