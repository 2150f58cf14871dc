//! Fingerprint engine.
//!
//! - [`Fingerprinter`] - Configured entry point for buffers, readers and files

mod engine;

pub use engine::Fingerprinter;
