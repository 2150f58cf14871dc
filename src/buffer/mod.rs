//! Internal buffer management for the streaming read loop.
//!
//! The read loop owns one reusable buffer. Every chunk leaves the loop as a
//! fresh copy, so a worker never sees memory the next read overwrites. It is
//! an implementation detail and not part of the public API.

mod read;

pub(crate) use read::ReadBuffer;
