//! SHA-256 chunk hashing.

use sha2::{Digest as _, Sha256};

use super::ChunkHasher;
use crate::chunk::Digest;

/// A hasher that computes SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher {
    state: Sha256,
}

impl Sha256Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        self.state = Sha256::new();
    }
}

impl ChunkHasher for Sha256Hasher {
    const ALGORITHM: &'static str = "SHA256";

    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    fn finalize(self) -> Digest {
        Digest::new(self.state.finalize().into())
    }
}
