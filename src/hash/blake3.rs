//! BLAKE3-based chunk hashing implementation.

use super::ChunkHasher;
use crate::chunk::Digest;

/// A hasher that computes BLAKE3 hashes.
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl ChunkHasher for Blake3Hasher {
    const ALGORITHM: &'static str = "BLAKE3";

    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    fn finalize(self) -> Digest {
        Digest::new(self.state.finalize().into())
    }

    fn digest(data: &[u8]) -> Digest {
        Digest::new(blake3::hash(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash() {
        let hash = Blake3Hasher::digest(b"hello world");

        // Hash should be deterministic
        assert_eq!(hash, Blake3Hasher::digest(b"hello world"));

        // Different data should give different hash
        assert_ne!(hash, Blake3Hasher::digest(b"hello world!"));
    }

    #[test]
    fn test_incremental_hashing() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Blake3Hasher::digest(b"hello world"));
    }

    #[test]
    fn test_reset() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"some data");

        hasher.reset();
        hasher.update(b"hello world");
        assert_eq!(hasher.finalize(), Blake3Hasher::digest(b"hello world"));
    }
}
