//! Folding chunk digests into a fingerprint.
//!
//! The fingerprint is `H(d[0] ++ d[1] ++ ... ++ d[n-1])`, concatenated in
//! index order. The per-chunk work parallelizes; this final pass is one
//! sequential hash over `32 * n` bytes.

use crate::chunk::Digest;
use crate::hash::ChunkHasher;

/// Hashes the concatenation of `digests` in the order given.
///
/// An empty slice yields the hash of zero bytes.
pub fn aggregate<H: ChunkHasher>(digests: &[Digest]) -> Digest {
    let mut hasher = H::default();
    for digest in digests {
        hasher.update(digest.as_bytes());
    }
    hasher.finalize()
}

/// Folds the digests of one computation and logs the result.
pub(crate) fn fold<H: ChunkHasher>(digests: &[Digest]) -> Digest {
    let fingerprint = aggregate::<H>(digests);
    tracing::debug!(chunks = digests.len(), %fingerprint, "fingerprint computed");
    fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hasher;

    #[test]
    fn test_empty_is_hash_of_nothing() {
        assert_eq!(aggregate::<Sha256Hasher>(&[]), Sha256Hasher::digest(b""));
    }

    #[test]
    fn test_matches_concatenation() {
        let d0 = Sha256Hasher::digest(b"first");
        let d1 = Sha256Hasher::digest(b"second");

        let mut concat = Vec::new();
        concat.extend_from_slice(d0.as_bytes());
        concat.extend_from_slice(d1.as_bytes());

        assert_eq!(aggregate::<Sha256Hasher>(&[d0, d1]), Sha256Hasher::digest(&concat));
    }

    #[test]
    fn test_order_matters() {
        let d0 = Sha256Hasher::digest(b"first");
        let d1 = Sha256Hasher::digest(b"second");
        assert_ne!(
            aggregate::<Sha256Hasher>(&[d0, d1]),
            aggregate::<Sha256Hasher>(&[d1, d0])
        );
    }

    #[test]
    fn test_fold_matches_aggregate() {
        let digests = [Sha256Hasher::digest(b"a"), Sha256Hasher::digest(b"b")];
        assert_eq!(
            fold::<Sha256Hasher>(&digests),
            aggregate::<Sha256Hasher>(&digests)
        );
    }
}
