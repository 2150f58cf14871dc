//! Parallel chunk dispatch.
//!
//! [`dispatch`] pulls chunks from a [`ChunkSource`] on the calling thread and
//! hands each one to a worker together with the slot for its index. The
//! calling thread blocks until every submitted chunk has been hashed, then
//! returns the digests in index order. Completion order never matters.
//!
//! At most [`IN_FLIGHT_PER_WORKER`] chunks per worker are pulled ahead of
//! hashing, so a streamed input is never buffered beyond that window.
//!
//! - [`WorkerPool`] - Fixed-capacity pool, created per invocation
//! - [`DigestSlots`] - Pre-sized, index-addressed digest storage
//! - [`CancelToken`] - Stops submission between chunks

mod cancel;
mod inflight;
mod pool;
mod slots;

pub use cancel::CancelToken;
pub use pool::WorkerPool;
pub use slots::{DigestSlots, Slot, SlotClaims};

pub(crate) use inflight::IN_FLIGHT_PER_WORKER;

use inflight::InFlight;

use crate::chunk::Digest;
use crate::error::FingerprintError;
use crate::hash::ChunkHasher;
use crate::source::ChunkSource;

/// Hashes every chunk of `source` on a pool of at most `workers` threads.
///
/// The pool is sized `min(workers, chunk count)` and built before the first
/// chunk is pulled, so a pool failure never leaves work half done. An empty
/// source produces no digests and needs no pool.
///
/// The calling thread waits before pulling a chunk whenever
/// `IN_FLIGHT_PER_WORKER * capacity` chunks are still unhashed.
///
/// On any error the partially filled slots are dropped.
pub fn dispatch<H, S>(
    mut source: S,
    workers: usize,
    cancel: Option<&CancelToken>,
) -> Result<Vec<Digest>, FingerprintError>
where
    H: ChunkHasher,
    S: ChunkSource,
{
    let expected = source.plan().count();

    if expected == 0 {
        if source.next_chunk()?.is_some() {
            return Err(FingerprintError::ChunkCountMismatch {
                expected: 0,
                actual: 1,
            });
        }
        source.finish()?;
        return Ok(Vec::new());
    }

    let pool = WorkerPool::new(workers.min(expected))?;
    let window = InFlight::new(pool.capacity() * IN_FLIGHT_PER_WORKER);
    tracing::debug!(
        chunks = expected,
        workers = pool.capacity(),
        algorithm = H::ALGORITHM,
        "dispatching chunk digests"
    );

    let mut slots = DigestSlots::new(expected);
    let mut claims = slots.claims();
    let mut submitted = 0usize;

    pool.in_place_scope(|scope| -> Result<(), FingerprintError> {
        loop {
            let permit = window.acquire();
            let Some(chunk) = source.next_chunk()? else {
                break;
            };
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(FingerprintError::Cancelled);
            }

            let slot = claims
                .claim(chunk.index)
                .ok_or(FingerprintError::ChunkCountMismatch {
                    expected,
                    actual: submitted + 1,
                })?;
            submitted += 1;

            tracing::trace!(index = chunk.index, len = chunk.len(), "submitting chunk");
            scope.spawn(move |_| {
                slot.fill(H::digest(chunk.data.as_ref()));
                drop(permit);
            });
        }
        Ok(())
    })?;
    drop(claims);

    source.finish()?;
    let filled = slots.filled();
    slots
        .into_digests()
        .ok_or(FingerprintError::ChunkCountMismatch {
            expected,
            actual: filled,
        })
}
