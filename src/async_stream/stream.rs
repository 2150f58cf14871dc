//! Async stream adapter for fingerprinting.
//!
//! # Example
//!
//! ```ignore
//! use chunkprint::{fingerprint_async, FingerprintConfig, Sha256Hasher};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R, size: u64) -> Result<(), chunkprint::FingerprintError> {
//!     let config = FingerprintConfig::default();
//!     let fingerprint = fingerprint_async::<Sha256Hasher, _>(reader, size, &config, None).await?;
//!     println!("{fingerprint}");
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::future::poll_fn;
use std::io;
use std::pin::{Pin, pin};
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures_channel::oneshot;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::aggregate::fold;
use crate::buffer::ReadBuffer;
use crate::chunk::{Chunk, ChunkPlan, Digest};
use crate::config::FingerprintConfig;
use crate::dispatch::{CancelToken, IN_FLIGHT_PER_WORKER, WorkerPool};
use crate::error::FingerprintError;
use crate::fingerprint::Fingerprinter;
use crate::hash::ChunkHasher;

pin_project! {
    /// A stream of fixed-size chunks read from an async reader.
    ///
    /// Yields the same chunks, with the same indices, as the sync streaming
    /// source: every chunk except the last is exactly `chunk_size` bytes,
    /// and each one is an owned copy of the read buffer. A reader that ends
    /// early or runs past the declared length yields
    /// [`FingerprintError::LengthMismatch`] and then ends.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        plan: ChunkPlan,
        buffer: ReadBuffer,
        filled: usize,
        next_index: usize,
        bytes_read: u64,
        finished: bool,
    }
}

impl<R: AsyncRead> ChunkStream<R> {
    /// Creates a stream reading `reader`, which must hold `plan.total_len()` bytes.
    pub fn new(reader: R, plan: ChunkPlan) -> Self {
        Self {
            reader,
            buffer: ReadBuffer::new(plan.chunk_size()),
            plan,
            filled: 0,
            next_index: 0,
            bytes_read: 0,
            finished: false,
        }
    }

    /// Returns the plan the stream was built for.
    pub fn plan(&self) -> &ChunkPlan {
        &self.plan
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk<Bytes>, FingerprintError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        // Partial fills survive a Pending and resume on the next poll
        while *this.filled < this.buffer.capacity() {
            let buf = this.buffer.tail_mut(*this.filled);
            match ready!(this.reader.as_mut().poll_read(cx, buf)) {
                Ok(0) => break,
                Ok(n) => *this.filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
            }
        }

        let n = std::mem::take(this.filled);
        let expected = this.plan.total_len();

        if n == 0 {
            *this.finished = true;
            if *this.bytes_read != expected {
                return Poll::Ready(Some(Err(FingerprintError::LengthMismatch {
                    expected,
                    actual: *this.bytes_read,
                })));
            }
            return Poll::Ready(None);
        }

        let offset = *this.bytes_read;
        *this.bytes_read += n as u64;
        if *this.bytes_read > expected {
            *this.finished = true;
            return Poll::Ready(Some(Err(FingerprintError::LengthMismatch {
                expected,
                actual: *this.bytes_read,
            })));
        }

        let index = *this.next_index;
        *this.next_index += 1;
        Poll::Ready(Some(Ok(Chunk::new(index, offset, this.buffer.detach(n)))))
    }
}

/// Fingerprints an async reader holding exactly `size` bytes.
///
/// Produces the same digest as [`Fingerprinter::fingerprint_reader`] for the
/// same bytes and configuration. Each chunk is hashed on the worker pool; its
/// digest comes back over a dedicated channel, and the channels are awaited
/// in index order.
///
/// Reading pauses while two chunks per worker are still unhashed, so the
/// reader never runs far ahead of hashing. On error or cancellation, the
/// chunks already handed to workers are awaited before the error returns.
pub async fn fingerprint_async<H, R>(
    reader: R,
    size: u64,
    config: &FingerprintConfig,
    cancel: Option<&CancelToken>,
) -> Result<Digest, FingerprintError>
where
    H: ChunkHasher,
    R: AsyncRead,
{
    config.validate()?;
    let plan = ChunkPlan::new(size, config.chunk_size())?;
    let expected = plan.count();

    let pool = match expected {
        0 => None,
        count => Some(WorkerPool::new(config.worker_capacity(count))?),
    };
    let window = pool
        .as_ref()
        .map_or(1, |pool| pool.capacity() * IN_FLIGHT_PER_WORKER);
    tracing::debug!(
        size,
        chunks = expected,
        workers = pool.as_ref().map_or(0, WorkerPool::capacity),
        algorithm = H::ALGORITHM,
        "dispatching chunk digests"
    );

    let mut stream = pin!(ChunkStream::new(reader, plan));
    let mut pending: VecDeque<(usize, oneshot::Receiver<Digest>)> =
        VecDeque::with_capacity(window);
    let mut digests = Vec::with_capacity(expected);

    let outcome = async {
        let mut submitted = 0usize;
        loop {
            while pending.len() >= window {
                collect_oldest(&mut pending, &mut digests).await?;
            }

            let Some(chunk) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await else {
                break;
            };
            let chunk = chunk?;
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(FingerprintError::Cancelled);
            }

            let pool = pool
                .as_ref()
                .filter(|_| chunk.index < expected)
                .ok_or(FingerprintError::ChunkCountMismatch {
                    expected,
                    actual: submitted + 1,
                })?;
            submitted += 1;

            let (tx, rx) = oneshot::channel();
            tracing::trace!(index = chunk.index, len = chunk.len(), "submitting chunk");
            pending.push_back((chunk.index, rx));
            pool.spawn(move || {
                // The receiver is gone only if the fingerprint was abandoned.
                let _ = tx.send(H::digest(&chunk.data));
            });
        }

        if submitted != expected {
            return Err(FingerprintError::ChunkCountMismatch {
                expected,
                actual: submitted,
            });
        }
        while !pending.is_empty() {
            collect_oldest(&mut pending, &mut digests).await?;
        }
        Ok::<(), FingerprintError>(())
    }
    .await;

    if let Err(err) = outcome {
        // Chunks already on the pool finish before the error returns.
        for (_, rx) in pending.drain(..) {
            let _ = rx.await;
        }
        return Err(err);
    }

    Ok(fold::<H>(&digests))
}

/// Awaits the oldest submitted chunk and appends its digest.
async fn collect_oldest(
    pending: &mut VecDeque<(usize, oneshot::Receiver<Digest>)>,
    digests: &mut Vec<Digest>,
) -> Result<(), FingerprintError> {
    if let Some((index, rx)) = pending.pop_front() {
        digests.push(rx.await.map_err(|_| FingerprintError::WorkerLost { index })?);
    }
    Ok(())
}

impl<H: ChunkHasher> Fingerprinter<H> {
    /// Fingerprints an async reader holding exactly `size` bytes.
    ///
    /// See [`fingerprint_async`].
    pub async fn fingerprint_async_reader<R: AsyncRead>(
        &self,
        reader: R,
        size: u64,
    ) -> Result<Digest, FingerprintError> {
        fingerprint_async::<H, R>(reader, size, self.config(), self.cancel_token()).await
    }
}
