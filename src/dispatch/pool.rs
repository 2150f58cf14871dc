//! Per-invocation worker pool.

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use crate::error::FingerprintError;

/// A fixed-capacity pool of hashing workers.
///
/// Built fresh for each fingerprint and torn down when dropped. Tasks beyond
/// the capacity wait in the pool's queue.
pub struct WorkerPool {
    pool: ThreadPool,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with `capacity` worker threads.
    ///
    /// Returns [`FingerprintError::ResourceExhaustion`] if `capacity` is zero
    /// or the threads cannot be spawned.
    pub fn new(capacity: usize) -> Result<Self, FingerprintError> {
        if capacity == 0 {
            return Err(FingerprintError::ResourceExhaustion {
                reason: "worker limit is zero".into(),
            });
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(capacity)
            .thread_name(|i| format!("chunkprint-worker-{i}"))
            .build()
            .map_err(|e| FingerprintError::ResourceExhaustion {
                reason: e.to_string(),
            })?;

        Ok(Self { pool, capacity })
    }

    /// Returns the number of worker threads.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs `op` on the calling thread with a scope that spawns into this pool.
    ///
    /// Returns only after every task spawned in the scope has finished.
    pub(crate) fn in_place_scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&Scope<'scope>) -> R,
    {
        self.pool.in_place_scope(op)
    }

    /// Queues a detached task on the pool.
    #[cfg(feature = "async-io")]
    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(task);
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_capacity_fails() {
        let err = WorkerPool::new(0).unwrap_err();
        assert!(matches!(err, FingerprintError::ResourceExhaustion { .. }));
    }

    #[test]
    fn test_capacity() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.pool.current_num_threads(), 2);
    }

    #[test]
    fn test_scope_waits_for_all_tasks() {
        let pool = WorkerPool::new(3).unwrap();
        let done = AtomicUsize::new(0);

        pool.in_place_scope(|scope| {
            for _ in 0..50 {
                scope.spawn(|_| {
                    done.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        assert_eq!(done.load(Ordering::SeqCst), 50);
    }
}
