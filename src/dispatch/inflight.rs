//! Bound on chunks copied out of the input but not yet hashed.

use parking_lot::{Condvar, Mutex};

/// Chunks allowed in flight per worker.
///
/// One being hashed and one queued behind it keeps every worker busy
/// without letting the read loop run ahead of hashing.
pub(crate) const IN_FLIGHT_PER_WORKER: usize = 2;

/// Counting gate the read loop passes before pulling each chunk.
///
/// The loop blocks in [`InFlight::acquire`] while `limit` chunks are
/// outstanding; a worker releases its [`Permit`] once the chunk's digest is
/// stored.
#[derive(Debug)]
pub(crate) struct InFlight {
    limit: usize,
    count: Mutex<usize>,
    released: Condvar,
}

impl InFlight {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            count: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    /// Blocks until fewer than `limit` permits are held, then takes one.
    pub(crate) fn acquire(&self) -> Permit<'_> {
        let mut count = self.count.lock();
        while *count >= self.limit {
            self.released.wait(&mut count);
        }
        *count += 1;
        Permit(self)
    }

    #[cfg(test)]
    fn held(&self) -> usize {
        *self.count.lock()
    }

    fn release(&self) {
        let mut count = self.count.lock();
        *count -= 1;
        self.released.notify_one();
    }
}

/// One in-flight chunk. Released on drop, including during unwinding.
#[derive(Debug)]
pub(crate) struct Permit<'a>(&'a InFlight);

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_acquire_and_release() {
        let gate = InFlight::new(2);
        let a = gate.acquire();
        let b = gate.acquire();
        assert_eq!(gate.held(), 2);
        drop(a);
        assert_eq!(gate.held(), 1);
        drop(b);
        assert_eq!(gate.held(), 0);
    }

    #[test]
    fn test_zero_limit_still_admits_one() {
        let gate = InFlight::new(0);
        let _permit = gate.acquire();
        assert_eq!(gate.held(), 1);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let gate = InFlight::new(3);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..40 {
                let permit = gate.acquire();
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                let active = &active;
                s.spawn(move || {
                    thread::sleep(Duration::from_millis(1));
                    active.fetch_sub(1, Ordering::SeqCst);
                    drop(permit);
                });
            }
        });

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(gate.held(), 0);
    }
}
