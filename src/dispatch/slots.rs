//! Index-addressed digest storage.
//!
//! [`DigestSlots`] is allocated at its final length before any worker
//! starts. [`SlotClaims`] hands out one exclusive [`Slot`] per index, so
//! every worker writes a location no other worker can reach and the array
//! needs no lock.

use crate::chunk::Digest;

/// Pre-sized digest storage, one slot per chunk index.
#[derive(Debug)]
pub struct DigestSlots {
    slots: Vec<Option<Digest>>,
}

impl DigestSlots {
    /// Allocates `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of slots that hold a digest.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Splits the storage into per-index write handles.
    pub fn claims(&mut self) -> SlotClaims<'_> {
        SlotClaims {
            cells: self.slots.iter_mut().map(Some).collect(),
        }
    }

    /// Returns the digests in index order, or `None` if any slot is empty.
    pub fn into_digests(self) -> Option<Vec<Digest>> {
        self.slots.into_iter().collect()
    }
}

/// Unclaimed write handles of a [`DigestSlots`].
#[derive(Debug)]
pub struct SlotClaims<'a> {
    cells: Vec<Option<&'a mut Option<Digest>>>,
}

impl<'a> SlotClaims<'a> {
    /// Takes the write handle for `index`.
    ///
    /// Returns `None` if `index` is out of range or was already claimed.
    pub fn claim(&mut self, index: usize) -> Option<Slot<'a>> {
        self.cells.get_mut(index)?.take().map(Slot)
    }
}

/// Exclusive write access to one digest slot.
#[derive(Debug)]
pub struct Slot<'a>(&'a mut Option<Digest>);

impl Slot<'_> {
    /// Stores the digest, consuming the handle.
    pub fn fill(self, digest: Digest) {
        *self.0 = Some(digest);
    }
}
