//! In-memory chunk source.

use crate::chunk::{Chunk, ChunkPlan, ChunkSpecs};
use crate::error::FingerprintError;

use super::ChunkSource;

/// Yields borrowed slices of one immutable buffer.
///
/// All ranges are known up front and disjoint, so no data is copied.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    plan: ChunkPlan,
    specs: ChunkSpecs,
}

impl<'a> SliceSource<'a> {
    /// Creates a source over `data`, split according to `plan`.
    ///
    /// Returns error if `plan` was built for a different length than `data`.
    pub fn new(data: &'a [u8], plan: ChunkPlan) -> Result<Self, FingerprintError> {
        if plan.total_len() != data.len() as u64 {
            return Err(FingerprintError::InvalidInput {
                message: "plan length does not match buffer length",
            });
        }
        Ok(Self {
            data,
            plan,
            specs: plan.specs(),
        })
    }

    /// Plans `data` with `chunk_size` and creates a source over it.
    pub fn with_chunk_size(data: &'a [u8], chunk_size: usize) -> Result<Self, FingerprintError> {
        let plan = ChunkPlan::new(data.len() as u64, chunk_size)?;
        Self::new(data, plan)
    }
}

impl<'a> ChunkSource for SliceSource<'a> {
    type Data = &'a [u8];

    fn plan(&self) -> &ChunkPlan {
        &self.plan
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk<&'a [u8]>>, FingerprintError> {
        let data = self.data;
        // Offsets fit in usize: the plan was built from a slice length.
        Ok(self.specs.next().map(|spec| {
            let range = spec.start as usize..spec.end as usize;
            Chunk::new(spec.index, spec.start, &data[range])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_follow_plan() {
        let data: Vec<u8> = (0..10u8).collect();
        let mut source = SliceSource::with_chunk_size(&data, 4).unwrap();

        let mut chunks = Vec::new();
        while let Some(chunk) = source.next_chunk().unwrap() {
            chunks.push(chunk);
        }
        source.finish().unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].data, &[0, 1, 2, 3]);
        assert_eq!(chunks[1].data, &[4, 5, 6, 7]);
        assert_eq!(chunks[2].data, &[8, 9]);
        assert_eq!(chunks[2].index, 2);
        assert_eq!(chunks[2].offset, 8);
    }

    #[test]
    fn test_empty_buffer() {
        let mut source = SliceSource::with_chunk_size(&[], 4).unwrap();
        assert_eq!(source.plan().count(), 0);
        assert!(source.next_chunk().unwrap().is_none());
    }

    #[test]
    fn test_plan_length_mismatch() {
        let plan = ChunkPlan::new(5, 4).unwrap();
        let err = SliceSource::new(&[0u8; 3], plan).unwrap_err();
        assert!(matches!(err, FingerprintError::InvalidInput { .. }));
    }
}
