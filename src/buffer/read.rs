//! Reusable fixed-size read buffer.

use std::io::{self, Read};

use bytes::Bytes;

use crate::util::read_full;

/// A buffer refilled once per chunk by the read loop.
///
/// Never lent to a worker: [`ReadBuffer::detach`] copies the bytes out.
pub(crate) struct ReadBuffer {
    data: Box<[u8]>,
}

impl ReadBuffer {
    /// Allocates a buffer of `size` bytes.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size].into_boxed_slice(),
        }
    }

    /// Returns the buffer size.
    #[cfg_attr(not(feature = "async-io"), allow(dead_code))]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Refills the buffer from `reader`.
    ///
    /// Returns the number of bytes read; short only at end-of-stream.
    pub(crate) fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        read_full(reader, &mut self.data)
    }

    /// Returns the unfilled part of the buffer after `filled` bytes.
    #[cfg(feature = "async-io")]
    pub(crate) fn tail_mut(&mut self, filled: usize) -> &mut [u8] {
        &mut self.data[filled..]
    }

    /// Copies the first `len` bytes into an independently owned buffer.
    pub(crate) fn detach(&self, len: usize) -> Bytes {
        Bytes::copy_from_slice(&self.data[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_detach_is_independent() {
        let mut buf = ReadBuffer::new(4);
        let mut reader = Cursor::new(b"abcdefg".to_vec());

        assert_eq!(buf.fill_from(&mut reader).unwrap(), 4);
        let first = buf.detach(4);

        // Next fill overwrites the buffer, not the detached copy
        assert_eq!(buf.fill_from(&mut reader).unwrap(), 3);
        let second = buf.detach(3);

        assert_eq!(&first[..], b"abcd");
        assert_eq!(&second[..], b"efg");
    }

    #[test]
    fn test_short_read_truncates() {
        let mut buf = ReadBuffer::new(8);
        assert_eq!(buf.capacity(), 8);

        let n = buf.fill_from(&mut Cursor::new(b"xyz".to_vec())).unwrap();
        assert_eq!(buf.detach(n).len(), 3);
    }
}
