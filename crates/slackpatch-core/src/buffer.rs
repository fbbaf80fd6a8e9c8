//! Bounds-checked byte buffer for a loaded image.
//!
//! Every read and write is validated against the buffer length before any
//! byte is touched, and the length never changes once the buffer is built.

use memchr::{memchr, memmem};

use crate::error::{Error, Result};

/// An owned, fixed-length byte buffer holding a loaded binary image.
///
/// The buffer length is an invariant: no operation on this type grows or
/// shrinks the underlying bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    bytes: Vec<u8>,
}

impl ImageBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn check(&self, offset: usize, len: usize) -> Result<()> {
        let end = offset.checked_add(len).ok_or(Error::OutOfBounds {
            offset,
            len,
            size: self.bytes.len(),
        })?;
        if end > self.bytes.len() {
            return Err(Error::OutOfBounds {
                offset,
                len,
                size: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn read(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.check(offset, len)?;
        Ok(&self.bytes[offset..offset + len])
    }

    /// Overwrite `data.len()` bytes starting at `offset`.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.check(offset, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Fill `len` bytes starting at `offset` with nulls.
    pub fn zero(&mut self, offset: usize, len: usize) -> Result<()> {
        self.check(offset, len)?;
        self.bytes[offset..offset + len].fill(0);
        Ok(())
    }

    /// Find the next occurrence of `needle` at or after `from`.
    pub fn find(&self, needle: &[u8], from: usize) -> Option<usize> {
        if needle.is_empty() || from >= self.bytes.len() {
            return None;
        }
        memmem::find(&self.bytes[from..], needle).map(|pos| from + pos)
    }

    /// Length of the null-terminated run starting at `offset`.
    ///
    /// When no null exists before the end of the buffer, the run is treated
    /// as extending to the buffer end. An offset at or past the end is an
    /// empty run.
    pub fn run_len(&self, offset: usize) -> usize {
        let tail = &self.bytes[offset.min(self.bytes.len())..];
        match memchr(0, tail) {
            Some(pos) => pos,
            None => tail.len(),
        }
    }

    /// Number of consecutive null bytes starting at `offset`, bounded by the
    /// end of the buffer.
    pub fn null_run(&self, offset: usize) -> usize {
        self.bytes[offset.min(self.bytes.len())..]
            .iter()
            .take_while(|&&b| b == 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_in_bounds() {
        let buf = ImageBuffer::new(b"hello".to_vec());
        assert_eq!(buf.read(1, 3).unwrap(), b"ell");
        assert_eq!(buf.read(0, 5).unwrap(), b"hello");
        assert_eq!(buf.read(5, 0).unwrap(), b"");
    }

    #[test]
    fn test_read_out_of_bounds() {
        let buf = ImageBuffer::new(b"hello".to_vec());
        assert!(matches!(
            buf.read(3, 3),
            Err(Error::OutOfBounds { offset: 3, len: 3, size: 5 })
        ));
        assert!(buf.read(6, 0).is_err());
    }

    #[test]
    fn test_write_rejects_overrun() {
        let mut buf = ImageBuffer::new(vec![0u8; 4]);
        assert!(buf.write(2, b"abc").is_err());
        assert_eq!(buf.as_bytes(), &[0, 0, 0, 0]);

        buf.write(1, b"ab").unwrap();
        assert_eq!(buf.as_bytes(), &[0, b'a', b'b', 0]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_write_overflow_offset() {
        let mut buf = ImageBuffer::new(vec![0u8; 4]);
        assert!(buf.write(usize::MAX, b"a").is_err());
    }

    #[test]
    fn test_zero_range() {
        let mut buf = ImageBuffer::new(b"abcdef".to_vec());
        buf.zero(2, 3).unwrap();
        assert_eq!(buf.as_bytes(), b"ab\0\0\0f");
    }

    #[test]
    fn test_find_from_offset() {
        let buf = ImageBuffer::new(b"ab::cd::ef".to_vec());
        assert_eq!(buf.find(b"::", 0), Some(2));
        assert_eq!(buf.find(b"::", 3), Some(6));
        assert_eq!(buf.find(b"::", 7), None);
        assert_eq!(buf.find(b"", 0), None);
    }

    #[test]
    fn test_run_len_and_null_run() {
        let buf = ImageBuffer::new(b"abc\0\0\0de".to_vec());
        assert_eq!(buf.run_len(0), 3);
        assert_eq!(buf.null_run(3), 3);
        assert_eq!(buf.null_run(6), 0);

        // Run without a terminator extends to the buffer end.
        assert_eq!(buf.run_len(6), 2);
        assert_eq!(buf.null_run(8), 0);
    }

    #[test]
    fn test_run_queries_past_end_are_empty() {
        let buf = ImageBuffer::new(b"abc".to_vec());
        assert_eq!(buf.run_len(3), 0);
        assert_eq!(buf.run_len(10), 0);
        assert_eq!(buf.null_run(10), 0);
    }
}
