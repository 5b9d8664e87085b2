//! Byte writer over a pre-sized mutable slice.

use crate::BufferError;

/// A writer that fills a caller-provided byte slice.
///
/// The writer never grows its target: the caller sizes the slice up front
/// and every write past `uint8.len()` fails with [`BufferError::Overflow`]
/// without touching the slice.
///
/// # Example
///
/// ```
/// use channel_buffers::Writer;
///
/// let mut data = [0u8; 6];
/// let mut writer = Writer::at(&mut data, 2);
/// writer.u32(9).unwrap();
/// assert!(writer.u32(10).is_err());
/// assert_eq!(&data[2..], &9u32.to_ne_bytes());
/// ```
#[derive(Debug)]
pub struct Writer<'a> {
    /// The target slice.
    pub uint8: &'a mut [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Writer<'a> {
    /// Creates a writer positioned at the start of `uint8`.
    pub fn new(uint8: &'a mut [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Creates a writer positioned at `x`.
    pub fn at(uint8: &'a mut [u8], x: usize) -> Self {
        Self { uint8, x }
    }

    /// Returns the number of bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.uint8.len().saturating_sub(self.x)
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) -> Result<(), BufferError> {
        if self.x > self.uint8.len() || data.len() > self.remaining() {
            return Err(BufferError::Overflow);
        }
        let end = self.x + data.len();
        self.uint8[self.x..end].copy_from_slice(data);
        self.x = end;
        Ok(())
    }

    /// Writes an unsigned 32-bit integer (host byte order).
    #[inline]
    pub fn u32(&mut self, value: u32) -> Result<(), BufferError> {
        self.buf(&value.to_ne_bytes())
    }
}
