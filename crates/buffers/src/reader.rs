//! Byte reader with cursor tracking.

use crate::BufferError;

/// A reader over a byte slice.
///
/// Multi-byte integers are read in host byte order. Every read is bounds
/// checked against `end` and leaves the cursor untouched on failure.
///
/// # Example
///
/// ```
/// use channel_buffers::Reader;
///
/// let data = 42u32.to_ne_bytes();
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u32().unwrap(), 42);
/// assert!(reader.u32().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self {
            uint8,
            x: 0,
            end: uint8.len(),
        }
    }

    /// Creates a reader whose cursor starts at `x`.
    ///
    /// The cursor may start past the end; the first read then fails.
    pub fn at(uint8: &'a [u8], x: usize) -> Self {
        Self {
            uint8,
            x,
            end: uint8.len(),
        }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    fn assert_size(&self, n: usize) -> Result<(), BufferError> {
        if self.x > self.end || n > self.size() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..self.x])
    }

    /// Returns everything from the cursor to the end and advances to the end.
    pub fn rest(&mut self) -> &'a [u8] {
        let x = self.x.min(self.end);
        self.x = self.end;
        &self.uint8[x..self.end]
    }

    /// Reads an unsigned 32-bit integer (host byte order).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        let bytes = self.buf(4)?;
        Ok(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
