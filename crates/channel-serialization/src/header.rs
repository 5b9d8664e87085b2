//! Fixed-width header prefixed to every serialized array.
//!
//! Layout, host byte order, no padding:
//!
//! | Field    | Offset | Width |
//! |----------|--------|-------|
//! | rows     | 0      | 4     |
//! | cols     | 4      | 4     |
//! | depth    | 8      | 4     |
//! | channels | 12     | 4     |

use channel_buffers::{Reader, Writer};

use crate::depth::{Depth, Element};
use crate::error::{ChannelError, Result};

/// Shape and element type of a serialized array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderInformation {
    pub rows: u32,
    pub cols: u32,
    pub depth: u32,
    pub channels: u32,
}

fn field(name: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| ChannelError::DimensionOverflow { name, value })
}

impl HeaderInformation {
    /// Serialized byte length.
    pub const SIZE: usize = 4 * std::mem::size_of::<u32>();

    pub fn new(rows: u32, cols: u32, depth: u32, channels: u32) -> Self {
        Self {
            rows,
            cols,
            depth,
            channels,
        }
    }

    /// Builds the header for an array of `T` elements.
    pub fn for_element<T: Element>(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::for_depth(T::DEPTH, rows, cols, channels)
    }

    /// Builds the header for an array whose depth is only known at run time.
    pub fn for_depth(depth: Depth, rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Ok(Self {
            rows: field("rows", rows)?,
            cols: field("cols", cols)?,
            depth: depth.code(),
            channels: field("channels", channels)?,
        })
    }

    pub fn size(&self) -> usize {
        Self::SIZE
    }

    /// Number of element components, `None` on overflow.
    pub fn element_count(&self) -> Option<usize> {
        (self.rows as usize)
            .checked_mul(self.cols as usize)?
            .checked_mul(self.channels as usize)
    }

    /// Payload byte length for components of `width` bytes.
    pub fn payload_len(&self, width: usize) -> Option<usize> {
        self.element_count()?.checked_mul(width)
    }

    /// Writes the header into `buffer` at `offset`.
    ///
    /// The caller sizes `buffer`; a header that does not fit is reported as
    /// [`ChannelError::HeaderWrite`] and nothing is written.
    pub fn serialize_to_buffer(&self, buffer: &mut [u8], offset: usize) -> Result<()> {
        let end = offset.checked_add(Self::SIZE);
        if end.map_or(true, |end| end > buffer.len()) {
            return Err(ChannelError::HeaderWrite(channel_buffers::BufferError::Overflow));
        }
        let mut writer = Writer::at(buffer, offset);
        for value in [self.rows, self.cols, self.depth, self.channels] {
            writer.u32(value).map_err(ChannelError::HeaderWrite)?;
        }
        Ok(())
    }

    /// Reads a header from `buffer` at `offset`. Field values are not
    /// validated.
    pub fn deserialize_from_buffer(buffer: &[u8], offset: usize) -> Result<Self> {
        let mut reader = Reader::at(buffer, offset);
        let mut next = || reader.u32().map_err(ChannelError::HeaderRead);
        Ok(Self {
            rows: next()?,
            cols: next()?,
            depth: next()?,
            channels: next()?,
        })
    }
}
