//! Dynamically typed 2-D arrays.
//!
//! Image-like buffers carry their element depth and channel count at run
//! time instead of in the type. [`OpaqueArray`] and [`OpaqueArrayMut`] are
//! the capabilities the codec needs from such a buffer; [`ChannelImage`] is
//! the implementation shipped with this crate.

use tracing::debug;

use crate::depth::{Depth, Element};
use crate::error::{ChannelError, Result};
use crate::header::HeaderInformation;
use crate::payload::{check_source, check_total, encode_into, encode_owned, read_header};
use crate::sink::ByteSink;

/// Read access to a dynamically typed 2-D array.
pub trait OpaqueArray {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn depth(&self) -> Depth;
    /// Interleaved components per element.
    fn channels(&self) -> usize;
    /// Contiguous element bytes, `rows * cols * channels * depth.byte_width()`
    /// long.
    fn bytes(&self) -> &[u8];
}

/// Write access to a dynamically typed 2-D array.
pub trait OpaqueArrayMut: OpaqueArray {
    /// Reallocates the array for the given shape and type. Existing contents
    /// are discarded.
    fn create(&mut self, rows: usize, cols: usize, depth: Depth, channels: usize) -> Result<()>;
    fn bytes_mut(&mut self) -> &mut [u8];
}

/// Row-major image buffer with interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelImage {
    rows: usize,
    cols: usize,
    depth: Depth,
    channels: usize,
    data: Vec<u8>,
}

impl Default for ChannelImage {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelImage {
    /// Creates an empty single-channel 8-bit image.
    pub fn new() -> Self {
        Self {
            rows: 0,
            cols: 0,
            depth: Depth::U8,
            channels: 1,
            data: Vec::new(),
        }
    }

    /// Creates a zero-filled image.
    pub fn zeros(rows: usize, cols: usize, depth: Depth, channels: usize) -> Result<Self> {
        let mut image = Self::new();
        image.create(rows, cols, depth, channels)?;
        Ok(image)
    }

    /// Creates an image from row-major interleaved elements.
    pub fn from_elements<T: Element>(
        rows: usize,
        cols: usize,
        channels: usize,
        data: &[T],
    ) -> Result<Self> {
        let header = HeaderInformation::for_element::<T>(rows, cols, channels)?;
        let bytes: &[u8] = bytemuck::cast_slice(data);
        check_source(&header, T::DEPTH.byte_width(), bytes.len())?;
        Ok(Self {
            rows,
            cols,
            depth: T::DEPTH,
            channels,
            data: bytes.to_vec(),
        })
    }

    /// Copies the elements out as `T`, which must match the image depth.
    pub fn to_elements<T: Element>(&self) -> Result<Vec<T>> {
        self.check_depth::<T>()?;
        Ok(bytemuck::pod_collect_to_vec(&self.data))
    }

    /// Reads one component. `None` if out of bounds or `T` is not the image
    /// depth.
    pub fn at<T: Element>(&self, row: usize, col: usize, channel: usize) -> Option<T> {
        if T::DEPTH != self.depth || row >= self.rows || col >= self.cols || channel >= self.channels
        {
            return None;
        }
        let index = (row * self.cols + col) * self.channels + channel;
        let width = self.depth.byte_width();
        let start = index * width;
        Some(bytemuck::pod_read_unaligned(&self.data[start..start + width]))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of elements, `rows * cols`.
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }

    /// Bytes per element across all channels.
    pub fn elem_size(&self) -> usize {
        self.depth.byte_width() * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn check_depth<T: Element>(&self) -> Result<()> {
        if T::DEPTH != self.depth {
            return Err(ChannelError::DepthMismatch {
                expected: T::DEPTH.code(),
                actual: self.depth.code(),
            });
        }
        Ok(())
    }
}

impl OpaqueArray for ChannelImage {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn depth(&self) -> Depth {
        self.depth
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl OpaqueArrayMut for ChannelImage {
    fn create(&mut self, rows: usize, cols: usize, depth: Depth, channels: usize) -> Result<()> {
        let len = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .and_then(|n| n.checked_mul(depth.byte_width()))
            .ok_or(ChannelError::SizeOverflow)?;
        // The old storage and shape stay intact until the new buffer exists.
        let mut data: Vec<u8> = Vec::new();
        data.resize_exact(len)?;
        self.data = data;
        self.rows = rows;
        self.cols = cols;
        self.depth = depth;
        self.channels = channels;
        Ok(())
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

fn array_header<A: OpaqueArray + ?Sized>(array: &A) -> Result<HeaderInformation> {
    let depth = array.depth();
    let header =
        HeaderInformation::for_depth(depth, array.rows(), array.cols(), array.channels())?;
    check_source(&header, depth.byte_width(), array.bytes().len())?;
    Ok(header)
}

/// Serializes an opaque array into `string`. On failure `string` is left
/// empty.
pub fn serialize_array_to_string<A: OpaqueArray + ?Sized>(
    array: &A,
    string: &mut Vec<u8>,
) -> Result<()> {
    encode_into(string, array_header(array), array.bytes())
}

/// Serializes an opaque array into a new buffer.
pub fn serialize_array_to_buffer<A: OpaqueArray + ?Sized>(array: &A) -> Result<Box<[u8]>> {
    let header = array_header(array)?;
    encode_owned(&header, array.bytes())
}

/// Decodes a serialized array, recreating `array` with the decoded shape,
/// depth and channel count.
pub fn deserialize_array_from_buffer<A: OpaqueArrayMut + ?Sized>(
    buffer: &[u8],
    array: &mut A,
) -> Result<()> {
    let header = read_header(buffer)?;
    let depth = Depth::from_code(header.depth).ok_or(ChannelError::UnknownDepth(header.depth))?;
    check_total(buffer, header.payload_len(depth.byte_width()))?;

    debug!(
        rows = header.rows,
        cols = header.cols,
        depth = %depth,
        channels = header.channels,
        "creating array for decoded channel"
    );
    array.create(
        header.rows as usize,
        header.cols as usize,
        depth,
        header.channels as usize,
    )?;
    let payload = &buffer[HeaderInformation::SIZE..];
    let dst = array.bytes_mut();
    if dst.len() != payload.len() {
        return Err(ChannelError::SourceLength {
            expected: payload.len(),
            actual: dst.len(),
        });
    }
    dst.copy_from_slice(payload);
    Ok(())
}

/// Same as [`deserialize_array_from_buffer`], for payloads stored in a byte
/// string.
pub fn deserialize_array_from_string<A: OpaqueArrayMut + ?Sized>(
    string: &[u8],
    array: &mut A,
) -> Result<()> {
    deserialize_array_from_buffer(string, array)
}
