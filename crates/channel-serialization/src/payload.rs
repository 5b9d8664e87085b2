//! Generic payload codec over raw element bytes.
//!
//! A serialized payload is a [`HeaderInformation`] immediately followed by
//! `rows * cols * channels * size_of::<T>()` element bytes. Matrix, image and
//! raw-slice adapters all funnel into `encode_into` and `read_header`.

use channel_buffers::{print_octets_default, Writer};
use tracing::{error, trace};

use crate::depth::Element;
use crate::error::{ChannelError, Result};
use crate::header::HeaderInformation;
use crate::sink::ByteSink;

/// Writes `header` followed by `data` into `sink`.
///
/// `header` is the outcome of the caller's shape checks, so a contract
/// violation found there takes the same path as a failed write: the sink is
/// released and the error returned.
pub(crate) fn encode_into<S: ByteSink + ?Sized>(
    sink: &mut S,
    header: Result<HeaderInformation>,
    data: &[u8],
) -> Result<()> {
    let result = header.and_then(|header| fill(sink, &header, data));
    if let Err(err) = &result {
        error!(error = %err, len = data.len(), "failed to serialize channel");
        sink.release();
    }
    result
}

fn fill<S: ByteSink + ?Sized>(sink: &mut S, header: &HeaderInformation, data: &[u8]) -> Result<()> {
    let total = data
        .len()
        .checked_add(header.size())
        .ok_or(ChannelError::SizeOverflow)?;
    trace!(
        rows = header.rows,
        cols = header.cols,
        depth = header.depth,
        channels = header.channels,
        total,
        "serializing channel"
    );
    sink.resize_exact(total)?;
    let bytes = sink.bytes_mut();
    header.serialize_to_buffer(bytes, 0)?;
    Writer::at(bytes, header.size())
        .buf(data)
        .map_err(ChannelError::PayloadWrite)
}

/// Encodes into a freshly allocated buffer whose ownership moves to the caller.
pub(crate) fn encode_owned(header: &HeaderInformation, data: &[u8]) -> Result<Box<[u8]>> {
    let mut buffer = Vec::new();
    encode_into(&mut buffer, Ok(*header), data)?;
    Ok(buffer.into_boxed_slice())
}

/// Checks that a source of `actual` bytes matches the shape in `header`.
pub(crate) fn check_source(header: &HeaderInformation, width: usize, actual: usize) -> Result<()> {
    let expected = header
        .payload_len(width)
        .ok_or(ChannelError::SizeOverflow)?;
    if expected != actual {
        return Err(ChannelError::SourceLength { expected, actual });
    }
    Ok(())
}

/// Reads the header at the start of a serialized payload.
pub(crate) fn read_header(buffer: &[u8]) -> Result<HeaderInformation> {
    if buffer.len() < HeaderInformation::SIZE {
        return Err(ChannelError::TooShort {
            len: buffer.len(),
            header: HeaderInformation::SIZE,
        });
    }
    HeaderInformation::deserialize_from_buffer(buffer, 0).map_err(|err| {
        error!(
            error = %err,
            buffer = %print_octets_default(buffer),
            "failed to deserialize header"
        );
        err
    })
}

/// Checks that `buffer` is exactly a header plus `payload_len` bytes.
pub(crate) fn check_total(buffer: &[u8], payload_len: Option<usize>) -> Result<()> {
    let expected = payload_len
        .and_then(|len| len.checked_add(HeaderInformation::SIZE))
        .ok_or(ChannelError::SizeOverflow)?;
    if expected != buffer.len() {
        return Err(ChannelError::TotalSize {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_depth<T: Element>(header: &HeaderInformation) -> Result<()> {
    if header.depth != T::DEPTH.code() {
        return Err(ChannelError::DepthMismatch {
            expected: T::DEPTH.code(),
            actual: header.depth,
        });
    }
    Ok(())
}

/// Serializes raw element bytes of type `T` into any [`ByteSink`].
///
/// `data` must hold exactly `rows * cols * channels` elements. On failure the
/// sink is released.
pub fn serialize_to_sink<T: Element, S: ByteSink + ?Sized>(
    data: &[u8],
    rows: usize,
    cols: usize,
    channels: usize,
    sink: &mut S,
) -> Result<()> {
    let header = HeaderInformation::for_element::<T>(rows, cols, channels).and_then(|header| {
        check_source(&header, std::mem::size_of::<T>(), data.len())?;
        Ok(header)
    });
    encode_into(sink, header, data)
}

/// Serializes raw element bytes of type `T` into `string`.
///
/// `string` is resized to the full serialized size. On failure it is left
/// empty.
pub fn serialize_to_string<T: Element>(
    data: &[u8],
    rows: usize,
    cols: usize,
    channels: usize,
    string: &mut Vec<u8>,
) -> Result<()> {
    serialize_to_sink::<T, _>(data, rows, cols, channels, string)
}

/// Serializes raw element bytes of type `T` into a new buffer.
pub fn serialize_to_buffer<T: Element>(
    data: &[u8],
    rows: usize,
    cols: usize,
    channels: usize,
) -> Result<Box<[u8]>> {
    let header = HeaderInformation::for_element::<T>(rows, cols, channels)?;
    check_source(&header, std::mem::size_of::<T>(), data.len())?;
    encode_owned(&header, data)
}

/// Typed form of [`serialize_to_string`].
pub fn serialize_elements_to_string<T: Element>(
    data: &[T],
    rows: usize,
    cols: usize,
    channels: usize,
    string: &mut Vec<u8>,
) -> Result<()> {
    serialize_to_string::<T>(bytemuck::cast_slice(data), rows, cols, channels, string)
}

/// Typed form of [`serialize_to_buffer`].
pub fn serialize_elements_to_buffer<T: Element>(
    data: &[T],
    rows: usize,
    cols: usize,
    channels: usize,
) -> Result<Box<[u8]>> {
    serialize_to_buffer::<T>(bytemuck::cast_slice(data), rows, cols, channels)
}

/// A validated payload borrowed from its serialized buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPayload<'a> {
    pub header: HeaderInformation,
    pub bytes: &'a [u8],
}

impl RawPayload<'_> {
    /// Copies the payload into `dst`, which must hold exactly the decoded
    /// number of elements.
    pub fn copy_to<T: Element>(&self, dst: &mut [T]) -> Result<()> {
        check_depth::<T>(&self.header)?;
        let dst: &mut [u8] = bytemuck::cast_slice_mut(dst);
        if dst.len() != self.bytes.len() {
            return Err(ChannelError::SourceLength {
                expected: self.bytes.len(),
                actual: dst.len(),
            });
        }
        dst.copy_from_slice(self.bytes);
        Ok(())
    }

    /// Collects the payload into a new vector of `T`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        check_depth::<T>(&self.header)?;
        Ok(bytemuck::pod_collect_to_vec(self.bytes))
    }
}

/// Splits and validates a payload of `T` elements.
///
/// The header depth must be `T`'s and the buffer length must match the
/// declared shape exactly.
pub fn deserialize_from_buffer<T: Element>(buffer: &[u8]) -> Result<RawPayload<'_>> {
    let header = read_header(buffer)?;
    check_depth::<T>(&header)?;
    check_total(buffer, header.payload_len(std::mem::size_of::<T>()))?;
    Ok(RawPayload {
        header,
        bytes: &buffer[HeaderInformation::SIZE..],
    })
}

/// Same as [`deserialize_from_buffer`], for payloads stored in a byte string.
pub fn deserialize_from_string<T: Element>(string: &[u8]) -> Result<RawPayload<'_>> {
    deserialize_from_buffer::<T>(string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use channel_buffers::BufferError;

    /// Sink whose storage is always too small for a header.
    struct Cramped(Vec<u8>);

    impl ByteSink for Cramped {
        fn resize_exact(&mut self, _len: usize) -> Result<()> {
            self.0 = vec![0; 4];
            Ok(())
        }

        fn bytes_mut(&mut self) -> &mut [u8] {
            &mut self.0
        }

        fn release(&mut self) {
            self.0.clear();
        }
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_header_write_failure_releases_sink() {
        let mut sink = Cramped(Vec::new());
        let err = serialize_to_sink::<u8, _>(&[5], 1, 1, 1, &mut sink).unwrap_err();
        assert_eq!(err, ChannelError::HeaderWrite(BufferError::Overflow));
        assert_eq!(err.kind(), ErrorKind::Soft);
        assert!(sink.0.is_empty());
        assert!(logs_contain("failed to serialize channel"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_allocation_failure_is_soft() {
        struct Exhausted;
        impl ByteSink for Exhausted {
            fn resize_exact(&mut self, len: usize) -> Result<()> {
                Err(ChannelError::Allocation(len))
            }
            fn bytes_mut(&mut self) -> &mut [u8] {
                &mut []
            }
            fn release(&mut self) {}
        }
        let err = serialize_to_sink::<f64, _>(&[0; 8], 1, 1, 1, &mut Exhausted).unwrap_err();
        assert_eq!(err, ChannelError::Allocation(24));
        assert!(!err.is_contract_violation());
        assert!(logs_contain("failed to serialize channel"));
    }

    #[test]
    fn test_layout() {
        let data = [1u16, 2, 3, 4, 5, 6];
        let buffer = serialize_elements_to_buffer(&data, 2, 3, 1).unwrap();
        assert_eq!(buffer.len(), 16 + 12);
        assert_eq!(&buffer[..4], &2u32.to_ne_bytes());
        assert_eq!(&buffer[4..8], &3u32.to_ne_bytes());
        assert_eq!(&buffer[8..12], &2u32.to_ne_bytes());
        assert_eq!(&buffer[12..16], &1u32.to_ne_bytes());
        assert_eq!(&buffer[16..18], &1u16.to_ne_bytes());
    }

    #[test]
    fn test_source_length_checked() {
        let err = serialize_to_buffer::<i32>(&[0u8; 7], 1, 2, 1).unwrap_err();
        assert_eq!(
            err,
            ChannelError::SourceLength {
                expected: 8,
                actual: 7
            }
        );
        assert!(err.is_contract_violation());
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_source_length_releases_string() {
        let mut string = b"stale payload".to_vec();
        let err = serialize_to_string::<i32>(&[0u8; 7], 1, 2, 1, &mut string).unwrap_err();
        assert_eq!(
            err,
            ChannelError::SourceLength {
                expected: 8,
                actual: 7
            }
        );
        assert!(string.is_empty());
        assert!(logs_contain("failed to serialize channel"));
    }

    #[test]
    fn test_shape_overflow_releases_string() {
        let mut string = b"stale payload".to_vec();
        let err = serialize_to_string::<u8>(&[], usize::MAX, 0, 1, &mut string).unwrap_err();
        assert!(matches!(err, ChannelError::DimensionOverflow { .. }));
        assert!(string.is_empty());
    }

    #[test]
    fn test_empty_shape() {
        let mut string = vec![1, 2, 3];
        serialize_to_string::<f32>(&[], 0, 5, 1, &mut string).unwrap();
        assert_eq!(string.len(), 16);
        let payload = deserialize_from_string::<f32>(&string).unwrap();
        assert_eq!(payload.header.rows, 0);
        assert_eq!(payload.header.cols, 5);
        assert!(payload.bytes.is_empty());
    }

    #[test]
    fn test_copy_to_length_mismatch() {
        let buffer = serialize_elements_to_buffer(&[1u8, 2, 3], 1, 3, 1).unwrap();
        let payload = deserialize_from_buffer::<u8>(&buffer).unwrap();
        let mut dst = [0u8; 2];
        assert!(payload.copy_to(&mut dst).is_err());
        let mut dst = [0u8; 3];
        payload.copy_to(&mut dst).unwrap();
        assert_eq!(dst, [1, 2, 3]);
    }
}
