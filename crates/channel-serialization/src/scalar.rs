//! Scalar channels.
//!
//! Scalars have two unrelated encodings. The string form is decimal text that
//! is always read back through a 64-bit integer parse, so fractional digits
//! are dropped on decode. The buffer form is the value's raw bytes.

use crate::depth::Element;
use crate::error::{ChannelError, Result};

/// Replaces `string` with the decimal text of `value`.
pub fn serialize_scalar_to_string<T: Element>(value: &T, string: &mut Vec<u8>) -> Result<()> {
    *string = value.to_string().into_bytes();
    Ok(())
}

/// Parses decimal text into `T`.
///
/// Parsing follows `strtoll`: leading whitespace and a sign are accepted and
/// the longest run of digits is used, so `"3.9"` decodes to `3`. The result
/// is narrowed to `T` with `as` semantics.
pub fn deserialize_scalar_from_string<T: Element>(string: &[u8]) -> Result<T> {
    if string.is_empty() {
        return Err(ChannelError::EmptyString);
    }
    parse_leading_i64(string)
        .map(T::from_i64)
        .ok_or_else(|| ChannelError::InvalidScalarText(String::from_utf8_lossy(string).into_owned()))
}

fn parse_leading_i64(text: &[u8]) -> Option<i64> {
    let start = text
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))?;
    let text = &text[start..];
    let sign = usize::from(matches!(text.first(), Some(b'+' | b'-')));
    let digits = text[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&text[..sign + digits]).ok()?.parse().ok()
}

/// Copies the raw bytes of `value` into a new buffer.
///
/// `size` is the destination size the caller expects and must equal
/// `size_of::<T>()`.
pub fn serialize_scalar_to_buffer<T: Element>(value: &T, size: usize) -> Result<Box<[u8]>> {
    check_size::<T>(size)?;
    Ok(bytemuck::bytes_of(value).into())
}

/// Reads a scalar from its raw bytes.
pub fn deserialize_scalar_from_buffer<T: Element>(buffer: &[u8]) -> Result<T> {
    check_size::<T>(buffer.len())?;
    Ok(bytemuck::pod_read_unaligned(buffer))
}

fn check_size<T: Element>(actual: usize) -> Result<()> {
    let expected = std::mem::size_of::<T>();
    if actual != expected {
        return Err(ChannelError::ScalarSize { expected, actual });
    }
    Ok(())
}
