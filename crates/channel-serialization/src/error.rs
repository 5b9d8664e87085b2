//! Error type for channel encoding and decoding.

use channel_buffers::BufferError;
use thiserror::Error;

/// How a [`ChannelError`] should be treated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller broke the codec's contract: malformed internal data, shape
    /// or type mismatches, size mismatches. Callers are expected to treat
    /// these as fatal.
    ContractViolation,
    /// An expected failure the caller may recover from by abandoning the
    /// larger operation.
    Soft,
}

/// Error type for channel encoding and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Input ends before the fixed-size header.
    #[error("buffer of {len} bytes is shorter than the {header} byte header")]
    TooShort { len: usize, header: usize },
    /// A rows, cols or channels value exceeds `u32::MAX`.
    #[error("{name} = {value} does not fit a 32-bit header field")]
    DimensionOverflow { name: &'static str, value: usize },
    /// Byte size of the shape is not representable in `usize`.
    #[error("serialized size overflows usize")]
    SizeOverflow,
    /// Source bytes do not match the length its shape implies.
    #[error("source holds {actual} bytes but its shape requires {expected}")]
    SourceLength { expected: usize, actual: usize },
    /// Header rows or cols differ from a fixed destination dimension.
    #[error("header {field} is {actual}, destination requires {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: u32,
        actual: u32,
    },
    /// Header depth code differs from the destination element type.
    #[error("header depth {actual} does not match element depth {expected}")]
    DepthMismatch { expected: u32, actual: u32 },
    /// Header depth code names no known element type.
    #[error("unknown depth code {0}")]
    UnknownDepth(u32),
    /// A matrix destination received a multi-channel header.
    #[error("matrices must have one channel, header declares {0}")]
    ChannelMismatch(u32),
    /// Buffer length differs from header size plus declared payload.
    #[error("buffer holds {actual} bytes, header declares {expected}")]
    TotalSize { expected: usize, actual: usize },
    /// Scalar text decode got no input.
    #[error("cannot decode a scalar from an empty string")]
    EmptyString,
    /// Scalar text does not start with an integer.
    #[error("invalid integer text {0:?}")]
    InvalidScalarText(String),
    /// Raw scalar buffer length differs from the element width.
    #[error("scalar buffer is {actual} bytes, element is {expected}")]
    ScalarSize { expected: usize, actual: usize },
    /// The sink could not hold the header.
    #[error("failed to serialize header: {0}")]
    HeaderWrite(BufferError),
    /// The sink could not hold the payload after the header.
    #[error("failed to write payload: {0}")]
    PayloadWrite(BufferError),
    /// Header fields could not be read from the input.
    #[error("failed to deserialize header: {0}")]
    HeaderRead(BufferError),
    /// Reserving the given number of bytes failed.
    #[error("failed to allocate {0} bytes")]
    Allocation(usize),
}

impl ChannelError {
    /// Classifies the error as a contract violation or a soft failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChannelError::HeaderWrite(_)
            | ChannelError::PayloadWrite(_)
            | ChannelError::HeaderRead(_)
            | ChannelError::Allocation(_) => ErrorKind::Soft,
            _ => ErrorKind::ContractViolation,
        }
    }

    /// Shorthand for `kind() == ErrorKind::ContractViolation`.
    pub fn is_contract_violation(&self) -> bool {
        self.kind() == ErrorKind::ContractViolation
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            ChannelError::HeaderWrite(BufferError::Overflow).kind(),
            ErrorKind::Soft
        );
        assert_eq!(ChannelError::Allocation(16).kind(), ErrorKind::Soft);
        assert!(ChannelError::ChannelMismatch(3).is_contract_violation());
        assert!(ChannelError::TotalSize {
            expected: 20,
            actual: 19
        }
        .is_contract_violation());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ChannelError::HeaderRead(BufferError::EndOfBuffer).to_string(),
            "failed to deserialize header: end of buffer"
        );
        assert_eq!(
            ChannelError::ShapeMismatch {
                field: "rows",
                expected: 4,
                actual: 3
            }
            .to_string(),
            "header rows is 3, destination requires 4"
        );
    }
}
