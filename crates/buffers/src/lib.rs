//! Byte cursor utilities for channel serialization.
//!
//! The channel codec lays its fixed-width header out as host-native `u32`
//! fields followed by raw element bytes. This crate provides the two cursors
//! used for that layout.
//!
//! # Overview
//!
//! - [`Reader`] - Reads from a byte slice with cursor tracking
//! - [`Writer`] - Writes into a caller-sized mutable byte slice
//! - [`print_octets`] - Hex dump for diagnostics
//!
//! # Example
//!
//! ```
//! use channel_buffers::{Reader, Writer};
//!
//! let mut data = [0u8; 8];
//! let mut writer = Writer::new(&mut data);
//! writer.u32(7).unwrap();
//! writer.buf(&[1, 2, 3, 4]).unwrap();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u32().unwrap(), 7);
//! assert_eq!(reader.buf(4).unwrap(), &[1, 2, 3, 4]);
//! ```

mod print_octets;
mod reader;
mod writer;

pub use print_octets::{print_octets, print_octets_default};
pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Attempted to write past the end of the buffer.
    Overflow,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::Overflow => write!(f, "buffer overflow"),
        }
    }
}

impl std::error::Error for BufferError {}
