//! Binary encoding of sensor channel data.
//!
//! A channel is a dense matrix, an image-like buffer or a single scalar.
//! Arrays serialize as a 16 byte [`HeaderInformation`] (rows, cols, depth,
//! channels) followed by the raw element bytes; decoding verifies the shape
//! and element type before copying the bytes back.
//!
//! # Overview
//!
//! - [`payload`] - Generic codec over raw element bytes
//! - [`matrix`] - nalgebra matrices (feature `nalgebra`, on by default)
//! - [`image`] - Dynamically typed image buffers ([`ChannelImage`])
//! - [`scalar`] - Decimal text and raw byte encodings for scalars
//! - [`ChannelSerialize`] / [`ChannelDeserialize`] - One contract over all of
//!   the above
//!
//! Each encoder has two destinations: a caller-owned byte string that is
//! resized to fit, and a newly allocated `Box<[u8]>` handed to the caller.
//! The byte order is the host's; serialized channels are not portable
//! between machines of different endianness.
//!
//! # Errors
//!
//! Every operation returns [`ChannelError`]. [`ChannelError::kind`] separates
//! contract violations (shape, type or size mismatches; the data is malformed
//! and callers should treat this as fatal) from soft failures such as an
//! allocation that could not be satisfied.
//!
//! # Example
//!
//! ```
//! use channel_serialization::{ChannelDeserialize, ChannelSerialize};
//! use nalgebra::{DMatrix, Matrix2};
//!
//! let matrix = Matrix2::new(1.0f64, 2.0, 3.0, 4.0);
//! let buffer = matrix.serialize_to_buffer().unwrap();
//! assert_eq!(buffer.len(), 16 + 4 * 8);
//!
//! let mut decoded = DMatrix::<f64>::zeros(0, 0);
//! decoded.deserialize_from_buffer(&buffer).unwrap();
//! assert_eq!(decoded, DMatrix::from_column_slice(2, 2, &[1.0, 3.0, 2.0, 4.0]));
//!
//! let mut wrong = Matrix2::<f32>::zeros();
//! let err = wrong.deserialize_from_buffer(&buffer).unwrap_err();
//! assert!(err.is_contract_violation());
//! ```

mod channel;
mod depth;
mod error;
mod header;
mod sink;

pub mod image;
#[cfg(feature = "nalgebra")]
pub mod matrix;
pub mod payload;
pub mod scalar;

pub use channel::{ChannelDeserialize, ChannelSerialize};
pub use depth::{Depth, Element};
pub use error::{ChannelError, ErrorKind, Result};
pub use header::HeaderInformation;
pub use image::{ChannelImage, OpaqueArray, OpaqueArrayMut};
pub use payload::RawPayload;
pub use sink::ByteSink;
