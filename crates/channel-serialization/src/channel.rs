//! One serialization contract for every channel type.
//!
//! Scalars, matrices and images each have their own free functions; these
//! traits let channel containers store and restore any of them uniformly.
//! For scalars the string form is decimal text and the buffer form is raw
//! bytes, so the two are not interchangeable.

use crate::depth::Element;
use crate::error::Result;
use crate::image::{
    deserialize_array_from_buffer, deserialize_array_from_string, serialize_array_to_buffer,
    serialize_array_to_string, ChannelImage,
};
use crate::scalar::{
    deserialize_scalar_from_buffer, deserialize_scalar_from_string, serialize_scalar_to_buffer,
    serialize_scalar_to_string,
};

/// Values that can be written to a channel.
///
/// Scalars use the text and raw scalar codecs; matrices and images use the
/// header plus payload layout.
pub trait ChannelSerialize {
    /// Replaces `string` with the serialized form. On failure `string` is
    /// left empty.
    fn serialize_to_string(&self, string: &mut Vec<u8>) -> Result<()>;

    /// Serializes into a new buffer owned by the caller.
    fn serialize_to_buffer(&self) -> Result<Box<[u8]>>;
}

/// Values that can be read back in place from a channel.
pub trait ChannelDeserialize {
    /// Decodes `string` into `self`.
    fn deserialize_from_string(&mut self, string: &[u8]) -> Result<()>;

    /// Decodes `buffer` into `self`. Fixed-shape destinations reject
    /// mismatching headers; dynamic ones are resized.
    fn deserialize_from_buffer(&mut self, buffer: &[u8]) -> Result<()>;
}

macro_rules! impl_scalar_channel {
    ($($ty:ty),*) => {
        $(
            impl ChannelSerialize for $ty {
                fn serialize_to_string(&self, string: &mut Vec<u8>) -> Result<()> {
                    serialize_scalar_to_string(self, string)
                }

                fn serialize_to_buffer(&self) -> Result<Box<[u8]>> {
                    serialize_scalar_to_buffer(self, std::mem::size_of::<$ty>())
                }
            }

            impl ChannelDeserialize for $ty {
                fn deserialize_from_string(&mut self, string: &[u8]) -> Result<()> {
                    *self = deserialize_scalar_from_string(string)?;
                    Ok(())
                }

                fn deserialize_from_buffer(&mut self, buffer: &[u8]) -> Result<()> {
                    *self = deserialize_scalar_from_buffer(buffer)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_scalar_channel!(u8, i8, u16, i16, i32, f32, f64);

impl ChannelSerialize for ChannelImage {
    fn serialize_to_string(&self, string: &mut Vec<u8>) -> Result<()> {
        serialize_array_to_string(self, string)
    }

    fn serialize_to_buffer(&self) -> Result<Box<[u8]>> {
        serialize_array_to_buffer(self)
    }
}

impl ChannelDeserialize for ChannelImage {
    fn deserialize_from_string(&mut self, string: &[u8]) -> Result<()> {
        deserialize_array_from_string(string, self)
    }

    fn deserialize_from_buffer(&mut self, buffer: &[u8]) -> Result<()> {
        deserialize_array_from_buffer(buffer, self)
    }
}

#[cfg(feature = "nalgebra")]
mod impl_nalgebra {
    use nalgebra::allocator::Allocator;
    use nalgebra::storage::{IsContiguous, RawStorage};
    use nalgebra::{DefaultAllocator, Dim, Matrix, OMatrix};

    use super::{ChannelDeserialize, ChannelSerialize, Element, Result};
    use crate::matrix::{
        deserialize_matrix_from_buffer, deserialize_matrix_from_string,
        serialize_matrix_to_buffer, serialize_matrix_to_string,
    };

    impl<T, R, C, S> ChannelSerialize for Matrix<T, R, C, S>
    where
        T: Element,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C> + IsContiguous,
    {
        fn serialize_to_string(&self, string: &mut Vec<u8>) -> Result<()> {
            serialize_matrix_to_string(self, string)
        }

        fn serialize_to_buffer(&self) -> Result<Box<[u8]>> {
            serialize_matrix_to_buffer(self)
        }
    }

    impl<T, R, C> ChannelDeserialize for OMatrix<T, R, C>
    where
        T: Element,
        R: Dim,
        C: Dim,
        DefaultAllocator: Allocator<R, C>,
    {
        fn deserialize_from_string(&mut self, string: &[u8]) -> Result<()> {
            deserialize_matrix_from_string(string, self)
        }

        fn deserialize_from_buffer(&mut self, buffer: &[u8]) -> Result<()> {
            deserialize_matrix_from_buffer(buffer, self)
        }
    }
}
