//! nalgebra matrix adapters.
//!
//! Matrices always serialize with one channel and in nalgebra's column-major
//! storage order. Decoding checks every statically sized dimension against
//! the header and resizes the dynamic ones.

use nalgebra::allocator::Allocator;
use nalgebra::storage::{IsContiguous, RawStorage};
use nalgebra::{DefaultAllocator, Dim, Matrix, OMatrix};
use tracing::debug;

use crate::depth::Element;
use crate::error::{ChannelError, Result};
use crate::header::HeaderInformation;
use crate::payload::{check_depth, check_total, encode_into, encode_owned, read_header};

const MATRIX_CHANNELS: usize = 1;

fn matrix_header<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> Result<HeaderInformation>
where
    T: Element,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C> + IsContiguous,
{
    HeaderInformation::for_element::<T>(matrix.nrows(), matrix.ncols(), MATRIX_CHANNELS)
}

/// Serializes a matrix into `string`. On failure `string` is left empty.
pub fn serialize_matrix_to_string<T, R, C, S>(
    matrix: &Matrix<T, R, C, S>,
    string: &mut Vec<u8>,
) -> Result<()>
where
    T: Element,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C> + IsContiguous,
{
    encode_into(
        string,
        matrix_header(matrix),
        bytemuck::cast_slice(matrix.as_slice()),
    )
}

/// Serializes a matrix into a new buffer.
pub fn serialize_matrix_to_buffer<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> Result<Box<[u8]>>
where
    T: Element,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C> + IsContiguous,
{
    let header = matrix_header(matrix)?;
    encode_owned(&header, bytemuck::cast_slice(matrix.as_slice()))
}

fn check_static<D: Dim>(field: &'static str, actual: u32) -> Result<()> {
    match D::try_to_usize() {
        Some(expected) if expected != actual as usize => Err(ChannelError::ShapeMismatch {
            field,
            expected: u32::try_from(expected).unwrap_or(u32::MAX),
            actual,
        }),
        _ => Ok(()),
    }
}

/// Decodes a serialized matrix into `matrix`.
///
/// Statically sized dimensions must match the header; dynamic dimensions
/// are resized to it. The element depth must be `T`'s and the header must
/// declare exactly one channel.
pub fn deserialize_matrix_from_buffer<T, R, C>(
    buffer: &[u8],
    matrix: &mut OMatrix<T, R, C>,
) -> Result<()>
where
    T: Element,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<R, C>,
{
    let header = read_header(buffer)?;
    check_static::<R>("rows", header.rows)?;
    check_static::<C>("cols", header.cols)?;
    check_depth::<T>(&header)?;
    if header.channels != MATRIX_CHANNELS as u32 {
        return Err(ChannelError::ChannelMismatch(header.channels));
    }

    let (rows, cols) = (header.rows as usize, header.cols as usize);
    let payload_len = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(std::mem::size_of::<T>()));
    check_total(buffer, payload_len)?;

    if matrix.shape() != (rows, cols) {
        debug!(
            from_rows = matrix.nrows(),
            from_cols = matrix.ncols(),
            rows,
            cols,
            "resizing matrix for decoded channel"
        );
        *matrix = OMatrix::from_element_generic(
            R::from_usize(rows),
            C::from_usize(cols),
            T::zeroed(),
        );
    }
    let dst: &mut [u8] = bytemuck::cast_slice_mut(matrix.as_mut_slice());
    dst.copy_from_slice(&buffer[HeaderInformation::SIZE..]);
    Ok(())
}

/// Same as [`deserialize_matrix_from_buffer`], for payloads stored in a byte
/// string.
pub fn deserialize_matrix_from_string<T, R, C>(
    string: &[u8],
    matrix: &mut OMatrix<T, R, C>,
) -> Result<()>
where
    T: Element,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<R, C>,
{
    deserialize_matrix_from_buffer(string, matrix)
}
