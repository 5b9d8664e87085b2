//! Element depth tags.
//!
//! Codes follow the OpenCV depth enumeration so that serialized channels stay
//! readable by image tooling that shares the convention. The codec only ever
//! compares codes for equality.

use std::fmt;

/// Primitive element type of a serialized array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// `u8`, code 0.
    U8,
    /// `i8`, code 1.
    I8,
    /// `u16`, code 2.
    U16,
    /// `i16`, code 3.
    I16,
    /// `i32`, code 4.
    I32,
    /// `f32`, code 5.
    F32,
    /// `f64`, code 6.
    F64,
}

impl Depth {
    /// Every depth, in code order.
    pub const ALL: [Depth; 7] = [
        Depth::U8,
        Depth::I8,
        Depth::U16,
        Depth::I16,
        Depth::I32,
        Depth::F32,
        Depth::F64,
    ];

    /// Wire code of this depth.
    pub const fn code(self) -> u32 {
        match self {
            Depth::U8 => 0,
            Depth::I8 => 1,
            Depth::U16 => 2,
            Depth::I16 => 3,
            Depth::I32 => 4,
            Depth::F32 => 5,
            Depth::F64 => 6,
        }
    }

    /// Depth for a wire code, or `None` if the code is unknown.
    pub const fn from_code(code: u32) -> Option<Depth> {
        match code {
            0 => Some(Depth::U8),
            1 => Some(Depth::I8),
            2 => Some(Depth::U16),
            3 => Some(Depth::I16),
            4 => Some(Depth::I32),
            5 => Some(Depth::F32),
            6 => Some(Depth::F64),
            _ => None,
        }
    }

    /// Size in bytes of one element component.
    pub const fn byte_width(self) -> usize {
        match self {
            Depth::U8 | Depth::I8 => 1,
            Depth::U16 | Depth::I16 => 2,
            Depth::I32 | Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Depth::U8 => "8U",
            Depth::I8 => "8S",
            Depth::U16 => "16U",
            Depth::I16 => "16S",
            Depth::I32 => "32S",
            Depth::F32 => "32F",
            Depth::F64 => "64F",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A numeric type that can be stored in a channel.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `i32`, `f32` and `f64`.
pub trait Element:
    bytemuck::Pod + fmt::Debug + fmt::Display + PartialEq + Send + Sync + sealed::Sealed
{
    const DEPTH: Depth;

    /// Narrows an integer the way an `as` cast does.
    fn from_i64(value: i64) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $depth:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const DEPTH: Depth = Depth::$depth;

                #[inline]
                fn from_i64(value: i64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}
