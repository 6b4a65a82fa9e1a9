//! Rust scalar types that can be stored in an array file

use super::{ArrayData, ScalarType};
use num_complex::{Complex32, Complex64};

mod private {
    pub trait Sealed {}
}

/// A Rust scalar type with a fixed on-disk representation.
///
/// Implemented for `bool`, the fixed-width integers, `f32`, `f64`,
/// [`Complex32`] and [`Complex64`]. The set is closed.
pub trait Element: Copy + PartialEq + Default + std::fmt::Debug + private::Sealed + 'static {
    const SCALAR: ScalarType;

    /// Decode one element from exactly `SCALAR.width()` bytes
    fn read(bytes: &[u8], little_endian: bool) -> Self;

    /// Append the little-endian encoding of `self`
    fn write_le(self, out: &mut Vec<u8>);

    fn into_data(values: Vec<Self>) -> ArrayData;

    fn from_data(data: &ArrayData) -> Option<&[Self]>;
}

macro_rules! impl_primitive {
    ($($t:ty => $scalar:ident),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Element for $t {
                const SCALAR: ScalarType = ScalarType::$scalar;

                fn read(bytes: &[u8], little_endian: bool) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    if little_endian {
                        <$t>::from_le_bytes(raw)
                    } else {
                        <$t>::from_be_bytes(raw)
                    }
                }

                fn write_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn into_data(values: Vec<Self>) -> ArrayData {
                    ArrayData::$scalar(values)
                }

                fn from_data(data: &ArrayData) -> Option<&[Self]> {
                    match data {
                        ArrayData::$scalar(values) => Some(values),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_primitive! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl private::Sealed for bool {}

impl Element for bool {
    const SCALAR: ScalarType = ScalarType::Bool;

    fn read(bytes: &[u8], _little_endian: bool) -> Self {
        bytes[0] != 0
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }

    fn into_data(values: Vec<Self>) -> ArrayData {
        ArrayData::Bool(values)
    }

    fn from_data(data: &ArrayData) -> Option<&[Self]> {
        match data {
            ArrayData::Bool(values) => Some(values),
            _ => None,
        }
    }
}

// Byte order applies to each component, not to the whole element.
macro_rules! impl_complex {
    ($($t:ty => $part:ty, $scalar:ident),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Element for $t {
                const SCALAR: ScalarType = ScalarType::$scalar;

                fn read(bytes: &[u8], little_endian: bool) -> Self {
                    let half = bytes.len() / 2;
                    let re = <$part as Element>::read(&bytes[..half], little_endian);
                    let im = <$part as Element>::read(&bytes[half..], little_endian);
                    <$t>::new(re, im)
                }

                fn write_le(self, out: &mut Vec<u8>) {
                    self.re.write_le(out);
                    self.im.write_le(out);
                }

                fn into_data(values: Vec<Self>) -> ArrayData {
                    ArrayData::$scalar(values)
                }

                fn from_data(data: &ArrayData) -> Option<&[Self]> {
                    match data {
                        ArrayData::$scalar(values) => Some(values),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_complex! {
    Complex32 => f32, Complex32,
    Complex64 => f64, Complex64,
}

/// Run `$body` with `$T` bound to the Rust type of a runtime [`ScalarType`].
macro_rules! with_element_type {
    ($scalar:expr, |$T:ident| $body:expr) => {{
        use $crate::types::ScalarType as Scalar;
        match $scalar {
            Scalar::Bool => {
                type $T = bool;
                $body
            }
            Scalar::I8 => {
                type $T = i8;
                $body
            }
            Scalar::I16 => {
                type $T = i16;
                $body
            }
            Scalar::I32 => {
                type $T = i32;
                $body
            }
            Scalar::I64 => {
                type $T = i64;
                $body
            }
            Scalar::U8 => {
                type $T = u8;
                $body
            }
            Scalar::U16 => {
                type $T = u16;
                $body
            }
            Scalar::U32 => {
                type $T = u32;
                $body
            }
            Scalar::U64 => {
                type $T = u64;
                $body
            }
            Scalar::F32 => {
                type $T = f32;
                $body
            }
            Scalar::F64 => {
                type $T = f64;
                $body
            }
            Scalar::Complex32 => {
                type $T = ::num_complex::Complex32;
                $body
            }
            Scalar::Complex64 => {
                type $T = ::num_complex::Complex64;
                $body
            }
        }
    }};
}

pub(crate) use with_element_type;
