//! Dynamically typed arrays

use super::{Element, ScalarType, TypeDescriptor};
use crate::error::Error;
use num_complex::{Complex32, Complex64};

/// Element storage for an [`Array`], one variant per [`ScalarType`]
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Complex32(Vec<Complex32>),
    Complex64(Vec<Complex64>),
}

impl ArrayData {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ArrayData::Bool(_) => ScalarType::Bool,
            ArrayData::I8(_) => ScalarType::I8,
            ArrayData::I16(_) => ScalarType::I16,
            ArrayData::I32(_) => ScalarType::I32,
            ArrayData::I64(_) => ScalarType::I64,
            ArrayData::U8(_) => ScalarType::U8,
            ArrayData::U16(_) => ScalarType::U16,
            ArrayData::U32(_) => ScalarType::U32,
            ArrayData::U64(_) => ScalarType::U64,
            ArrayData::F32(_) => ScalarType::F32,
            ArrayData::F64(_) => ScalarType::F64,
            ArrayData::Complex32(_) => ScalarType::Complex32,
            ArrayData::Complex64(_) => ScalarType::Complex64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        crate::types::with_element_type!(self.scalar_type(), |T| {
            T::from_data(self).map_or(0, <[T]>::len)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fails with `DimensionMismatch` unless `shape` describes exactly `len`
/// elements
pub(crate) fn check_count(shape: &[u64], len: usize) -> Result<(), Error> {
    let count = shape
        .iter()
        .try_fold(1u64, |acc, &dim| acc.checked_mul(dim));
    if count != Some(len as u64) {
        return Err(Error::DimensionMismatch {
            expected: shape.to_vec(),
            found: vec![len as u64],
        });
    }
    Ok(())
}

/// Owned typed array, values in logical row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<u64>,
    data: ArrayData,
}

impl Array {
    /// Fails with `DimensionMismatch` when `shape` does not describe
    /// exactly `data.len()` elements.
    pub fn new(shape: Vec<u64>, data: ArrayData) -> Result<Self, Error> {
        check_count(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    /// Shape and data from a source that already agrees on the count
    pub(crate) fn from_parts(shape: Vec<u64>, data: ArrayData) -> Self {
        debug_assert!(check_count(&shape, data.len()).is_ok());
        Self { shape, data }
    }

    pub fn from_values<T: Element>(shape: Vec<u64>, values: Vec<T>) -> Result<Self, Error> {
        Self::new(shape, T::into_data(values))
    }

    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn into_parts(self) -> (Vec<u64>, ArrayData) {
        (self.shape, self.data)
    }

    /// Total number of elements
    pub fn num_elements(&self) -> u64 {
        self.data.len() as u64
    }

    /// Little-endian descriptor of the element type
    pub fn descr(&self) -> TypeDescriptor {
        self.data.scalar_type().descriptor()
    }

    /// Borrow the elements as `T`, if that is the stored type
    pub fn values<T: Element>(&self) -> Option<&[T]> {
        T::from_data(&self.data)
    }
}
