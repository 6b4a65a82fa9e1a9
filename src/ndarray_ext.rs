//! ndarray integration
//!
//! Conversions between [`Array`] and ndarray's dynamic-dimension arrays, and
//! direct reading and writing of ndarray values.
//!
//! Enable with the `ndarray` feature flag.

use crate::error::{Error, FormatError};
use crate::parser;
use crate::types::{Array, Destination, Element, Target};
use crate::writer::{self, WriteOptions};
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use std::io::{Read, Write};

impl Array {
    /// Copy an ndarray of any layout, in logical row-major order
    pub fn from_ndarray<T, S, D>(arr: &ArrayBase<S, D>) -> Self
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        Array::from_parts(
            arr.shape().iter().map(|&d| d as u64).collect(),
            T::into_data(arr.iter().copied().collect()),
        )
    }

    /// Convert to an ndarray ArrayD
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, Error> {
        let values = self.values::<T>().ok_or_else(|| Error::TypeMismatch {
            expected: T::SCALAR,
            found: self.descr(),
        })?;

        let shape: Vec<usize> = self
            .shape()
            .iter()
            .map(|&d| usize::try_from(d))
            .collect::<Result<_, _>>()
            .map_err(|_| FormatError::ShapeOverflow(self.shape().to_vec()))?;

        ArrayD::from_shape_vec(IxDyn(&shape), values.to_vec()).map_err(|_| {
            Error::DimensionMismatch {
                expected: self.shape().to_vec(),
                found: vec![values.len() as u64],
            }
        })
    }
}

struct ScalarSlot<T>(T);

impl<T: Element> Destination for ScalarSlot<T> {
    type Elem = T;

    fn target(&mut self) -> Target<'_, T> {
        Target::Scalar(&mut self.0)
    }
}

/// Read one array file into an ndarray of element type `T`.
///
/// The element type is checked before any data is read.
pub fn read_ndarray<T: Element, R: Read + ?Sized>(reader: &mut R) -> Result<ArrayD<T>, Error> {
    let header = parser::read_header(reader)?;
    let shape = header.shape_usize()?;

    let values = if shape.is_empty() {
        let mut slot = ScalarSlot(T::default());
        parser::read_body(reader, &header, &mut slot)?;
        vec![slot.0]
    } else {
        let mut values = Vec::new();
        parser::read_body(reader, &header, &mut values)?;
        values
    };

    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| Error::DimensionMismatch {
        expected: header.shape().to_vec(),
        found: vec![],
    })
}

/// Write an ndarray of any layout as a row-major array file
pub fn write_ndarray<W, T, S, D>(writer: &mut W, arr: &ArrayBase<S, D>) -> Result<(), Error>
where
    W: Write + ?Sized,
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    writer::write_array(writer, &Array::from_ndarray(arr), WriteOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArrayData, ScalarType};
    use ndarray::{ShapeBuilder, arr0, array};

    #[test]
    fn roundtrip_2d_i32() {
        let arr = array![[1i32, 2, 3], [4, 5, 6]].into_dyn();
        let converted = Array::from_ndarray(&arr);

        assert_eq!(converted.descr().scalar_type(), ScalarType::I32);
        assert_eq!(converted.shape(), &[2, 3]);

        let back: ArrayD<i32> = converted.to_ndarray().unwrap();
        assert_eq!(arr, back);
    }

    #[test]
    fn fortran_layout_is_copied_logically() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[2, 3]).f(), vec![1u8, 4, 2, 5, 3, 6]).unwrap();
        let converted = Array::from_ndarray(&arr);
        assert_eq!(*converted.data(), ArrayData::U8(vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn dtype_mismatch_error() {
        let converted = Array::from_ndarray(&array![1.0f32, 2.0, 3.0]);
        let result: Result<ArrayD<f64>, _> = converted.to_ndarray();
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn read_and_write() {
        let arr = array![[1.5f64, 2.5], [3.5, 4.5]];
        let mut bytes = Vec::new();
        write_ndarray(&mut bytes, &arr).unwrap();

        let back: ArrayD<f64> = read_ndarray(&mut bytes.as_slice()).unwrap();
        assert_eq!(back, arr.into_dyn());

        let result = read_ndarray::<f32, _>(&mut bytes.as_slice());
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn zero_dimensional() {
        let mut bytes = Vec::new();
        write_ndarray(&mut bytes, &arr0(9i64)).unwrap();
        let back: ArrayD<i64> = read_ndarray(&mut bytes.as_slice()).unwrap();
        assert_eq!(back.ndim(), 0);
        assert_eq!(back.first(), Some(&9));
    }
}
