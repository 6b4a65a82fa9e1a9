//! Array data serialization

use crate::types::{Array, Element, SourceView, with_element_type};

fn encode_values<T: Element>(values: &[T], out: &mut Vec<u8>) {
    out.reserve(values.len() * T::SCALAR.width());
    for &value in values {
        value.write_le(out);
    }
}

/// Shape and little-endian row-major data of a source
pub fn encode_view<T: Element>(view: SourceView<'_, T>) -> (Vec<u64>, Vec<u8>) {
    let mut data = Vec::new();
    let shape = match view {
        SourceView::Scalar(value) => {
            value.write_le(&mut data);
            vec![]
        }
        SourceView::Flat(values) => {
            encode_values(values, &mut data);
            vec![values.len() as u64]
        }
        SourceView::Matrix(m) => {
            encode_values(&m.to_row_major(), &mut data);
            vec![m.rows() as u64, m.cols() as u64]
        }
    };
    (shape, data)
}

/// Little-endian row-major data of a dynamic array
pub fn encode_array_data(array: &Array) -> Vec<u8> {
    let mut data = Vec::new();
    with_element_type!(array.data().scalar_type(), |T| {
        encode_values::<T>(array.values::<T>().unwrap_or(&[]), &mut data)
    });
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Layout, Matrix};
    use num_complex::Complex32;

    #[test]
    fn scalar_has_empty_shape() {
        let (shape, data) = encode_view(SourceView::Scalar(7i16));
        assert!(shape.is_empty());
        assert_eq!(data, vec![7, 0]);
    }

    #[test]
    fn flat_values() {
        let (shape, data) = encode_view(SourceView::Flat(&[1u32, 256][..]));
        assert_eq!(shape, vec![2]);
        assert_eq!(data, vec![1, 0, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn column_major_matrix_is_written_row_major() {
        // [[1, 2, 3], [4, 5, 6]] stored column by column
        let m = Matrix::new(2, 3, Layout::ColumnMajor, vec![1u8, 4, 2, 5, 3, 6]).unwrap();
        let (shape, data) = encode_view(SourceView::Matrix(&m));
        assert_eq!(shape, vec![2, 3]);
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn complex_parts_in_order() {
        let (_, data) = encode_view(SourceView::Scalar(Complex32::new(1.0, -2.0)));
        assert_eq!(&data[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&data[4..8], &(-2.0f32).to_le_bytes());
    }

    #[test]
    fn dynamic_array() {
        let arr = Array::from_values(vec![2], vec![true, false]).unwrap();
        assert_eq!(encode_array_data(&arr), vec![1, 0]);
    }
}
