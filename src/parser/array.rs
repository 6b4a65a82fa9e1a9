//! Array data decoding into typed destinations

use crate::error::{Error, FormatError};
use crate::types::{
    Array, Destination, Element, Header, Layout, Target, reorder, with_element_type,
};
use tracing::trace;

fn check_type<T: Element>(header: &Header) -> Result<(), Error> {
    let found = header.descr();
    if found.scalar_type() != T::SCALAR {
        return Err(Error::TypeMismatch {
            expected: T::SCALAR,
            found,
        });
    }
    Ok(())
}

fn check_data_len(header: &Header, actual: usize) -> Result<(), Error> {
    let expected = header.data_len()?;
    if actual != expected {
        return Err(FormatError::DataSizeMismatch {
            expected: expected as u64,
            actual: actual as u64,
        }
        .into());
    }
    Ok(())
}

/// Elements in on-disk order, byte-swapped to native values
fn storage_values<T: Element>(header: &Header, data: &[u8]) -> Vec<T> {
    let descr = header.descr();
    let little = descr.byte_order().is_little_endian();
    data.chunks_exact(descr.width())
        .map(|chunk| T::read(chunk, little))
        .collect()
}

/// Elements in logical row-major order
pub(crate) fn logical_values<T: Element>(header: &Header, data: &[u8]) -> Result<Vec<T>, Error> {
    let values = storage_values(header, data);
    if header.fortran_order() && header.shape().len() >= 2 {
        trace!(shape = ?header.shape(), "reordering fortran-ordered data to row-major");
        return Ok(reorder(&values, &header.shape_usize()?, true));
    }
    Ok(values)
}

impl<T: Element> Target<'_, T> {
    /// Validate `header` against this destination without touching it
    pub(crate) fn check(&self, header: &Header) -> Result<(), Error> {
        check_type::<T>(header)?;
        header.data_len()?;

        let shape = header.shape();
        let count = header.element_count()?;
        let fits = match self {
            Target::Scalar(_) => shape.is_empty(),
            Target::Growable(_) => !shape.is_empty(),
            Target::Fixed(slice) => !shape.is_empty() && count == slice.len(),
            Target::Matrix(m) => {
                shape.len() == 2
                    && (m.is_unshaped()
                        || (shape[0] == m.rows() as u64 && shape[1] == m.cols() as u64))
            }
        };
        if fits {
            return Ok(());
        }

        let expected = match self {
            Target::Scalar(_) => vec![],
            Target::Growable(_) => vec![count as u64],
            Target::Fixed(slice) => vec![slice.len() as u64],
            Target::Matrix(m) => vec![m.rows() as u64, m.cols() as u64],
        };
        Err(Error::DimensionMismatch {
            expected,
            found: shape.to_vec(),
        })
    }

    /// Fill from a checked header and its complete data section
    pub(crate) fn fill(self, header: &Header, data: &[u8]) -> Result<(), Error> {
        match self {
            Target::Scalar(slot) => {
                if let Some(value) = storage_values::<T>(header, data).first() {
                    *slot = *value;
                }
            }
            Target::Growable(vec) => *vec = logical_values(header, data)?,
            Target::Fixed(slice) => slice.copy_from_slice(&logical_values(header, data)?),
            Target::Matrix(m) => {
                let dims = header.shape_usize()?;
                let (rows, cols) = (dims[0], dims[1]);
                let values = storage_values::<T>(header, data);
                let values = match (m.layout(), header.fortran_order()) {
                    (Layout::RowMajor, false) | (Layout::ColumnMajor, true) => values,
                    (Layout::RowMajor, true) => {
                        trace!(rows, cols, "transposing column-major data into row-major matrix");
                        reorder(&values, &dims, true)
                    }
                    (Layout::ColumnMajor, false) => {
                        trace!(rows, cols, "transposing row-major data into column-major matrix");
                        reorder(&values, &dims, false)
                    }
                };
                m.replace(rows, cols, values);
            }
        }
        Ok(())
    }
}

/// Decode a complete data section into `destination`.
///
/// Type, shape and data length are all checked before the destination
/// is written; on error it is left untouched.
pub fn decode<D: Destination + ?Sized>(
    header: &Header,
    data: &[u8],
    destination: &mut D,
) -> Result<(), Error> {
    let target = destination.target();
    target.check(header)?;
    check_data_len(header, data.len())?;
    target.fill(header, data)
}

/// Decode a complete data section into a dynamically typed [`Array`]
pub fn decode_array(header: &Header, data: &[u8]) -> Result<Array, Error> {
    check_data_len(header, data.len())?;
    with_element_type!(header.descr().scalar_type(), |T| {
        let values: Vec<T> = logical_values(header, data)?;
        Array::from_values(header.shape().to_vec(), values)
    })
}
