//! Writer for the .npy format
//!
//! Output is always little-endian and row-major, with the data section
//! aligned to 16 bytes.

mod array;
mod header;

pub use array::{encode_array_data, encode_view};
pub use header::encode_header;

use crate::error::Error;
use crate::types::{Array, Element, Header, Source, Version, check_count};
use std::io::Write;
use tracing::debug;

/// Options controlling the written header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub version: Version,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format version of the written header; 2.0 unless set
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }
}

fn write_parts<W: Write + ?Sized>(
    writer: &mut W,
    header: &Header,
    data: &[u8],
) -> Result<(), Error> {
    let prologue = encode_header(header)?;
    debug!(
        version = %header.version(),
        descr = %header.descr(),
        shape = ?header.shape(),
        header_len = prologue.len(),
        data_len = data.len(),
        "writing array"
    );
    writer.write_all(&prologue)?;
    writer.write_all(data)?;
    Ok(())
}

/// Write `source` as a complete array file with default options
pub fn write<W, S>(writer: &mut W, source: &S) -> Result<(), Error>
where
    W: Write + ?Sized,
    S: Source + ?Sized,
{
    write_with(writer, source, WriteOptions::default())
}

/// Write `source` as a complete array file
pub fn write_with<W, S>(writer: &mut W, source: &S, options: WriteOptions) -> Result<(), Error>
where
    W: Write + ?Sized,
    S: Source + ?Sized,
{
    let (shape, data) = encode_view(source.view());
    let header = Header::new(<S::Elem as Element>::SCALAR.descriptor(), false, shape)
        .with_version(options.version);
    write_parts(writer, &header, &data)
}

/// Encode `source` as the bytes of a complete array file
pub fn to_bytes<S: Source + ?Sized>(source: &S) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    write(&mut buf, source)?;
    Ok(buf)
}

/// Write a dynamically typed array
pub fn write_array<W: Write + ?Sized>(
    writer: &mut W,
    array: &Array,
    options: WriteOptions,
) -> Result<(), Error> {
    check_count(array.shape(), array.data().len())?;
    let header = Header::new(array.descr(), false, array.shape().to_vec())
        .with_version(options.version);
    write_parts(writer, &header, &encode_array_data(array))
}

/// Encode a dynamically typed array as file bytes
pub fn array_to_bytes(array: &Array) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    write_array(&mut buf, array, WriteOptions::default())?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::types::{ALIGNMENT, Layout, MAGIC, Matrix};

    #[test]
    fn header_then_data() {
        let bytes = to_bytes(&vec![1.5f64, -2.0]).unwrap();
        assert_eq!(&bytes[0..6], MAGIC);
        assert_eq!(&bytes[6..8], &[2, 0]);

        let data_start = bytes.len() - 16;
        assert_eq!(data_start % ALIGNMENT, 0);
        assert_eq!(&bytes[data_start..data_start + 8], &1.5f64.to_le_bytes());
    }

    #[test]
    fn version_option() {
        let mut buf = Vec::new();
        let options = WriteOptions::new().version(Version::V1_0);
        write_with(&mut buf, &[1u8, 2, 3], options).unwrap();
        assert_eq!(&buf[6..8], &[1, 0]);

        let (header, _) = parser::parse_header(&buf).unwrap();
        assert_eq!(header.version(), Version::V1_0);
    }

    #[test]
    fn matrix_roundtrip_preserves_values() {
        let m = Matrix::from_rows(&[vec![1i64, 2, 3], vec![4, 5, 6]]).unwrap();
        let bytes = to_bytes(&m).unwrap();

        let mut back: Matrix<i64> = Matrix::empty(Layout::ColumnMajor);
        parser::from_bytes(&bytes, &mut back).unwrap();
        assert_eq!(back.rows(), 2);
        assert_eq!(back.cols(), 3);
        assert_eq!(back.row(1), Some(vec![4, 5, 6]));
    }

    #[test]
    fn dynamic_array_roundtrip() {
        let arr = Array::from_values(vec![2, 2], vec![1u16, 2, 3, 4]).unwrap();
        let bytes = array_to_bytes(&arr).unwrap();
        assert_eq!(parser::array_from_bytes(&bytes).unwrap(), arr);
    }

    #[test]
    fn write_failure_is_io_error() {
        struct Full;

        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        assert!(matches!(write(&mut Full, &5u8), Err(Error::Io(_))));
    }
}
