//! Reader for the .npy format
//!
//! Headers are parsed with combinators over the input bytes. Streaming
//! readers consume the magic bytes first and stop there on a mismatch.

mod array;
mod dict;
mod literal;
mod primitives;
mod take;

pub use array::{decode, decode_array};
pub use dict::parse_header_dict;

use crate::error::{Error, FormatError};
use crate::types::{Array, Destination, Header, MAGIC, Version};
use parsicomb::{ByteCursor, Parser};
use primitives::{u8_parser, u16_le, u32_le};
use std::io::{self, Read};
use take::take;
use tracing::debug;

fn eof(section: &'static str) -> Error {
    FormatError::UnexpectedEof { section }.into()
}

fn check_magic(found: &[u8]) -> Result<(), Error> {
    if found != MAGIC {
        let mut magic = [0u8; 6];
        magic.copy_from_slice(found);
        return Err(FormatError::InvalidMagic(magic).into());
    }
    Ok(())
}

/// Bytes before the dictionary text: magic, version and length field
fn prologue_len(version: Version) -> usize {
    MAGIC.len() + 2 + version.length_field_size()
}

/// Parse the header at the start of `bytes`.
///
/// Returns the header and the offset of the data section.
pub fn parse_header(bytes: &[u8]) -> Result<(Header, usize), Error> {
    let cursor = ByteCursor::new(bytes);

    let (magic, cursor) = take(MAGIC.len())
        .parse(cursor)
        .map_err(|_| eof("magic"))?;
    check_magic(magic)?;

    let (major, cursor) = u8_parser().parse(cursor).map_err(|_| eof("version"))?;
    let (minor, cursor) = u8_parser().parse(cursor).map_err(|_| eof("version"))?;
    let version = Version::new(major, minor)?;

    let (header_len, cursor) = match version.length_field_size() {
        2 => u16_le().parse(cursor).map(|(n, c)| (n as usize, c)),
        _ => u32_le().parse(cursor).map(|(n, c)| (n as usize, c)),
    }
    .map_err(|_| eof("header length"))?;

    let (text, _) = take(header_len).parse(cursor).map_err(|_| eof("header"))?;
    let header = parse_header_dict(text, version)?;

    debug!(
        version = %version,
        descr = %header.descr(),
        fortran_order = header.fortran_order(),
        shape = ?header.shape(),
        "parsed array header"
    );
    Ok((header, prologue_len(version) + header_len))
}

fn read_section<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), Error> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => eof(section),
        _ => Error::Io(e),
    })
}

/// Read exactly `len` bytes without trusting `len` for the allocation
fn read_exactly<R: Read + ?Sized>(
    reader: &mut R,
    len: usize,
    section: &'static str,
) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    Read::take(&mut *reader, len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(eof(section));
    }
    Ok(buf)
}

/// Read a header from a stream, leaving it positioned at the data section
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<Header, Error> {
    let mut magic = [0u8; 6];
    read_section(reader, &mut magic, "magic")?;
    check_magic(&magic)?;

    let mut version = [0u8; 2];
    read_section(reader, &mut version, "version")?;
    let version = Version::new(version[0], version[1])?;

    let header_len = if version.length_field_size() == 2 {
        let mut len = [0u8; 2];
        read_section(reader, &mut len, "header length")?;
        u16::from_le_bytes(len) as usize
    } else {
        let mut len = [0u8; 4];
        read_section(reader, &mut len, "header length")?;
        u32::from_le_bytes(len) as usize
    };

    let text = read_exactly(reader, header_len, "header")?;
    let header = parse_header_dict(&text, version)?;

    debug!(
        version = %version,
        descr = %header.descr(),
        fortran_order = header.fortran_order(),
        shape = ?header.shape(),
        "read array header"
    );
    Ok(header)
}

/// Read one array from `reader` into `destination`.
///
/// The header is validated against the destination before any data is
/// read. On error the destination is unchanged.
pub fn read_into<R, D>(reader: &mut R, destination: &mut D) -> Result<(), Error>
where
    R: Read + ?Sized,
    D: Destination + ?Sized,
{
    let header = read_header(reader)?;
    read_body(reader, &header, destination)
}

/// Read the data section described by an already read `header`
pub fn read_body<R, D>(reader: &mut R, header: &Header, destination: &mut D) -> Result<(), Error>
where
    R: Read + ?Sized,
    D: Destination + ?Sized,
{
    let target = destination.target();
    target.check(header)?;
    let data = read_exactly(reader, header.data_len()?, "data")?;
    target.fill(header, &data)
}

/// Read one array of whatever supported type the file holds
pub fn read_array<R: Read + ?Sized>(reader: &mut R) -> Result<Array, Error> {
    let header = read_header(reader)?;
    read_array_body(reader, &header)
}

/// Read the data section described by `header` as an [`Array`]
pub fn read_array_body<R: Read + ?Sized>(reader: &mut R, header: &Header) -> Result<Array, Error> {
    let data = read_exactly(reader, header.data_len()?, "data")?;
    decode_array(header, &data)
}

/// Decode a complete in-memory file into `destination`.
///
/// The data section must be exactly as long as the header declares.
pub fn from_bytes<D: Destination + ?Sized>(bytes: &[u8], destination: &mut D) -> Result<(), Error> {
    let (header, offset) = parse_header(bytes)?;
    decode(&header, &bytes[offset..], destination)
}

/// Decode a complete in-memory file into an [`Array`]
pub fn array_from_bytes(bytes: &[u8]) -> Result<Array, Error> {
    let (header, offset) = parse_header(bytes)?;
    decode_array(&header, &bytes[offset..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArrayData, Layout, Matrix};

    fn v1_file(dict: &str, data: &[u8]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 0]);
        bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        bytes.extend_from_slice(dict.as_bytes());
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn parse_v1_header() {
        let dict = "{'descr': '<i2', 'fortran_order': False, 'shape': (2,), }  \n";
        let bytes = v1_file(dict, &[1, 0, 2, 0]);
        let (header, offset) = parse_header(&bytes).unwrap();
        assert_eq!(header.version(), Version::V1_0);
        assert_eq!(offset, 10 + dict.len());

        let mut out: Vec<i16> = Vec::new();
        from_bytes(&bytes, &mut out).unwrap();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn stream_and_slice_agree() {
        let dict = "{'descr': '>u2', 'fortran_order': True, 'shape': (2, 2)}\n";
        let bytes = v1_file(dict, &[0, 1, 0, 2, 0, 3, 0, 4]);

        let from_slice = array_from_bytes(&bytes).unwrap();
        let from_stream = read_array(&mut bytes.as_slice()).unwrap();
        assert_eq!(from_slice, from_stream);
        assert_eq!(*from_slice.data(), ArrayData::U16(vec![1, 3, 2, 4]));
    }

    #[test]
    fn bad_magic_consumes_only_six_bytes() {
        let bytes = b"\x93NUMPX\x01\x00rest of file";
        let mut reader = &bytes[..];
        let err = read_header(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFormat(FormatError::InvalidMagic(_))
        ));
        assert_eq!(reader, &bytes[6..]);
    }

    #[test]
    fn unsupported_version() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[3, 0, 0, 0]);
        assert!(matches!(
            parse_header(&bytes),
            Err(Error::InvalidFormat(FormatError::UnsupportedVersion { major: 3, .. }))
        ));
    }

    #[test]
    fn truncated_input() {
        let dict = "{'descr': '<f8', 'fortran_order': False, 'shape': (4,)}\n";
        let bytes = v1_file(dict, &[0u8; 16]);

        let mut out: Vec<f64> = Vec::new();
        let err = read_into(&mut bytes.as_slice(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFormat(FormatError::UnexpectedEof { section: "data" })
        ));
        assert!(out.is_empty());

        assert!(matches!(
            parse_header(&bytes[..20]),
            Err(Error::InvalidFormat(FormatError::UnexpectedEof { section: "header" }))
        ));
        assert!(matches!(
            read_header(&mut &bytes[..3]),
            Err(Error::InvalidFormat(FormatError::UnexpectedEof { section: "magic" }))
        ));
    }

    #[test]
    fn trailing_bytes_are_a_size_mismatch() {
        let dict = "{'descr': '|u1', 'fortran_order': False, 'shape': (2,)}\n";
        let bytes = v1_file(dict, &[1, 2, 3]);
        let mut out: Vec<u8> = Vec::new();
        assert!(matches!(
            from_bytes(&bytes, &mut out),
            Err(Error::InvalidFormat(FormatError::DataSizeMismatch { expected: 2, actual: 3 }))
        ));
    }

    #[test]
    fn shape_checked_before_data_is_read() {
        let dict = "{'descr': '<i4', 'fortran_order': False, 'shape': (2, 3)}\n";
        let bytes = v1_file(dict, &[]);
        let mut m: Matrix<i32> = Matrix::filled(3, 2, Layout::RowMajor, 0).unwrap();
        assert!(matches!(
            read_into(&mut bytes.as_slice(), &mut m),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
