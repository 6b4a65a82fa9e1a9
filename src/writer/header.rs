//! Header serialization

use crate::error::{Error, FormatError};
use crate::types::{ALIGNMENT, Header, MAGIC, Version, shape_literal};

/// Encode magic, version, length field and padded dictionary.
///
/// The result length is a multiple of [`ALIGNMENT`].
pub fn encode_header(header: &Header) -> Result<Vec<u8>, Error> {
    let version = header.version();
    Version::new(version.major(), version.minor())?;
    let dict = format!(
        "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
        header.descr().token(),
        if header.fortran_order() { "True" } else { "False" },
        shape_literal(header.shape())
    );

    let prologue = MAGIC.len() + 2 + version.length_field_size();
    let unpadded = prologue + dict.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    let header_len = dict.len() + padding + 1;
    if header_len > version.max_header_len() {
        return Err(FormatError::HeaderTooLong {
            len: header_len,
            version,
        }
        .into());
    }

    let mut out = Vec::with_capacity(prologue + header_len);
    out.extend_from_slice(MAGIC);
    out.push(version.major());
    out.push(version.minor());
    if version.length_field_size() == 2 {
        out.extend_from_slice(&(header_len as u16).to_le_bytes());
    } else {
        out.extend_from_slice(&(header_len as u32).to_le_bytes());
    }
    out.extend_from_slice(dict.as_bytes());
    out.resize(out.len() + padding, b' ');
    out.push(b'\n');
    Ok(out)
}
