//! Human-readable rendering of array files
//!
//! Output is one `header:` line followed by one `data:` line with values
//! nested by shape in row-major order:
//!
//! ```text
//! header: Header { version: 2.0, descr: '<f4', fortran_order: false, shape: (2, 3) }
//! data: [[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]
//! ```

use crate::archive::Archive;
use crate::error::Error;
use crate::parser;
use crate::types::{Array, ArrayData, Header};
use num_complex::Complex;
use std::fmt::Debug;
use std::io::{Read, Write};

fn render_plain<T: Debug>(values: &[T]) -> Vec<String> {
    values.iter().map(|v| format!("{:?}", v)).collect()
}

fn render_complex<T: Debug>(values: &[Complex<T>]) -> Vec<String> {
    values
        .iter()
        .map(|c| {
            let im = format!("{:?}", c.im);
            match im.strip_prefix('-') {
                Some(magnitude) => format!("({:?}-{}j)", c.re, magnitude),
                None => format!("({:?}+{}j)", c.re, im),
            }
        })
        .collect()
}

fn render_values(data: &ArrayData) -> Vec<String> {
    match data {
        ArrayData::Bool(v) => render_plain(v),
        ArrayData::I8(v) => render_plain(v),
        ArrayData::I16(v) => render_plain(v),
        ArrayData::I32(v) => render_plain(v),
        ArrayData::I64(v) => render_plain(v),
        ArrayData::U8(v) => render_plain(v),
        ArrayData::U16(v) => render_plain(v),
        ArrayData::U32(v) => render_plain(v),
        ArrayData::U64(v) => render_plain(v),
        ArrayData::F32(v) => render_plain(v),
        ArrayData::F64(v) => render_plain(v),
        ArrayData::Complex32(v) => render_complex(v),
        ArrayData::Complex64(v) => render_complex(v),
    }
}

fn nest(items: &[String], shape: &[u64], out: &mut String) {
    let Some((&outer, inner)) = shape.split_first() else {
        if let Some(item) = items.first() {
            out.push_str(item);
        }
        return;
    };

    out.push('[');
    if outer > 0 {
        let stride = items.len() / outer as usize;
        for i in 0..outer as usize {
            if i > 0 {
                out.push_str(", ");
            }
            nest(&items[i * stride..(i + 1) * stride], inner, out);
        }
    }
    out.push(']');
}

/// Values of `array` nested by its shape
pub fn render(array: &Array) -> String {
    let mut out = String::new();
    nest(&render_values(array.data()), array.shape(), &mut out);
    out
}

fn write_dump<W: Write + ?Sized>(out: &mut W, header: &Header, array: &Array) -> Result<(), Error> {
    writeln!(out, "header: {}", header)?;
    writeln!(out, "data: {}", render(array))?;
    Ok(())
}

/// Dump one array file read from a stream
pub fn dump<W, R>(out: &mut W, reader: &mut R) -> Result<(), Error>
where
    W: Write + ?Sized,
    R: Read + ?Sized,
{
    let header = parser::read_header(reader)?;
    let array = parser::read_array_body(reader, &header)?;
    write_dump(out, &header, &array)
}

/// Dump one complete in-memory array file
pub fn dump_bytes<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> Result<(), Error> {
    let (header, offset) = parser::parse_header(bytes)?;
    let array = parser::decode_array(&header, &bytes[offset..])?;
    write_dump(out, &header, &array)
}

/// Dump every entry of an archive in name order.
///
/// An entry that fails to decode is reported as an `error:` line and the
/// remaining entries are still dumped. Only failures writing to `out` abort.
pub fn dump_archive<W, A>(out: &mut W, archive: &mut A) -> Result<(), Error>
where
    W: Write + ?Sized,
    A: Archive + ?Sized,
{
    for name in archive.entry_names() {
        writeln!(out, "entry: {}", name)?;
        let mut rendered = Vec::new();
        let result = archive
            .open_entry(&name)
            .and_then(|mut entry| dump(&mut rendered, &mut *entry));
        match result {
            Ok(()) => out.write_all(&rendered)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    Ok(())
}
