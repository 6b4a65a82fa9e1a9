//! Fixed-width integers of the file prologue: version bytes and the
//! little-endian header length

use super::take::take;
use parsicomb::map::MapExt;
use parsicomb::{ByteCursor, Parser, ParsicombError, byte::byte};

/// Parse a u8
pub fn u8_parser<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = u8, Error = ParsicombError<'a>> {
    byte()
}

/// Parse a u16 (little-endian)
pub fn u16_le<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = u16, Error = ParsicombError<'a>> {
    take(2).map(|bytes: &[u8]| u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Parse a u32 (little-endian)
pub fn u32_le<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = u32, Error = ParsicombError<'a>> {
    take(4).map(|bytes: &[u8]| u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
