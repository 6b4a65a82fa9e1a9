//! Header dictionary parsing

use super::literal::{Literal, literal, string_literal, symbol, whitespace};
use super::take::{peek, syntax_error};
use crate::error::{FormatError, UnsupportedType};
use crate::types::{Header, TypeDescriptor, Version};
use parsicomb::{ByteCursor, Parser, ParsicombError};

/// Parse `{key: value, ...}` followed only by whitespace
pub fn parse_dict<'a>() -> impl Parser<
    'a,
    Cursor = ByteCursor<'a>,
    Output = Vec<(&'a str, Literal<'a>)>,
    Error = ParsicombError<'a>,
> {
    DictParser
}

struct DictParser;

impl<'a> Parser<'a> for DictParser {
    type Cursor = ByteCursor<'a>;
    type Output = Vec<(&'a str, Literal<'a>)>;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let ((), cursor) = whitespace().parse(cursor)?;
        let ((), cursor) = symbol(b'{').parse(cursor)?;
        let ((), mut cursor) = whitespace().parse(cursor)?;

        let mut entries = Vec::new();
        while peek(&cursor) != Some(b'}') {
            let (key, next) = string_literal().parse(cursor)?;
            let ((), next) = whitespace().parse(next)?;
            let ((), next) = symbol(b':').parse(next)?;
            let ((), next) = whitespace().parse(next)?;
            let (value, next) = literal().parse(next)?;
            entries.push((key, value));

            let ((), next) = whitespace().parse(next)?;
            cursor = match peek(&next) {
                Some(b',') => {
                    let ((), next) = symbol(b',').parse(next)?;
                    whitespace().parse(next)?.1
                }
                Some(b'}') => next,
                _ => return Err(syntax_error(&next, "expected ',' or '}'")),
            };
        }

        let ((), cursor) = symbol(b'}').parse(cursor)?;
        let ((), cursor) = whitespace().parse(cursor)?;
        if peek(&cursor).is_some() {
            return Err(syntax_error(&cursor, "trailing characters after dictionary"));
        }
        Ok((entries, cursor))
    }
}

/// Parse dictionary text into a [`Header`]. All three keys are required;
/// unknown or repeated keys are rejected.
pub fn parse_header_dict(text: &[u8], version: Version) -> Result<Header, FormatError> {
    if !text.is_ascii() {
        return Err(FormatError::Syntax("header text is not ASCII".into()));
    }
    let (entries, _) = parse_dict().parse(ByteCursor::new(text))?;

    let mut descr = None;
    let mut fortran_order = None;
    let mut shape = None;

    for (key, value) in entries {
        let slot = match key {
            "descr" => &mut descr,
            "fortran_order" => &mut fortran_order,
            "shape" => &mut shape,
            other => return Err(FormatError::UnknownKey(other.to_string())),
        };
        if slot.replace(value).is_some() {
            return Err(FormatError::DuplicateKey(key.to_string()));
        }
    }

    let descr = descr.ok_or(FormatError::MissingKey("descr"))?;
    let fortran_order = fortran_order.ok_or(FormatError::MissingKey("fortran_order"))?;
    let shape = shape.ok_or(FormatError::MissingKey("shape"))?;

    let fortran_order = match fortran_order {
        Literal::Bool(b) => b,
        other => {
            return Err(FormatError::InvalidValue {
                key: "fortran_order",
                found: other.describe(),
            });
        }
    };
    let shape = match shape {
        Literal::Tuple(dims) => dims,
        other => {
            return Err(FormatError::InvalidValue {
                key: "shape",
                found: other.describe(),
            });
        }
    };
    let descr = match descr {
        Literal::Str(token) => TypeDescriptor::parse(token)?,
        Literal::Other(raw) => return Err(UnsupportedType::new(raw).into()),
        other => {
            return Err(FormatError::InvalidValue {
                key: "descr",
                found: other.describe(),
            });
        }
    };

    Ok(Header::new(descr, fortran_order, shape).with_version(version))
}
