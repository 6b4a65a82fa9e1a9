//! Python literal parsers for the header dictionary

use super::take::{cursor_at, peek, position, syntax_error};
use parsicomb::{ByteCursor, Parser, ParsicombError};

/// A value in the header dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal<'a> {
    Str(&'a str),
    Bool(bool),
    Tuple(Vec<u64>),
    /// Bracketed list or dict, kept as raw text
    Other(&'a str),
}

impl Literal<'_> {
    /// Short rendering for error messages
    pub fn describe(&self) -> String {
        match self {
            Literal::Str(s) => format!("'{}'", s),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Tuple(dims) => format!("{:?}", dims),
            Literal::Other(raw) => (*raw).to_string(),
        }
    }
}

/// Skip spaces, tabs and newlines
pub fn whitespace<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = (), Error = ParsicombError<'a>> {
    Whitespace
}

struct Whitespace;

impl<'a> Parser<'a> for Whitespace {
    type Cursor = ByteCursor<'a>;
    type Output = ();
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let (data, start) = position(&cursor);
        let skipped = data[start..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        Ok(((), cursor_at(data, start + skipped)))
    }
}

/// Match one expected byte
pub fn symbol<'a>(
    expected: u8,
) -> impl Parser<'a, Cursor = ByteCursor<'a>, Output = (), Error = ParsicombError<'a>> {
    Symbol(expected)
}

struct Symbol(u8);

impl<'a> Parser<'a> for Symbol {
    type Cursor = ByteCursor<'a>;
    type Output = ();
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        if peek(&cursor) != Some(self.0) {
            return Err(syntax_error(
                &cursor,
                format!("expected '{}'", self.0 as char),
            ));
        }
        let (data, pos) = position(&cursor);
        Ok(((), cursor_at(data, pos + 1)))
    }
}

/// Single- or double-quoted string without escapes
pub fn string_literal<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = &'a str, Error = ParsicombError<'a>> {
    StringLiteral
}

struct StringLiteral;

impl<'a> Parser<'a> for StringLiteral {
    type Cursor = ByteCursor<'a>;
    type Output = &'a str;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let quote = match peek(&cursor) {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(syntax_error(&cursor, "expected string literal")),
        };
        let (data, pos) = position(&cursor);
        let body_start = pos + 1;

        let body_len = data[body_start..]
            .iter()
            .position(|&b| b == quote || b == b'\\' || b == b'\n')
            .filter(|&len| data[body_start + len] == quote)
            .ok_or_else(|| syntax_error(&cursor, "unterminated or escaped string literal"))?;

        let body = &data[body_start..body_start + body_len];
        let text = std::str::from_utf8(body)
            .map_err(|_| syntax_error(&cursor, "string literal is not ASCII"))?;

        Ok((text, cursor_at(data, body_start + body_len + 1)))
    }
}

/// Any dictionary value
pub fn literal<'a>()
-> impl Parser<'a, Cursor = ByteCursor<'a>, Output = Literal<'a>, Error = ParsicombError<'a>> {
    LiteralParser
}

struct LiteralParser;

impl<'a> Parser<'a> for LiteralParser {
    type Cursor = ByteCursor<'a>;
    type Output = Literal<'a>;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        match peek(&cursor) {
            Some(b'\'' | b'"') => {
                let (s, cursor) = string_literal().parse(cursor)?;
                Ok((Literal::Str(s), cursor))
            }
            Some(b'T' | b'F') => {
                let (b, cursor) = BoolLiteral.parse(cursor)?;
                Ok((Literal::Bool(b), cursor))
            }
            Some(b'(') => {
                let (dims, cursor) = IntTuple.parse(cursor)?;
                Ok((Literal::Tuple(dims), cursor))
            }
            Some(b'[' | b'{') => {
                let (raw, cursor) = Bracketed.parse(cursor)?;
                Ok((Literal::Other(raw), cursor))
            }
            _ => Err(syntax_error(&cursor, "expected a value")),
        }
    }
}

struct BoolLiteral;

impl<'a> Parser<'a> for BoolLiteral {
    type Cursor = ByteCursor<'a>;
    type Output = bool;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let (data, pos) = position(&cursor);
        let rest = &data[pos..];
        let (value, len) = if rest.starts_with(b"True") {
            (true, 4)
        } else if rest.starts_with(b"False") {
            (false, 5)
        } else {
            return Err(syntax_error(&cursor, "expected True or False"));
        };

        let next = rest.get(len).copied();
        if next.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(syntax_error(&cursor, "expected True or False"));
        }
        Ok((value, cursor_at(data, pos + len)))
    }
}

/// Non-negative integer with an optional Python 2 `L` suffix
struct Integer;

impl<'a> Parser<'a> for Integer {
    type Cursor = ByteCursor<'a>;
    type Output = u64;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let (data, pos) = position(&cursor);
        let digits = data[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(syntax_error(&cursor, "expected integer"));
        }

        let value = data[pos..pos + digits]
            .iter()
            .try_fold(0u64, |acc, d| {
                acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
            })
            .ok_or_else(|| syntax_error(&cursor, "integer out of range"))?;

        let mut end = pos + digits;
        if data.get(end) == Some(&b'L') {
            end += 1;
        }
        Ok((value, cursor_at(data, end)))
    }
}

/// `()`, `(3,)`, `(2, 3)`; a trailing comma is optional
struct IntTuple;

impl<'a> Parser<'a> for IntTuple {
    type Cursor = ByteCursor<'a>;
    type Output = Vec<u64>;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let ((), cursor) = symbol(b'(').parse(cursor)?;
        let ((), mut cursor) = whitespace().parse(cursor)?;

        let mut dims = Vec::new();
        loop {
            if peek(&cursor) == Some(b')') {
                break;
            }
            let (dim, next) = Integer.parse(cursor)?;
            dims.push(dim);
            let ((), next) = whitespace().parse(next)?;
            match peek(&next) {
                Some(b',') => {
                    let ((), next) = symbol(b',').parse(next)?;
                    let ((), next) = whitespace().parse(next)?;
                    cursor = next;
                }
                Some(b')') => {
                    cursor = next;
                    break;
                }
                _ => return Err(syntax_error(&next, "expected ',' or ')' in shape")),
            }
        }

        let ((), cursor) = symbol(b')').parse(cursor)?;
        Ok((dims, cursor))
    }
}

/// Balanced `[...]` or `{...}` span, quotes respected
struct Bracketed;

impl<'a> Parser<'a> for Bracketed {
    type Cursor = ByteCursor<'a>;
    type Output = &'a str;
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let (data, start) = position(&cursor);
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (offset, &b) in data[start..].iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'\'' | b'"') => quote = Some(b),
                (None, b'[' | b'{' | b'(') => depth += 1,
                (None, b']' | b'}' | b')') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let end = start + offset + 1;
                        let raw = std::str::from_utf8(&data[start..end])
                            .map_err(|_| syntax_error(&cursor, "value is not ASCII"))?;
                        return Ok((raw, cursor_at(data, end)));
                    }
                }
                _ => {}
            }
        }
        Err(syntax_error(&cursor, "unbalanced brackets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_literal(text: &str) -> Literal<'_> {
        let (value, _) = literal().parse(ByteCursor::new(text.as_bytes())).unwrap();
        value
    }

    #[test]
    fn strings() {
        assert_eq!(parse_literal("'<f8'"), Literal::Str("<f8"));
        assert_eq!(parse_literal("\"|b1\""), Literal::Str("|b1"));
        assert!(literal().parse(ByteCursor::new(b"'<f8")).is_err());
        assert!(literal().parse(ByteCursor::new(b"'a\\'b'")).is_err());
    }

    #[test]
    fn bools() {
        assert_eq!(parse_literal("True"), Literal::Bool(true));
        assert_eq!(parse_literal("False,"), Literal::Bool(false));
        assert!(literal().parse(ByteCursor::new(b"Truest")).is_err());
        assert!(literal().parse(ByteCursor::new(b"true")).is_err());
    }

    #[test]
    fn tuples() {
        assert_eq!(parse_literal("()"), Literal::Tuple(vec![]));
        assert_eq!(parse_literal("(3,)"), Literal::Tuple(vec![3]));
        assert_eq!(parse_literal("(2, 3)"), Literal::Tuple(vec![2, 3]));
        assert_eq!(parse_literal("( 2 ,3 , )"), Literal::Tuple(vec![2, 3]));
        assert_eq!(parse_literal("(4L, 5L)"), Literal::Tuple(vec![4, 5]));
        assert!(literal().parse(ByteCursor::new(b"(2 3)")).is_err());
        assert!(literal().parse(ByteCursor::new(b"(-1,)")).is_err());
        assert!(literal().parse(ByteCursor::new(b"(2,,)")).is_err());
        assert!(literal().parse(ByteCursor::new(b"(99999999999999999999,)")).is_err());
    }

    #[test]
    fn bracketed_values_are_kept_raw() {
        assert_eq!(
            parse_literal("[('a', '<i8'), ('b', '<f4')]"),
            Literal::Other("[('a', '<i8'), ('b', '<f4')]")
        );
        assert_eq!(parse_literal("{'x': ']'}"), Literal::Other("{'x': ']'}"));
        assert!(literal().parse(ByteCursor::new(b"[1, 2")).is_err());
    }

    #[test]
    fn whitespace_then_symbol() {
        let cursor = ByteCursor::new(b"  \n\t:x");
        let ((), cursor) = whitespace().parse(cursor).unwrap();
        let ((), cursor) = symbol(b':').parse(cursor).unwrap();
        assert_eq!(peek(&cursor), Some(b'x'));
    }
}
