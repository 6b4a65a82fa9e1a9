//! Zero-copy take combinator and cursor helpers

use parsicomb::{ByteCursor, CodeLoc, Cursor, Parser, ParsicombError};
use std::borrow::Cow;

/// Cursor positioned at `position` within `data`
pub fn cursor_at(data: &[u8], position: usize) -> ByteCursor<'_> {
    if position >= data.len() {
        ByteCursor::EndOfFile { data }
    } else {
        ByteCursor::Valid { data, position }
    }
}

/// Underlying buffer and current offset
pub fn position<'a>(cursor: &ByteCursor<'a>) -> (&'a [u8], usize) {
    cursor.inner()
}

/// Next byte without consuming it
pub fn peek(cursor: &ByteCursor<'_>) -> Option<u8> {
    let (data, pos) = position(cursor);
    data.get(pos).copied()
}

/// Syntax error at the cursor position
pub fn syntax_error<'a>(
    cursor: &ByteCursor<'a>,
    message: impl Into<Cow<'static, str>>,
) -> ParsicombError<'a> {
    let (data, pos) = position(cursor);
    ParsicombError::SyntaxError {
        message: message.into(),
        loc: CodeLoc::new(data, pos),
    }
}

/// Parser that takes exactly N bytes as a zero-copy slice
pub struct Take {
    count: usize,
}

impl Take {
    pub fn new(count: usize) -> Self {
        Take { count }
    }
}

impl<'a> Parser<'a> for Take {
    type Cursor = ByteCursor<'a>;
    type Output = &'a [u8];
    type Error = ParsicombError<'a>;

    fn parse(&self, cursor: Self::Cursor) -> Result<(Self::Output, Self::Cursor), Self::Error> {
        let (data, pos) = position(&cursor);

        let end = match pos.checked_add(self.count) {
            Some(end) if end <= data.len() => end,
            _ => return Err(ParsicombError::UnexpectedEndOfFile(CodeLoc::new(data, pos))),
        };

        Ok((&data[pos..end], cursor_at(data, end)))
    }
}

/// Take exactly N bytes as a zero-copy slice
pub fn take(count: usize) -> Take {
    Take::new(count)
}
