//! String literal scanning.
//!
//! Literals are single- or double-quoted. The scanner walks the lexeme to
//! find the closing quote, validating escape sequences on the way:
//!
//! | Escape       | Meaning            |
//! |--------------|--------------------|
//! | `\a \b \f \n \r \t \v` | control characters |
//! | `\\ \" \'`   | literal backslash/quote |
//! | `\xNN`       | hex byte (2 digits) |
//! | `\uNNNN`     | unicode (4 hex digits) |
//! | `\UNNNNNNNN` | unicode (8 hex digits) |
//! | `\NNN`       | octal byte (3 digits) |
//!
//! The token keeps the source spelling: escapes are checked here but not
//! rewritten, and the grammar only strips the delimiting quotes. Newlines
//! terminate the scan with an unterminated-literal error.

use std::str::CharIndices;

use crate::error::ParseError;

/// Scan a string literal at the start of `input` and return its byte
/// length, quotes included.
///
/// `offset` is the literal's position in the full query text, used for
/// error reporting. The caller guarantees `input` starts with `'` or `"`.
pub(crate) fn scan_string(input: &str, offset: usize) -> Result<usize, ParseError> {
    let mut iter = input.char_indices();
    let quote = match iter.next() {
        Some((_, c @ ('"' | '\''))) => c,
        _ => return Err(ParseError::UnterminatedString { offset }),
    };

    while let Some((i, c)) = iter.next() {
        if c == quote {
            return Ok(i + c.len_utf8());
        }
        match c {
            '\n' => break,
            '\\' => validate_escape(&mut iter, offset + i)?,
            _ => {}
        }
    }
    Err(ParseError::UnterminatedString { offset })
}

/// Consume and check one escape sequence, the backslash already eaten.
fn validate_escape(iter: &mut CharIndices<'_>, escape_offset: usize) -> Result<(), ParseError> {
    let Some((_, c)) = iter.next() else {
        return Err(ParseError::InvalidEscape {
            offset: escape_offset,
        });
    };
    match c {
        'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '"' | '\'' => Ok(()),
        'x' => expect_hex(iter, 2, escape_offset),
        'u' => expect_hex(iter, 4, escape_offset),
        'U' => expect_hex(iter, 8, escape_offset),
        '0'..='7' => expect_octal(iter, 2, escape_offset),
        _ => Err(ParseError::InvalidEscape {
            offset: escape_offset,
        }),
    }
}

fn expect_hex(iter: &mut CharIndices<'_>, count: usize, escape_offset: usize) -> Result<(), ParseError> {
    for _ in 0..count {
        match iter.next() {
            Some((_, c)) if c.is_ascii_hexdigit() => {}
            _ => {
                return Err(ParseError::InvalidEscape {
                    offset: escape_offset,
                });
            }
        }
    }
    Ok(())
}

fn expect_octal(iter: &mut CharIndices<'_>, count: usize, escape_offset: usize) -> Result<(), ParseError> {
    for _ in 0..count {
        match iter.next() {
            Some((_, c)) if ('0'..='7').contains(&c) => {}
            _ => {
                return Err(ParseError::InvalidEscape {
                    offset: escape_offset,
                });
            }
        }
    }
    Ok(())
}
