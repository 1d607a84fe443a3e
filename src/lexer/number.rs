//! Number lexemes.
//!
//! Supported formats:
//! - Integers and floats: `42`, `3.14`, `.5`, `5.`
//! - Hexadecimal: `0x1F`, `0X2A`
//! - Octal: `0o755`, `0O755`, and legacy `0755`
//! - Scientific notation: `1e10`, `2.5E-3`
//! - Special values: `Inf`, `NaN` (case-insensitive, lexed as words)
//!
//! Signs are never part of the lexeme; `+` and `-` are separate tokens the
//! grammar folds in.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, hex_digit1, oct_digit1, one_of},
    combinator::{opt, recognize},
    sequence::{preceded, tuple},
};

/// Recognize an unsigned number lexeme.
pub(crate) fn number_lexeme(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(preceded(alt((tag("0x"), tag("0X"))), hex_digit1)),
        recognize(preceded(alt((tag("0o"), tag("0O"))), oct_digit1)),
        recognize(tuple((
            alt((
                recognize(tuple((digit1, opt(tuple((char('.'), digit0)))))),
                recognize(tuple((char('.'), digit1))),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
    ))(input)
}

/// Convert a number token's text to its floating-point value.
///
/// Handles every format the lexer accepts, plus the `Inf`/`NaN` words the
/// tokenizer classifies as numbers. Returns `None` for text that is not a
/// number (the tokenizer should make that impossible).
pub(crate) fn number_value(text: &str) -> Option<f64> {
    if text.eq_ignore_ascii_case("inf") {
        return Some(f64::INFINITY);
    }
    if text.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        return i64::from_str_radix(oct, 8).ok().map(|v| v as f64);
    }
    // Legacy octal: leading zero followed by octal digits only. `0.5`, `0e3`
    // and plain `0` fall through to decimal parsing.
    if text.len() > 1
        && text.starts_with('0')
        && text[1..].chars().all(|c| ('0'..='7').contains(&c))
    {
        return i64::from_str_radix(&text[1..], 8).ok().map(|v| v as f64);
    }
    text.parse().ok()
}
