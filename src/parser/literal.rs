//! Literal primitives: numbers, strings, durations.

use crate::ast::StringLiteral;
use crate::error::ParseError;
use crate::lexer::duration::{Duration, parse_duration};
use crate::lexer::number::number_value;
use crate::lexer::token::TokenKind;
use crate::parser::{Cursor, PResult};

/// Parse a number literal with an optional sign token.
///
/// A missing sign is treated as an implicit `+`: `5`, `+5` and the signless
/// form all fold through the same arithmetic, so there is no observable
/// difference between them.
pub fn number<'a>(cur: Cursor<'a>) -> PResult<'a, f64> {
    let (sign, cur) = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::Sub) => (TokenKind::Sub, cur.advance()),
        Some(TokenKind::Add) => (TokenKind::Add, cur.advance()),
        _ => (TokenKind::Add, cur),
    };
    let (tok, cur) = cur.expect(TokenKind::Number)?;
    let value = number_value(tok.text).ok_or_else(|| ParseError::InvalidNumber {
        text: tok.text.to_string(),
        offset: tok.offset,
    })?;
    let value = if sign == TokenKind::Sub { -value } else { value };
    Ok((value, cur))
}

/// Parse a string literal, recording the quote character and stripping the
/// delimiting quotes. No unescaping happens here; the lexer already
/// validated the escape sequences.
pub fn string_literal<'a>(cur: Cursor<'a>) -> PResult<'a, StringLiteral> {
    let (tok, cur) = cur.expect(TokenKind::String)?;
    let quote = if tok.text.starts_with('\'') { '\'' } else { '"' };
    let value = &tok.text[1..tok.text.len() - 1];
    Ok((StringLiteral::new(quote, value), cur))
}

/// Parse a duration token, enforcing the ordered-component grammar.
pub fn duration<'a>(cur: Cursor<'a>) -> PResult<'a, Duration> {
    let (tok, cur) = cur.expect(TokenKind::Duration)?;
    let parsed = parse_duration(tok.text).ok_or_else(|| ParseError::InvalidDuration {
        text: tok.text.to_string(),
        offset: tok.offset,
    })?;
    Ok((parsed, cur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn cursor_over(input: &str) -> Vec<crate::lexer::token::Token<'_>> {
        tokenize(input).unwrap_or_else(|e| panic!("failed to tokenize {:?}: {}", input, e))
    }

    #[test]
    fn test_number_unsigned() {
        let tokens = cursor_over("42");
        let (value, cur) = number(Cursor::new(&tokens)).unwrap();
        assert_eq!(value, 42.0);
        assert!(cur.at_end());
    }

    #[test]
    fn test_number_implicit_plus_equivalence() {
        let unsigned = cursor_over("0");
        let signed = cursor_over("+0");
        let (a, _) = number(Cursor::new(&unsigned)).unwrap();
        let (b, _) = number(Cursor::new(&signed)).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_number_signed() {
        let tokens = cursor_over("-3.5");
        let (value, _) = number(Cursor::new(&tokens)).unwrap();
        assert_eq!(value, -3.5);

        let tokens = cursor_over("+7");
        let (value, _) = number(Cursor::new(&tokens)).unwrap();
        assert_eq!(value, 7.0);
    }

    #[test]
    fn test_number_formats() {
        for (input, expected) in [("0x1F", 31.0), ("0755", 493.0), ("1e3", 1000.0)] {
            let tokens = cursor_over(input);
            let (value, _) = number(Cursor::new(&tokens)).unwrap();
            assert_eq!(value, expected, "for {:?}", input);
        }

        let tokens = cursor_over("Inf");
        let (value, _) = number(Cursor::new(&tokens)).unwrap();
        assert_eq!(value, f64::INFINITY);

        let tokens = cursor_over("-Inf");
        let (value, _) = number(Cursor::new(&tokens)).unwrap();
        assert_eq!(value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_number_rejects_non_number() {
        let tokens = cursor_over("abc");
        assert!(number(Cursor::new(&tokens)).is_err());
        // A sign alone is not enough
        let tokens = cursor_over("-");
        assert!(number(Cursor::new(&tokens)).is_err());
    }

    #[test]
    fn test_string_literal_double() {
        let tokens = cursor_over(r#""hello""#);
        let (s, _) = string_literal(Cursor::new(&tokens)).unwrap();
        assert_eq!(s.quote, '"');
        assert_eq!(s.value, "hello");
    }

    #[test]
    fn test_string_literal_single() {
        let tokens = cursor_over("'world'");
        let (s, _) = string_literal(Cursor::new(&tokens)).unwrap();
        assert_eq!(s.quote, '\'');
        assert_eq!(s.value, "world");
    }

    #[test]
    fn test_string_literal_keeps_escapes_verbatim() {
        let tokens = cursor_over(r#""a\nb""#);
        let (s, _) = string_literal(Cursor::new(&tokens)).unwrap();
        assert_eq!(s.value, r"a\nb");
    }

    #[test]
    fn test_duration_ok() {
        let tokens = cursor_over("1h30m");
        let (d, _) = duration(Cursor::new(&tokens)).unwrap();
        assert_eq!(d.as_millis(), 90 * 60 * 1000);
    }

    #[test]
    fn test_duration_out_of_order() {
        let tokens = cursor_over("30m1h");
        match duration(Cursor::new(&tokens)) {
            Err(ParseError::InvalidDuration { text, offset }) => {
                assert_eq!(text, "30m1h");
                assert_eq!(offset, 0);
            }
            other => panic!("expected invalid-duration error, got {:?}", other),
        }
    }

    #[test]
    fn test_duration_wrong_token() {
        let tokens = cursor_over("5");
        assert!(duration(Cursor::new(&tokens)).is_err());
    }
}
