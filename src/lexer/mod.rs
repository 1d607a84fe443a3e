//! Tokenizer: query text in, position-tagged token stream out.
//!
//! [`tokenize`] walks the input once, skipping whitespace and emitting one
//! [`Token`] per lexeme, comments included. Comments are ordinary tokens so
//! callers can inspect them; [`parse`](crate::parse) drops them before
//! grammar evaluation.

pub mod duration;
pub mod identifier;
pub mod number;
pub mod string;
pub mod token;

pub use duration::{Duration, parse_duration};
pub use token::{Token, TokenKind};

use crate::error::ParseError;

#[inline]
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Tokenize a query string.
///
/// Returns the full ordered token sequence or the first lexical error.
/// Whitespace is dropped; comments are kept as [`TokenKind::Comment`]
/// tokens.
///
/// # Examples
///
/// ```
/// use promql_syntax::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"up{job="api"}"#).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Identifier,
///         TokenKind::LeftBrace,
///         TokenKind::Identifier,
///         TokenKind::Eq,
///         TokenKind::String,
///         TokenKind::RightBrace,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(is_whitespace);
        let offset = input.len() - rest.len();
        let Some(c) = rest.chars().next() else {
            break;
        };

        let (kind, len) = match c {
            '#' => {
                let len = rest.find('\n').unwrap_or(rest.len());
                (TokenKind::Comment, len)
            }
            '(' => (TokenKind::LeftParen, 1),
            ')' => (TokenKind::RightParen, 1),
            '{' => (TokenKind::LeftBrace, 1),
            '}' => (TokenKind::RightBrace, 1),
            '[' => (TokenKind::LeftBracket, 1),
            ']' => (TokenKind::RightBracket, 1),
            ',' => (TokenKind::Comma, 1),
            ':' => (TokenKind::Colon, 1),
            '+' => (TokenKind::Add, 1),
            '-' => (TokenKind::Sub, 1),
            '*' => (TokenKind::Mul, 1),
            '/' => (TokenKind::Div, 1),
            '%' => (TokenKind::Mod, 1),
            '^' => (TokenKind::Pow, 1),
            '@' => (TokenKind::At, 1),
            '=' => {
                if rest.starts_with("==") {
                    (TokenKind::EqEq, 2)
                } else if rest.starts_with("=~") {
                    (TokenKind::EqRegex, 2)
                } else {
                    (TokenKind::Eq, 1)
                }
            }
            '!' => {
                if rest.starts_with("!=") {
                    (TokenKind::Neq, 2)
                } else if rest.starts_with("!~") {
                    (TokenKind::NeqRegex, 2)
                } else {
                    return Err(ParseError::UnexpectedCharacter { found: c, offset });
                }
            }
            '<' => {
                if rest.starts_with("<=") {
                    (TokenKind::Lte, 2)
                } else {
                    (TokenKind::Lt, 1)
                }
            }
            '>' => {
                if rest.starts_with(">=") {
                    (TokenKind::Gte, 2)
                } else {
                    (TokenKind::Gt, 1)
                }
            }
            '"' | '\'' => {
                let len = string::scan_string(rest, offset)?;
                (TokenKind::String, len)
            }
            c if c.is_ascii_digit() || (c == '.' && next_is_digit(rest)) => {
                scan_number_or_duration(rest, offset)?
            }
            c if c == '_' || c.is_ascii_alphabetic() => {
                let word = match identifier::word_lexeme(rest) {
                    Ok((_, word)) => word,
                    Err(_) => return Err(ParseError::UnexpectedCharacter { found: c, offset }),
                };
                (identifier::classify_word(word), word.len())
            }
            _ => return Err(ParseError::UnexpectedCharacter { found: c, offset }),
        };

        tokens.push(Token {
            kind,
            text: &rest[..len],
            offset,
        });
        rest = &rest[len..];
    }

    Ok(tokens)
}

fn next_is_digit(rest: &str) -> bool {
    rest.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
}

/// Scan a numeric lexeme, preferring the duration interpretation.
///
/// `5m` is a duration, `5` a number, `5minutes` a lexical error: neither a
/// number nor a duration may run straight into identifier characters.
fn scan_number_or_duration(rest: &str, offset: usize) -> Result<(TokenKind, usize), ParseError> {
    let (kind, len) = if let Ok((_, lexeme)) = duration::duration_lexeme(rest) {
        (TokenKind::Duration, lexeme.len())
    } else if let Ok((_, lexeme)) = number::number_lexeme(rest) {
        (TokenKind::Number, lexeme.len())
    } else {
        // Unreachable while callers dispatch on a leading digit or dot, but
        // degrade to a character error rather than panic.
        let found = rest.chars().next().unwrap_or('\0');
        return Err(ParseError::UnexpectedCharacter { found, offset });
    };

    if rest[len..].chars().next().is_some_and(is_ident_char) {
        let tail = rest[len..]
            .find(|c: char| !is_ident_char(c))
            .unwrap_or(rest.len() - len);
        return Err(ParseError::InvalidNumber {
            text: rest[..len + tail].to_string(),
            offset,
        });
    }
    Ok((kind, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap_or_else(|e| panic!("failed to tokenize {:?}: {}", input, e))
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \t\r\n ").unwrap().is_empty());
    }

    #[test]
    fn test_selector_tokens() {
        assert_eq!(
            kinds(r#"up{job="api"}"#),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftBrace,
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::String,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(
            kinds("== != =~ !~ <= >= < > = @"),
            vec![
                TokenKind::EqEq,
                TokenKind::Neq,
                TokenKind::EqRegex,
                TokenKind::NeqRegex,
                TokenKind::Lte,
                TokenKind::Gte,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::At,
            ]
        );
    }

    #[test]
    fn test_keyword_tokens() {
        assert_eq!(
            kinds("sum by (a) and offset group_left bool"),
            vec![
                TokenKind::Sum,
                TokenKind::By,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::And,
                TokenKind::Offset,
                TokenKind::GroupLeft,
                TokenKind::Bool,
            ]
        );
    }

    #[test]
    fn test_number_vs_duration() {
        assert_eq!(kinds("5"), vec![TokenKind::Number]);
        assert_eq!(kinds("5m"), vec![TokenKind::Duration]);
        assert_eq!(kinds("1h30m"), vec![TokenKind::Duration]);
        assert_eq!(kinds("0x1F"), vec![TokenKind::Number]);
        assert_eq!(kinds("1e-3"), vec![TokenKind::Number]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number]);
        assert_eq!(kinds("Inf NaN"), vec![TokenKind::Number, TokenKind::Number]);
    }

    #[test]
    fn test_subquery_tokens() {
        assert_eq!(
            kinds("metric[5m:1m]"),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftBracket,
                TokenKind::Duration,
                TokenKind::Colon,
                TokenKind::Duration,
                TokenKind::RightBracket,
            ]
        );
    }

    #[test]
    fn test_metric_identifier_with_colons() {
        assert_eq!(kinds("job:rate:5m"), vec![TokenKind::MetricIdentifier]);
    }

    #[test]
    fn test_negative_number_is_two_tokens() {
        assert_eq!(kinds("-5"), vec![TokenKind::Sub, TokenKind::Number]);
        assert_eq!(kinds("+5m"), vec![TokenKind::Add, TokenKind::Duration]);
    }

    #[test]
    fn test_comment_token() {
        let tokens = tokenize("up # the up metric\n+ 1").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Comment,
                TokenKind::Add,
                TokenKind::Number,
            ]
        );
        assert_eq!(tokens[1].text, "# the up metric");
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(
            kinds("up # trailing"),
            vec![TokenKind::Identifier, TokenKind::Comment]
        );
    }

    #[test]
    fn test_offsets_are_exact() {
        let tokens = tokenize("  up + 1").unwrap();
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[0].text, "up");
        assert_eq!(tokens[1].offset, 5);
        assert_eq!(tokens[2].offset, 7);
        assert_eq!(tokens[2].end(), 8);
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            tokenize("up ; down"),
            Err(ParseError::UnexpectedCharacter { found: ';', offset: 3 })
        ));
        assert!(matches!(
            tokenize("a ! b"),
            Err(ParseError::UnexpectedCharacter { found: '!', .. })
        ));
    }

    #[test]
    fn test_number_running_into_word() {
        match tokenize("5minutes") {
            Err(ParseError::InvalidNumber { text, offset }) => {
                assert_eq!(text, "5minutes");
                assert_eq!(offset, 0);
            }
            other => panic!("expected invalid-number error, got {:?}", other),
        }
    }

    #[test]
    fn test_string_token_keeps_quotes() {
        let tokens = tokenize(r#"'single' "double""#).unwrap();
        assert_eq!(tokens[0].text, "'single'");
        assert_eq!(tokens[1].text, r#""double""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
    }
}
