//! Word lexemes: identifiers, metric identifiers, and keywords.
//!
//! A word starts with a letter or underscore and continues with letters,
//! digits, underscores, or colons. Colons mark recording-rule style metric
//! names (`job:request_rate:5m`) and turn the word into a metric
//! identifier. Colon-free words are checked against the keyword table;
//! keyword matching is case-insensitive and whole-word, so `summary` is an
//! identifier even though it starts with `sum`.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    combinator::recognize,
    sequence::pair,
};

use crate::lexer::token::TokenKind;

#[inline]
fn is_word_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

#[inline]
fn is_word_char(c: char) -> bool {
    c == '_' || c == ':' || c.is_ascii_alphanumeric()
}

/// Recognize a word lexeme: `[a-zA-Z_][a-zA-Z0-9_:]*`.
pub(crate) fn word_lexeme(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_word_start), take_while(is_word_char))).parse(input)
}

/// Look up a colon-free word in the keyword table (case-insensitive).
pub(crate) fn lookup_keyword(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        // Binary keyword operators
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "unless" => Some(TokenKind::Unless),
        "atan2" => Some(TokenKind::Atan2),
        // Modifiers
        "bool" => Some(TokenKind::Bool),
        "by" => Some(TokenKind::By),
        "without" => Some(TokenKind::Without),
        "on" => Some(TokenKind::On),
        "ignoring" => Some(TokenKind::Ignoring),
        "group_left" => Some(TokenKind::GroupLeft),
        "group_right" => Some(TokenKind::GroupRight),
        "offset" => Some(TokenKind::Offset),
        // Aggregation operators
        "avg" => Some(TokenKind::Avg),
        "bottomk" => Some(TokenKind::Bottomk),
        "count" => Some(TokenKind::Count),
        "count_values" => Some(TokenKind::CountValues),
        "group" => Some(TokenKind::Group),
        "max" => Some(TokenKind::Max),
        "min" => Some(TokenKind::Min),
        "quantile" => Some(TokenKind::Quantile),
        "stddev" => Some(TokenKind::Stddev),
        "stdvar" => Some(TokenKind::Stdvar),
        "sum" => Some(TokenKind::Sum),
        "topk" => Some(TokenKind::Topk),
        _ => None,
    }
}

/// Classify a scanned word into its token kind.
///
/// Colon-containing words are metric identifiers regardless of any keyword
/// they embed. `Inf` and `NaN` spell floating-point literals.
pub(crate) fn classify_word(word: &str) -> TokenKind {
    if word.contains(':') {
        return TokenKind::MetricIdentifier;
    }
    if word.eq_ignore_ascii_case("inf") || word.eq_ignore_ascii_case("nan") {
        return TokenKind::Number;
    }
    lookup_keyword(word).unwrap_or(TokenKind::Identifier)
}
