//! Token-stream grammar.
//!
//! Every rule is a pure function from a [`Cursor`] position to either a
//! parsed node plus the advanced cursor, or a [`ParseError`] — failure
//! never consumes input, which is what makes ordered-choice backtracking
//! safe: a caller that gets `Err` simply tries the next alternative from
//! the cursor it already holds.
//!
//! # Submodules
//!
//! - [`literal`] - number / string / duration primitives
//! - [`selector`] - metric identifiers, label matchers, vector and matrix selectors
//! - [`unary`] - unary operators
//! - [`binary`] - binary operator table and vector-matching clauses
//! - [`aggregation`] - aggregation operators, grouping labels, modifiers
//! - [`function`] - function identifiers and call parsing
//! - [`mod@expr`] - the top-level expression grammar

pub mod aggregation;
pub mod binary;
pub mod expr;
pub mod function;
pub mod literal;
pub mod selector;
pub mod unary;

pub use expr::expr;

use crate::error::ParseError;
use crate::lexer::token::{Token, TokenKind};

/// Result of a grammar rule: the parsed value and the cursor past it.
pub type PResult<'a, T> = Result<(T, Cursor<'a>), ParseError>;

/// An immutable position in the token stream.
///
/// Cursors are `Copy`; holding on to one and retrying a different rule from
/// it is the backtracking mechanism.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// The token under the cursor, if any.
    pub fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Cursor advanced past the current token.
    pub fn advance(self) -> Cursor<'a> {
        Cursor {
            tokens: self.tokens,
            pos: (self.pos + 1).min(self.tokens.len()),
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Source offset of the current token, or one past the last token at
    /// end of input.
    pub fn offset(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some(tok) => tok.offset,
            None => self.tokens.last().map(|t| t.end()).unwrap_or(0),
        }
    }

    /// Description of the current token for error messages.
    pub(crate) fn found(&self) -> String {
        match self.peek() {
            Some(tok) => format!("{} {:?}", tok.kind.describe(), tok.text),
            None => "end of input".to_string(),
        }
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(self, kind: TokenKind) -> Option<(&'a Token<'a>, Cursor<'a>)> {
        match self.peek() {
            Some(tok) if tok.kind == kind => Some((tok, self.advance())),
            _ => None,
        }
    }

    /// Consume a token of the given kind or fail without consuming.
    pub fn expect(self, kind: TokenKind) -> PResult<'a, &'a Token<'a>> {
        match self.peek() {
            Some(tok) if tok.kind == kind => Ok((tok, self.advance())),
            _ => Err(self.expected(kind.describe())),
        }
    }

    /// Build an expected-vs-found syntax error at the current position.
    pub(crate) fn expected(&self, what: &str) -> ParseError {
        ParseError::Unexpected {
            expected: what.to_string(),
            found: self.found(),
            offset: self.offset(),
        }
    }
}
