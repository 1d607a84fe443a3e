//! # promql-syntax
//!
//! A tokenizing parser for PromQL-style query expressions, producing a
//! typed Abstract Syntax Tree (AST) for analysis or evaluation.
//!
//! Parsing runs in two stages: [`tokenize`] turns the query text into a
//! position-tagged token stream, and the grammar in [`parser`] consumes
//! that stream into a single [`Expr`] tree. Comments survive tokenization
//! but are filtered out before the grammar runs.
//!
//! ## Quick Start
//!
//! The main entry point is [`parse`]:
//!
//! ```rust
//! use promql_syntax::{parse, Expr};
//!
//! let ast = parse(r#"http_requests_total{job="api"}"#).expect("failed to parse");
//! match ast {
//!     Expr::VectorSelector(selector) => {
//!         assert_eq!(selector.name.as_deref(), Some("http_requests_total"));
//!         assert_eq!(selector.matchers.len(), 1);
//!     }
//!     other => panic!("unexpected expression: {:?}", other),
//! }
//! ```
//!
//! ## Examples
//!
//! ### Aggregation with grouping
//!
//! ```rust
//! use promql_syntax::{parse, AggregateOp, Expr};
//!
//! let ast = parse("sum by (job) (rate(http_requests_total[5m]))").unwrap();
//! match ast {
//!     Expr::Aggregate(agg) => {
//!         assert_eq!(agg.op, AggregateOp::Sum);
//!         assert_eq!(agg.grouping_labels, vec!["job"]);
//!     }
//!     other => panic!("unexpected expression: {:?}", other),
//! }
//! ```
//!
//! ### Errors carry positions
//!
//! ```rust
//! use promql_syntax::parse;
//!
//! let err = parse("up[30m1h]").unwrap_err();
//! assert!(err.to_string().contains("30m1h"));
//! assert_eq!(err.offset(), 3);
//! ```
//!
//! ## AST
//!
//! [`Expr`] is a closed sum type; match on it exhaustively:
//!
//! - [`Expr::Number`] / [`Expr::String`] - literals
//! - [`Expr::VectorSelector`] / [`Expr::MatrixSelector`] - series selection
//! - [`Expr::Unary`] / [`Expr::Binary`] / [`Expr::Paren`] - operators
//! - [`Expr::Call`] / [`Expr::Aggregate`] - call-like forms
//! - [`Expr::Offset`] / [`Expr::Subquery`] - postfix time clauses
//!
//! A note on binary operators: the grammar carries no precedence table.
//! The right-hand side of every binary expression is a full expression, so
//! `a * b + c` parses as `a * (b + c)`. Consumers needing conventional
//! precedence must restructure the tree downstream.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    AggregateExpr, AggregateOp, BinaryExpr, BinaryOp, Expr, FunctionCall, OffsetExpr,
    StringLiteral, SubqueryExpr, UnaryExpr, UnaryOp, VectorMatchCardinality, VectorMatching,
};
pub use error::ParseError;
pub use lexer::duration::{Duration, parse_duration};
pub use lexer::token::{Token, TokenKind};
pub use lexer::tokenize;
pub use parser::Cursor;
pub use parser::function::FunctionIdentifier;
pub use parser::selector::{LabelMatcher, MatchOp, MatrixSelector, VectorSelector};

/// Parse a query string into an expression tree.
///
/// Tokenizes the input, drops comment tokens, runs the expression grammar,
/// and requires the whole token stream to be consumed. The first lexical,
/// syntactic, or value error aborts the parse; no partial tree is
/// returned.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let tokens: Vec<Token<'_>> = tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .collect();

    let cur = Cursor::new(&tokens);
    let (expression, rest) = parser::expr(cur)?;
    if let Some(tok) = rest.peek() {
        return Err(ParseError::Unexpected {
            expected: "end of input".to_string(),
            found: format!("{} {:?}", tok.kind.describe(), tok.text),
            offset: tok.offset,
        });
    }
    Ok(expression)
}
