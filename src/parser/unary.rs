//! Unary operators and expressions.

use crate::ast::{UnaryExpr, UnaryOp};
use crate::lexer::token::TokenKind;
use crate::parser::{Cursor, PResult, expr};

/// Parse a unary `+` or `-` token.
pub fn unary_op<'a>(cur: Cursor<'a>) -> PResult<'a, UnaryOp> {
    let op = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::Add) => UnaryOp::Add,
        Some(TokenKind::Sub) => UnaryOp::Sub,
        _ => return Err(cur.expected("unary operator")),
    };
    Ok((op, cur.advance()))
}

/// Parse a unary expression.
///
/// The operand is a full expression, so the sign binds the whole of what
/// follows: `-a + b` reads as `-(a + b)` in this grammar.
pub fn unary_expr<'a>(cur: Cursor<'a>) -> PResult<'a, UnaryExpr> {
    let (op, cur) = unary_op(cur)?;
    let (operand, cur) = expr::expr(cur)?;
    Ok((UnaryExpr { op, expr: operand }, cur))
}
