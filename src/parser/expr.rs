//! The top-level expression grammar.
//!
//! Grammar outline:
//!
//! ```text
//! expr            = binary_expr | expr_not_binary , [offset_or_subquery]
//! binary_expr     = expr_not_binary binary_op vector_matching expr
//! expr_not_binary = ( paren | aggregate | function_call | unary
//!                   | matrix_selector | vector_selector | string | number )
//!                   , [offset_or_subquery]
//! offset_or_subquery = "offset" ["-"] duration
//!                    | "[" duration ":" [duration] "]"
//! ```
//!
//! Alternatives that share a token prefix are tried in order with full
//! backtracking; the reported error is the one that progressed furthest.
//! The right-hand side of a binary expression is the whole `expr` rule, so
//! operator chains nest to the right and there is no precedence table:
//! `a * b + c` is `a * (b + c)`.

use crate::ast::{BinaryExpr, Expr, OffsetExpr, SubqueryExpr};
use crate::error::ParseError;
use crate::lexer::token::TokenKind;
use crate::parser::{
    Cursor, PResult, aggregation, binary, function, literal, selector, unary,
};

/// Parse a complete expression.
pub fn expr<'a>(cur: Cursor<'a>) -> PResult<'a, Expr> {
    let (head, cur) = match binary_expr(cur) {
        Ok((b, cur)) => (Expr::Binary(Box::new(b)), cur),
        Err(binary_err) => match expr_not_binary(cur) {
            Ok(r) => r,
            Err(e) => return Err(binary_err.furthest(e)),
        },
    };
    offset_or_subquery(head, cur)
}

/// Parse a binary expression: non-binary head, operator, optional matching
/// clause, then a full expression on the right.
fn binary_expr<'a>(cur: Cursor<'a>) -> PResult<'a, BinaryExpr> {
    let (lhs, cur) = expr_not_binary(cur)?;
    let op = match cur.peek().and_then(|t| binary::binary_op(t.kind)) {
        Some(op) => op,
        None => return Err(cur.expected("binary operator")),
    };
    let cur = cur.advance();
    let (matching, cur) = binary::vector_matching(cur);
    let (rhs, cur) = expr(cur)?;
    Ok((
        BinaryExpr {
            op,
            lhs,
            rhs,
            matching,
        },
        cur,
    ))
}

/// Parse any expression form except a binary operation, then attach an
/// optional postfix clause.
pub fn expr_not_binary<'a>(cur: Cursor<'a>) -> PResult<'a, Expr> {
    let (head, cur) = expr_head(cur)?;
    offset_or_subquery(head, cur)
}

/// Ordered choice over the non-binary expression forms.
fn expr_head<'a>(cur: Cursor<'a>) -> PResult<'a, Expr> {
    let mut best: Option<ParseError> = None;

    match paren_expr(cur) {
        Ok(r) => return Ok(r),
        Err(e) => best = pick(best, e),
    }
    match aggregation::aggregate_expr(cur) {
        Ok((agg, cur)) => return Ok((Expr::Aggregate(Box::new(agg)), cur)),
        Err(e) => best = pick(best, e),
    }
    match function::function_call(cur) {
        Ok((call, cur)) => return Ok((Expr::Call(call), cur)),
        Err(e) => best = pick(best, e),
    }
    match unary::unary_expr(cur) {
        Ok((u, cur)) => return Ok((Expr::Unary(Box::new(u)), cur)),
        Err(e) => best = pick(best, e),
    }
    // Matrix before vector: both start with a selector, the matrix form
    // commits only if the bracketed range follows.
    match selector::matrix_selector(cur) {
        Ok((m, cur)) => return Ok((Expr::MatrixSelector(m), cur)),
        Err(e) => best = pick(best, e),
    }
    match selector::vector_selector(cur) {
        Ok((v, cur)) => return Ok((Expr::VectorSelector(v), cur)),
        Err(e) => best = pick(best, e),
    }
    match literal::string_literal(cur) {
        Ok((s, cur)) => return Ok((Expr::String(s), cur)),
        Err(e) => best = pick(best, e),
    }
    match literal::number(cur) {
        Ok((n, cur)) => return Ok((Expr::Number(n), cur)),
        Err(e) => best = pick(best, e),
    }

    Err(best.unwrap_or_else(|| cur.expected("expression")))
}

fn pick(best: Option<ParseError>, err: ParseError) -> Option<ParseError> {
    Some(match best {
        Some(b) => b.furthest(err),
        None => err,
    })
}

/// Parse a parenthesized expression.
fn paren_expr<'a>(cur: Cursor<'a>) -> PResult<'a, Expr> {
    let (_, cur) = cur.expect(TokenKind::LeftParen)?;
    let (inner, cur) = expr(cur)?;
    let (_, cur) = cur.expect(TokenKind::RightParen)?;
    Ok((Expr::Paren(Box::new(inner)), cur))
}

/// Attach an optional `offset` or subquery postfix clause to `head`.
///
/// At most one of the two can directly follow an expression; once the
/// leading token is consumed the clause is committed, so a malformed tail
/// is an error rather than a backtrack.
fn offset_or_subquery<'a>(head: Expr, cur: Cursor<'a>) -> PResult<'a, Expr> {
    if let Some((_, cur)) = cur.eat(TokenKind::Offset) {
        let (negate, cur) = match cur.eat(TokenKind::Sub) {
            Some((_, cur)) => (true, cur),
            None => (false, cur),
        };
        let (duration, cur) = literal::duration(cur)?;
        let offset = if negate { duration.negated() } else { duration };
        return Ok((Expr::Offset(Box::new(OffsetExpr { expr: head, offset })), cur));
    }

    if let Some((_, cur)) = cur.eat(TokenKind::LeftBracket) {
        let (range, cur) = literal::duration(cur)?;
        let (_, cur) = cur.expect(TokenKind::Colon)?;
        let (step, cur) = match literal::duration(cur) {
            Ok((step, cur)) => (Some(step), cur),
            Err(_) => (None, cur),
        };
        let (_, cur) = cur.expect(TokenKind::RightBracket)?;
        return Ok((
            Expr::Subquery(Box::new(SubqueryExpr {
                expr: head,
                range,
                step,
            })),
            cur,
        ));
    }

    Ok((head, cur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AggregateOp, BinaryOp, UnaryOp};
    use crate::lexer::tokenize;

    fn parse_all(input: &str) -> Expr {
        let toks = tokenize(input).unwrap();
        let (e, cur) = expr(Cursor::new(&toks))
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", input, e));
        assert!(cur.at_end(), "leftover tokens in {:?}", input);
        e
    }

    #[test]
    fn test_number_and_string() {
        assert_eq!(parse_all("42"), Expr::Number(42.0));
        match parse_all(r#""hi""#) {
            Expr::String(s) => assert_eq!(s.value, "hi"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_selector_forms() {
        match parse_all("up") {
            Expr::VectorSelector(v) => assert_eq!(v.name.as_deref(), Some("up")),
            other => panic!("expected vector selector, got {:?}", other),
        }
        match parse_all("up[5m]") {
            Expr::MatrixSelector(m) => assert_eq!(m.range.as_millis(), 300_000),
            other => panic!("expected matrix selector, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_aggregate_keyword_is_a_metric() {
        match parse_all("sum") {
            Expr::VectorSelector(v) => assert_eq!(v.name.as_deref(), Some("sum")),
            other => panic!("expected vector selector, got {:?}", other),
        }
    }

    #[test]
    fn test_paren() {
        match parse_all("(1)") {
            Expr::Paren(inner) => assert_eq!(*inner, Expr::Number(1.0)),
            other => panic!("expected paren, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_simple() {
        match parse_all("a + b") {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinaryOp::Add);
                assert!(b.matching.is_default());
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_right_nesting() {
        // No precedence: chains nest to the right
        match parse_all("a / b + c") {
            Expr::Binary(outer) => {
                assert_eq!(outer.op, BinaryOp::Div);
                match outer.rhs {
                    Expr::Binary(inner) => assert_eq!(inner.op, BinaryOp::Add),
                    other => panic!("expected nested binary, got {:?}", other),
                }
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_binds_rest() {
        match parse_all("-a + b") {
            Expr::Unary(u) => {
                assert_eq!(u.op, UnaryOp::Sub);
                assert!(matches!(u.expr, Expr::Binary(_)));
            }
            other => panic!("expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_offset_postfix() {
        match parse_all("a offset 5m") {
            Expr::Offset(o) => assert_eq!(o.offset.as_millis(), 300_000),
            other => panic!("expected offset, got {:?}", other),
        }
        match parse_all("a offset -5m") {
            Expr::Offset(o) => assert_eq!(o.offset.as_millis(), -300_000),
            other => panic!("expected offset, got {:?}", other),
        }
    }

    #[test]
    fn test_subquery_postfix() {
        match parse_all("a[5m:1m]") {
            Expr::Subquery(s) => {
                assert_eq!(s.range.as_millis(), 300_000);
                assert_eq!(s.step.map(|d| d.as_millis()), Some(60_000));
            }
            other => panic!("expected subquery, got {:?}", other),
        }
        match parse_all("a[5m:]") {
            Expr::Subquery(s) => assert!(s.step.is_none()),
            other => panic!("expected subquery, got {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_in_expression() {
        match parse_all("sum(rate(http_requests[5m]))") {
            Expr::Aggregate(agg) => {
                assert_eq!(agg.op, AggregateOp::Sum);
                assert!(matches!(agg.expr, Expr::Call(_)));
            }
            other => panic!("expected aggregate, got {:?}", other),
        }
    }

    #[test]
    fn test_offset_requires_duration() {
        let toks = tokenize("a offset b").unwrap();
        assert!(expr(Cursor::new(&toks)).is_err());
    }

    #[test]
    fn test_subquery_requires_colon() {
        // A paren expression cannot take a plain range
        let toks = tokenize("(a)[5m]").unwrap();
        let result = expr(Cursor::new(&toks));
        match result {
            // the subquery clause commits at '[' and demands ':'
            Err(ParseError::Unexpected { expected, .. }) => assert_eq!(expected, "':'"),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
