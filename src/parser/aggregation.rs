//! Aggregation expressions, grouping labels, and by/without modifiers.
//!
//! Aggregation syntax admits the modifier on either side of the argument
//! list:
//!
//! ```text
//! sum(metric) by (job)
//! sum by (job) (metric)
//! topk(5, metric)
//! ```
//!
//! Both orders produce identical nodes. The argument list must hold one or
//! two expressions; with two, the first is the operator's parameter (the
//! `k` of `topk`, the φ of `quantile`).

use crate::ast::{AggregateExpr, AggregateOp};
use crate::error::ParseError;
use crate::lexer::token::TokenKind;
use crate::parser::function::function_args;
use crate::parser::selector::label_value_matcher;
use crate::parser::{Cursor, PResult};

/// Map a token kind to its aggregation operator, if it is one.
///
/// Also consulted by the name rules: any kind this table knows is
/// acceptable as a metric or label name.
pub fn aggregate_op(kind: TokenKind) -> Option<AggregateOp> {
    match kind {
        TokenKind::Avg => Some(AggregateOp::Avg),
        TokenKind::Bottomk => Some(AggregateOp::Bottomk),
        TokenKind::Count => Some(AggregateOp::Count),
        TokenKind::CountValues => Some(AggregateOp::CountValues),
        TokenKind::Group => Some(AggregateOp::Group),
        TokenKind::Max => Some(AggregateOp::Max),
        TokenKind::Min => Some(AggregateOp::Min),
        TokenKind::Quantile => Some(AggregateOp::Quantile),
        TokenKind::Stddev => Some(AggregateOp::Stddev),
        TokenKind::Stdvar => Some(AggregateOp::Stdvar),
        TokenKind::Sum => Some(AggregateOp::Sum),
        TokenKind::Topk => Some(AggregateOp::Topk),
        _ => None,
    }
}

/// A parsed `by`/`without` clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateModifier {
    pub without: bool,
    pub labels: Vec<String>,
}

/// Parse a parenthesized, comma-separated, possibly empty label list.
pub fn grouping_labels<'a>(cur: Cursor<'a>) -> PResult<'a, Vec<String>> {
    let (_, cur) = cur.expect(TokenKind::LeftParen)?;
    if let Some((_, cur)) = cur.eat(TokenKind::RightParen) {
        return Ok((Vec::new(), cur));
    }

    let mut labels = Vec::new();
    let (first, mut cur) = label_value_matcher(cur)?;
    labels.push(first);
    while let Some((_, after_comma)) = cur.eat(TokenKind::Comma) {
        let (label, next) = label_value_matcher(after_comma)?;
        labels.push(label);
        cur = next;
    }

    let (_, cur) = cur.expect(TokenKind::RightParen)?;
    Ok((labels, cur))
}

/// Parse `by (labels)` or `without (labels)`.
pub fn aggregate_modifier<'a>(cur: Cursor<'a>) -> PResult<'a, AggregateModifier> {
    let without = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::By) => false,
        Some(TokenKind::Without) => true,
        _ => return Err(cur.expected("'by' or 'without'")),
    };
    let (labels, cur) = grouping_labels(cur.advance())?;
    Ok((AggregateModifier { without, labels }, cur))
}

/// Parse an aggregation expression.
pub fn aggregate_expr<'a>(cur: Cursor<'a>) -> PResult<'a, AggregateExpr> {
    let Some(op_token) = cur.peek() else {
        return Err(cur.expected("aggregation operator"));
    };
    let Some(op) = aggregate_op(op_token.kind) else {
        return Err(cur.expected("aggregation operator"));
    };
    let op_offset = op_token.offset;
    let cur = cur.advance();

    // Arguments first with an optional trailing modifier, or the modifier
    // leading the arguments.
    let (modifier, args, cur) = match function_args(cur) {
        Ok((args, cur)) => match aggregate_modifier(cur) {
            Ok((modifier, cur)) => (modifier, args, cur),
            Err(_) => (AggregateModifier::default(), args, cur),
        },
        Err(args_err) => {
            let (modifier, cur) = aggregate_modifier(cur).map_err(|e| args_err.furthest(e))?;
            let (args, cur) = function_args(cur)?;
            (modifier, args, cur)
        }
    };

    let count = args.len();
    let mut args = args.into_iter();
    let (param, inner) = match (args.next(), args.next(), args.next()) {
        (Some(inner), None, None) => (None, inner),
        (Some(param), Some(inner), None) => (Some(param), inner),
        _ => {
            return Err(ParseError::AggregateArity {
                count,
                offset: op_offset,
            });
        }
    };

    Ok((
        AggregateExpr {
            op,
            expr: inner,
            param,
            grouping_labels: modifier.labels,
            without: modifier.without,
        },
        cur,
    ))
}
