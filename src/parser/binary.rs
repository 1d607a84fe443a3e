//! Binary operator table and vector-matching clauses.
//!
//! The modifier grammar between an operator and its right operand:
//!
//! ```text
//! [bool] [on|ignoring (labels) [group_left|group_right [(labels)]]]
//! ```
//!
//! Three alternative shapes are tried in order: on/ignoring with a group
//! clause, on/ignoring alone, then a bare optional `bool`. The order
//! matters because each shorter form is a prefix of the longer ones. The
//! last alternative cannot fail, which is what makes the whole clause
//! optional-with-default.

use crate::ast::{BinaryOp, VectorMatchCardinality, VectorMatching};
use crate::lexer::token::TokenKind;
use crate::parser::aggregation::grouping_labels;
use crate::parser::{Cursor, PResult};

/// Map a token kind to its binary operator, if it is one.
pub fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Add => Some(BinaryOp::Add),
        TokenKind::Sub => Some(BinaryOp::Sub),
        TokenKind::Mul => Some(BinaryOp::Mul),
        TokenKind::Div => Some(BinaryOp::Div),
        TokenKind::Mod => Some(BinaryOp::Mod),
        TokenKind::Pow => Some(BinaryOp::Pow),
        TokenKind::Atan2 => Some(BinaryOp::Atan2),
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::Neq => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Lte => Some(BinaryOp::Le),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Gte => Some(BinaryOp::Ge),
        TokenKind::And => Some(BinaryOp::And),
        TokenKind::Or => Some(BinaryOp::Or),
        TokenKind::Unless => Some(BinaryOp::Unless),
        _ => None,
    }
}

/// Consume an optional `bool` keyword.
fn bool_modifier<'a>(cur: Cursor<'a>) -> (bool, Cursor<'a>) {
    match cur.eat(TokenKind::Bool) {
        Some((_, cur)) => (true, cur),
        None => (false, cur),
    }
}

/// Parse `[bool] on|ignoring (labels)`.
fn on_or_ignoring<'a>(cur: Cursor<'a>) -> PResult<'a, VectorMatching> {
    let (return_bool, cur) = bool_modifier(cur);
    let on = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::On) => true,
        Some(TokenKind::Ignoring) => false,
        _ => return Err(cur.expected("'on' or 'ignoring'")),
    };
    let (matching_labels, cur) = grouping_labels(cur.advance())?;
    Ok((
        VectorMatching {
            cardinality: VectorMatchCardinality::OneToOne,
            matching_labels,
            on,
            include_labels: Vec::new(),
            return_bool,
        },
        cur,
    ))
}

/// Parse the on/ignoring clause extended with `group_left`/`group_right`.
fn on_ignoring_with_group<'a>(cur: Cursor<'a>) -> PResult<'a, VectorMatching> {
    let (mut matching, cur) = on_or_ignoring(cur)?;
    let cardinality = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::GroupLeft) => VectorMatchCardinality::ManyToOne,
        Some(TokenKind::GroupRight) => VectorMatchCardinality::OneToMany,
        _ => return Err(cur.expected("'group_left' or 'group_right'")),
    };
    let cur = cur.advance();
    // The include-label list is optional; a following parenthesized
    // expression would be claimed here, matching the clause grammar.
    let (include_labels, cur) = match grouping_labels(cur) {
        Ok(r) => r,
        Err(_) => (Vec::new(), cur),
    };
    matching.cardinality = cardinality;
    matching.include_labels = include_labels;
    Ok((matching, cur))
}

/// Parse the full vector-matching clause. Never fails: with no modifier
/// tokens present the default one-to-one matching is returned.
pub fn vector_matching<'a>(cur: Cursor<'a>) -> (VectorMatching, Cursor<'a>) {
    if let Ok(r) = on_ignoring_with_group(cur) {
        return r;
    }
    if let Ok(r) = on_or_ignoring(cur) {
        return r;
    }
    let (return_bool, cur) = bool_modifier(cur);
    (VectorMatching::with_bool(return_bool), cur)
}
