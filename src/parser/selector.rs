//! Vector and matrix selectors, label matchers, name rules.
//!
//! Selector syntax:
//!
//! ```text
//! metric_name
//! metric_name{label_matchers}
//! {label_matchers}
//! metric_name{label_matchers}[5m]
//! ```
//!
//! The name rules are where the keyword/identifier overlap is resolved: a
//! metric may be spelled with an aggregation keyword (`sum` is a legal
//! metric name), and label names additionally admit `on`, `ignoring` and
//! `offset`.

use crate::ast::StringLiteral;
use crate::lexer::duration::Duration;
use crate::lexer::token::TokenKind;
use crate::parser::aggregation::aggregate_op;
use crate::parser::literal;
use crate::parser::{Cursor, PResult};

/// Label matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `=~`
    Regexp,
    /// `!~`
    NotRegexp,
}

impl MatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Equal => "=",
            MatchOp::NotEqual => "!=",
            MatchOp::Regexp => "=~",
            MatchOp::NotRegexp => "!~",
        }
    }
}

/// A single label constraint: `job="api"`, `mode!~"idle|iowait"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    pub label: String,
    pub op: MatchOp,
    pub value: StringLiteral,
}

/// An instant vector selector.
///
/// `{}` is legal syntax and yields no name and an empty matcher list;
/// rejecting a selector that matches everything is a semantic concern left
/// to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSelector {
    pub name: Option<String>,
    pub matchers: Vec<LabelMatcher>,
}

impl VectorSelector {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            matchers: Vec::new(),
        }
    }
}

/// A range vector selector: a vector selector plus `[duration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSelector {
    pub selector: VectorSelector,
    pub range: Duration,
}

/// Parse a metric name.
///
/// Accepts metric identifiers (colon names), plain identifiers, and any
/// aggregation keyword, since metrics may collide with those lexically.
pub fn metric_identifier<'a>(cur: Cursor<'a>) -> PResult<'a, String> {
    match cur.peek() {
        Some(tok)
            if tok.kind == TokenKind::MetricIdentifier
                || tok.kind == TokenKind::Identifier
                || aggregate_op(tok.kind).is_some() =>
        {
            Ok((tok.text.to_string(), cur.advance()))
        }
        _ => Err(cur.expected("metric name")),
    }
}

/// Parse a label name.
///
/// Identifiers, aggregation keywords, and the `ignoring` / `on` / `offset`
/// keywords are all acceptable label names.
pub fn label_value_matcher<'a>(cur: Cursor<'a>) -> PResult<'a, String> {
    match cur.peek() {
        Some(tok)
            if tok.kind == TokenKind::Identifier
                || tok.kind == TokenKind::Ignoring
                || tok.kind == TokenKind::On
                || tok.kind == TokenKind::Offset
                || aggregate_op(tok.kind).is_some() =>
        {
            Ok((tok.text.to_string(), cur.advance()))
        }
        _ => Err(cur.expected("label name")),
    }
}

/// Parse a label matching operator.
pub fn match_op<'a>(cur: Cursor<'a>) -> PResult<'a, MatchOp> {
    let op = match cur.peek().map(|t| t.kind) {
        Some(TokenKind::Eq) => MatchOp::Equal,
        Some(TokenKind::Neq) => MatchOp::NotEqual,
        Some(TokenKind::EqRegex) => MatchOp::Regexp,
        Some(TokenKind::NeqRegex) => MatchOp::NotRegexp,
        _ => return Err(cur.expected("label match operator")),
    };
    Ok((op, cur.advance()))
}

/// Parse one `label op "value"` constraint.
pub fn label_matcher<'a>(cur: Cursor<'a>) -> PResult<'a, LabelMatcher> {
    let (label, cur) = label_value_matcher(cur)?;
    let (op, cur) = match_op(cur)?;
    let (value, cur) = literal::string_literal(cur)?;
    Ok((LabelMatcher { label, op, value }, cur))
}

/// Parse a brace-delimited matcher list.
///
/// The list may be empty and tolerates one trailing comma. Matcher order is
/// preserved as written.
pub fn label_matchers<'a>(cur: Cursor<'a>) -> PResult<'a, Vec<LabelMatcher>> {
    let (_, cur) = cur.expect(TokenKind::LeftBrace)?;
    let mut matchers = Vec::new();
    let mut cur = cur;

    // Commit to the list as soon as a label name starts; an incomplete
    // matcher is then reported as its own error instead of a missing '}'.
    if label_value_matcher(cur).is_ok() {
        let (first, next) = label_matcher(cur)?;
        matchers.push(first);
        cur = next;
        while let Some((_, after_comma)) = cur.eat(TokenKind::Comma) {
            // A comma before '}' is a tolerated trailing comma
            if label_value_matcher(after_comma).is_err() {
                cur = after_comma;
                break;
            }
            let (m, next) = label_matcher(after_comma)?;
            matchers.push(m);
            cur = next;
        }
    }

    let (_, cur) = cur.expect(TokenKind::RightBrace)?;
    Ok((matchers, cur))
}

/// Parse a vector selector.
///
/// The metric-ful form is tried first; its matcher block is optional and
/// defaults to empty. The metric-less form requires the braces.
pub fn vector_selector<'a>(cur: Cursor<'a>) -> PResult<'a, VectorSelector> {
    if let Ok((name, cur)) = metric_identifier(cur) {
        let (matchers, cur) = if cur.peek().is_some_and(|t| t.kind == TokenKind::LeftBrace) {
            label_matchers(cur)?
        } else {
            (Vec::new(), cur)
        };
        return Ok((
            VectorSelector {
                name: Some(name),
                matchers,
            },
            cur,
        ));
    }

    let (matchers, cur) = label_matchers(cur)?;
    Ok((
        VectorSelector {
            name: None,
            matchers,
        },
        cur,
    ))
}

/// Parse a matrix selector: a vector selector immediately followed by
/// `[duration]`.
pub fn matrix_selector<'a>(cur: Cursor<'a>) -> PResult<'a, MatrixSelector> {
    let (selector, cur) = vector_selector(cur)?;
    let (_, cur) = cur.expect(TokenKind::LeftBracket)?;
    let (range, cur) = literal::duration(cur)?;
    let (_, cur) = cur.expect(TokenKind::RightBracket)?;
    Ok((MatrixSelector { selector, range }, cur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn tokens(input: &str) -> Vec<crate::lexer::token::Token<'_>> {
        tokenize(input).unwrap_or_else(|e| panic!("failed to tokenize {:?}: {}", input, e))
    }

    #[test]
    fn test_metric_identifier_kinds() {
        let toks = tokens("http_requests");
        let (name, _) = metric_identifier(Cursor::new(&toks)).unwrap();
        assert_eq!(name, "http_requests");

        let toks = tokens("job:rate:5m");
        let (name, _) = metric_identifier(Cursor::new(&toks)).unwrap();
        assert_eq!(name, "job:rate:5m");

        // Aggregation keywords are legal metric names
        let toks = tokens("sum");
        let (name, _) = metric_identifier(Cursor::new(&toks)).unwrap();
        assert_eq!(name, "sum");
    }

    #[test]
    fn test_metric_identifier_rejects_other_keywords() {
        for input in ["and", "on", "bool"] {
            let toks = tokens(input);
            assert!(
                metric_identifier(Cursor::new(&toks)).is_err(),
                "{:?} should not name a metric",
                input
            );
        }
    }

    #[test]
    fn test_label_name_keywords() {
        for input in ["job", "sum", "on", "ignoring", "offset"] {
            let toks = tokens(input);
            let (name, _) = label_value_matcher(Cursor::new(&toks)).unwrap();
            assert_eq!(name, input);
        }
        let toks = tokens("by");
        assert!(label_value_matcher(Cursor::new(&toks)).is_err());
    }

    #[test]
    fn test_match_ops() {
        for (input, expected) in [
            ("=", MatchOp::Equal),
            ("!=", MatchOp::NotEqual),
            ("=~", MatchOp::Regexp),
            ("!~", MatchOp::NotRegexp),
        ] {
            let toks = tokens(input);
            let (op, _) = match_op(Cursor::new(&toks)).unwrap();
            assert_eq!(op, expected, "for {:?}", input);
        }
    }

    #[test]
    fn test_label_matcher() {
        let toks = tokens(r#"job="api""#);
        let (m, cur) = label_matcher(Cursor::new(&toks)).unwrap();
        assert_eq!(m.label, "job");
        assert_eq!(m.op, MatchOp::Equal);
        assert_eq!(m.value.value, "api");
        assert!(cur.at_end());
    }

    #[test]
    fn test_label_matchers_list() {
        let toks = tokens(r#"{job="api", mode!~"idle"}"#);
        let (ms, cur) = label_matchers(Cursor::new(&toks)).unwrap();
        assert!(cur.at_end());
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].label, "job");
        assert_eq!(ms[1].label, "mode");
        assert_eq!(ms[1].op, MatchOp::NotRegexp);
    }

    #[test]
    fn test_label_matchers_empty_and_trailing_comma() {
        let toks = tokens("{}");
        let (ms, _) = label_matchers(Cursor::new(&toks)).unwrap();
        assert!(ms.is_empty());

        let toks = tokens(r#"{job="api",}"#);
        let (ms, cur) = label_matchers(Cursor::new(&toks)).unwrap();
        assert!(cur.at_end());
        assert_eq!(ms.len(), 1);
    }

    #[test]
    fn test_label_matchers_preserve_order() {
        let toks = tokens(r#"{b="2", a="1", c="3"}"#);
        let (ms, _) = label_matchers(Cursor::new(&toks)).unwrap();
        let names: Vec<&str> = ms.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_vector_selector_forms() {
        let toks = tokens("up");
        let (vs, _) = vector_selector(Cursor::new(&toks)).unwrap();
        assert_eq!(vs.name.as_deref(), Some("up"));
        assert!(vs.matchers.is_empty());

        let toks = tokens(r#"up{job="x"}"#);
        let (vs, _) = vector_selector(Cursor::new(&toks)).unwrap();
        assert_eq!(vs.name.as_deref(), Some("up"));
        assert_eq!(vs.matchers.len(), 1);

        let toks = tokens(r#"{job="x"}"#);
        let (vs, _) = vector_selector(Cursor::new(&toks)).unwrap();
        assert_eq!(vs.name, None);
        assert_eq!(vs.matchers.len(), 1);
    }

    #[test]
    fn test_vector_selector_requires_name_or_braces() {
        let toks = tokens("[5m]");
        assert!(vector_selector(Cursor::new(&toks)).is_err());
    }

    #[test]
    fn test_matrix_selector() {
        let toks = tokens("up[5m]");
        let (ms, cur) = matrix_selector(Cursor::new(&toks)).unwrap();
        assert!(cur.at_end());
        assert_eq!(ms.selector.name.as_deref(), Some("up"));
        assert_eq!(ms.range.as_millis(), 5 * 60 * 1000);
    }

    #[test]
    fn test_matrix_selector_rejects_subquery_colon() {
        let toks = tokens("up[5m:1m]");
        assert!(matrix_selector(Cursor::new(&toks)).is_err());
    }
}
