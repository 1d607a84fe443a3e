//! Shared helpers for the integration suites.

#![allow(dead_code)]

use promql_syntax::{Expr, ParseError, parse};

/// Parse `input`, panicking with a readable message on failure.
pub fn assert_parses(input: &str) -> Expr {
    match parse(input) {
        Ok(expr) => expr,
        Err(e) => panic!("expected {:?} to parse, got error: {}", input, e),
    }
}

/// Assert that `input` fails to parse and return the error.
pub fn assert_parse_error(input: &str) -> ParseError {
    match parse(input) {
        Ok(expr) => panic!("expected {:?} to fail, but it parsed as {:?}", input, expr),
        Err(e) => e,
    }
}
