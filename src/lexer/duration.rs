//! Duration lexemes and the duration text grammar.
//!
//! Duration literals are concatenated `<digits><unit>` groups with units,
//! largest first:
//!
//! ```text
//! y  - year (365 days)
//! w  - week
//! d  - day
//! h  - hour
//! m  - minute
//! s  - second
//! ms - millisecond
//! ```
//!
//! The lexer accepts the groups in any order so that a malformed literal
//! still becomes a single token; [`parse_duration`] then enforces the fixed
//! order and each-unit-at-most-once rule, so `1h30m` is fine and `30m1h` is
//! an invalid-duration error pointing at the whole literal.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::recognize,
    multi::many1,
    sequence::tuple,
};

/// An elapsed time, stored in milliseconds.
///
/// Durations read from query text are non-negative; offset clauses negate
/// them externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub milliseconds: i64,
}

impl Duration {
    pub const fn from_millis(ms: i64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn as_millis(&self) -> i64 {
        self.milliseconds
    }

    /// The same span of time in the opposite direction.
    pub const fn negated(&self) -> Self {
        Self {
            milliseconds: -self.milliseconds,
        }
    }
}

/// Recognize a duration lexeme: one or more `<digits><unit>` groups.
pub(crate) fn duration_lexeme(input: &str) -> IResult<&str, &str> {
    recognize(many1(tuple((digit1, duration_unit)))).parse(input)
}

fn duration_unit(input: &str) -> IResult<&str, &str> {
    // "ms" before "m" so milliseconds win
    alt((
        tag("ms"),
        tag("s"),
        tag("m"),
        tag("h"),
        tag("d"),
        tag("w"),
        tag("y"),
    ))
    .parse(input)
}

// (rank, length of the unit suffix, milliseconds per unit)
fn unit_spec(rest: &str) -> Option<(u8, usize, i64)> {
    // "ms" before "m" here as well
    if rest.starts_with("ms") {
        Some((6, 2, 1))
    } else if rest.starts_with('s') {
        Some((5, 1, 1_000))
    } else if rest.starts_with('m') {
        Some((4, 1, 60_000))
    } else if rest.starts_with('h') {
        Some((3, 1, 3_600_000))
    } else if rest.starts_with('d') {
        Some((2, 1, 86_400_000))
    } else if rest.starts_with('w') {
        Some((1, 1, 604_800_000))
    } else if rest.starts_with('y') {
        Some((0, 1, 31_536_000_000))
    } else {
        None
    }
}

/// Parse duration text against the anchored ordered-group grammar.
///
/// Each of the seven units may appear at most once and only in
/// largest-to-smallest order. The empty string matches and yields a zero
/// duration; callers decide whether to accept that. Returns `None` on
/// out-of-order groups, residual text, or arithmetic overflow.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let mut rest = text;
    let mut last_rank: Option<u8> = None;
    let mut total: i64 = 0;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return None;
        }
        let value: i64 = rest[..digits_end].parse().ok()?;
        rest = &rest[digits_end..];

        let (rank, unit_len, unit_millis) = unit_spec(rest)?;
        if last_rank.is_some_and(|last| rank <= last) {
            return None;
        }
        last_rank = Some(rank);
        rest = &rest[unit_len..];

        total = total.checked_add(value.checked_mul(unit_millis)?)?;
    }
    Some(Duration::from_millis(total))
}
