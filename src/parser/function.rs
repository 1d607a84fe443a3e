//! Function identifiers and call parsing.
//!
//! Function names are resolved against a closed enumeration. The lexical
//! name is normalized — the letter after each underscore is upper-cased,
//! underscores are dropped, and the first letter is upper-cased — and the
//! result looked up among the variant names, so `label_replace` resolves to
//! [`FunctionIdentifier::LabelReplace`]. Unknown names are reported with
//! the original spelling and position.
//!
//! Argument lists are parsed syntactically only; per-function arity and
//! type checking belongs to evaluation, not to this crate.

use crate::ast::{Expr, FunctionCall};
use crate::error::ParseError;
use crate::lexer::token::TokenKind;
use crate::parser::{Cursor, PResult, expr};

/// The built-in function set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionIdentifier {
    Abs,
    Absent,
    AbsentOverTime,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    AvgOverTime,
    Ceil,
    Changes,
    Clamp,
    ClampMax,
    ClampMin,
    Cos,
    Cosh,
    CountOverTime,
    DayOfMonth,
    DayOfWeek,
    DayOfYear,
    DaysInMonth,
    Deg,
    Delta,
    Deriv,
    Exp,
    Floor,
    HistogramCount,
    HistogramFraction,
    HistogramQuantile,
    HistogramSum,
    HoltWinters,
    Hour,
    Idelta,
    Increase,
    Irate,
    LabelJoin,
    LabelReplace,
    LastOverTime,
    Ln,
    Log2,
    Log10,
    MaxOverTime,
    MinOverTime,
    Minute,
    Month,
    Pi,
    PredictLinear,
    PresentOverTime,
    QuantileOverTime,
    Rad,
    Rate,
    Resets,
    Round,
    Scalar,
    Sgn,
    Sin,
    Sinh,
    Sort,
    SortDesc,
    Sqrt,
    StddevOverTime,
    StdvarOverTime,
    SumOverTime,
    Tan,
    Tanh,
    Time,
    Timestamp,
    Vector,
    Year,
}

impl FunctionIdentifier {
    /// Resolve a lexical function name.
    ///
    /// `None` means the name matches no built-in function.
    pub fn from_name(name: &str) -> Option<FunctionIdentifier> {
        Self::from_normalized(&normalize(name))
    }

    fn from_normalized(name: &str) -> Option<FunctionIdentifier> {
        use FunctionIdentifier::*;
        let id = match name {
            "Abs" => Abs,
            "Absent" => Absent,
            "AbsentOverTime" => AbsentOverTime,
            "Acos" => Acos,
            "Acosh" => Acosh,
            "Asin" => Asin,
            "Asinh" => Asinh,
            "Atan" => Atan,
            "Atanh" => Atanh,
            "AvgOverTime" => AvgOverTime,
            "Ceil" => Ceil,
            "Changes" => Changes,
            "Clamp" => Clamp,
            "ClampMax" => ClampMax,
            "ClampMin" => ClampMin,
            "Cos" => Cos,
            "Cosh" => Cosh,
            "CountOverTime" => CountOverTime,
            "DayOfMonth" => DayOfMonth,
            "DayOfWeek" => DayOfWeek,
            "DayOfYear" => DayOfYear,
            "DaysInMonth" => DaysInMonth,
            "Deg" => Deg,
            "Delta" => Delta,
            "Deriv" => Deriv,
            "Exp" => Exp,
            "Floor" => Floor,
            "HistogramCount" => HistogramCount,
            "HistogramFraction" => HistogramFraction,
            "HistogramQuantile" => HistogramQuantile,
            "HistogramSum" => HistogramSum,
            "HoltWinters" => HoltWinters,
            "Hour" => Hour,
            "Idelta" => Idelta,
            "Increase" => Increase,
            "Irate" => Irate,
            "LabelJoin" => LabelJoin,
            "LabelReplace" => LabelReplace,
            "LastOverTime" => LastOverTime,
            "Ln" => Ln,
            "Log2" => Log2,
            "Log10" => Log10,
            "MaxOverTime" => MaxOverTime,
            "MinOverTime" => MinOverTime,
            "Minute" => Minute,
            "Month" => Month,
            "Pi" => Pi,
            "PredictLinear" => PredictLinear,
            "PresentOverTime" => PresentOverTime,
            "QuantileOverTime" => QuantileOverTime,
            "Rad" => Rad,
            "Rate" => Rate,
            "Resets" => Resets,
            "Round" => Round,
            "Scalar" => Scalar,
            "Sgn" => Sgn,
            "Sin" => Sin,
            "Sinh" => Sinh,
            "Sort" => Sort,
            "SortDesc" => SortDesc,
            "Sqrt" => Sqrt,
            "StddevOverTime" => StddevOverTime,
            "StdvarOverTime" => StdvarOverTime,
            "SumOverTime" => SumOverTime,
            "Tan" => Tan,
            "Tanh" => Tanh,
            "Time" => Time,
            "Timestamp" => Timestamp,
            "Vector" => Vector,
            "Year" => Year,
            _ => return None,
        };
        Some(id)
    }

    /// The canonical query-language spelling.
    pub fn as_str(&self) -> &'static str {
        use FunctionIdentifier::*;
        match self {
            Abs => "abs",
            Absent => "absent",
            AbsentOverTime => "absent_over_time",
            Acos => "acos",
            Acosh => "acosh",
            Asin => "asin",
            Asinh => "asinh",
            Atan => "atan",
            Atanh => "atanh",
            AvgOverTime => "avg_over_time",
            Ceil => "ceil",
            Changes => "changes",
            Clamp => "clamp",
            ClampMax => "clamp_max",
            ClampMin => "clamp_min",
            Cos => "cos",
            Cosh => "cosh",
            CountOverTime => "count_over_time",
            DayOfMonth => "day_of_month",
            DayOfWeek => "day_of_week",
            DayOfYear => "day_of_year",
            DaysInMonth => "days_in_month",
            Deg => "deg",
            Delta => "delta",
            Deriv => "deriv",
            Exp => "exp",
            Floor => "floor",
            HistogramCount => "histogram_count",
            HistogramFraction => "histogram_fraction",
            HistogramQuantile => "histogram_quantile",
            HistogramSum => "histogram_sum",
            HoltWinters => "holt_winters",
            Hour => "hour",
            Idelta => "idelta",
            Increase => "increase",
            Irate => "irate",
            LabelJoin => "label_join",
            LabelReplace => "label_replace",
            LastOverTime => "last_over_time",
            Ln => "ln",
            Log2 => "log2",
            Log10 => "log10",
            MaxOverTime => "max_over_time",
            MinOverTime => "min_over_time",
            Minute => "minute",
            Month => "month",
            Pi => "pi",
            PredictLinear => "predict_linear",
            PresentOverTime => "present_over_time",
            QuantileOverTime => "quantile_over_time",
            Rad => "rad",
            Rate => "rate",
            Resets => "resets",
            Round => "round",
            Scalar => "scalar",
            Sgn => "sgn",
            Sin => "sin",
            Sinh => "sinh",
            Sort => "sort",
            SortDesc => "sort_desc",
            Sqrt => "sqrt",
            StddevOverTime => "stddev_over_time",
            StdvarOverTime => "stdvar_over_time",
            SumOverTime => "sum_over_time",
            Tan => "tan",
            Tanh => "tanh",
            Time => "time",
            Timestamp => "timestamp",
            Vector => "vector",
            Year => "year",
        }
    }
}

/// snake_case to PascalCase: upper-case the letter after each underscore,
/// drop the underscores, upper-case the first letter.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a parenthesized, comma-delimited, zero-or-more expression list.
///
/// Shared between function calls and aggregation expressions.
pub fn function_args<'a>(cur: Cursor<'a>) -> PResult<'a, Vec<Expr>> {
    let (_, cur) = cur.expect(TokenKind::LeftParen)?;
    if let Some((_, cur)) = cur.eat(TokenKind::RightParen) {
        return Ok((Vec::new(), cur));
    }

    let mut args = Vec::new();
    let (first, mut cur) = expr::expr(cur)?;
    args.push(first);
    while let Some((_, after_comma)) = cur.eat(TokenKind::Comma) {
        let (arg, next) = expr::expr(after_comma)?;
        args.push(arg);
        cur = next;
    }

    let (_, cur) = cur.expect(TokenKind::RightParen)?;
    Ok((args, cur))
}

/// Parse a function call: a resolvable identifier followed by arguments.
pub fn function_call<'a>(cur: Cursor<'a>) -> PResult<'a, FunctionCall> {
    let (name_token, cur) = cur.expect(TokenKind::Identifier)?;
    let function =
        FunctionIdentifier::from_name(name_token.text).ok_or_else(|| ParseError::UnknownFunction {
            name: name_token.text.to_string(),
            offset: name_token.offset,
        })?;
    let (args, cur) = function_args(cur)?;
    Ok((FunctionCall { function, args }, cur))
}
