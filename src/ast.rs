//! AST type definitions.
//!
//! The entry point is the [`Expr`] enum, covering every expression form the
//! grammar produces. Nodes own their children exclusively; the tree is
//! immutable once built and every type is `Clone + PartialEq` so callers
//! can compare and rearrange freely.

use crate::lexer::duration::Duration;
use crate::parser::function::FunctionIdentifier;
use crate::parser::selector::{MatrixSelector, VectorSelector};

/// Root expression type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal: `42`, `3.14`, `0x1F`, `Inf`, `NaN`
    Number(f64),

    /// String literal: `"hello"`, `'world'`
    String(StringLiteral),

    /// Instant vector selector: `http_requests{job="api"}`
    VectorSelector(VectorSelector),

    /// Range vector selector: `http_requests[5m]`
    MatrixSelector(MatrixSelector),

    /// Unary operation: `-foo`, `+bar`
    Unary(Box<UnaryExpr>),

    /// Binary operation: `foo + bar`, `foo / on(job) bar`
    Binary(Box<BinaryExpr>),

    /// Parenthesized expression: `(foo + bar)`
    Paren(Box<Expr>),

    /// Function call: `rate(http_requests[5m])`
    Call(FunctionCall),

    /// Aggregation: `sum by (job) (http_requests)`
    Aggregate(Box<AggregateExpr>),

    /// Time-shifted expression: `foo offset 5m`
    Offset(Box<OffsetExpr>),

    /// Subquery: `rate(http_requests[5m])[30m:1m]`
    Subquery(Box<SubqueryExpr>),
}

/// A quoted string with its original quote character.
///
/// `value` is the text between the quotes exactly as written; escape
/// sequences were validated by the lexer but are not rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub quote: char,
    pub value: String,
}

impl StringLiteral {
    pub fn new(quote: char, value: impl Into<String>) -> Self {
        Self {
            quote,
            value: value.into(),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,
    Sub,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Add => "+",
            UnaryOp::Sub => "-",
        }
    }
}

/// Unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Expr,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Atan2,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Set operations
    And,
    Or,
    Unless,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Atan2 => "atan2",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Unless => "unless",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_set_operator(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Unless)
    }
}

/// How many series on each side may pair up in a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorMatchCardinality {
    #[default]
    OneToOne,
    /// `group_left`: many series on the left match one on the right.
    ManyToOne,
    /// `group_right`: one series on the left matches many on the right.
    OneToMany,
}

/// Vector matching clause of a binary expression.
///
/// `on` selects whether `matching_labels` is an inclusion (`on`) or
/// exclusion (`ignoring`) set. `include_labels` is only populated for
/// many-to-one / one-to-many matches and names the labels copied over from
/// the "many" side. `return_bool` turns a comparison into a 0/1 result
/// instead of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VectorMatching {
    pub cardinality: VectorMatchCardinality,
    pub matching_labels: Vec<String>,
    pub on: bool,
    pub include_labels: Vec<String>,
    pub return_bool: bool,
}

impl VectorMatching {
    /// Clause consisting of nothing but a `bool` modifier.
    pub fn with_bool(return_bool: bool) -> Self {
        Self {
            return_bool,
            ..Self::default()
        }
    }

    /// True when no modifier at all was written.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Binary expression.
///
/// `matching` is always present; a plain `a + b` carries the default
/// one-to-one clause with no labels.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Expr,
    pub rhs: Expr,
    pub matching: VectorMatching,
}

/// Function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: FunctionIdentifier,
    pub args: Vec<Expr>,
}

/// Aggregation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Avg,
    Bottomk,
    Count,
    CountValues,
    Group,
    Max,
    Min,
    Quantile,
    Stddev,
    Stdvar,
    Sum,
    Topk,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Avg => "avg",
            AggregateOp::Bottomk => "bottomk",
            AggregateOp::Count => "count",
            AggregateOp::CountValues => "count_values",
            AggregateOp::Group => "group",
            AggregateOp::Max => "max",
            AggregateOp::Min => "min",
            AggregateOp::Quantile => "quantile",
            AggregateOp::Stddev => "stddev",
            AggregateOp::Stdvar => "stdvar",
            AggregateOp::Sum => "sum",
            AggregateOp::Topk => "topk",
        }
    }
}

/// Aggregation expression.
///
/// `param` is the leading argument of the two-argument form (`topk(5, x)`
/// has param `5`). `without` flips `grouping_labels` from an inclusion to
/// an exclusion set.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    pub op: AggregateOp,
    pub expr: Expr,
    pub param: Option<Expr>,
    pub grouping_labels: Vec<String>,
    pub without: bool,
}

/// Expression shifted in evaluation time.
///
/// `offset` is negative when the query said `offset -<duration>`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetExpr {
    pub expr: Expr,
    pub offset: Duration,
}

/// Subquery expression: evaluate `expr` over `range` at `step` resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryExpr {
    pub expr: Expr,
    pub range: Duration,
    pub step: Option<Duration>,
}

impl Expr {
    /// Strip any number of surrounding parentheses.
    pub fn unwrap_parens(&self) -> &Expr {
        match self {
            Expr::Paren(inner) => inner.unwrap_parens(),
            other => other,
        }
    }
}
