//! Operation taxonomy carried by a clause.

use serde::{Deserialize, Serialize};

use crate::ast::{SortOrder, Value};

/// What a clause asks of its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Filter(FilterOp),
    Order(SortOrder),
    Slice(Slice),
    /// The empty operation. It is not a filter and never composes.
    Noop,
}

/// Category used to route a clause through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Filter,
    Order,
    Slice,
    Empty,
}

/// Predicate operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterOp {
    Eq(Value),
    Ne(Value),
    Lt(Value),
    Le(Value),
    Gt(Value),
    Ge(Value),
    Is(Value),
    /// Substring match; the pattern is wrapped as `%pattern%`.
    Like {
        pattern: String,
        case_sensitive: bool,
    },
    /// Membership in a set of values.
    Set(Vec<Value>),
    Not(Box<FilterOp>),
    /// Optional lower and upper bound, each a comparison.
    Range {
        lower: Option<Box<FilterOp>>,
        upper: Option<Box<FilterOp>>,
    },
}

/// Pagination operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slice {
    Limit(u64),
    Offset(u64),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Filter(_) => OperationKind::Filter,
            Operation::Order(_) => OperationKind::Order,
            Operation::Slice(_) => OperationKind::Slice,
            Operation::Noop => OperationKind::Empty,
        }
    }

    pub fn is_filter(&self) -> bool {
        self.kind() == OperationKind::Filter
    }

    pub fn asc() -> Self {
        Operation::Order(SortOrder::Asc)
    }

    pub fn desc() -> Self {
        Operation::Order(SortOrder::Desc)
    }

    pub fn limit(n: u64) -> Self {
        Operation::Slice(Slice::Limit(n))
    }

    pub fn offset(n: u64) -> Self {
        Operation::Slice(Slice::Offset(n))
    }
}

impl FilterOp {
    pub fn eq(value: impl Into<Value>) -> Self {
        FilterOp::Eq(value.into())
    }

    pub fn ne(value: impl Into<Value>) -> Self {
        FilterOp::Ne(value.into())
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        FilterOp::Lt(value.into())
    }

    pub fn le(value: impl Into<Value>) -> Self {
        FilterOp::Le(value.into())
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        FilterOp::Gt(value.into())
    }

    pub fn ge(value: impl Into<Value>) -> Self {
        FilterOp::Ge(value.into())
    }

    pub fn is(value: impl Into<Value>) -> Self {
        FilterOp::Is(value.into())
    }

    pub fn like(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        FilterOp::Like {
            pattern: pattern.into(),
            case_sensitive,
        }
    }

    pub fn set<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        FilterOp::Set(values.into_iter().map(Into::into).collect())
    }

    pub fn not(inner: FilterOp) -> Self {
        FilterOp::Not(Box::new(inner))
    }

    pub fn range(lower: Option<FilterOp>, upper: Option<FilterOp>) -> Self {
        FilterOp::Range {
            lower: lower.map(Box::new),
            upper: upper.map(Box::new),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "EQ",
            FilterOp::Ne(_) => "NE",
            FilterOp::Lt(_) => "LT",
            FilterOp::Le(_) => "LE",
            FilterOp::Gt(_) => "GT",
            FilterOp::Ge(_) => "GE",
            FilterOp::Is(_) => "IS",
            FilterOp::Like { .. } => "LIKE",
            FilterOp::Set(_) => "SET",
            FilterOp::Not(_) => "NOT",
            FilterOp::Range { .. } => "RANGE",
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Not(inner) => write!(f, "NOT({})", inner),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slice::Limit(_) => write!(f, "LIMIT"),
            Slice::Offset(_) => write!(f, "OFFSET"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Filter(op) => write!(f, "{}", op),
            Operation::Order(order) => write!(f, "{}", order),
            Operation::Slice(slice) => write!(f, "{}", slice),
            Operation::Noop => write!(f, "NOOP"),
        }
    }
}

impl From<FilterOp> for Operation {
    fn from(op: FilterOp) -> Self {
        Operation::Filter(op)
    }
}

impl From<SortOrder> for Operation {
    fn from(order: SortOrder) -> Self {
        Operation::Order(order)
    }
}

impl From<Slice> for Operation {
    fn from(slice: Slice) -> Self {
        Operation::Slice(slice)
    }
}
