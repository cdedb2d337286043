//! Predicate builders for WHERE clauses.

use crate::ast::{ColumnRef, CompareOp, Expr, Value};

/// Helper to create a comparison
fn compare(column: &ColumnRef, op: CompareOp, value: Value) -> Expr {
    Expr::Compare {
        column: column.clone(),
        op,
        value,
    }
}

/// Create an equality predicate (column = value)
pub fn eq(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Eq, value.into())
}

pub fn ne(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Ne, value.into())
}

pub fn lt(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Lt, value.into())
}

pub fn le(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Le, value.into())
}

pub fn gt(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Gt, value.into())
}

pub fn ge(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Ge, value.into())
}

/// `column IS value` (usually NULL)
pub fn is(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    Expr::Is {
        column: column.clone(),
        value: value.into(),
        negated: false,
    }
}

pub fn is_not(column: &ColumnRef, value: impl Into<Value>) -> Expr {
    Expr::Is {
        column: column.clone(),
        value: value.into(),
        negated: true,
    }
}

pub fn like(column: &ColumnRef, pattern: impl Into<String>, case_sensitive: bool) -> Expr {
    Expr::Like {
        column: column.clone(),
        pattern: pattern.into(),
        case_sensitive,
        negated: false,
    }
}

pub fn not_like(column: &ColumnRef, pattern: impl Into<String>, case_sensitive: bool) -> Expr {
    Expr::Like {
        column: column.clone(),
        pattern: pattern.into(),
        case_sensitive,
        negated: true,
    }
}

pub fn in_list<V: Into<Value>>(column: &ColumnRef, values: impl IntoIterator<Item = V>) -> Expr {
    Expr::InList {
        column: column.clone(),
        values: values.into_iter().map(Into::into).collect(),
        negated: false,
    }
}

pub fn not_in<V: Into<Value>>(column: &ColumnRef, values: impl IntoIterator<Item = V>) -> Expr {
    Expr::InList {
        column: column.clone(),
        values: values.into_iter().map(Into::into).collect(),
        negated: true,
    }
}

pub fn and(left: Expr, right: Expr) -> Expr {
    left.and(right)
}

pub fn or(left: Expr, right: Expr) -> Expr {
    left.or(right)
}

pub fn not(inner: Expr) -> Expr {
    Expr::Not(Box::new(inner))
}
