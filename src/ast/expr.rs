use crate::ast::{ColumnRef, Value};
use serde::{Deserialize, Serialize};

/// Binary comparison between a column and a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// A boolean predicate tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: Value,
    },
    /// `column IS [NOT] value`
    Is {
        column: ColumnRef,
        value: Value,
        negated: bool,
    },
    /// Pattern match; `case_sensitive: false` renders the case-folded form.
    Like {
        column: ColumnRef,
        pattern: String,
        case_sensitive: bool,
        negated: bool,
    },
    InList {
        column: ColumnRef,
        values: Vec<Value>,
        negated: bool,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of `self` and `other`.
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }
}
