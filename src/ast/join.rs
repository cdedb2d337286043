use crate::ast::{ColumnRef, Value};
use serde::{Deserialize, Serialize};

/// Join Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

/// One side of a join predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Column(ColumnRef),
    /// A computed or literal side; it belongs to no table.
    Literal(Value),
}

impl Operand {
    pub fn table(&self) -> Option<&str> {
        match self {
            Operand::Column(col) => Some(&col.table),
            Operand::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Column(col) => write!(f, "{}", col),
            Operand::Literal(value) => write!(f, "{}", value),
        }
    }
}

impl From<ColumnRef> for Operand {
    fn from(col: ColumnRef) -> Self {
        Operand::Column(col)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

/// Equality predicate joining two operands: `left = right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinOn {
    pub left: Operand,
    pub right: Operand,
}

impl JoinOn {
    pub fn new(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Both table names, or `None` when either side is not a column.
    pub fn tables(&self) -> Option<(&str, &str)> {
        Some((self.left.table()?, self.right.table()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub on: JoinOn,
    pub kind: JoinKind,
}
