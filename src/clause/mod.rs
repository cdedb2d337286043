//! The clause model: a column, an operation and optional join hints.
//!
//! Clauses compose with [`Clause::and`] / [`Clause::or`] into a
//! [`ClauseExpression`], a postfix token list the filter compiler reduces.
//!
//! ```
//! use clause_assembler::ast::ColumnRef;
//! use clause_assembler::clause::{Clause, FilterOp, Token};
//!
//! let version = Clause::new(ColumnRef::new("firmware", "version"), FilterOp::eq("1.0"));
//! let uri = Clause::new(ColumnRef::new("firmware", "uri"), FilterOp::like("cdn", false));
//!
//! let expr = version.and(uri).unwrap();
//! assert_eq!(expr.tokens().len(), 3);
//! assert!(matches!(expr.tokens()[2], Token::Logic(_)));
//! ```

pub mod expression;
pub mod operations;

pub use expression::{ClauseExpression, FilterTerm, Logic, Token};
pub use operations::{FilterOp, Operation, OperationKind, Slice};

use serde::{Deserialize, Serialize};

use crate::ast::{ColumnRef, JoinOn};
use crate::error::{AssemblyError, AssemblyResult};

/// How to reach a clause's table when it is not in the query yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinHint {
    /// Join with this explicit predicate.
    On(JoinOn),
    /// Join this intermediate table through its own foreign keys.
    Table(String),
}

impl From<JoinOn> for JoinHint {
    fn from(on: JoinOn) -> Self {
        JoinHint::On(on)
    }
}

impl From<&str> for JoinHint {
    fn from(table: &str) -> Self {
        JoinHint::Table(table.to_string())
    }
}

impl From<String> for JoinHint {
    fn from(table: String) -> Self {
        JoinHint::Table(table)
    }
}

/// A single declarative condition on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    column: ColumnRef,
    operation: Operation,
    conditions: Vec<JoinHint>,
}

impl Clause {
    pub fn new(column: ColumnRef, operation: impl Into<Operation>) -> Self {
        Self {
            column,
            operation: operation.into(),
            conditions: Vec::new(),
        }
    }

    pub fn with_hints<I>(column: ColumnRef, operation: impl Into<Operation>, hints: I) -> Self
    where
        I: IntoIterator<Item = JoinHint>,
    {
        Self {
            column,
            operation: operation.into(),
            conditions: hints.into_iter().collect(),
        }
    }

    /// Append a join hint; hints are tried in the order given.
    pub fn with_hint(mut self, hint: impl Into<JoinHint>) -> Self {
        self.conditions.push(hint.into());
        self
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn table(&self) -> &str {
        &self.column.table
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn conditions(&self) -> &[JoinHint] {
        &self.conditions
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    pub fn is_filter(&self) -> bool {
        self.operation.is_filter()
    }

    pub(crate) fn ensure_filter(&self) -> AssemblyResult<()> {
        if self.is_filter() {
            Ok(())
        } else {
            Err(AssemblyError::expected_filter(&self.operation))
        }
    }

    /// Conjunction with another clause or expression.
    pub fn and(&self, other: impl Into<FilterTerm>) -> AssemblyResult<ClauseExpression> {
        self.combine(other.into(), Logic::And)
    }

    /// Disjunction with another clause or expression.
    pub fn or(&self, other: impl Into<FilterTerm>) -> AssemblyResult<ClauseExpression> {
        self.combine(other.into(), Logic::Or)
    }

    fn combine(&self, other: FilterTerm, logic: Logic) -> AssemblyResult<ClauseExpression> {
        let mut tokens = Vec::new();
        match other {
            FilterTerm::Clause(clause) => {
                tokens.push(Token::Clause(clause));
                tokens.push(Token::Clause(self.clone()));
            }
            FilterTerm::Expression(expr) => {
                tokens.push(Token::Clause(self.clone()));
                tokens.extend(expr.into_tokens());
            }
        }
        tokens.push(Token::Logic(logic));
        ClauseExpression::from_tokens(tokens)
    }

    /// Plain snapshot of the clause, for logging and debugging.
    pub fn dump(&self) -> serde_json::Value {
        serde_json::json!({
            "column": self.column.to_string(),
            "operation": self.operation,
            "conditions": self.conditions,
        })
    }
}
