//! Filter compiler: clause expressions to predicate trees.

use std::collections::VecDeque;

use crate::ast::builders::{and, eq, ge, gt, in_list, is, is_not, le, like, lt, ne, not, not_in, not_like, or};
use crate::ast::{ColumnRef, Expr};
use crate::clause::{Clause, FilterOp, FilterTerm, Logic, Operation, Token};
use crate::error::{AssemblyError, AssemblyResult};

/// Reduces a postfix token list with a double-ended buffer.
///
/// Clauses render to the front of the buffer; a marker pops up to two front
/// items `(first, second)` and pushes `first <op> second` back.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterAssembler;

impl FilterAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Compile a clause or expression.
    ///
    /// `Ok(None)` means every clause rendered to "no constraint", such as a
    /// range with neither bound.
    pub fn assemble(&self, term: impl Into<FilterTerm>) -> AssemblyResult<Option<Expr>> {
        let queue: VecDeque<Token> = term
            .into()
            .into_tokens()
            .into_iter()
            .filter(|t| match t {
                Token::Clause(c) => c.is_filter(),
                Token::Logic(_) => true,
            })
            .collect();
        if queue.is_empty() {
            return Err(AssemblyError::EmptyExpression(
                "no filter clauses to compile".to_string(),
            ));
        }

        let mut buffer: VecDeque<Expr> = VecDeque::new();
        for token in queue {
            match token {
                Token::Clause(clause) => {
                    if let Some(expr) = self.compile_clause(&clause)? {
                        tracing::trace!("push {}", expr);
                        buffer.push_front(expr);
                    }
                }
                Token::Logic(logic) => {
                    let Some(first) = buffer.pop_front() else {
                        continue;
                    };
                    let combined = match buffer.pop_front() {
                        Some(second) => match logic {
                            Logic::And => and(first, second),
                            Logic::Or => or(first, second),
                        },
                        None => first,
                    };
                    tracing::trace!("{} -> {}", logic, combined);
                    buffer.push_front(combined);
                }
            }
        }

        match buffer.len() {
            0 | 1 => Ok(buffer.pop_front()),
            n => Err(AssemblyError::EmptyExpression(format!(
                "{} operands left without a connective",
                n
            ))),
        }
    }

    /// Render one filter clause.
    pub fn compile_clause(&self, clause: &Clause) -> AssemblyResult<Option<Expr>> {
        match clause.operation() {
            Operation::Filter(op) => self.compile_op(clause.column(), op),
            other => Err(AssemblyError::expected_filter(other)),
        }
    }

    fn compile_op(&self, column: &ColumnRef, op: &FilterOp) -> AssemblyResult<Option<Expr>> {
        let expr = match op {
            FilterOp::Eq(v) => eq(column, v.clone()),
            FilterOp::Ne(v) => ne(column, v.clone()),
            FilterOp::Lt(v) => lt(column, v.clone()),
            FilterOp::Le(v) => le(column, v.clone()),
            FilterOp::Gt(v) => gt(column, v.clone()),
            FilterOp::Ge(v) => ge(column, v.clone()),
            FilterOp::Is(v) => is(column, v.clone()),
            FilterOp::Like {
                pattern,
                case_sensitive,
            } => like(column, format!("%{}%", pattern), *case_sensitive),
            FilterOp::Set(values) => in_list(column, values.iter().cloned()),
            FilterOp::Not(inner) => return self.compile_not(column, inner),
            FilterOp::Range { lower, upper } => {
                return self.compile_range(column, lower.as_deref(), upper.as_deref());
            }
        };
        Ok(Some(expr))
    }

    fn compile_not(&self, column: &ColumnRef, inner: &FilterOp) -> AssemblyResult<Option<Expr>> {
        let expr = match inner {
            FilterOp::Is(v) => is_not(column, v.clone()),
            FilterOp::Eq(v) => ne(column, v.clone()),
            FilterOp::Like {
                pattern,
                case_sensitive,
            } => not_like(column, format!("%{}%", pattern), *case_sensitive),
            FilterOp::Set(values) => not_in(column, values.iter().cloned()),
            other => return Ok(self.compile_op(column, other)?.map(not)),
        };
        Ok(Some(expr))
    }

    fn compile_range(
        &self,
        column: &ColumnRef,
        lower: Option<&FilterOp>,
        upper: Option<&FilterOp>,
    ) -> AssemblyResult<Option<Expr>> {
        let mut bounds = Vec::with_capacity(2);
        for bound in [lower, upper].into_iter().flatten() {
            if !is_comparison(bound) {
                return Err(AssemblyError::UnsupportedOperation(format!(
                    "{} as a RANGE bound",
                    bound
                )));
            }
            if let Some(expr) = self.compile_op(column, bound)? {
                bounds.push(expr);
            }
        }

        let mut bounds = bounds.into_iter();
        let Some(first) = bounds.next() else {
            return Ok(None);
        };
        Ok(Some(match bounds.next() {
            Some(second) => and(first, second),
            None => first,
        }))
    }
}

fn is_comparison(op: &FilterOp) -> bool {
    matches!(
        op,
        FilterOp::Eq(_)
            | FilterOp::Ne(_)
            | FilterOp::Lt(_)
            | FilterOp::Le(_)
            | FilterOp::Gt(_)
            | FilterOp::Ge(_)
    )
}
