use crate::ast::Select;
use crate::clause::{Clause, Operation};

/// Appends `ORDER BY` keys in call order.
pub struct OrderAssembler {
    query: Select,
}

impl OrderAssembler {
    pub fn new(query: Select) -> Self {
        Self { query }
    }

    /// Non-order clauses are ignored.
    pub fn assemble<'c, I>(mut self, clauses: I) -> Select
    where
        I: IntoIterator<Item = &'c Clause>,
    {
        for clause in clauses {
            if let Operation::Order(order) = clause.operation() {
                tracing::debug!("ORDER BY {} {}", clause.column(), order);
                self.query = self.query.order_by(clause.column().clone(), *order);
            }
        }
        self.query
    }
}
