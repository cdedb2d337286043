use crate::ast::Select;
use crate::clause::{Clause, ClauseExpression, FilterTerm, OperationKind, Slice};
use crate::error::{AssemblyError, AssemblyResult};
use crate::schema::Schema;

use super::{FilterAssembler, JoinAssembler, OrderAssembler, SliceAssembler};

/// One input to [`QueryAssembler::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryItem {
    Clause(Clause),
    Expression(ClauseExpression),
    Slice(Slice),
}

impl From<Clause> for QueryItem {
    fn from(clause: Clause) -> Self {
        QueryItem::Clause(clause)
    }
}

impl From<ClauseExpression> for QueryItem {
    fn from(expr: ClauseExpression) -> Self {
        QueryItem::Expression(expr)
    }
}

impl From<Slice> for QueryItem {
    fn from(slice: Slice) -> Self {
        QueryItem::Slice(slice)
    }
}

impl From<FilterTerm> for QueryItem {
    fn from(term: FilterTerm) -> Self {
        match term {
            FilterTerm::Clause(clause) => QueryItem::Clause(clause),
            FilterTerm::Expression(expr) => QueryItem::Expression(expr),
        }
    }
}

/// Applies clauses to a base SELECT: joins, WHERE, ORDER BY, LIMIT/OFFSET.
///
/// The base query is never modified; every call assembles a fresh copy.
pub struct QueryAssembler<'a> {
    schema: &'a Schema,
    query: Select,
}

#[derive(Default)]
struct Separated {
    filters: Vec<FilterTerm>,
    orders: Vec<Clause>,
    slices: Vec<Slice>,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(schema: &'a Schema, query: Select) -> Self {
        Self { schema, query }
    }

    /// The base query.
    pub fn query(&self) -> &Select {
        &self.query
    }

    pub fn assemble<I, T>(&self, items: I) -> AssemblyResult<Select>
    where
        I: IntoIterator<Item = T>,
        T: Into<QueryItem>,
    {
        let Separated {
            filters,
            orders,
            slices,
        } = Self::separate(items)?;

        let mut query = self.query.clone();
        if let Some(expression) = FilterTerm::conjunction(filters)? {
            let term = FilterTerm::from(expression);
            query = JoinAssembler::new(self.schema, query).assemble(&term);
            if let Some(predicate) = FilterAssembler::new().assemble(term)? {
                query = query.filter(predicate);
            }
        }
        query = OrderAssembler::new(query).assemble(&orders);
        query = SliceAssembler::new(query).assemble(slices);
        Ok(query)
    }

    fn separate<I, T>(items: I) -> AssemblyResult<Separated>
    where
        I: IntoIterator<Item = T>,
        T: Into<QueryItem>,
    {
        let mut separated = Separated::default();
        for item in items {
            match item.into() {
                QueryItem::Clause(clause) => match clause.kind() {
                    OperationKind::Filter => separated.filters.push(clause.into()),
                    OperationKind::Order => separated.orders.push(clause),
                    // slices arrive as bare `QueryItem::Slice`, never on a column
                    OperationKind::Slice | OperationKind::Empty => {
                        return Err(AssemblyError::unclassifiable(clause.operation()));
                    }
                },
                QueryItem::Expression(expr) => separated.filters.push(expr.into()),
                QueryItem::Slice(slice) => separated.slices.push(slice),
            }
        }
        tracing::debug!(
            "{} filters, {} orders, {} slices",
            separated.filters.len(),
            separated.orders.len(),
            separated.slices.len()
        );
        Ok(separated)
    }
}
