use crate::ast::{DataRow, Delete, Expr, Insert, Mutation, Update};
use crate::clause::{Clause, ClauseExpression, FilterTerm};
use crate::error::{AssemblyError, AssemblyResult};

use super::FilterAssembler;

/// One input to [`MutationAssembler::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub enum MutationItem {
    Row(DataRow),
    Filter(FilterTerm),
}

impl From<DataRow> for MutationItem {
    fn from(row: DataRow) -> Self {
        MutationItem::Row(row)
    }
}

impl From<Clause> for MutationItem {
    fn from(clause: Clause) -> Self {
        MutationItem::Filter(clause.into())
    }
}

impl From<ClauseExpression> for MutationItem {
    fn from(expr: ClauseExpression) -> Self {
        MutationItem::Filter(expr.into())
    }
}

impl From<FilterTerm> for MutationItem {
    fn from(term: FilterTerm) -> Self {
        MutationItem::Filter(term)
    }
}

/// Routes data rows and filters to a single INSERT, UPDATE or DELETE.
///
/// | rows | filters | statement |
/// |------|---------|-----------|
/// | 0    | 0       | none      |
/// | 1+   | 0       | INSERT    |
/// | 0    | 1+      | DELETE    |
/// | 1    | 1+      | UPDATE    |
pub struct MutationAssembler {
    table: String,
    filters: FilterAssembler,
}

impl MutationAssembler {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: FilterAssembler::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn assemble<I, T>(&self, items: I) -> AssemblyResult<Option<Mutation>>
    where
        I: IntoIterator<Item = T>,
        T: Into<MutationItem>,
    {
        let mut rows = Vec::new();
        let mut filters = Vec::new();
        for item in items {
            match item.into() {
                MutationItem::Row(row) if row.is_empty() => {
                    return Err(AssemblyError::MutationShape(
                        "Expected at least one column, got 0".into(),
                    ));
                }
                MutationItem::Row(row) => rows.push(row),
                MutationItem::Filter(FilterTerm::Clause(clause)) => {
                    clause.ensure_filter()?;
                    filters.push(FilterTerm::Clause(clause));
                }
                MutationItem::Filter(term) => filters.push(term),
            }
        }

        let mutation = match (rows.is_empty(), filters.is_empty()) {
            (true, true) => return Ok(None),
            (false, true) => self.insert(rows),
            (true, false) => self.delete(filters)?,
            (false, false) => self.update(rows, filters)?,
        };
        tracing::debug!("{}", mutation);
        Ok(Some(mutation))
    }

    fn insert(&self, rows: Vec<DataRow>) -> Mutation {
        Mutation::Insert(Insert {
            table: self.table.clone(),
            rows,
        })
    }

    fn update(&self, mut rows: Vec<DataRow>, filters: Vec<FilterTerm>) -> AssemblyResult<Mutation> {
        if rows.len() != 1 {
            return Err(AssemblyError::MutationShape(format!(
                "Expected only one data item, got {}",
                rows.len()
            )));
        }
        let filter = self.predicate(filters)?;
        Ok(Mutation::Update(Update {
            table: self.table.clone(),
            values: rows.remove(0),
            filter: Some(filter),
        }))
    }

    fn delete(&self, filters: Vec<FilterTerm>) -> AssemblyResult<Mutation> {
        let filter = self.predicate(filters)?;
        Ok(Mutation::Delete(Delete {
            table: self.table.clone(),
            filter: Some(filter),
        }))
    }

    /// AND of every filter; an UPDATE or DELETE always gets a WHERE.
    fn predicate(&self, filters: Vec<FilterTerm>) -> AssemblyResult<Expr> {
        let count = filters.len();
        let Some(expression) = FilterTerm::conjunction(filters)? else {
            return Err(AssemblyError::MutationShape(format!(
                "Expected at least one filter, got {}",
                count
            )));
        };
        self.filters.assemble(expression)?.ok_or_else(|| {
            AssemblyError::EmptyExpression(format!(
                "filters on {} render no predicate",
                self.table
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ColumnRef;
    use crate::clause::FilterOp;

    #[test]
    fn test_update_requires_filter() {
        let assembler = MutationAssembler::new("hardware");
        let err = assembler
            .update(vec![DataRow::new().set("name", "x")], Vec::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected at least one filter, got 0");
    }

    #[test]
    fn test_update_rejects_empty_predicate() {
        let assembler = MutationAssembler::new("hardware");
        let range = Clause::new(ColumnRef::new("hardware", "id"), FilterOp::range(None, None));
        let err = assembler
            .assemble([MutationItem::from(DataRow::new().set("name", "x")), range.into()])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unassemblable expression: filters on hardware render no predicate"
        );
    }

    #[test]
    fn test_empty_row_rejected() {
        let assembler = MutationAssembler::new("hardware");
        let by_id = Clause::new(ColumnRef::new("hardware", "id"), FilterOp::eq(1));
        let err = assembler
            .assemble([MutationItem::from(DataRow::new()), by_id.into()])
            .unwrap_err();
        assert!(matches!(err, AssemblyError::MutationShape(_)));
        assert_eq!(err.to_string(), "Expected at least one column, got 0");

        let err = assembler
            .assemble([DataRow::new().set("name", "x"), DataRow::new()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected at least one column, got 0");
    }
}
