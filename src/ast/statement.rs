use crate::ast::{ColumnRef, DataRow, Expr, Join, JoinKind, JoinOn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub order: SortOrder,
}

/// A SELECT statement under construction.
///
/// Builder methods consume and return the statement so that an owner can
/// thread one value through a chain of appliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Select {
    /// Selected columns; empty renders `*`.
    pub columns: Vec<ColumnRef>,
    /// Tables named explicitly in FROM.
    #[serde(default)]
    pub from: Vec<String>,
    #[serde(default)]
    pub joins: Vec<Join>,
    #[serde(default)]
    pub filter: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl Select {
    /// `SELECT <columns>`; FROM is derived from the columns' tables.
    pub fn columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = ColumnRef>,
    {
        Self {
            columns: columns.into_iter().collect(),
            ..Default::default()
        }
    }

    /// `SELECT * FROM <table>`
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            from: vec![table.into()],
            ..Default::default()
        }
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        if !self.from.contains(&table) {
            self.from.push(table);
        }
        self
    }

    /// Tables rendered in FROM: explicit ones first, then the tables of
    /// selected columns that no join already brings in.
    pub fn from_tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = Vec::new();
        for table in &self.from {
            if !tables.contains(&table.as_str()) {
                tables.push(table);
            }
        }
        for column in &self.columns {
            let table = column.table.as_str();
            if !tables.contains(&table) && !self.joined_tables().any(|t| t == table) {
                tables.push(table);
            }
        }
        tables
    }

    pub fn joined_tables(&self) -> impl Iterator<Item = &str> {
        self.joins.iter().map(|j| j.table.as_str())
    }

    pub fn join(mut self, table: impl Into<String>, on: JoinOn, outer: bool) -> Self {
        self.joins.push(Join {
            table: table.into(),
            on,
            kind: if outer { JoinKind::LeftOuter } else { JoinKind::Inner },
        });
        self
    }

    /// Add a WHERE predicate, AND-ed with any existing one.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, column: ColumnRef, order: SortOrder) -> Self {
        self.order_by.push(OrderBy { column, order });
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

/// Multi-row INSERT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insert {
    pub table: String,
    pub rows: Vec<DataRow>,
}

impl Insert {
    /// Union of the rows' columns in first-seen order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            for column in row.columns() {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub table: String,
    pub values: DataRow,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delete {
    pub table: String,
    pub filter: Option<Expr>,
}

/// The single statement a mutation assembly produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Mutation {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}
