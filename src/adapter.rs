//! Query adapter: `(field, operation)` pairs to query items.
//!
//! Field names are resolved through an explicit mapping first, then as
//! columns of the default table.

use std::collections::HashMap;

use crate::assembler::QueryItem;
use crate::ast::ColumnRef;
use crate::clause::{Clause, Operation};
use crate::config::AdapterConfig;
use crate::error::{AssemblyError, AssemblyResult};
use crate::parser::parse_field_mapping;
use crate::schema::Schema;

/// Where a public field name points.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMapping {
    /// A column of any table.
    Column(ColumnRef),
    /// Ignore the field.
    Skip,
    /// Another column name on the default table.
    Alias(String),
}

impl std::str::FromStr for FieldMapping {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_mapping(s)
    }
}

pub struct QueryAdapter<'a> {
    schema: &'a Schema,
    default_table: Option<String>,
    names: HashMap<String, FieldMapping>,
}

impl<'a> QueryAdapter<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            default_table: None,
            names: HashMap::new(),
        }
    }

    /// Build from the `[adapter]` configuration section.
    pub fn from_config(schema: &'a Schema, config: &AdapterConfig) -> AssemblyResult<Self> {
        let mut adapter = Self::new(schema);
        adapter.default_table = config.default_table.clone();
        for (field, directive) in &config.fields {
            adapter.names.insert(field.clone(), parse_field_mapping(directive)?);
        }
        Ok(adapter)
    }

    pub fn with_default_table(mut self, table: impl Into<String>) -> Self {
        self.default_table = Some(table.into());
        self
    }

    pub fn map_field(mut self, field: impl Into<String>, mapping: FieldMapping) -> Self {
        self.names.insert(field.into(), mapping);
        self
    }

    /// Turn each pair into a clause, or pass slices through.
    ///
    /// Skipped fields and `Noop` operations produce nothing.
    pub fn adapt<I, K>(&self, query: I) -> AssemblyResult<Vec<QueryItem>>
    where
        I: IntoIterator<Item = (K, Operation)>,
        K: AsRef<str>,
    {
        let mut items = Vec::new();
        for (field, operation) in query {
            let field = field.as_ref();
            match operation {
                Operation::Slice(slice) => items.push(QueryItem::Slice(slice)),
                Operation::Noop => tracing::debug!("Field {} carries no operation", field),
                operation => {
                    if let Some(column) = self.resolve(field)? {
                        items.push(QueryItem::Clause(Clause::new(column, operation)));
                    }
                }
            }
        }
        Ok(items)
    }

    /// `Ok(None)` for skipped fields.
    pub fn resolve(&self, field: &str) -> AssemblyResult<Option<ColumnRef>> {
        match self.names.get(field) {
            Some(FieldMapping::Column(column)) => Ok(Some(column.clone())),
            Some(FieldMapping::Skip) => Ok(None),
            Some(FieldMapping::Alias(name)) => self.default_column(field, name).map(Some),
            None => self.default_column(field, field).map(Some),
        }
    }

    fn default_column(&self, field: &str, name: &str) -> AssemblyResult<ColumnRef> {
        self.default_table
            .as_deref()
            .and_then(|table| self.schema.column(table, name))
            .ok_or_else(|| AssemblyError::UnresolvableColumn {
                field: field.to_string(),
            })
    }
}
