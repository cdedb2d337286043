//! Schema catalog: tables, columns and foreign keys.
//!
//! The assemblers only read it. Catalogs are built in code or loaded from
//! JSON/TOML.
//!
//! # Example
//! ```
//! use clause_assembler::schema::Schema;
//!
//! let json = r#"{
//!     "tables": [
//!         { "name": "tags", "columns": [{ "name": "id", "type": "uuid" }] },
//!         {
//!             "name": "firmware",
//!             "columns": [
//!                 { "name": "id", "type": "uuid" },
//!                 { "name": "tag_id", "type": "uuid" }
//!             ],
//!             "foreign_keys": [{ "column": "tag_id", "references": "tags.id" }]
//!         }
//!     ]
//! }"#;
//!
//! let schema = Schema::from_json(json).unwrap();
//! let fk = &schema.table("firmware").unwrap().foreign_keys[0];
//! assert_eq!(fk.referenced.table, "tags");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::ColumnRef;
use crate::error::{AssemblyError, AssemblyResult};
use crate::parser::parse_column_ref;

/// Database schema definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
}

/// Table definition with columns and outgoing foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableDef", into = "TableDef")]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// Column definition with type information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type", alias = "typ", default)]
    pub typ: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

/// `parent` (a column of the owning table) references `referenced`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    pub parent: ColumnRef,
    pub referenced: ColumnRef,
}

/// On-disk table shape; foreign keys name their target as `table.column`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDef {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDef>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKeyDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForeignKeyDef {
    column: String,
    references: String,
}

impl TryFrom<TableDef> for Table {
    type Error = AssemblyError;

    fn try_from(def: TableDef) -> Result<Self, Self::Error> {
        let foreign_keys = def
            .foreign_keys
            .into_iter()
            .map(|fk| {
                Ok(ForeignKey {
                    parent: ColumnRef::new(&def.name, fk.column),
                    referenced: parse_column_ref(&fk.references)?,
                })
            })
            .collect::<AssemblyResult<Vec<_>>>()?;
        Ok(Table {
            name: def.name,
            columns: def.columns,
            foreign_keys,
        })
    }
}

impl From<Table> for TableDef {
    fn from(table: Table) -> Self {
        TableDef {
            name: table.name,
            columns: table.columns,
            foreign_keys: table
                .foreign_keys
                .into_iter()
                .map(|fk| ForeignKeyDef {
                    column: fk.parent.name,
                    references: fk.referenced.to_string(),
                })
                .collect(),
        }
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(mut self, name: impl Into<String>, typ: impl Into<String>) -> Self {
        self.columns.push(ColumnDef {
            name: name.into(),
            typ: typ.into(),
            nullable: true,
            primary_key: false,
        });
        self
    }

    /// Declare `column` of this table as referencing `referenced`.
    pub fn foreign_key(mut self, column: impl Into<String>, referenced: ColumnRef) -> Self {
        self.foreign_keys.push(ForeignKey {
            parent: ColumnRef::new(&self.name, column),
            referenced,
        });
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Reference to one of this table's columns.
    pub fn col(&self, name: &str) -> Option<ColumnRef> {
        self.has_column(name)
            .then(|| ColumnRef::new(&self.name, name))
    }
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.add_table(table);
        self
    }

    /// Add a table, replacing any table of the same name.
    pub fn add_table(&mut self, table: Table) {
        self.tables.retain(|t| t.name != table.name);
        self.tables.push(table);
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn require_table(&self, name: &str) -> AssemblyResult<&Table> {
        self.table(name)
            .ok_or_else(|| AssemblyError::Schema(format!("Table '{}' not found in schema", name)))
    }

    pub fn column(&self, table: &str, name: &str) -> Option<ColumnRef> {
        self.table(table)?.col(name)
    }

    /// Foreign keys of `table`, empty when the table is unknown.
    pub fn foreign_keys(&self, table: &str) -> &[ForeignKey] {
        self.table(table)
            .map(|t| t.foreign_keys.as_slice())
            .unwrap_or(&[])
    }

    /// Load schema from JSON string.
    pub fn from_json(json: &str) -> AssemblyResult<Self> {
        let schema: Schema = serde_json::from_str(json)
            .map_err(|e| AssemblyError::Schema(format!("Failed to parse schema: {}", e)))?;
        schema.check_references();
        Ok(schema)
    }

    /// Load schema from TOML string (`[[tables]]` array).
    pub fn from_toml(content: &str) -> AssemblyResult<Self> {
        let schema: Schema = toml::from_str(content)
            .map_err(|e| AssemblyError::Schema(format!("Failed to parse schema: {}", e)))?;
        schema.check_references();
        Ok(schema)
    }

    /// Load a schema file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> AssemblyResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let schema = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            _ => Self::from_json(&content)?,
        };
        tracing::info!("Loaded {} table schemas from {}", schema.tables.len(), path.display());
        Ok(schema)
    }

    /// Dangling references are legal but can never produce a join.
    fn check_references(&self) {
        for table in &self.tables {
            for fk in &table.foreign_keys {
                if self.table(&fk.referenced.table).is_none() {
                    tracing::warn!(
                        "Foreign key {} references unknown table '{}'",
                        fk.parent,
                        fk.referenced.table
                    );
                }
            }
        }
    }
}
