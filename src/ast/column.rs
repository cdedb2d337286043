use serde::{Deserialize, Serialize};

/// A column bound to its owning table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub name: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

impl std::str::FromStr for ColumnRef {
    type Err = crate::error::AssemblyError;

    /// Parse a qualified `table.column` reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_column_ref(s)
    }
}
