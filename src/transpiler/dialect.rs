use crate::ast::Value;
use crate::transpiler::traits::SqlGenerator;
use serde::{Deserialize, Serialize};

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgresGenerator),
            Dialect::Sqlite => Box::new(SqliteGenerator),
        }
    }
}

pub struct PostgresGenerator;

impl SqlGenerator for PostgresGenerator {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "true".into() } else { "false".into() }
    }

    fn case_insensitive_like(&self, col: &str, pattern: &str, negated: bool) -> String {
        if negated {
            format!("{} NOT ILIKE {}", col, pattern)
        } else {
            format!("{} ILIKE {}", col, pattern)
        }
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {}", n));
        }
        sql
    }
}

pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => self.bool_literal(*b),
            // SQLite stores NaN as NULL and reads 9e999 as infinity
            Value::Float(n) if n.is_nan() => "NULL".into(),
            Value::Float(n) if n.is_infinite() => {
                if n.is_sign_negative() { "-9e999".into() } else { "9e999".into() }
            }
            v => v.to_string(),
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".into() } else { "0".into() }
    }

    fn case_insensitive_like(&self, col: &str, pattern: &str, negated: bool) -> String {
        let op = if negated { "NOT LIKE" } else { "LIKE" };
        format!("lower({}) {} lower({})", col, op, pattern)
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        // SQLite only accepts OFFSET after a LIMIT
        match (limit, offset) {
            (Some(l), Some(o)) => format!(" LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!(" LIMIT {}", l),
            (None, Some(o)) => format!(" LIMIT -1 OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}
