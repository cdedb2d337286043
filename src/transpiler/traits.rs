//! Transpiler traits and utilities.

use crate::ast::Value;

/// SQL reserved words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "order",
    "group",
    "user",
    "table",
    "select",
    "from",
    "where",
    "join",
    "left",
    "right",
    "inner",
    "outer",
    "on",
    "and",
    "or",
    "not",
    "null",
    "true",
    "false",
    "limit",
    "offset",
    "as",
    "in",
    "is",
    "like",
    "between",
    "having",
    "union",
    "all",
    "distinct",
    "case",
    "when",
    "then",
    "else",
    "end",
    "insert",
    "update",
    "delete",
    "index",
    "key",
    "primary",
    "foreign",
    "references",
    "default",
    "constraint",
    "check",
];

/// Escape an identifier if it's a reserved word or contains special chars.
pub fn escape_identifier(name: &str) -> String {
    let lower = name.to_lowercase();
    let needs_escaping = RESERVED_WORDS.contains(&lower.as_str())
        || name.chars().any(|c| !c.is_alphanumeric() && c != '_')
        || name.chars().next().map(|c| c.is_numeric()).unwrap_or(true);

    if needs_escaping {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Quote an identifier (table or column name).
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name)
    }
    /// Generate the parameter placeholder (e.g., $1, ?) for a given index.
    fn placeholder(&self, index: usize) -> String;
    /// Get the boolean literal (true/false vs 1/0).
    fn bool_literal(&self, val: bool) -> String;
    /// Case-insensitive pattern match of `col` against an already rendered pattern.
    fn case_insensitive_like(&self, col: &str, pattern: &str, negated: bool) -> String;
    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String;

    /// Render a value inline.
    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => self.bool_literal(*b),
            v => v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier() {
        assert_eq!(escape_identifier("hardware_firmware"), "hardware_firmware");
    }

    #[test]
    fn test_reserved_identifier() {
        assert_eq!(escape_identifier("order"), "\"order\"");
        assert_eq!(escape_identifier("User"), "\"User\"");
    }

    #[test]
    fn test_special_chars_identifier() {
        assert_eq!(escape_identifier("my-table"), "\"my-table\"");
        assert_eq!(escape_identifier("1st"), "\"1st\"");
        assert_eq!(escape_identifier(""), "\"\"");
    }
}
