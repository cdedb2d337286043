//! Error types for clause assembly.

use thiserror::Error;

/// The main error type for assembly operations.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A field name could not be mapped to a schema column.
    #[error("Column {field} not found")]
    UnresolvableColumn { field: String },

    /// A clause of the wrong kind reached a pipeline stage.
    #[error("Expected {expected}, got {operation}")]
    InvalidClauseKind {
        expected: &'static str,
        operation: String,
    },

    /// The filter compiler has no rendering for this operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Reduction produced no usable expression.
    #[error("Unassemblable expression: {0}")]
    EmptyExpression(String),

    /// Data rows and filters do not describe a single statement.
    #[error("{0}")]
    MutationShape(String),

    /// Catalog lookup or schema loading failure.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Failed to parse a column reference or field mapping.
    #[error("Parse error in '{input}': {message}")]
    Parse { input: String, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssemblyError {
    /// A non-filter clause where only filters are accepted.
    pub fn expected_filter(operation: impl ToString) -> Self {
        Self::InvalidClauseKind {
            expected: "a filter clause",
            operation: operation.to_string(),
        }
    }

    /// A clause that is neither filter, order nor slice kind.
    pub fn unclassifiable(operation: impl ToString) -> Self {
        Self::InvalidClauseKind {
            expected: "a filter, order or slice clause",
            operation: operation.to_string(),
        }
    }

    /// Create a parse error for the given input.
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
