//! The expression engine: values, predicates, joins and statements.
//!
//! Nothing here knows about clauses. The assemblers build these nodes and
//! the transpiler renders them.

pub mod builders;
pub mod column;
pub mod expr;
pub mod join;
pub mod row;
pub mod statement;
pub mod values;

pub use column::ColumnRef;
pub use expr::{CompareOp, Expr};
pub use join::{Join, JoinKind, JoinOn, Operand};
pub use row::DataRow;
pub use statement::{Delete, Insert, Mutation, OrderBy, Select, SortOrder, Update};
pub use values::Value;
