//! # clause-assembler
//!
//! Declarative clauses in, joined and filtered SQL out.
//!
//! A clause pairs a column with an operation (a filter, an ordering, a
//! slice). The assemblers bind clauses to a schema catalog: filters become
//! a WHERE tree, tables the filters touch are joined in along foreign keys,
//! and orderings and slices are applied last.
//!
//! ## Quick Example
//!
//! ```
//! use clause_assembler::prelude::*;
//!
//! let schema = Schema::new()
//!     .with_table(Table::new("tags").column("id", "uuid").column("name", "text"))
//!     .with_table(
//!         Table::new("firmware")
//!             .column("id", "uuid")
//!             .column("uri", "text")
//!             .column("tag_id", "uuid")
//!             .foreign_key("tag_id", ColumnRef::new("tags", "id")),
//!     );
//!
//! let base = Select::columns([
//!     ColumnRef::new("firmware", "id"),
//!     ColumnRef::new("firmware", "uri"),
//! ]);
//! let query = QueryAssembler::new(&schema, base)
//!     .assemble([
//!         QueryItem::from(Clause::new(ColumnRef::new("tags", "name"), FilterOp::eq("beta"))),
//!         QueryItem::from(Slice::Limit(10)),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT firmware.id, firmware.uri FROM firmware \
//!      LEFT OUTER JOIN tags ON tags.id = firmware.tag_id \
//!      WHERE tags.name = 'beta' LIMIT 10"
//! );
//! ```
//!
//! ## Pipeline
//!
//! | Stage      | Module                   | Output                    |
//! |------------|--------------------------|---------------------------|
//! | Clauses    | [`clause`]               | `ClauseExpression`        |
//! | Joins      | [`assembler::joins`]     | LEFT OUTER joins          |
//! | Filters    | [`assembler::filters`]   | WHERE predicate           |
//! | Orders     | [`assembler::orders`]    | ORDER BY                  |
//! | Slices     | [`assembler::slices`]    | LIMIT / OFFSET            |
//! | Mutations  | [`assembler::mutations`] | INSERT / UPDATE / DELETE  |
//! | Rendering  | [`transpiler`]           | SQL + bound parameters    |

pub mod adapter;
pub mod assembler;
pub mod ast;
pub mod clause;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod transpiler;

pub mod prelude {
    pub use crate::adapter::{FieldMapping, QueryAdapter};
    pub use crate::assembler::{
        FilterAssembler, JoinAssembler, MutationAssembler, MutationItem, OrderAssembler,
        QueryAssembler, QueryItem, SliceAssembler,
    };
    pub use crate::ast::*;
    pub use crate::clause::{
        Clause, ClauseExpression, FilterOp, FilterTerm, JoinHint, Logic, Operation,
        OperationKind, Slice, Token,
    };
    pub use crate::config::Config;
    pub use crate::engine::Database;
    pub use crate::error::*;
    pub use crate::schema::{ForeignKey, Schema, Table};
    pub use crate::serializer::RowSerializer;
    pub use crate::transpiler::{Dialect, ToSql};
}
