//! Assemblers turning clauses into statements.
//!
//! [`QueryAssembler`] orchestrates the query pipeline (joins, filters,
//! orders, slices) over one accumulating [`Select`](crate::ast::Select);
//! [`MutationAssembler`] routes rows and filters to INSERT/UPDATE/DELETE.

pub mod filters;
pub mod joins;
pub mod mutations;
pub mod orders;
pub mod queries;
pub mod slices;

pub use filters::FilterAssembler;
pub use joins::{JoinAssembler, JoinDigest};
pub use mutations::{MutationAssembler, MutationItem};
pub use orders::OrderAssembler;
pub use queries::{QueryAssembler, QueryItem};
pub use slices::SliceAssembler;
