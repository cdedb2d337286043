//! SQL Transpiler for the expression engine.
//!
//! Renders predicates and statements either with inline literals (handy for
//! logs and tests) or with numbered parameters ready for binding.

pub mod conditions;
pub mod dialect;
pub mod dml;
pub mod traits;

pub use conditions::ParamContext;
pub use dialect::Dialect;
pub use traits::{SqlGenerator, escape_identifier};

use crate::ast::*;

/// Nodes that can write themselves into SQL.
pub trait Render {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String;
}

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Postgres SQL with inline literals.
    fn to_sql(&self) -> String {
        self.to_sql_with_dialect(Dialect::Postgres)
    }

    fn to_sql_with_dialect(&self, dialect: Dialect) -> String;

    /// SQL with placeholders, plus the values to bind in order.
    fn to_sql_parameterized(&self, dialect: Dialect) -> (String, Vec<Value>);
}

impl<T: Render> ToSql for T {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        let generator = dialect.generator();
        self.render(generator.as_ref(), &mut ParamContext::inline())
    }

    fn to_sql_parameterized(&self, dialect: Dialect) -> (String, Vec<Value>) {
        let generator = dialect.generator();
        let mut params = ParamContext::new();
        let sql = self.render(generator.as_ref(), &mut params);
        (sql, params.params)
    }
}

impl Render for Expr {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        conditions::expr_sql(self, generator, params)
    }
}

impl Render for Select {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        dml::build_select(self, generator, params)
    }
}

impl Render for Insert {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        dml::build_insert(self, generator, params)
    }
}

impl Render for Update {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        dml::build_update(self, generator, params)
    }
}

impl Render for Delete {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        dml::build_delete(self, generator, params)
    }
}

impl Render for Mutation {
    fn render(&self, generator: &dyn SqlGenerator, params: &mut ParamContext) -> String {
        match self {
            Mutation::Insert(insert) => insert.render(generator, params),
            Mutation::Update(update) => update.render(generator, params),
            Mutation::Delete(delete) => delete.render(generator, params),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

impl std::fmt::Display for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
