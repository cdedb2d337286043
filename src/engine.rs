//! Database execution engine.
//!
//! Runs assembled statements against PostgreSQL using sqlx. Statements are
//! rendered with numbered parameters and the values are bound in order.

use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions};
use sqlx::query::Query;
use sqlx::Postgres;

use crate::ast::{DataRow, Mutation, Select, Value};
use crate::error::AssemblyResult;
use crate::serializer::RowSerializer;
use crate::transpiler::{Dialect, ToSql};

/// A connection pool plus the serializer used for result rows.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    serializer: RowSerializer,
}

impl Database {
    /// Connect using a `postgres://` URL.
    ///
    /// ```rust,ignore
    /// let db = Database::connect("postgres://localhost/devices").await?;
    /// let rows = db.fetch_all(&select).await?;
    /// ```
    pub async fn connect(url: &str) -> AssemblyResult<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        tracing::info!("Connected to database");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            serializer: RowSerializer::new(),
        }
    }

    pub fn with_serializer(mut self, serializer: RowSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn fetch_all(&self, select: &Select) -> AssemblyResult<Vec<DataRow>> {
        let (sql, params) = select.to_sql_parameterized(Dialect::Postgres);
        tracing::debug!("{}", sql);
        let rows = bind_all(sqlx::query(&sql), &params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| self.serializer.to_row(row)).collect()
    }

    /// Execute an INSERT, UPDATE or DELETE; returns the affected row count.
    pub async fn execute(&self, mutation: &Mutation) -> AssemblyResult<u64> {
        let (sql, params) = mutation.to_sql_parameterized(Dialect::Postgres);
        tracing::debug!("{}", sql);
        let result = bind_all(sqlx::query(&sql), &params)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::warn!("Mutation affected no rows: {}", sql);
        }
        Ok(result.rows_affected())
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Value],
) -> Query<'q, Postgres, PgArguments> {
    for value in params {
        query = match value {
            // `ParamContext` inlines NULL, so this only serves hand-built params
            Value::Null => query.bind(None::<String>),
            Value::Bool(v) => query.bind(*v),
            Value::Int(v) => query.bind(*v),
            Value::Float(v) => query.bind(*v),
            Value::String(v) => query.bind(v.as_str()),
            Value::Uuid(v) => query.bind(*v),
            Value::Timestamp(v) => query.bind(*v),
            Value::Json(v) => query.bind(sqlx::types::Json(v)),
        };
    }
    query
}
