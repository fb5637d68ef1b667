//! DELETE query builder.

use crate::client::{ExecResult, Executor};
use crate::cond::Cond;
use crate::config::EngineConfig;
use crate::error::{SqlError, SqlResult};
use crate::qb::traits::BuildSql;
use crate::value::Value;
use crate::writer::SqlWriter;

/// DELETE query builder.
#[derive(Debug, Clone)]
pub struct DeleteQb {
    table: String,
    where_cond: Option<Cond>,
    allow_all: bool,
}

impl DeleteQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_cond: None,
            allow_all: false,
        }
    }

    /// Add a WHERE condition; repeated calls AND together.
    pub fn filter(mut self, cond: Cond) -> Self {
        self.where_cond = Some(match self.where_cond.take() {
            Some(existing) => existing.and(cond),
            None => cond,
        });
        self
    }

    /// Add a raw WHERE predicate with positional arguments.
    pub fn where_raw(self, sql: &str, args: impl IntoIterator<Item = Value>) -> Self {
        self.filter(Cond::raw_args(sql, args))
    }

    /// Permit a delete without any condition (drops the `WHERE 1=0` guard).
    pub fn allow_all(mut self, allow: bool) -> Self {
        self.allow_all = allow;
        self
    }

    /// Execute the mutation, returning the affected-row count.
    pub async fn execute<E>(&self, cfg: &EngineConfig, exec: &E) -> SqlResult<ExecResult>
    where
        E: Executor,
    {
        let (sql, args) = self.build(cfg)?;
        tracing::debug!(target: "sqlbind.sql", sql = %sql, args = args.len(), "delete");
        exec.exec(&sql, &args).await
    }
}

impl BuildSql for DeleteQb {
    fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::validation("DELETE requires a table name"));
        }
        let mut w = SqlWriter::new(cfg);
        w.push("DELETE FROM ");
        let table = cfg.full_table_name(&self.table);
        w.push(&table);
        match &self.where_cond {
            Some(cond) if cond.is_valid() => {
                w.push(" WHERE ");
                cond.write_to(&mut w)?;
            }
            _ if self.allow_all => {}
            // No usable condition: render a no-op rather than a full-table delete.
            _ => {
                w.push(" WHERE 1=0");
            }
        }
        Ok(w.finish())
    }
}
