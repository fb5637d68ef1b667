//! UPDATE query builder.

use crate::client::{ExecResult, Executor};
use crate::cond::Cond;
use crate::config::EngineConfig;
use crate::error::{SqlError, SqlResult};
use crate::qb::traits::BuildSql;
use crate::value::Value;
use crate::writer::SqlWriter;

/// UPDATE query builder with an ordered SET list.
///
/// SET arguments bind before WHERE arguments, matching text order.
#[derive(Debug, Clone)]
pub struct UpdateQb {
    table: String,
    sets: Vec<(String, Value)>,
    where_cond: Option<Cond>,
    allow_all: bool,
}

impl UpdateQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            sets: Vec::new(),
            where_cond: None,
            allow_all: false,
        }
    }

    /// Add one column/value pair to the SET list.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets.push((column.to_string(), value.into()));
        self
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

    /// Permit an update without any condition (drops the `WHERE 1=0` guard).
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
        tracing::debug!(target: "sqlbind.sql", sql = %sql, args = args.len(), "update");
        exec.exec(&sql, &args).await
    }
}

impl BuildSql for UpdateQb {
    fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::validation("UPDATE requires a table name"));
        }
        if self.sets.is_empty() {
            return Err(SqlError::validation("UPDATE requires at least one SET column"));
        }
        let mut w = SqlWriter::new(cfg);
        w.push("UPDATE ");
        let table = cfg.full_table_name(&self.table);
        w.push(&table);
        w.push(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push_ident(column);
            w.push("=");
            w.push_placeholder();
            w.push_arg(value.clone());
        }
        match &self.where_cond {
            Some(cond) if cond.is_valid() => {
                w.push(" WHERE ");
                cond.write_to(&mut w)?;
            }
            _ if self.allow_all => {}
            // No usable condition: render a no-op rather than a full-table update.
            _ => {
                w.push(" WHERE 1=0");
            }
        }
        Ok(w.finish())
    }
}
