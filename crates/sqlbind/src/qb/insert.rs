//! INSERT / REPLACE query builder.

use crate::client::{ExecResult, Executor};
use crate::config::EngineConfig;
use crate::error::{SqlError, SqlResult};
use crate::qb::traits::BuildSql;
use crate::value::Value;
use crate::writer::SqlWriter;

/// INSERT (or REPLACE) query builder over an ordered SET list.
///
/// Columns render in the order `set` was called; that order is the argument
/// binding order.
#[derive(Debug, Clone)]
pub struct InsertQb {
    table: String,
    verb: &'static str,
    sets: Vec<(String, Value)>,
}

impl InsertQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            verb: "INSERT",
            sets: Vec::new(),
        }
    }

    /// REPLACE INTO variant (MySQL upsert-by-delete).
    pub fn replace(table: &str) -> Self {
        Self {
            table: table.to_string(),
            verb: "REPLACE",
            sets: Vec::new(),
        }
    }

    /// Add one column/value pair.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets.push((column.to_string(), value.into()));
        self
    }

    /// Add several column/value pairs, preserving order.
    pub fn set_pairs<C>(mut self, pairs: impl IntoIterator<Item = (C, Value)>) -> Self
    where
        C: Into<String>,
    {
        self.sets
            .extend(pairs.into_iter().map(|(c, v)| (c.into(), v)));
        self
    }

    /// Execute the mutation; `last_insert_id` is populated by the driver.
    pub async fn execute<E>(&self, cfg: &EngineConfig, exec: &E) -> SqlResult<ExecResult>
    where
        E: Executor,
    {
        let (sql, args) = self.build(cfg)?;
        tracing::debug!(target: "sqlbind.sql", sql = %sql, args = args.len(), "insert");
        exec.exec(&sql, &args).await
    }
}

impl BuildSql for InsertQb {
    fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::validation(format!("{} requires a table name", self.verb)));
        }
        if self.sets.is_empty() {
            return Err(SqlError::validation(format!(
                "{} requires at least one column",
                self.verb
            )));
        }
        let mut w = SqlWriter::new(cfg);
        w.push(self.verb);
        w.push(" INTO ");
        let table = cfg.full_table_name(&self.table);
        w.push(&table);
        w.push(" (");
        for (i, (column, _)) in self.sets.iter().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push_ident(column);
        }
        w.push(") VALUES (");
        for (i, (_, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push_placeholder();
            w.push_arg(value.clone());
        }
        w.push(")");
        Ok(w.finish())
    }
}
