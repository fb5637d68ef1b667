//! SELECT query builder.

use crate::client::Executor;
use crate::cond::Cond;
use crate::config::EngineConfig;
use crate::error::{SqlError, SqlResult};
use crate::qb::traits::BuildSql;
use crate::record::{Record, decode_rows};
use crate::relation::Relation;
use crate::value::Value;
use crate::writer::SqlWriter;

/// SELECT query builder.
///
/// Also serves as the sub-query form inside conditions via
/// [`CondValue::select`](crate::CondValue::select).
#[derive(Debug, Clone)]
pub struct SelectQb {
    table: String,
    columns: Vec<String>,
    relation: Option<Relation>,
    where_cond: Option<Cond>,
    order_clauses: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectQb {
    /// Create a new SELECT builder for a table. Columns default to `*`.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: vec!["*".to_string()],
            relation: None,
            where_cond: None,
            order_clauses: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Replace the SELECT column list.
    ///
    /// Entries are raw expressions; `~` markers expand to the table prefix.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append one SELECT column, displacing the `*` default.
    pub fn add_column(mut self, col: &str) -> Self {
        if self.columns.len() == 1 && self.columns[0] == "*" {
            self.columns[0] = col.to_string();
        } else {
            self.columns.push(col.to_string());
        }
        self
    }

    /// Attach a relation; its JOIN clauses and base-table alias render into
    /// the FROM clause.
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
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

    /// Append an ORDER BY clause (e.g. `"id DESC"`).
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_clauses.push(clause.to_string());
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Serialize the full statement into the writer (used both for top-level
    /// builds and for sub-query splicing).
    pub fn write_to(&self, w: &mut SqlWriter<'_>) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::validation("SELECT requires a table name"));
        }
        let cfg = w.config();

        w.push("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            let col = cfg.expand_prefix(col);
            w.push(&col);
        }

        w.push(" FROM ");
        let table = cfg.full_table_name(&self.table);
        w.push(&table);

        if let Some(rel) = &self.relation {
            let alias = rel.alias(&self.table);
            if alias != self.table {
                let alias = cfg.dialect().quote(alias);
                w.push(" AS ");
                w.push(&alias);
            }
            let mut jw = SqlWriter::new(cfg);
            rel.write_to(&mut jw);
            let (join_sql, join_args) = jw.finish();
            if !join_sql.is_empty() {
                w.push(" ");
                w.push(&join_sql);
                w.push_args(join_args);
            }
        }

        if let Some(cond) = &self.where_cond {
            if cond.is_valid() {
                w.push(" WHERE ");
                cond.write_to(w)?;
            }
        }

        if !self.order_clauses.is_empty() {
            w.push(" ORDER BY ");
            for (i, clause) in self.order_clauses.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.push(clause);
            }
        }

        if let Some(n) = self.limit {
            w.push(&format!(" LIMIT {n}"));
        }
        if let Some(n) = self.offset {
            w.push(&format!(" OFFSET {n}"));
        }
        Ok(())
    }

    /// Execute and decode all rows.
    pub async fn fetch_all<E>(&self, cfg: &EngineConfig, exec: &E) -> SqlResult<Vec<Record>>
    where
        E: Executor,
    {
        let (sql, args) = self.build(cfg)?;
        tracing::debug!(target: "sqlbind.sql", sql = %sql, args = args.len(), "select");
        let rows = exec.query(&sql, &args).await?;
        decode_rows(&rows)
    }

    /// Execute with `LIMIT 1` and decode the first row, if any.
    pub async fn fetch_one<E>(&self, cfg: &EngineConfig, exec: &E) -> SqlResult<Option<Record>>
    where
        E: Executor,
    {
        let qb = self.clone().limit(1);
        let (sql, args) = qb.build(cfg)?;
        tracing::debug!(target: "sqlbind.sql", sql = %sql, args = args.len(), "select one");
        let rows = exec.query(&sql, &args).await?;
        match rows.first() {
            Some(row) => Ok(Some(crate::record::decode_row(row)?)),
            None => Ok(None),
        }
    }

    /// Execute and return the first column of the first row, empty when no
    /// row matched.
    pub async fn fetch_value<E>(&self, cfg: &EngineConfig, exec: &E) -> SqlResult<String>
    where
        E: Executor,
    {
        Ok(self
            .fetch_one(cfg, exec)
            .await?
            .map(|record| record.get(0).to_string())
            .unwrap_or_default())
    }
}

impl BuildSql for SelectQb {
    fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new(cfg);
        self.write_to(&mut w)?;
        Ok(w.finish())
    }
}
