//! The consumed execution capability.
//!
//! sqlbind never opens connections or manages transactions; it hands a
//! `(sql, args)` pair to an [`Executor`] and gets back driver rows or an
//! affected-rows/last-insert-id summary. Timeouts and cancellation belong to
//! the executor's own contract.

use crate::error::SqlResult;
use crate::value::Value;

/// One row as returned by a driver: ordered column names with parallel
/// driver-native values.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRow {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl DriverRow {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Ordered values, parallel to [`DriverRow::columns`].
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a column index; missing indices read as NULL.
    pub fn get(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&Value::Null)
    }
}

/// Summary of a mutation statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

/// A trait that unifies database clients and transactions.
///
/// The argument order of `args` is the binding contract: argument N binds the
/// Nth `?` placeholder of `sql`.
pub trait Executor: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = SqlResult<Vec<DriverRow>>> + Send;

    /// Execute a mutation and return its summary.
    fn exec(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = SqlResult<ExecResult>> + Send;
}
