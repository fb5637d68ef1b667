//! # sqlbind
//!
//! A driver-agnostic SQL construction core: composable condition trees,
//! multi-table join resolution, and generic row decoding.
//!
//! ## Features
//!
//! - **Parameter-safe by construction**: conditions serialize to `?`
//!   placeholders plus an ordered argument list; argument N always binds the
//!   Nth placeholder
//! - **Deterministic output**: condition pairs, `IN` sets and SET lists keep
//!   insertion order, so generated SQL is stable across runs
//! - **Closed value space**: every bindable value is a [`Value`] variant
//!   resolved at construction time; unsupported kinds fail loudly
//! - **Pluggable dialect**: identifier quoting and literal escaping go
//!   through [`Dialect`] (MySQL backticks by default)
//! - **Execution-agnostic**: queries run through any [`Executor`]; rows come
//!   back as string-typed [`Record`]s with O(1) name lookup
//!
//! ## Conditions
//!
//! ```ignore
//! use sqlbind::{qb, Cond, EngineConfig};
//!
//! let cfg = EngineConfig::new();
//! let cond = Cond::eq("status", 1)
//!     .and(Cond::eq("sex", 1).or(Cond::eq("sex", 2)));
//!
//! let (sql, args) = qb::select("user").filter(cond).build(&cfg)?;
//! // SELECT * FROM `user` WHERE `status`=? AND (`sex`=? OR `sex`=?)
//! ```
//!
//! ## Joins
//!
//! ```ignore
//! use sqlbind::{Relation, Table};
//!
//! let mut rel = Relation::new(Table::new("user"));
//! rel.add_extend(Table::new("order"), Some("LEFT:user.id=order.uid"));
//! // LEFT JOIN `order` ON user.id=order.uid
//! ```

pub mod client;
pub mod cond;
pub mod config;
pub mod dialect;
pub mod error;
pub mod qb;
pub mod record;
pub mod relation;
pub mod value;
pub mod writer;

pub use client::{DriverRow, ExecResult, Executor};
pub use cond::{Cmp, Cond, CondValue};
pub use config::EngineConfig;
pub use dialect::{Ansi, Dialect, Mysql};
pub use error::{SqlError, SqlResult};
pub use record::{Record, decode_row, decode_rows};
pub use relation::{Join, Relation, Table};
pub use value::Value;
pub use writer::SqlWriter;

// Re-export qb builders for easy access
pub use qb::{
    BuildSql, DeleteQb, InsertQb, SelectQb, UpdateQb, delete, delete_from, insert, insert_into,
    replace, select, update,
};
