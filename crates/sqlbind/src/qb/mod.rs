//! Query convenience layer: thin select/insert/update/delete builders.
//!
//! These builders are pure composition over the condition engine, the
//! relation resolver and the row decoder; execution is delegated to the
//! caller-supplied [`Executor`](crate::Executor).
//!
//! # Usage
//!
//! ```ignore
//! use sqlbind::{qb, Cond, EngineConfig};
//!
//! let cfg = EngineConfig::new();
//!
//! // SELECT
//! let users = qb::select("user")
//!     .filter(Cond::eq("status", 1))
//!     .order_by("id DESC")
//!     .limit(10)
//!     .fetch_all(&cfg, &client)
//!     .await?;
//!
//! // INSERT
//! qb::insert("user")
//!     .set("name", "alice")
//!     .set("status", 1)
//!     .execute(&cfg, &client)
//!     .await?;
//!
//! // UPDATE
//! qb::update("user")
//!     .set("status", 0)
//!     .filter(Cond::eq("id", 7))
//!     .execute(&cfg, &client)
//!     .await?;
//!
//! // DELETE
//! qb::delete("user")
//!     .filter(Cond::eq("id", 7))
//!     .execute(&cfg, &client)
//!     .await?;
//! ```

mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::BuildSql;
pub use update::UpdateQb;

/// Create a SELECT query builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Alias for `insert`.
pub fn insert_into(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create a REPLACE INTO query builder for the given table.
pub fn replace(table: &str) -> InsertQb {
    InsertQb::replace(table)
}

/// Create an UPDATE query builder for the given table.
///
/// # Safety
/// Without any condition the builder generates `WHERE 1=0` (no-op).
/// Use `allow_all(true)` to update every row.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// # Safety
/// Without any condition the builder generates `WHERE 1=0` (no-op).
/// Use `allow_all(true)` to delete every row.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// Alias for `delete`.
pub fn delete_from(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}
