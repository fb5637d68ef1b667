//! Shared builder trait.

use crate::config::EngineConfig;
use crate::error::SqlResult;
use crate::value::Value;

/// Anything that renders to a `(sql, args)` pair against a configuration.
pub trait BuildSql {
    /// Render the final SQL text and its ordered argument list.
    fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)>;
}
