//! Engine-wide, immutable-after-init configuration.
//!
//! The table prefix/suffix and the active [`Dialect`] are fixed when the
//! config is constructed; every query build borrows the same instance, so
//! there is no shared mutable state anywhere in the construction path.

use crate::dialect::{Dialect, Mysql};
use std::sync::Arc;

/// Read-only configuration shared by all builders.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    table_prefix: String,
    table_suffix: String,
    dialect: Arc<dyn Dialect>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            table_suffix: String::new(),
            dialect: Arc::new(Mysql),
        }
    }
}

impl EngineConfig {
    /// Create a config with the default (MySQL) dialect and no prefix/suffix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table prefix applied by [`EngineConfig::full_table_name`] and
    /// expanded for `~` markers in raw SQL.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the table suffix applied by [`EngineConfig::full_table_name`].
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.table_suffix = suffix.into();
        self
    }

    /// Replace the identifier-quoting dialect.
    pub fn with_dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Arc::new(dialect);
        self
    }

    /// The active dialect.
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// The configured table prefix.
    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    /// Render a table reference with prefix and suffix applied, quoted.
    ///
    /// Names that are already quoted or that carry a `~` prefix marker are
    /// taken as-is (after `~` expansion), so callers can hand over
    /// pre-assembled FROM expressions.
    pub fn full_table_name(&self, table: &str) -> String {
        let quoted = if table.starts_with('`') || table.starts_with('"') || table.contains('~') {
            table.to_string()
        } else {
            self.dialect
                .quote(&format!("{}{}{}", self.table_prefix, table, self.table_suffix))
        };
        self.expand_prefix(&quoted)
    }

    /// Replace every `~` marker in a raw SQL fragment with the table prefix.
    pub fn expand_prefix(&self, sql: &str) -> String {
        if sql.contains('~') {
            sql.replace('~', &self.table_prefix)
        } else {
            sql.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Ansi;

    #[test]
    fn full_table_name_applies_prefix_suffix() {
        let cfg = EngineConfig::new().with_prefix("app_").with_suffix("_v2");
        assert_eq!(cfg.full_table_name("user"), "`app_user_v2`");
    }

    #[test]
    fn full_table_name_expands_tilde() {
        let cfg = EngineConfig::new().with_prefix("app_");
        assert_eq!(cfg.full_table_name("`~user`"), "`app_user`");
    }

    #[test]
    fn full_table_name_without_prefix() {
        let cfg = EngineConfig::new();
        assert_eq!(cfg.full_table_name("user"), "`user`");
    }

    #[test]
    fn expand_prefix_in_raw_sql() {
        let cfg = EngineConfig::new().with_prefix("app_");
        assert_eq!(
            cfg.expand_prefix("SELECT * FROM ~user"),
            "SELECT * FROM app_user"
        );
    }

    #[test]
    fn dialect_is_pluggable() {
        let cfg = EngineConfig::new().with_dialect(Ansi);
        assert_eq!(cfg.full_table_name("user"), "\"user\"");
    }
}
