//! The SQL text + ordered argument sink.
//!
//! A [`SqlWriter`] is created per query build and discarded once
//! [`SqlWriter::finish`] returns the `(sql, args)` pair. Argument N in the
//! list corresponds to the Nth `?` in text order; the condition engine and
//! the builders are responsible for keeping the two in lock-step.

use crate::config::EngineConfig;
use crate::value::Value;

/// A growing SQL buffer plus its ordered argument list.
#[must_use]
pub struct SqlWriter<'a> {
    cfg: &'a EngineConfig,
    sql: String,
    args: Vec<Value>,
}

impl<'a> SqlWriter<'a> {
    /// Create an empty writer borrowing the engine configuration.
    pub fn new(cfg: &'a EngineConfig) -> Self {
        Self {
            cfg,
            sql: String::new(),
            args: Vec::new(),
        }
    }

    /// The engine configuration this writer was created with.
    pub fn config(&self) -> &'a EngineConfig {
        self.cfg
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a dialect-quoted identifier.
    pub fn push_ident(&mut self, name: &str) -> &mut Self {
        self.cfg.dialect().write_ident(&mut self.sql, name);
        self
    }

    /// Append one positional placeholder.
    pub fn push_placeholder(&mut self) -> &mut Self {
        self.sql.push('?');
        self
    }

    /// Append one bound argument.
    pub fn push_arg(&mut self, value: Value) -> &mut Self {
        self.args.push(value);
        self
    }

    /// Append several bound arguments, preserving order.
    pub fn push_args(&mut self, values: impl IntoIterator<Item = Value>) -> &mut Self {
        self.args.extend(values);
        self
    }

    /// The SQL text written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The arguments collected so far.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Consume the writer, returning the produced `(sql, args)` pair.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_collects_text_and_args() {
        let cfg = EngineConfig::new();
        let mut w = SqlWriter::new(&cfg);
        w.push_ident("status").push("=").push_placeholder();
        w.push_arg(Value::Int(1));
        let (sql, args) = w.finish();
        assert_eq!(sql, "`status`=?");
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn placeholder_count_matches_args() {
        let cfg = EngineConfig::new();
        let mut w = SqlWriter::new(&cfg);
        for i in 0..5 {
            if i > 0 {
                w.push(",");
            }
            w.push_placeholder();
            w.push_arg(Value::Int(i));
        }
        let (sql, args) = w.finish();
        assert_eq!(sql.matches('?').count(), args.len());
    }
}
