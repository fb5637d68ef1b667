//! Identifier quoting and literal escaping per SQL dialect.
//!
//! Only the quoting style varies between supported dialects; placeholders are
//! always positional `?` markers.

use std::fmt;

/// Dialect capability consumed by the writer and the relation resolver.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Write a quoted identifier into `out`.
    ///
    /// Dotted names quote each segment (`a.b` becomes `` `a`.`b` ``).
    /// `*` and names that already start with the quote character pass through
    /// untouched.
    fn write_ident(&self, out: &mut String, name: &str);

    /// Escape a text value as a SQL string literal (for diagnostics only;
    /// never used on the parameter-binding path).
    fn escape_literal(&self, text: &str) -> String;

    /// Quote an identifier, returning a new string.
    fn quote(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        self.write_ident(&mut out, name);
        out
    }
}

fn write_segments(out: &mut String, name: &str, quote: char) {
    for (i, seg) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if seg == "*" || seg.is_empty() {
            out.push_str(seg);
        } else {
            out.push(quote);
            out.push_str(seg);
            out.push(quote);
        }
    }
}

/// MySQL-style backtick quoting. The default dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

impl Dialect for Mysql {
    fn write_ident(&self, out: &mut String, name: &str) {
        if name == "*" || name.starts_with('`') {
            out.push_str(name);
            return;
        }
        write_segments(out, name, '`');
    }

    fn escape_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for ch in text.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }
}

/// ANSI double-quote quoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Dialect for Ansi {
    fn write_ident(&self, out: &mut String, name: &str) {
        if name == "*" || name.starts_with('"') {
            out.push_str(name);
            return;
        }
        write_segments(out, name, '"');
    }

    fn escape_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for ch in text.chars() {
            if ch == '\'' {
                out.push_str("''");
            } else {
                out.push(ch);
            }
        }
        out.push('\'');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_quotes_simple() {
        assert_eq!(Mysql.quote("user"), "`user`");
    }

    #[test]
    fn mysql_quotes_dotted() {
        assert_eq!(Mysql.quote("a.b"), "`a`.`b`");
    }

    #[test]
    fn mysql_passes_star_through() {
        assert_eq!(Mysql.quote("*"), "*");
    }

    #[test]
    fn mysql_skips_already_quoted() {
        assert_eq!(Mysql.quote("`user`"), "`user`");
    }

    #[test]
    fn mysql_escapes_literal() {
        assert_eq!(Mysql.escape_literal(r"it's a\b"), r"'it\'s a\\b'");
    }

    #[test]
    fn ansi_quotes_and_escapes() {
        assert_eq!(Ansi.quote("user"), "\"user\"");
        assert_eq!(Ansi.escape_literal("it's"), "'it''s'");
    }
}
