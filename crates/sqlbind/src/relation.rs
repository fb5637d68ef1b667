//! Multi-table aliasing and join-clause assembly.
//!
//! A [`Relation`] tracks a base table plus an ordered set of extended
//! (joined) tables, an alias map, and one optional [`Join`] descriptor per
//! extended table. Join clauses always render in table-insertion order.

use crate::config::EngineConfig;
use crate::writer::SqlWriter;
use crate::value::Value;
use std::collections::HashMap;

/// A table descriptor as read from schema metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Join kind + ON predicate for one extended table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// `INNER` / `LEFT` / `RIGHT` / ... prepended to `JOIN`.
    pub kind: String,
    /// The joined table's real name.
    pub table: String,
    /// ON predicate; may carry `{0}`-style positional placeholders until
    /// [`Join::expand_on`] resolves them.
    pub on: String,
    /// Bound arguments for `?` markers inside the ON predicate.
    pub args: Vec<Value>,
}

impl Join {
    /// A descriptor is valid only when both kind and table are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.kind.is_empty() && !self.table.is_empty()
    }

    /// Resolve `{0}`, `{1}`, ... markers in the ON template by position.
    pub fn expand_on(&self, args: &[&str]) -> String {
        let mut on = self.on.clone();
        for (i, arg) in args.iter().enumerate() {
            on = on.replace(&format!("{{{i}}}"), arg);
        }
        on
    }
}

/// Parse a relation tag into a join descriptor for `table`.
///
/// Accepted forms: `"KIND:on_condition"` and `"on_condition"` (kind defaults
/// to `INNER`). Anything else (empty tag, empty kind) yields `None`, which
/// the resolver treats as "no join contributed" rather than an error.
fn parse_relation_tag(tag: &str, table: &str) -> Option<Join> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    let (kind, on) = match tag.split_once(':') {
        Some((kind, on)) => {
            if kind.trim().is_empty() {
                return None;
            }
            (kind.trim().to_string(), on.trim().to_string())
        }
        None => ("INNER".to_string(), tag.to_string()),
    };
    Some(Join {
        kind,
        table: table.to_string(),
        on,
        args: Vec::new(),
    })
}

/// Base table plus joined tables, aliases, and join descriptors.
#[derive(Debug, Clone)]
pub struct Relation {
    base: Table,
    extends: Vec<Table>,
    aliases: HashMap<String, String>,
    // Parallel to `extends`; `None` for tables without a usable descriptor.
    joins: Vec<Option<Join>>,
    join_index: HashMap<String, usize>,
}

impl Relation {
    /// Create a relation rooted at `base`.
    pub fn new(base: Table) -> Self {
        Self {
            base,
            extends: Vec::new(),
            aliases: HashMap::new(),
            joins: Vec::new(),
            join_index: HashMap::new(),
        }
    }

    /// The base table.
    pub fn base(&self) -> &Table {
        &self.base
    }

    /// The extended tables, in insertion order.
    pub fn extends(&self) -> &[Table] {
        &self.extends
    }

    /// Append an extended table, optionally with a relation tag.
    ///
    /// A malformed tag degrades to "no join descriptor" for this table; the
    /// table still participates in alias resolution.
    pub fn add_extend(&mut self, table: Table, tag: Option<&str>) -> &mut Self {
        let join = tag.and_then(|t| parse_relation_tag(t, &table.name));
        if join.is_some() {
            self.join_index.insert(table.name.clone(), self.joins.len());
        }
        self.joins.push(join);
        self.extends.push(table);
        self
    }

    /// Register an alias for a real table name.
    pub fn set_alias(&mut self, table: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.aliases.insert(table.into(), alias.into());
        self
    }

    /// Resolve an alias; unregistered names come back unchanged.
    pub fn alias<'a>(&'a self, raw_name: &'a str) -> &'a str {
        self.aliases.get(raw_name).map(String::as_str).unwrap_or(raw_name)
    }

    /// Look up the join descriptor for a table by name.
    pub fn join_for(&self, table: &str) -> Option<&Join> {
        self.join_index
            .get(table)
            .and_then(|&i| self.joins[i].as_ref())
    }

    /// Replace the ON template of a table's join with its expanded form.
    pub fn resolve_join_on(&mut self, table: &str, args: &[&str]) -> bool {
        let Some(&i) = self.join_index.get(table) else {
            return false;
        };
        if let Some(join) = self.joins[i].as_mut() {
            join.on = join.expand_on(args);
            return true;
        }
        false
    }

    /// Attach bound arguments to a table's ON predicate.
    pub fn set_join_args(&mut self, table: &str, args: Vec<Value>) -> bool {
        let Some(&i) = self.join_index.get(table) else {
            return false;
        };
        if let Some(join) = self.joins[i].as_mut() {
            join.args = args;
            return true;
        }
        false
    }

    /// Write the JOIN clause sequence into the writer.
    ///
    /// Clauses render in table-insertion order; tables without a valid
    /// descriptor contribute nothing and inject no stray separators. ON
    /// bind arguments flow into the writer's argument list in clause order.
    pub fn write_to(&self, w: &mut SqlWriter<'_>) {
        let mut first = true;
        for join in self.joins.iter().flatten() {
            if !join.is_valid() {
                continue;
            }
            if !first {
                w.push(" ");
            }
            first = false;
            w.push(&join.kind);
            w.push(" JOIN ");
            let table = w.config().full_table_name(&join.table);
            w.push(&table);
            if let Some(alias) = self.aliases.get(&join.table) {
                let alias = w.config().dialect().quote(alias);
                w.push(" AS ");
                w.push(&alias);
            }
            if !join.on.is_empty() {
                w.push(" ON ");
                let on = w.config().expand_prefix(&join.on);
                w.push(&on);
            }
            w.push_args(join.args.iter().cloned());
        }
    }

    /// Render the JOIN clause sequence as text.
    pub fn render(&self, cfg: &EngineConfig) -> String {
        let mut w = SqlWriter::new(cfg);
        self.write_to(&mut w);
        w.finish().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::new()
    }

    #[test]
    fn left_join_with_on() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("LEFT:user.id=order.uid"));
        assert_eq!(rel.render(&cfg()), "LEFT JOIN `order` ON user.id=order.uid");
    }

    #[test]
    fn kind_defaults_to_inner() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("user.id=order.uid"));
        assert_eq!(rel.render(&cfg()), "INNER JOIN `order` ON user.id=order.uid");
    }

    #[test]
    fn malformed_tag_contributes_nothing() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some(":user.id=order.uid"));
        rel.add_extend(Table::new("cart"), None);
        assert_eq!(rel.render(&cfg()), "");
        assert!(rel.join_for("order").is_none());
        // Parallel-list invariant still holds.
        assert_eq!(rel.extends().len(), 2);
    }

    #[test]
    fn join_order_follows_insertion_order() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("zeta"), Some("LEFT:user.id=zeta.uid"));
        rel.add_extend(Table::new("alpha"), Some("RIGHT:user.id=alpha.uid"));
        rel.set_alias("alpha", "a");
        assert_eq!(
            rel.render(&cfg()),
            "LEFT JOIN `zeta` ON user.id=zeta.uid RIGHT JOIN `alpha` AS `a` ON user.id=alpha.uid"
        );
    }

    #[test]
    fn alias_falls_back_to_raw_name() {
        let mut rel = Relation::new(Table::new("user"));
        rel.set_alias("order", "o");
        assert_eq!(rel.alias("order"), "o");
        assert_eq!(rel.alias("unknown"), "unknown");
    }

    #[test]
    fn join_lookup_by_table_name() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("LEFT:user.id=order.uid"));
        let join = rel.join_for("order").unwrap();
        assert_eq!(join.kind, "LEFT");
        assert_eq!(join.on, "user.id=order.uid");
    }

    #[test]
    fn on_template_positional_expansion() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("LEFT:{0}.id={1}.uid"));
        assert!(rel.resolve_join_on("order", &["u", "o"]));
        assert_eq!(rel.join_for("order").unwrap().on, "u.id=o.uid");
    }

    #[test]
    fn join_args_flow_into_writer() {
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("LEFT:user.id=order.uid AND order.status=?"));
        rel.set_join_args("order", vec![Value::Int(1)]);
        let c = cfg();
        let mut w = SqlWriter::new(&c);
        rel.write_to(&mut w);
        let (sql, args) = w.finish();
        assert_eq!(
            sql,
            "LEFT JOIN `order` ON user.id=order.uid AND order.status=?"
        );
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn table_prefix_applies_to_joined_tables() {
        let c = EngineConfig::new().with_prefix("app_");
        let mut rel = Relation::new(Table::new("user"));
        rel.add_extend(Table::new("order"), Some("LEFT:~user.id=~order.uid"));
        assert_eq!(
            rel.render(&c),
            "LEFT JOIN `app_order` ON app_user.id=app_order.uid"
        );
    }
}
