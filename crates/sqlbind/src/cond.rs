//! The condition engine: composable predicate trees that serialize to SQL
//! with correctly ordered bound parameters.
//!
//! A [`Cond`] is immutable once built and can be reused across query builds.
//! Invalid conditions (empty pair lists, empty `IN` sets, combinators whose
//! children are all invalid) serialize to nothing and are skipped by the
//! combinators; they are not errors.
//!
//! # Example
//! ```ignore
//! use sqlbind::{Cond, EngineConfig};
//!
//! let cond = Cond::eq("status", 1)
//!     .and(Cond::eq("sex", 1).or(Cond::eq("sex", 2)));
//! let (sql, args) = cond.build(&EngineConfig::new())?;
//! // sql:  `status`=? AND (`sex`=? OR `sex`=?)
//! // args: [1, 1, 2]
//! ```

use crate::error::{SqlError, SqlResult};
use crate::config::EngineConfig;
use crate::qb::SelectQb;
use crate::value::Value;
use crate::writer::SqlWriter;

/// Comparison operator for leaf conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

impl Cmp {
    fn as_sql(self) -> &'static str {
        match self {
            Cmp::Eq => "=",
            Cmp::Ne => "<>",
            Cmp::Lt => "<",
            Cmp::Lte => "<=",
            Cmp::Gt => ">",
            Cmp::Gte => ">=",
            Cmp::Like => " LIKE ",
        }
    }
}

/// The value side of a leaf condition, resolved at construction time.
#[derive(Debug, Clone)]
pub enum CondValue {
    /// One bound scalar: `col <op> ?`
    Scalar(Value),
    /// Ordered collection. Promotes `=` to `IN` and `<>` to `NOT IN`;
    /// any other operator is an unsupported-value error.
    List(Vec<Value>),
    /// Raw sub-expression: `col <op> (<sql>)` with its args spliced in place.
    Expr { sql: String, args: Vec<Value> },
    /// Nested SELECT: `col <op> (<subquery>)`.
    Select(Box<SelectQb>),
}

impl CondValue {
    /// Wrap a scalar value.
    pub fn scalar(value: impl Into<Value>) -> Self {
        CondValue::Scalar(value.into())
    }

    /// Wrap an ordered collection of scalar values.
    pub fn list<T>(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Value>,
    {
        CondValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Wrap a raw sub-expression with positional arguments.
    pub fn expr(sql: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        CondValue::Expr {
            sql: sql.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Wrap a nested SELECT builder as a sub-query.
    pub fn select(qb: SelectQb) -> Self {
        CondValue::Select(Box::new(qb))
    }

    fn is_empty_list(&self) -> bool {
        matches!(self, CondValue::List(l) if l.is_empty())
    }
}

#[derive(Debug, Clone)]
enum CondInner {
    /// Comparison leaf over ordered (column, value) pairs, ANDed together.
    Cmp {
        op: Cmp,
        pairs: Vec<(String, CondValue)>,
    },
    /// Membership: `col IN (?,...)` / `col NOT IN (?,...)`.
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },
    /// Ordered conjunction.
    All(Vec<Cond>),
    /// Ordered disjunction.
    Any(Vec<Cond>),
    /// Negation: `NOT (<inner>)`.
    Not(Box<Cond>),
    /// Raw SQL fragment with positional arguments (escape hatch).
    Raw { sql: String, args: Vec<Value> },
}

/// A composable, serializable predicate node.
#[derive(Debug, Clone)]
pub struct Cond(CondInner);

impl Cond {
    fn cmp_one(op: Cmp, column: impl Into<String>, value: CondValue) -> Self {
        Cond(CondInner::Cmp {
            op,
            pairs: vec![(column.into(), value)],
        })
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Eq, column, CondValue::scalar(value))
    }

    /// `column <> value`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Ne, column, CondValue::scalar(value))
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Lt, column, CondValue::scalar(value))
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Lte, column, CondValue::scalar(value))
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Gt, column, CondValue::scalar(value))
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Gte, column, CondValue::scalar(value))
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::cmp_one(Cmp::Like, column, CondValue::scalar(pattern))
    }

    /// Comparison leaf over an explicitly ordered pair sequence.
    ///
    /// Insertion order is canonical: fragments and arguments are emitted in
    /// exactly the order the pairs are supplied. Multiple pairs join with
    /// `AND`.
    pub fn cmp_pairs<C>(op: Cmp, pairs: impl IntoIterator<Item = (C, CondValue)>) -> Self
    where
        C: Into<String>,
    {
        Cond(CondInner::Cmp {
            op,
            pairs: pairs.into_iter().map(|(c, v)| (c.into(), v)).collect(),
        })
    }

    /// Equality over ordered pairs; shorthand for `cmp_pairs(Cmp::Eq, ..)`.
    pub fn eq_pairs<C>(pairs: impl IntoIterator<Item = (C, CondValue)>) -> Self
    where
        C: Into<String>,
    {
        Self::cmp_pairs(Cmp::Eq, pairs)
    }

    /// `column <op> (<subquery>)`
    pub fn cmp_select(op: Cmp, column: impl Into<String>, qb: SelectQb) -> Self {
        Self::cmp_one(op, column, CondValue::select(qb))
    }

    /// `column IN (?,...)` — one placeholder per element, caller order kept.
    pub fn in_list<T>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Value>,
    {
        Cond(CondInner::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        })
    }

    /// `column NOT IN (?,...)`
    pub fn not_in<T>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Value>,
    {
        Cond(CondInner::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        })
    }

    /// Ordered conjunction of conditions.
    pub fn all(conds: impl IntoIterator<Item = Cond>) -> Self {
        Cond(CondInner::All(conds.into_iter().collect()))
    }

    /// Ordered disjunction of conditions.
    pub fn any(conds: impl IntoIterator<Item = Cond>) -> Self {
        Cond(CondInner::Any(conds.into_iter().collect()))
    }

    /// Raw SQL fragment without arguments.
    ///
    /// # Safety
    /// Be careful with SQL injection when using raw conditions.
    pub fn raw(sql: impl Into<String>) -> Self {
        Cond(CondInner::Raw {
            sql: sql.into(),
            args: Vec::new(),
        })
    }

    /// Raw SQL fragment with a fixed positional argument list.
    ///
    /// # Safety
    /// Be careful with SQL injection when using raw conditions.
    pub fn raw_args(sql: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        Cond(CondInner::Raw {
            sql: sql.into(),
            args: args.into_iter().collect(),
        })
    }

    /// Combine with another condition using `AND`.
    pub fn and(self, other: Cond) -> Cond {
        match self.0 {
            CondInner::All(mut conds) => {
                conds.push(other);
                Cond(CondInner::All(conds))
            }
            inner => Cond(CondInner::All(vec![Cond(inner), other])),
        }
    }

    /// Combine with another condition using `OR`.
    pub fn or(self, other: Cond) -> Cond {
        match self.0 {
            CondInner::Any(mut conds) => {
                conds.push(other);
                Cond(CondInner::Any(conds))
            }
            inner => Cond(CondInner::Any(vec![Cond(inner), other])),
        }
    }

    /// Negate this condition: `NOT (<self>)`.
    pub fn not(self) -> Cond {
        Cond(CondInner::Not(Box::new(self)))
    }

    /// A condition is valid iff it carries at least one usable pair or at
    /// least one valid sub-condition. Invalid conditions serialize to nothing.
    pub fn is_valid(&self) -> bool {
        match &self.0 {
            CondInner::Cmp { pairs, .. } => pairs.iter().any(|(_, v)| !v.is_empty_list()),
            CondInner::In { values, .. } => !values.is_empty(),
            CondInner::All(conds) | CondInner::Any(conds) => conds.iter().any(Cond::is_valid),
            CondInner::Not(inner) => inner.is_valid(),
            CondInner::Raw { sql, .. } => !sql.is_empty(),
        }
    }

    /// Serialize into the writer. An invalid condition writes nothing.
    ///
    /// On error the writer contents are unusable; the caller must discard
    /// the partially written SQL.
    pub fn write_to(&self, w: &mut SqlWriter<'_>) -> SqlResult<()> {
        if !self.is_valid() {
            return Ok(());
        }
        match &self.0 {
            CondInner::Cmp { op, pairs } => write_cmp(w, *op, pairs),
            CondInner::In {
                column,
                values,
                negated,
            } => {
                write_in(w, column, values, *negated);
                Ok(())
            }
            CondInner::All(conds) => write_group(w, conds, " AND ", true),
            CondInner::Any(conds) => write_group(w, conds, " OR ", false),
            CondInner::Not(inner) => {
                w.push("NOT (");
                inner.write_to(w)?;
                w.push(")");
                Ok(())
            }
            CondInner::Raw { sql, args } => {
                let sql = w.config().expand_prefix(sql);
                w.push(&sql);
                w.push_args(args.iter().cloned());
                Ok(())
            }
        }
    }

    /// Render this condition against a configuration, returning SQL text and
    /// the ordered argument list. An invalid condition yields an empty pair.
    pub fn build(&self, cfg: &EngineConfig) -> SqlResult<(String, Vec<Value>)> {
        let mut w = SqlWriter::new(cfg);
        self.write_to(&mut w)?;
        Ok(w.finish())
    }

    /// Whether this node must be parenthesized inside the given combinator.
    fn needs_wrap(&self, parent_is_and: bool) -> bool {
        match &self.0 {
            CondInner::Any(_) => parent_is_and,
            CondInner::All(_) => !parent_is_and,
            CondInner::Raw { .. } => true,
            CondInner::Cmp { pairs, .. } => {
                // Multi-pair leaves render `a=? AND b=?` and must be wrapped
                // inside an OR group.
                !parent_is_and && pairs.iter().filter(|(_, v)| !v.is_empty_list()).count() > 1
            }
            _ => false,
        }
    }
}

fn write_cmp(w: &mut SqlWriter<'_>, op: Cmp, pairs: &[(String, CondValue)]) -> SqlResult<()> {
    let mut first = true;
    for (column, value) in pairs {
        if value.is_empty_list() {
            continue;
        }
        if !first {
            w.push(" AND ");
        }
        first = false;
        match value {
            CondValue::Scalar(v) => {
                if matches!(v, Value::Array(_)) {
                    return Err(SqlError::unsupported(format!(
                        "array value for column '{column}'"
                    )));
                }
                w.push_ident(column);
                w.push(op.as_sql());
                w.push_placeholder();
                w.push_arg(v.clone());
            }
            CondValue::List(values) => match op {
                Cmp::Eq => write_in(w, column, values, false),
                Cmp::Ne => write_in(w, column, values, true),
                _ => {
                    return Err(SqlError::unsupported(format!(
                        "collection value for operator '{}' on column '{column}'",
                        op.as_sql().trim()
                    )));
                }
            },
            CondValue::Expr { sql, args } => {
                w.push_ident(column);
                w.push(op.as_sql());
                w.push("(");
                let sql = w.config().expand_prefix(sql);
                w.push(&sql);
                w.push(")");
                w.push_args(args.iter().cloned());
            }
            CondValue::Select(qb) => {
                w.push_ident(column);
                w.push(op.as_sql());
                w.push("(");
                qb.write_to(w)?;
                w.push(")");
            }
        }
    }
    Ok(())
}

fn write_in(w: &mut SqlWriter<'_>, column: &str, values: &[Value], negated: bool) {
    w.push_ident(column);
    w.push(if negated { " NOT IN (" } else { " IN (" });
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            w.push(",");
        }
        w.push_placeholder();
        w.push_arg(v.clone());
    }
    w.push(")");
}

fn write_group(
    w: &mut SqlWriter<'_>,
    conds: &[Cond],
    sep: &str,
    parent_is_and: bool,
) -> SqlResult<()> {
    let valid: Vec<&Cond> = conds.iter().filter(|c| c.is_valid()).collect();
    if let [only] = valid.as_slice() {
        // A single surviving child renders unwrapped.
        return only.write_to(w);
    }
    for (i, cond) in valid.iter().enumerate() {
        if i > 0 {
            w.push(sep);
        }
        let wrap = cond.needs_wrap(parent_is_and);
        if wrap {
            w.push("(");
        }
        cond.write_to(w)?;
        if wrap {
            w.push(")");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(cond: &Cond) -> (String, Vec<Value>) {
        cond.build(&EngineConfig::new()).unwrap()
    }

    #[test]
    fn eq_single_pair() {
        let (sql, args) = build(&Cond::eq("status", 1));
        assert_eq!(sql, "`status`=?");
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn eq_pairs_preserve_insertion_order() {
        let cond = Cond::eq_pairs([
            ("b", CondValue::scalar(2)),
            ("a", CondValue::scalar(1)),
            ("c", CondValue::scalar(3)),
        ]);
        let (sql, args) = build(&cond);
        assert_eq!(sql, "`b`=? AND `a`=? AND `c`=?");
        assert_eq!(args, vec![Value::Int(2), Value::Int(1), Value::Int(3)]);
    }

    #[test]
    fn placeholder_count_matches_args_for_leaves() {
        for cond in [
            Cond::ne("a", 1).and(Cond::gt("b", 2)).and(Cond::like("c", "%x%")),
            Cond::in_list("id", vec![1, 2, 3]),
            Cond::eq_pairs([("x", CondValue::list(vec![4, 5]))]),
        ] {
            let (sql, args) = build(&cond);
            assert_eq!(sql.matches('?').count(), args.len(), "sql: {sql}");
        }
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(build(&Cond::ne("a", 1)).0, "`a`<>?");
        assert_eq!(build(&Cond::lt("a", 1)).0, "`a`<?");
        assert_eq!(build(&Cond::lte("a", 1)).0, "`a`<=?");
        assert_eq!(build(&Cond::gt("a", 1)).0, "`a`>?");
        assert_eq!(build(&Cond::gte("a", 1)).0, "`a`>=?");
        assert_eq!(build(&Cond::like("name", "%an%")).0, "`name` LIKE ?");
    }

    #[test]
    fn eq_list_promotes_to_in() {
        let cond = Cond::eq_pairs([("id", CondValue::list(vec![1, 2]))]);
        let (sql, args) = build(&cond);
        assert_eq!(sql, "`id` IN (?,?)");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn ne_list_promotes_to_not_in() {
        let cond = Cond::cmp_pairs(Cmp::Ne, [("id", CondValue::list(vec![1, 2]))]);
        let (sql, _) = build(&cond);
        assert_eq!(sql, "`id` NOT IN (?,?)");
    }

    #[test]
    fn list_with_ordering_operator_is_hard_error() {
        let cond = Cond::cmp_pairs(Cmp::Lt, [("id", CondValue::list(vec![1, 2]))]);
        let err = cond.build(&EngineConfig::new()).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn scalar_array_is_hard_error() {
        let cond = Cond::cmp_pairs(
            Cmp::Eq,
            [("id", CondValue::Scalar(Value::Array(vec![Value::Int(1)])))],
        );
        assert!(cond.build(&EngineConfig::new()).unwrap_err().is_unsupported());
    }

    #[test]
    fn in_list_preserves_order() {
        let (sql, args) = build(&Cond::in_list("id", vec![3, 1, 2]));
        assert_eq!(sql, "`id` IN (?,?,?)");
        assert_eq!(args, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn empty_in_list_is_invalid() {
        let cond = Cond::in_list("id", Vec::<i64>::new());
        assert!(!cond.is_valid());
        assert_eq!(build(&cond).0, "");
    }

    #[test]
    fn combinator_skips_invalid_children() {
        let cond = Cond::all([
            Cond::in_list("id", Vec::<i64>::new()),
            Cond::eq("status", 1),
        ]);
        let (sql, args) = build(&cond);
        assert_eq!(sql, "`status`=?");
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn combinator_with_no_valid_children_is_invalid() {
        let cond = Cond::any([
            Cond::in_list("id", Vec::<i64>::new()),
            Cond::eq_pairs(Vec::<(String, CondValue)>::new()),
        ]);
        assert!(!cond.is_valid());
        assert_eq!(build(&cond).0, "");
    }

    #[test]
    fn single_child_renders_unwrapped() {
        let (sql, _) = build(&Cond::any([Cond::eq("a", 1)]));
        assert_eq!(sql, "`a`=?");
    }

    #[test]
    fn and_with_nested_or() {
        let cond = Cond::eq("status", 1).and(Cond::eq("sex", 1).or(Cond::eq("sex", 2)));
        let (sql, args) = build(&cond);
        assert_eq!(sql, "`status`=? AND (`sex`=? OR `sex`=?)");
        assert_eq!(args, vec![Value::Int(1), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn or_wraps_nested_and() {
        let cond = Cond::eq("a", 1).or(Cond::eq("b", 2).and(Cond::eq("c", 3)));
        let (sql, _) = build(&cond);
        assert_eq!(sql, "`a`=? OR (`b`=? AND `c`=?)");
    }

    #[test]
    fn or_wraps_multi_pair_leaf() {
        let multi = Cond::eq_pairs([("a", CondValue::scalar(1)), ("b", CondValue::scalar(2))]);
        let (sql, _) = build(&Cond::eq("c", 3).or(multi));
        assert_eq!(sql, "`c`=? OR (`a`=? AND `b`=?)");
    }

    #[test]
    fn and_is_associative_in_effect() {
        let left = Cond::all([Cond::eq("a", 1).and(Cond::eq("b", 2)), Cond::eq("c", 3)]);
        let right = Cond::all([Cond::eq("a", 1), Cond::eq("b", 2).and(Cond::eq("c", 3))]);
        assert_eq!(build(&left).0, build(&right).0);
        assert_eq!(build(&left).1, build(&right).1);
    }

    #[test]
    fn not_wraps_inner() {
        let (sql, args) = build(&Cond::eq("status", 1).not());
        assert_eq!(sql, "NOT (`status`=?)");
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn not_of_invalid_is_invalid() {
        let cond = Cond::in_list("id", Vec::<i64>::new()).not();
        assert!(!cond.is_valid());
        assert_eq!(build(&cond).0, "");
    }

    #[test]
    fn raw_passes_through_verbatim() {
        let cond = Cond::raw_args("deleted_at IS NULL OR deleted_at > ?", [Value::Int(0)]);
        let (sql, args) = build(&cond);
        assert_eq!(sql, "deleted_at IS NULL OR deleted_at > ?");
        assert_eq!(args, vec![Value::Int(0)]);
    }

    #[test]
    fn raw_is_wrapped_inside_combinators() {
        let cond = Cond::eq("a", 1).and(Cond::raw("b=1 OR c=2"));
        assert_eq!(build(&cond).0, "`a`=? AND (b=1 OR c=2)");
    }

    #[test]
    fn expr_value_renders_parenthesized_with_args() {
        let cond = Cond::cmp_pairs(
            Cmp::Gt,
            [("score", CondValue::expr("SELECT AVG(score) FROM ~game WHERE round=?", [Value::Int(3)]))],
        );
        let cfg = EngineConfig::new().with_prefix("app_");
        let (sql, args) = cond.build(&cfg).unwrap();
        assert_eq!(sql, "`score`>(SELECT AVG(score) FROM app_game WHERE round=?)");
        assert_eq!(args, vec![Value::Int(3)]);
    }

    #[test]
    fn arg_order_follows_text_order() {
        let cond = Cond::eq("a", 1)
            .and(Cond::in_list("b", vec![2, 3]))
            .and(Cond::raw_args("c > ?", [Value::Int(4)]));
        let (sql, args) = build(&cond);
        assert_eq!(sql, "`a`=? AND `b` IN (?,?) AND (c > ?)");
        assert_eq!(
            args,
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn conditions_are_reusable() {
        let cond = Cond::eq("status", 1);
        let first = build(&cond);
        let second = build(&cond);
        assert_eq!(first, second);
    }
}
