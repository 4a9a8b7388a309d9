//! Predicates and filter expressions.

use super::soql::predicate_to_soql;

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Rendered single-quoted, with embedded quotes doubled.
    Text(String),
    /// Rendered as-is. Only construct from validated numeric text.
    Number(String),
}

impl Literal {
    /// Creates a text literal.
    pub fn text(s: impl Into<String>) -> Self {
        Literal::Text(s.into())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n.to_string())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n.to_string())
    }
}

/// One boolean condition on a dataset column.
///
/// # Example
///
/// ```
/// use acris_lib::api::query::{FilterExpression, Predicate};
///
/// let filter = FilterExpression::new()
///     .and(Predicate::eq("borough", 1))
///     .and(Predicate::like("name", "SMITH"));
///
/// assert_eq!(filter.to_soql(), "borough=1 AND name like '%SMITH%'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Equality: `column='value'`
    Eq(String, Literal),
    /// Substring match: `column like '%value%'`
    Like(String, String),
    /// Prefix match: `column LIKE 'value%'`
    StartsWith(String, String),
    /// Set membership: `column IN ('a','b')`
    In(String, Vec<Literal>),
    /// Inclusive range: `column between 'start' and 'end'`
    Between(String, Literal, Literal),
    /// Lower bound: `column >= 'value'`
    Ge(String, Literal),
    /// Upper bound: `column <= 'value'`
    Le(String, Literal),
}

impl Predicate {
    /// Creates an equality predicate.
    pub fn eq(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Predicate::Eq(column.into(), value.into())
    }

    /// Creates a substring predicate.
    pub fn like(column: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Like(column.into(), value.into())
    }

    /// Creates a prefix predicate.
    pub fn starts_with(column: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::StartsWith(column.into(), value.into())
    }

    /// Creates a set membership predicate.
    pub fn is_in<L: Into<Literal>>(column: impl Into<String>, values: impl IntoIterator<Item = L>) -> Self {
        Predicate::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    /// Creates an inclusive range predicate.
    pub fn between(column: impl Into<String>, start: impl Into<Literal>, end: impl Into<Literal>) -> Self {
        Predicate::Between(column.into(), start.into(), end.into())
    }

    /// Creates a lower bound predicate.
    pub fn ge(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Predicate::Ge(column.into(), value.into())
    }

    /// Creates an upper bound predicate.
    pub fn le(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Predicate::Le(column.into(), value.into())
    }

    /// Renders the predicate as SoQL.
    pub fn to_soql(&self) -> String {
        predicate_to_soql(self)
    }
}

/// An ordered conjunction of predicates.
///
/// An empty expression matches every row; it renders as no `$where` clause at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    predicates: Vec<Predicate>,
}

impl FilterExpression {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a predicate (builder pattern).
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Appends a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Returns the predicates in order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns `true` if there are no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Renders the predicates joined with `AND`.
    pub fn to_soql(&self) -> String {
        self.predicates
            .iter()
            .map(predicate_to_soql)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

impl FromIterator<Predicate> for FilterExpression {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}
