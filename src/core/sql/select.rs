//! Filtered SELECT construction.
use super::escape::filter_literal;
use crate::core::db::Dialect;
use crate::core::value::{FilterSpec, Value};
use std::fmt;

/// Boolean combinator applied between every filter clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => f.write_str("AND"),
            Logic::Or => f.write_str("OR"),
        }
    }
}

/// A `SELECT * FROM table` with an optional flat filter, ordering and paging.
///
/// ```
/// use dbase::{Dialect, Logic, SelectQuery, Value};
///
/// let query = SelectQuery::new("users")
///     .filter("status", Value::Null)
///     .filter("age", 5)
///     .logic(Logic::And)
///     .order_by("name DESC")
///     .limit(10);
/// assert_eq!(
///     query.to_sql(Dialect::Sqlite),
///     "SELECT * FROM users WHERE status IS NULL AND age = 5 ORDER BY name DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    table: String,
    filters: FilterSpec,
    logic: Logic,
    order: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        SelectQuery {
            table: table.into(),
            filters: FilterSpec::new(),
            logic: Logic::default(),
            order: None,
            limit: None,
            offset: None,
        }
    }

    /// Adds `column = value`, or `column IS NULL` for `Value::Null`.
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(column, value);
        self
    }

    /// Replaces the whole filter.
    pub fn filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    pub fn logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    /// Raw ORDER BY expression. Not escaped.
    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filters
    }

    /// Builds the SQL text for this query, with literals written for `dialect`.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = format!("SELECT * FROM {}", self.table);

        let clauses: Vec<String> = self
            .filters
            .iter()
            .map(|(column, value)| match value {
                Value::Null => format!("{} IS NULL", column),
                other => format!("{} = {}", column, filter_literal(other, dialect)),
            })
            .collect();

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            let separator = format!(" {} ", self.logic);
            sql.push_str(&clauses.join(separator.as_str()));
        }
        if let Some(order) = &self.order {
            sql.push_str(&format!(" ORDER BY {}", order));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
        sql
    }
}
