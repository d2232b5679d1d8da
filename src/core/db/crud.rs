/// CRUD Operations Module
///
/// Table-level reads and writes built from column/value maps, and the
/// accessors derived from them (`get_single`, `get_id`, `add_unique`).

use super::connection::Database;
use crate::core::sql::{self, SelectQuery};
use crate::core::value::{ConditionSpec, EntrySpec, IdLookup, ResultSet, Row, Value};
use crate::core::{DbaseError, Result};
use tracing::debug;

impl Database {
    /// Runs a filtered SELECT.
    pub fn get(&self, query: &SelectQuery) -> Result<ResultSet> {
        self.execute(&query.to_sql(self.dialect()))
    }

    /// Every row of `table`, optionally ordered by a raw ORDER BY expression.
    pub fn get_all(&self, table: &str, order: Option<&str>) -> Result<ResultSet> {
        let query = match order {
            Some(order) => SelectQuery::new(table).order_by(order),
            None => SelectQuery::new(table),
        };
        self.get(&query)
    }

    /// At most one matching row.
    ///
    /// # Errors
    ///
    /// `AmbiguousResult` when more than one row matches.
    pub fn get_single(&self, query: &SelectQuery) -> Result<Option<Row>> {
        let mut rows = self.get(query)?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(DbaseError::AmbiguousResult {
                table: query.table().to_string(),
                rows: n,
            }),
        }
    }

    /// The row whose `id` column equals `id`.
    pub fn get_by_id(&self, table: &str, id: impl Into<Value>) -> Result<Option<Row>> {
        self.get_single(&SelectQuery::new(table).filter("id", id))
    }

    /// The `id` column of every matching row, tagged by how many matched.
    pub fn get_id(&self, query: &SelectQuery) -> Result<IdLookup> {
        let ids = self
            .get(query)?
            .into_iter()
            .map(|row| {
                row.get("id")
                    .cloned()
                    .ok_or_else(|| DbaseError::MissingColumn("id".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(IdLookup::from_ids(ids))
    }

    /// Inserts one row. Every value goes through the escaper.
    pub fn insert(&self, table: &str, entry: &EntrySpec) -> Result<()> {
        self.execute(&sql::insert_sql(table, entry, self.dialect())?)?;
        Ok(())
    }

    /// Inserts `entry` unless a row with the same `key` value already exists.
    ///
    /// Returns the id(s) found for `entry[key]` after the attempt. If the
    /// insert fails for any reason the failure is ignored, on the assumption
    /// that a concurrent writer inserted the same value first; the follow-up
    /// lookup then reports whatever is there, which may be `IdLookup::None`.
    /// Callers cannot tell a lost race from an insert that failed for another
    /// reason.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `entry` is empty or has no `key` column. Lookup
    /// failures propagate.
    pub fn add_unique(&self, table: &str, entry: &EntrySpec, key: &str) -> Result<IdLookup> {
        if entry.is_empty() {
            return Err(DbaseError::InvalidInput("No values provided".to_string()));
        }
        let value = entry.get(key).cloned().ok_or_else(|| {
            DbaseError::InvalidInput(format!("unique key '{}' is not part of the entry", key))
        })?;
        let lookup = SelectQuery::new(table).filter(key, value);

        let existing = self.get_id(&lookup)?;
        if !existing.is_none() {
            return Ok(existing);
        }

        if let Err(e) = self.insert(table, entry) {
            debug!(table, key, "add_unique insert failed, re-checking: {}", e);
        }
        self.get_id(&lookup)
    }

    /// Inserts all entries with one multi-row statement.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty list, `SchemaMismatch` when the entries do
    /// not share the first entry's ordered columns. Nothing is executed in
    /// either case.
    pub fn insert_bulk(&self, table: &str, entries: &[EntrySpec]) -> Result<()> {
        self.execute(&sql::bulk_insert_sql(table, entries, self.dialect())?)?;
        Ok(())
    }

    /// Updates the rows matching every condition.
    ///
    /// Columns present in `conditions` are left out of the SET clause.
    pub fn update(&self, table: &str, entry: &EntrySpec, conditions: &ConditionSpec) -> Result<()> {
        self.execute(&sql::update_sql(table, entry, conditions, self.dialect())?)?;
        Ok(())
    }

    /// Deletes the row with the given id.
    pub fn delete(&self, table: &str, id: impl Into<Value>) -> Result<()> {
        self.execute(&sql::delete_by_id_sql(table, &id.into()))?;
        Ok(())
    }

    /// Deletes every row of `table`.
    pub fn purge(&self, table: &str) -> Result<()> {
        self.execute(&sql::purge_sql(table))?;
        Ok(())
    }
}
