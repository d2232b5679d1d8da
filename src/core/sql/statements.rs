//! INSERT / UPDATE / DELETE / DROP statement text.
//!
//! Every builder validates its input before producing any SQL, so a failed
//! call never reaches the driver.
use super::escape::escape;
use crate::core::db::Dialect;
use crate::core::value::{ConditionSpec, EntrySpec, Value};
use crate::core::{DbaseError, Result};

/// `INSERT INTO t (a, b) VALUES (..)` for a single entry.
pub fn insert_sql(table: &str, entry: &EntrySpec, dialect: Dialect) -> Result<String> {
    if entry.is_empty() {
        return Err(DbaseError::InvalidInput("No values provided".to_string()));
    }
    Ok(format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        entry.keys().collect::<Vec<_>>().join(", "),
        values_tuple(entry, dialect)
    ))
}

/// One multi-row INSERT. Every entry must list the same columns in the same order.
pub fn bulk_insert_sql(table: &str, entries: &[EntrySpec], dialect: Dialect) -> Result<String> {
    let first = match entries.first() {
        Some(first) if !first.is_empty() => first,
        _ => return Err(DbaseError::InvalidInput("No values provided".to_string())),
    };
    let columns: Vec<&str> = first.keys().collect();

    for (row, entry) in entries.iter().enumerate().skip(1) {
        if !entry.keys().eq(columns.iter().copied()) {
            return Err(DbaseError::SchemaMismatch {
                row,
                expected: columns.iter().map(|c| c.to_string()).collect(),
                found: entry.keys().map(String::from).collect(),
            });
        }
    }

    let tuples: Vec<String> = entries.iter().map(|e| values_tuple(e, dialect)).collect();
    Ok(format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        tuples.join(", ")
    ))
}

/// `UPDATE t SET .. WHERE ..`.
///
/// Columns that appear in `conditions` are never assigned.
pub fn update_sql(
    table: &str,
    entry: &EntrySpec,
    conditions: &ConditionSpec,
    dialect: Dialect,
) -> Result<String> {
    if entry.is_empty() {
        return Err(DbaseError::InvalidInput("No values provided".to_string()));
    }
    if conditions.is_empty() {
        return Err(DbaseError::InvalidInput("No conditions provided".to_string()));
    }

    let updates: Vec<String> = entry
        .iter()
        .filter(|(column, _)| !conditions.contains_key(column))
        .map(|(column, value)| format!("{} = {}", column, escape(value, dialect)))
        .collect();
    if updates.is_empty() {
        return Err(DbaseError::InvalidInput(
            "Every value is also a condition, nothing to update".to_string(),
        ));
    }

    let conds: Vec<String> = conditions
        .iter()
        .map(|(column, value)| format!("{} = {}", column, escape(value, dialect)))
        .collect();

    Ok(format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        updates.join(", "),
        conds.join(" AND ")
    ))
}

/// The id is quoted as-is, without escaping.
pub fn delete_by_id_sql(table: &str, id: &Value) -> String {
    format!("DELETE FROM {} WHERE id = '{}'", table, id)
}

pub fn purge_sql(table: &str) -> String {
    format!("DELETE FROM {}", table)
}

/// Idempotent drop. Embedded engines do not accept `CASCADE`.
pub fn drop_table_sql(table: &str, dialect: Dialect) -> String {
    if dialect.is_embedded() {
        format!("DROP TABLE IF EXISTS {}", table)
    } else {
        format!("DROP TABLE IF EXISTS {} CASCADE", table)
    }
}

fn values_tuple(entry: &EntrySpec, dialect: Dialect) -> String {
    let values: Vec<String> = entry.values().map(|v| escape(v, dialect)).collect();
    format!("({})", values.join(", "))
}
