//! Schema-less relational database access.
//!
//! One [`Database`] handle executes raw SQL and dynamically built CRUD
//! statements and hands rows back as ordered column -> [`Value`] records.
//!
//! ```
//! use dbase::{Database, EntrySpec, IdLookup, SelectQuery, Value};
//!
//! let db = Database::open_in_memory()?;
//! db.execute("CREATE TABLE genes (id INTEGER PRIMARY KEY, name TEXT UNIQUE)")?;
//!
//! let entry = EntrySpec::new().with("name", "BRCA1");
//! let id = db.add_unique("genes", &entry, "name")?;
//! assert_eq!(id, IdLookup::One(Value::Integer(1)));
//!
//! let row = db.get_single(&SelectQuery::new("genes").filter("name", "BRCA1"))?;
//! assert!(row.is_some());
//! # Ok::<(), dbase::DbaseError>(())
//! ```

// Core infrastructure modules
pub mod core;

pub mod config;

#[cfg(test)]
mod test_utils;

pub use crate::core::db::{
    split_script, uri_split, Database, Dialect, Driver, SqliteDriver, SqliteOptions, UriParts,
};
pub use crate::core::sql::{escape, Logic, SelectQuery};
pub use crate::core::value::{
    ConditionSpec, EntrySpec, FilterSpec, IdLookup, Record, ResultSet, Row, Value,
};
pub use crate::core::{DbaseError, Result};
