/// Driver Module
///
/// The seam between the query builders and an actual database engine. A
/// driver executes finished SQL text and normalizes whatever the engine
/// returns into a [`ResultSet`]. The crate ships [`SqliteDriver`]; other
/// engines implement [`Driver`] and are handed to `Database::with_driver`.
use crate::core::value::{ResultSet, Row, Value};
use crate::core::{DbaseError, Result};
use rusqlite::Connection;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// SQL dialect spoken by a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// File-based embedded engine
    Sqlite,
    Postgres,
    MySql,
}

impl Dialect {
    /// Resolves a URI scheme such as `sqlite` or `postgresql+psycopg2`.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        let base = scheme.split('+').next().unwrap_or(scheme);
        match base.to_ascii_lowercase().as_str() {
            "sqlite" => Some(Dialect::Sqlite),
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "mysql" | "mariadb" => Some(Dialect::MySql),
            _ => None,
        }
    }

    /// Embedded dialects are colon-sensitive and reject `DROP ... CASCADE`.
    pub fn is_embedded(self) -> bool {
        matches!(self, Dialect::Sqlite)
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgresql",
            Dialect::MySql => "mysql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution contract required by `Database`.
///
/// Implementations must be safe to call from several threads; how concurrent
/// statements are scheduled is up to the driver.
pub trait Driver: Send + Sync {
    /// Executes one SQL statement and returns its rows (empty for DML/DDL).
    fn execute(&self, sql: &str) -> Result<ResultSet>;

    /// Lists the user tables visible on this connection.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Catalog lookup for a single table.
    fn table_exists(&self, name: &str) -> Result<bool>;

    fn dialect(&self) -> Dialect;

    /// Releases the connection. Later calls fail with a driver error.
    fn close(&self) -> Result<()>;
}

/// Options applied when a SQLite connection is opened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqliteOptions {
    /// Pragma assignments without the `PRAGMA` keyword, e.g. `foreign_keys = ON`
    pub pragmas: Vec<String>,
    /// How long a statement waits on a locked database file
    pub busy_timeout: Option<Duration>,
}

const TABLE_NAMES_SQL: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

/// rusqlite-backed driver for file and in-memory databases.
///
/// All rows are fetched eagerly. SQL text handed to this driver is
/// colon-sensitive: `\:` stands for a literal colon.
pub struct SqliteDriver {
    connection: Mutex<Option<Connection>>,
    path: Option<String>,
}

impl SqliteDriver {
    /// Opens a database file, or an in-memory database for `:memory:`.
    pub fn open(path: &str, options: &SqliteOptions) -> Result<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };

        if let Some(timeout) = options.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        for pragma in &options.pragmas {
            run_statement(&conn, &format!("PRAGMA {}", pragma))?;
        }

        info!("opened sqlite database at {}", path);
        Ok(SqliteDriver {
            connection: Mutex::new(Some(conn)),
            path: if path != ":memory:" {
                Some(path.to_string())
            } else {
                None
            },
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:", &SqliteOptions::default())
    }

    /// Path of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.connection
            .lock()
            .map_err(|_| DbaseError::Driver("Failed to acquire database lock".to_string()))
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.lock()?;
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(DbaseError::Driver("connection is closed".to_string())),
        }
    }
}

impl Driver for SqliteDriver {
    fn execute(&self, sql: &str) -> Result<ResultSet> {
        let sql = unescape_colons(sql);
        self.with_connection(|conn| run_statement(conn, &sql))
    }

    fn table_names(&self) -> Result<Vec<String>> {
        let rows = self.with_connection(|conn| run_statement(conn, TABLE_NAMES_SQL))?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("name").and_then(Value::as_str).map(String::from))
            .collect())
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| DbaseError::Database(e))?;
            debug!("closed sqlite connection");
        }
        Ok(())
    }
}

/// Reverses the colon escaping applied to embedded-dialect literals.
fn unescape_colons(sql: &str) -> String {
    sql.replace("\\:", ":")
}

/// Prepares and steps a single statement, collecting every row.
fn run_statement(conn: &Connection, sql: &str) -> Result<ResultSet> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query([])?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Row::new();
        for (i, column) in columns.iter().enumerate() {
            record.insert(column.clone(), Value::from(row.get_ref(i)?));
        }
        result.push(record);
    }
    Ok(result)
}
