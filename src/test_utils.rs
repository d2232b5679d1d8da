/// # Test Utilities Module
///
/// Shared fixtures for the unit tests:
/// - A scriptable [`MockDriver`] that records every statement it receives
/// - Sample SQLite databases with known contents

use crate::core::db::{Database, Dialect, Driver};
use crate::core::value::ResultSet;
use crate::core::{DbaseError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Driver double that records statements and replays scripted responses.
///
/// Each `execute` pops the next scripted response; once the script is
/// exhausted, statements succeed with no rows. Statements registered with
/// [`MockDriver::fail_on`] always fail without consuming a response.
pub struct MockDriver {
    dialect: Dialect,
    statements: Arc<Mutex<Vec<String>>>,
    responses: Mutex<VecDeque<std::result::Result<ResultSet, String>>>,
    failures: Vec<String>,
    tables: Vec<String>,
}

impl MockDriver {
    pub fn new(dialect: Dialect) -> Self {
        MockDriver {
            dialect,
            statements: Arc::new(Mutex::new(Vec::new())),
            responses: Mutex::new(VecDeque::new()),
            failures: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn with_tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn fail_on(mut self, sql: &str) -> Self {
        self.failures.push(sql.to_string());
        self
    }

    /// Queues rows for the next unscripted statement.
    pub fn respond(self, rows: ResultSet) -> Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    /// Queues a driver failure for the next unscripted statement.
    pub fn respond_err(self, message: &str) -> Self {
        self.responses.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    /// Handle on the statement log, usable after the driver moved into a `Database`.
    pub fn statements(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.statements)
    }
}

impl Driver for MockDriver {
    fn execute(&self, sql: &str) -> Result<ResultSet> {
        self.statements.lock().unwrap().push(sql.to_string());
        if self.failures.iter().any(|f| f == sql) {
            return Err(DbaseError::Driver(format!("scripted failure for '{}'", sql)));
        }
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(DbaseError::Driver(message)),
            None => Ok(Vec::new()),
        }
    }

    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.clone())
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tables.iter().any(|t| t == name))
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory database with a `users` table holding three rows:
///
/// | id | name    | email             | age  |
/// |----|---------|-------------------|------|
/// | 1  | Alice   | alice@example.com | 30   |
/// | 2  | Bob     | bob@example.com   | 41   |
/// | 3  | O'Brien | NULL              | NULL |
pub fn sample_database() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.execute(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE,
            age INTEGER
        )",
    )
    .unwrap();
    db.execute(
        "INSERT INTO users (name, email, age) VALUES
            ('Alice', 'alice@example.com', 30),
            ('Bob', 'bob@example.com', 41),
            ('O''Brien', NULL, NULL)",
    )
    .unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Row;

    #[test]
    fn test_mock_driver_replays_script() {
        let driver = MockDriver::new(Dialect::Postgres)
            .respond(vec![Row::new().with("id", 1)])
            .respond_err("boom");
        let log = driver.statements();

        assert_eq!(driver.execute("SELECT 1").unwrap().len(), 1);
        assert!(driver.execute("SELECT 2").is_err());
        assert!(driver.execute("SELECT 3").unwrap().is_empty());
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_sample_database_contents() {
        let db = sample_database();
        assert_eq!(db.count("SELECT * FROM users").unwrap(), 3);
    }
}
