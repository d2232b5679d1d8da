/// Query Execution Module
///
/// The execute primitive every other operation goes through, plus the thin
/// pass-through helpers: row counting, script files and table management.

use super::connection::Database;
use crate::core::sql;
use crate::core::value::ResultSet;
use crate::core::{DbaseError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Splits a SQL script into individual statements.
///
/// Whole-line `--` comments are dropped unless the line sits inside an open
/// single-quoted literal. Newlines become spaces and the text is split on
/// `;`, so a `;` inside a literal still ends the statement. Blank pieces are
/// skipped.
///
/// ```
/// let statements = dbase::split_script("-- setup\nCREATE TABLE a (id INTEGER);\n\nINSERT INTO a VALUES (1);\n");
/// assert_eq!(statements, vec!["CREATE TABLE a (id INTEGER)", "INSERT INTO a VALUES (1)"]);
/// ```
pub fn split_script(content: &str) -> Vec<String> {
    let mut in_literal = false;
    let mut kept = Vec::new();
    for line in content.lines() {
        if !in_literal && line.trim_start().starts_with("--") {
            continue;
        }
        // doubled quotes toggle twice and cancel out
        if line.matches('\'').count() % 2 == 1 {
            in_literal = !in_literal;
        }
        kept.push(line);
    }
    let joined = kept.join(" ");

    joined
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(String::from)
        .collect()
}

impl Database {
    /// Executes a SQL statement and returns its rows.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank SQL; any driver failure is returned unchanged.
    pub fn execute(&self, sql: &str) -> Result<ResultSet> {
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            return Err(DbaseError::InvalidInput(
                "Cannot execute empty SQL statement".to_string(),
            ));
        }
        debug!(dialect = %self.dialect(), "executing: {}", trimmed);
        self.driver().execute(trimmed)
    }

    /// Number of rows the statement returns, 0 if none.
    pub fn count(&self, sql: &str) -> Result<usize> {
        Ok(self.execute(sql)?.len())
    }

    /// Executes every statement of a SQL script file, in order.
    ///
    /// Returns the number of statements executed. The first failing statement
    /// aborts the run; earlier statements stay applied.
    pub fn from_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DbaseError::InvalidInput(format!(
                "File does not exist '{}'",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let statements = split_script(&content);
        for statement in &statements {
            self.execute(statement)?;
        }
        debug!("executed {} statements from {}", statements.len(), path.display());
        Ok(statements.len())
    }

    /// Names of the tables in the database.
    pub fn table_names(&self) -> Result<Vec<String>> {
        self.driver().table_names()
    }

    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.driver().table_exists(name)
    }

    /// Drops a table if it exists. Intended for resets during development.
    pub fn drop_table(&self, table: &str) -> Result<()> {
        self.execute(&sql::drop_table_sql(table, self.dialect()))?;
        Ok(())
    }

    /// Drops every table reported by the driver.
    pub fn drop_tables(&self) -> Result<()> {
        for table in self.table_names()? {
            self.drop_table(&table)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::Dialect;
    use crate::core::value::Value;
    use crate::test_utils::{sample_database, MockDriver};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_execute_and_count() {
        let db = sample_database();
        let rows = db.execute("SELECT * FROM users ORDER BY id").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(db.count("SELECT * FROM users WHERE age > 30").unwrap(), 1);
        assert_eq!(db.count("SELECT * FROM users WHERE age > 300").unwrap(), 0);
    }

    #[test]
    fn test_execute_rejects_blank_sql() {
        let db = Database::with_driver(MockDriver::new(Dialect::Postgres));
        assert!(matches!(db.execute("   "), Err(DbaseError::InvalidInput(_))));
    }

    #[test]
    fn test_driver_errors_propagate_unchanged() {
        let db = sample_database();
        match db.execute("SELECT * FROM nonexistent_table") {
            Err(DbaseError::Database(e)) => assert!(e.to_string().contains("no such table")),
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_script_skips_blank_statements() {
        let script = "CREATE TABLE a (\n  id INTEGER\n);\n;\n  \nINSERT INTO a VALUES (1);";
        assert_eq!(
            split_script(script),
            vec!["CREATE TABLE a (   id INTEGER )", "INSERT INTO a VALUES (1)"]
        );
    }

    #[test]
    fn test_split_script_keeps_dash_lines_inside_literals() {
        let script = "-- header\nINSERT INTO notes (body) VALUES ('first\n-- kept\nlast');\n-- trailer\n";
        assert_eq!(
            split_script(script),
            vec!["INSERT INTO notes (body) VALUES ('first -- kept last')"]
        );
    }

    #[test]
    fn test_from_file_keeps_literal_text_after_dashes() {
        let mut script = NamedTempFile::new().unwrap();
        writeln!(
            script,
            "CREATE TABLE notes (body TEXT);\nINSERT INTO notes (body) VALUES ('it''s\n-- still text');"
        )
        .unwrap();

        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.from_file(script.path()).unwrap(), 2);
        let rows = db.execute("SELECT body FROM notes").unwrap();
        assert_eq!(rows[0].get("body"), Some(&Value::from("it's -- still text")));
    }

    #[test]
    fn test_from_file_runs_every_statement() {
        let mut script = NamedTempFile::new().unwrap();
        writeln!(
            script,
            "-- schema\nCREATE TABLE genes (id INTEGER PRIMARY KEY, name TEXT);\nINSERT INTO genes (name) VALUES ('BRCA1');\nINSERT INTO genes (name) VALUES ('TP53');"
        )
        .unwrap();

        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.from_file(script.path()).unwrap(), 3);
        assert_eq!(db.count("SELECT * FROM genes").unwrap(), 2);
    }

    #[test]
    fn test_from_file_missing_file() {
        let db = Database::open_in_memory().unwrap();
        match db.from_file("/nonexistent/schema.sql") {
            Err(DbaseError::InvalidInput(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_drop_tables() {
        let db = sample_database();
        db.execute("CREATE TABLE extra (id INTEGER)").unwrap();
        assert!(db.table_exists("extra").unwrap());

        db.drop_table("extra").unwrap();
        assert!(!db.table_exists("extra").unwrap());
        // dropping a missing table is not an error
        db.drop_table("extra").unwrap();

        db.drop_tables().unwrap();
        assert!(db.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_drop_table_uses_cascade_for_networked_dialects() {
        let driver = MockDriver::new(Dialect::Postgres).with_tables(&["a", "b"]);
        let log = driver.statements();
        let db = Database::with_driver(driver);

        db.drop_tables().unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "DROP TABLE IF EXISTS a CASCADE".to_string(),
                "DROP TABLE IF EXISTS b CASCADE".to_string(),
            ]
        );
    }

    #[test]
    fn test_drop_tables_stops_at_first_failure() {
        let driver = MockDriver::new(Dialect::Postgres)
            .with_tables(&["a", "b"])
            .fail_on("DROP TABLE IF EXISTS a CASCADE");
        let log = driver.statements();
        let db = Database::with_driver(driver);

        assert!(db.drop_tables().unwrap_err().is_driver_error());
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
