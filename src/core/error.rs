/// Dbase Error Module
///
/// This module defines the error taxonomy for the database access layer.
/// Every fallible operation in the crate returns [`DbaseError`], so callers
/// can branch on the failure class without parsing messages.
use thiserror::Error;

/// Error type for every operation exposed by `dbase`.
///
/// The variants fall into four groups:
/// - Input validation (`InvalidInput`, `SchemaMismatch`), raised before any SQL is built
/// - Result-shape violations (`AmbiguousResult`, `MissingColumn`)
/// - Driver failures (`Database`, `Driver`), propagated unchanged
/// - Setup errors (URIs, configuration, files)
#[derive(Error, Debug)]
pub enum DbaseError {
    /// An operation that needs column/value input received none
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rows of a bulk insert do not share the same ordered column list
    #[error("Schema mismatch in row {row}: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Index of the first offending row
        row: usize,
        /// Columns of the first row
        expected: Vec<String>,
        /// Columns of the offending row
        found: Vec<String>,
    },

    /// A single-row lookup matched more than one row
    #[error("Ambiguous result: expected at most one row from '{table}', found {rows}")]
    AmbiguousResult { table: String, rows: usize },

    /// A returned row lacks a column the operation projects
    #[error("Missing column '{0}' in result row")]
    MissingColumn(String),

    /// Errors raised by the SQLite driver
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Errors raised by any other driver, or by a closed connection
    #[error("Driver error: {0}")]
    Driver(String),

    /// The connection URI could not be understood
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The URI names a dialect no built-in driver serves
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DbaseError {
    /// Returns `true` for failures that came out of the execute primitive.
    pub fn is_driver_error(&self) -> bool {
        matches!(self, DbaseError::Database(_) | DbaseError::Driver(_))
    }
}

/// Type alias for Result to use DbaseError as the error type.
pub type Result<T> = std::result::Result<T, DbaseError>;
