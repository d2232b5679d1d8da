/// Core Module for dbase
///
/// This module contains the building blocks of the access layer: value
/// types, SQL text builders, the driver seam and the connection handle.

pub mod db;
pub mod error;
pub mod sql;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{DbaseError, Result};
