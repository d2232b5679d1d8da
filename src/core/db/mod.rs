/// Database Module
///
/// This module provides the connection handle and every operation that
/// reaches a database, organized into focused submodules.
///
/// ## Architecture
///
/// - **Driver Seam** (`driver.rs`): the `Driver` trait, dialects and the built-in SQLite driver
/// - **Connection Management** (`connection.rs`): opening and closing a `Database`, URI handling
/// - **Query Execution** (`query.rs`): the execute primitive, script files and table management
/// - **CRUD** (`crud.rs`): dynamic SELECT/INSERT/UPDATE/DELETE and the derived accessors
///
/// ## Error Handling
///
/// All operations return `DbaseError`. Driver failures are passed through
/// unchanged; only `add_unique` suppresses one.
pub mod connection;
pub mod crud;
pub mod driver;
pub mod query;

pub use connection::*;
pub use driver::*;
pub use query::split_script;
