/// SQL Text Module
///
/// Pure builders that turn column/value maps into SQL statements. Nothing
/// here touches a connection; see `core::db` for execution.
///
/// ## Layout
///
/// - **Escaping** (`escape.rs`): value -> literal, dialect aware
/// - **Selection** (`select.rs`): filtered, ordered and paginated SELECT
/// - **Statements** (`statements.rs`): INSERT, bulk INSERT, UPDATE, DELETE, DROP
pub mod escape;
pub mod select;
pub mod statements;

pub use escape::{escape, filter_literal};
pub use select::{Logic, SelectQuery};
pub use statements::*;
