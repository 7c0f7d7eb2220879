//! MySQL type conversions for sync-core types.
//!
//! This crate provides the MySQL side of a sync: DDL generation from
//! `UniversalType`, the statements used by the upsert and soft-delete
//! stages, and conversion of dataset values into `mysql_async` parameters.
//!
//! # Structure
//!
//! - `ddl`: column type mapping, bookkeeping columns, `CREATE TABLE IF NOT EXISTS`
//! - `dml`: batch upsert, key-set staging and soft-delete statements
//! - `forward`: Convert `UniversalValue` → `MySQLValue` (for INSERT operations)
//!
//! # Example
//!
//! ```rust
//! use mysql_types::{MySQLDdl, ToDdl};
//! use sync_core::UniversalType;
//!
//! let ddl = MySQLDdl;
//! assert_eq!(ddl.to_ddl(&UniversalType::Bool), "TINYINT(1)");
//! ```

pub mod ddl;
pub mod dml;
pub mod forward;

pub use ddl::{
    is_bookkeeping_column, MySQLDdl, ToDdl, BOOKKEEPING_COLUMNS, FALLBACK_STRING_TYPE, IS_DELETED,
    LAST_MODIFIED, SYNCED_AT,
};
pub use dml::{key_set_name, rows_per_statement, MAX_PLACEHOLDERS};
pub use forward::{row_to_params, MySQLValue};
