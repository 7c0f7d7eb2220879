//! MySQL DDL generation from UniversalType.
//!
//! This module maps sync-core's `UniversalType` to MySQL column types and
//! compiles the `CREATE TABLE IF NOT EXISTS` statement for a synced table,
//! including the bookkeeping columns every managed table carries.
//!
//! Identifiers passed in here must already have been validated with
//! `sync_core::sanitize_identifier`; they are quoted but not escaped.

use sync_core::{ColumnDefinition, UniversalType};

pub use sync_core::ToDdl;

/// Creation timestamp, set once on insert.
pub const SYNCED_AT: &str = "synced_at";

/// Last write timestamp, refreshed on every update.
pub const LAST_MODIFIED: &str = "last_modified";

/// Soft-delete flag.
pub const IS_DELETED: &str = "is_deleted";

/// Bookkeeping column names in the order they are appended.
pub const BOOKKEEPING_COLUMNS: [&str; 3] = [SYNCED_AT, LAST_MODIFIED, IS_DELETED];

/// Bounded string type for synthetic columns that need an index.
pub const FALLBACK_STRING_TYPE: &str = "VARCHAR(255)";

/// MySQL DDL generator.
pub struct MySQLDdl;

impl ToDdl for MySQLDdl {
    fn to_ddl(&self, ext_type: &UniversalType) -> String {
        match ext_type {
            UniversalType::Int64 => "INT".to_string(),
            UniversalType::Float64 => "FLOAT".to_string(),
            UniversalType::DateTime => "DATETIME".to_string(),

            // Boolean - MySQL stores BOOLEAN as TINYINT(1)
            UniversalType::Bool => "TINYINT(1)".to_string(),

            UniversalType::Text => "TEXT".to_string(),
        }
    }
}

impl MySQLDdl {
    /// Column type for a column that takes part in an index.
    ///
    /// MySQL cannot index a `TEXT` column without a prefix length, so text
    /// keys use the bounded fallback type instead.
    pub fn to_key_ddl(&self, ext_type: &UniversalType) -> String {
        match ext_type {
            UniversalType::Text => FALLBACK_STRING_TYPE.to_string(),
            other => self.to_ddl(other),
        }
    }

    /// Definitions of the bookkeeping columns, in fixed order.
    pub fn bookkeeping_definitions(&self) -> [String; 3] {
        [
            format!("`{SYNCED_AT}` TIMESTAMP DEFAULT CURRENT_TIMESTAMP"),
            format!(
                "`{LAST_MODIFIED}` TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
            ),
            format!("`{IS_DELETED}` BOOLEAN DEFAULT FALSE"),
        ]
    }

    /// Generate an idempotent CREATE TABLE statement for a synced table.
    ///
    /// Dataset columns come first in dataset order, then the bookkeeping
    /// columns, then the primary key constraint when a key is given.
    pub fn to_create_table_if_absent(
        &self,
        table_name: &str,
        columns: &[ColumnDefinition],
        primary_key: Option<&str>,
    ) -> String {
        let mut column_defs: Vec<String> = columns
            .iter()
            .map(|column| {
                let ddl_type = if Some(column.name.as_str()) == primary_key {
                    self.to_key_ddl(&column.column_type)
                } else {
                    self.to_ddl(&column.column_type)
                };
                format!("  `{}` {}", column.name, ddl_type)
            })
            .collect();

        column_defs.extend(
            self.bookkeeping_definitions()
                .into_iter()
                .map(|def| format!("  {def}")),
        );

        if let Some(pk) = primary_key {
            column_defs.push(format!("  PRIMARY KEY (`{pk}`)"));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS `{}` (\n{}\n)",
            table_name,
            column_defs.join(",\n")
        )
    }
}

/// Check whether a column name collides with a bookkeeping column.
///
/// MySQL column names are case-insensitive, so the comparison is too.
pub fn is_bookkeeping_column(name: &str) -> bool {
    BOOKKEEPING_COLUMNS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}
