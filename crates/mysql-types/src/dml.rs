//! MySQL statement builders for upsert and soft delete.
//!
//! Every builder emits `?` placeholders for values; only identifiers are
//! interpolated, and those must already be sanitized.

use crate::ddl::{MySQLDdl, BOOKKEEPING_COLUMNS, IS_DELETED, LAST_MODIFIED};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Upper bound on placeholders in one prepared statement.
pub const MAX_PLACEHOLDERS: usize = 65_535;

/// Rows that fit in one statement without exceeding the placeholder cap.
///
/// Always at least one, so a single very wide row still goes through.
pub fn rows_per_statement(batch_size: usize, placeholders_per_row: usize) -> usize {
    let cap = MAX_PLACEHOLDERS / placeholders_per_row.max(1);
    batch_size.min(cap).max(1)
}

/// Longest identifier MySQL accepts for a table.
pub const MAX_IDENTIFIER_LEN: usize = 64;

const KEY_SET_SUFFIX: &str = "_sync_keys";

/// Name of the temporary key-set table staged for `table_name`.
///
/// Names that would exceed `MAX_IDENTIFIER_LEN` are truncated and tagged
/// with a hash of the full table name so distinct tables stay distinct.
pub fn key_set_name(table_name: &str) -> String {
    if table_name.len() + KEY_SET_SUFFIX.len() <= MAX_IDENTIFIER_LEN {
        return format!("{table_name}{KEY_SET_SUFFIX}");
    }

    let mut hasher = DefaultHasher::new();
    table_name.hash(&mut hasher);
    let tag = format!("{:08x}", hasher.finish() as u32);

    let keep = MAX_IDENTIFIER_LEN - KEY_SET_SUFFIX.len() - 1 - tag.len();
    // Sanitized identifiers are ASCII, so any byte offset is a char boundary.
    format!("{}{KEY_SET_SUFFIX}_{tag}", &table_name[..keep])
}

fn quoted_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl MySQLDdl {
    /// Generate a batch INSERT statement.
    pub fn to_batch_insert(&self, table_name: &str, columns: &[String], row_count: usize) -> String {
        let col_placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let row_template = format!("({})", col_placeholders.join(", "));
        let rows: Vec<&str> = (0..row_count).map(|_| row_template.as_str()).collect();

        format!(
            "INSERT INTO `{}` ({}) VALUES {}",
            table_name,
            quoted_list(columns),
            rows.join(", ")
        )
    }

    /// Generate a batch upsert statement for a synced table.
    ///
    /// New rows get fresh bookkeeping values; rows whose primary key already
    /// exists have every dataset column overwritten, `last_modified`
    /// refreshed and `is_deleted` cleared. On a table without a primary key
    /// the duplicate-key branch never fires and this is a plain insert.
    pub fn to_batch_upsert(&self, table_name: &str, columns: &[String], row_count: usize) -> String {
        let mut row_slots: Vec<&str> = columns.iter().map(|_| "?").collect();
        row_slots.extend(["NOW()", "NOW()", "FALSE"]);
        let row_template = format!("({})", row_slots.join(", "));
        let rows: Vec<&str> = (0..row_count).map(|_| row_template.as_str()).collect();

        let mut column_list: Vec<String> = columns.to_vec();
        column_list.extend(BOOKKEEPING_COLUMNS.iter().map(|c| c.to_string()));

        let mut assignments: Vec<String> = columns
            .iter()
            .map(|c| format!("`{c}` = VALUES(`{c}`)"))
            .collect();
        assignments.push(format!("`{LAST_MODIFIED}` = NOW()"));
        assignments.push(format!("`{IS_DELETED}` = FALSE"));

        format!(
            "INSERT INTO `{}` ({}) VALUES {} ON DUPLICATE KEY UPDATE {}",
            table_name,
            quoted_list(&column_list),
            rows.join(", "),
            assignments.join(", ")
        )
    }

    /// Generate the CREATE statement for a session-scoped key set.
    ///
    /// The key column is indexed but not unique: keys that are distinct in
    /// the dataset may collapse once stored in the column type, and staging
    /// must accept them.
    pub fn to_create_key_set(&self, key_set: &str, key_column: &str, key_type: &str) -> String {
        format!(
            "CREATE TEMPORARY TABLE `{key_set}` (`{key_column}` {key_type} NOT NULL, INDEX (`{key_column}`))"
        )
    }

    /// Generate the soft-delete statement.
    ///
    /// Flags every live row whose key is absent from the staged key set.
    pub fn to_soft_delete(&self, table_name: &str, key_set: &str, key_column: &str) -> String {
        format!(
            "UPDATE `{table_name}` AS dest \
             SET dest.`{IS_DELETED}` = TRUE, dest.`{LAST_MODIFIED}` = NOW() \
             WHERE dest.`{IS_DELETED}` = FALSE \
             AND NOT EXISTS (SELECT 1 FROM `{key_set}` AS staged WHERE staged.`{key_column}` = dest.`{key_column}`)"
        )
    }

    /// Generate DROP statement for a temporary table.
    pub fn to_drop_temporary_table(&self, table_name: &str) -> String {
        format!("DROP TEMPORARY TABLE IF EXISTS `{table_name}`")
    }
}
