//! Compiling a dataset into a sync plan.
//!
//! Every identifier is validated here, so a bad name aborts the sync before
//! any statement reaches the database.

use crate::error::SyncError;
use mysql_types::{is_bookkeeping_column, MySQLDdl};
use sync_core::{infer_primary_key, sanitize_identifier, ColumnDefinition, Dataset};
use tracing::{info, warn};

/// Validated table layout for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    table: String,
    columns: Vec<String>,
    primary_key: Option<ColumnDefinition>,
    key_index: Option<usize>,
    create_table: String,
}

impl SyncPlan {
    /// Validate names, infer the primary key and build the table DDL.
    ///
    /// Column names that collide with a bookkeeping column are rejected,
    /// ignoring case as MySQL does.
    pub fn compile(table: &str, dataset: &Dataset) -> Result<Self, SyncError> {
        let table = sanitize_identifier(table)?;

        let mut columns = Vec::with_capacity(dataset.columns().len());
        for column in dataset.columns() {
            let name = sanitize_identifier(&column.name)?;
            if is_bookkeeping_column(name) {
                return Err(SyncError::ReservedColumn {
                    column: name.to_string(),
                });
            }
            columns.push(name.to_string());
        }

        let primary_key = infer_primary_key(dataset).cloned();
        let key_index = primary_key
            .as_ref()
            .and_then(|key| dataset.column_index(&key.name));

        match &primary_key {
            Some(key) => info!(
                "Using '{}' ({}) as primary key for '{table}'",
                key.name, key.column_type
            ),
            None => warn!(
                "No column of '{table}' is unique and non-null; creating it without a primary key. \
                 Rows will be inserted without duplicate detection and soft delete is skipped"
            ),
        }

        let create_table = MySQLDdl.to_create_table_if_absent(
            table,
            dataset.columns(),
            primary_key.as_ref().map(|key| key.name.as_str()),
        );

        Ok(Self {
            table: table.to_string(),
            columns,
            primary_key,
            key_index,
            create_table,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Dataset column names, in dataset order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.primary_key.as_ref()
    }

    /// Position of the primary key in each dataset row.
    pub fn key_index(&self) -> Option<usize> {
        self.key_index
    }

    pub fn create_table_sql(&self) -> &str {
        &self.create_table
    }
}
