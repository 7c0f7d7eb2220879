//! In-memory tabular dataset handed to a sync.
//!
//! A `Dataset` is an ordered list of typed columns plus rows whose values
//! are stored in the same column order. It is validated once on
//! construction and read-only afterwards.

use crate::types::UniversalType;
use crate::values::UniversalValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Error type for dataset construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DatasetError {
    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A row does not have one value per column
    #[error("Row {row} has {found} values but the dataset has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value does not match its column type
    #[error("Row {row}, column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: UniversalType,
        found: UniversalType,
    },
}

/// Column definition: name and inferred type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: UniversalType,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, column_type: UniversalType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Ordered columns and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<ColumnDefinition>,
    rows: Vec<Vec<UniversalValue>>,
}

impl Dataset {
    /// Create a dataset, checking that every row matches the column list.
    pub fn new(
        columns: Vec<ColumnDefinition>,
        rows: Vec<Vec<UniversalValue>>,
    ) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DatasetError::DuplicateColumn(column.name.clone()));
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RowWidth {
                    row: row_index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter().zip(row) {
                if let Some(found) = value.value_type() {
                    if found != column.column_type {
                        return Err(DatasetError::TypeMismatch {
                            row: row_index,
                            column: column.name.clone(),
                            expected: column.column_type,
                            found,
                        });
                    }
                }
            }
        }

        Ok(Self { columns, rows })
    }

    /// Start building a dataset column by column.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<UniversalValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in dataset order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate over one column's values, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &UniversalValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }
}

/// Builder for `Dataset`.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<ColumnDefinition>,
    rows: Vec<Vec<UniversalValue>>,
}

impl DatasetBuilder {
    /// Add a column to the dataset.
    pub fn column(mut self, name: impl Into<String>, column_type: UniversalType) -> Self {
        self.columns.push(ColumnDefinition::new(name, column_type));
        self
    }

    /// Add a row, values in column order.
    pub fn row(mut self, values: Vec<UniversalValue>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build and validate the dataset.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        Dataset::new(self.columns, self.rows)
    }
}
