//! CSV loading implementation
//!
//! Column types are only known once every cell has been seen, so the whole
//! input is buffered before any value is converted.

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use csv_types::{csv_string_to_value, infer_column_type};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use sync_core::{ColumnDefinition, Dataset};
use tracing::{debug, info};

/// Configuration for CSV loading
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether the CSV has headers (default: true)
    pub has_headers: bool,

    /// CSV delimiter character (default: ',')
    pub delimiter: u8,

    /// Optional column names when has_headers is false
    /// If provided, must match the number of columns in the CSV
    pub column_names: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            column_names: None,
        }
    }
}

/// Check whether a path names a `.csv` file (any case).
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Derive the target table name from a CSV path: the file name without
/// its extension, e.g. `data/people.csv` becomes `people`.
pub fn table_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Load a CSV file from disk into a dataset.
pub fn load_dataset(path: &Path, config: &Config) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    load_from_reader(BufReader::new(file), &path.display().to_string(), config)
}

/// Load CSV data from any reader into a dataset.
///
/// `source_name` is only used in log lines and error messages.
pub fn load_from_reader<R: Read>(reader: R, source_name: &str, config: &Config) -> Result<Dataset> {
    info!("Loading CSV from: {source_name}");

    // Row widths are checked below so the error can name the row
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let header_record = if config.has_headers {
        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();
        if headers.is_empty() {
            bail!("CSV input {source_name} is empty: no header row found");
        }
        Some(headers)
    } else {
        None
    };

    let records: Vec<StringRecord> = csv_reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read CSV records")?;

    let headers: Vec<String> = match (header_record, &config.column_names) {
        (Some(headers), _) => headers.iter().map(|h| h.to_string()).collect(),
        (None, Some(column_names)) => column_names.clone(),
        (None, None) => match records.first() {
            Some(first) => (0..first.len()).map(|i| format!("column_{i}")).collect(),
            None => bail!("CSV input {source_name} is empty: no rows to name columns from"),
        },
    };
    debug!("CSV headers/columns: {headers:?}");

    for (index, record) in records.iter().enumerate() {
        if record.len() != headers.len() {
            bail!(
                "Column count mismatch in CSV row {}: expected {} columns ({}), but found {} columns",
                index + 1,
                headers.len(),
                headers.join(", "),
                record.len()
            );
        }
    }

    let columns: Vec<ColumnDefinition> = headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let column_type = infer_column_type(records.iter().map(|r| r.get(i).unwrap_or("")));
            ColumnDefinition::new(name, column_type)
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| {
                csv_string_to_value(cell, &column.column_type).with_context(|| {
                    format!("Invalid value in CSV row {}, column '{}'", index + 1, column.name)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let dataset = Dataset::new(columns, rows)
        .with_context(|| format!("CSV input {source_name} does not form a valid dataset"))?;

    info!("Schema for {source_name}:");
    for column in dataset.columns() {
        info!("  {}: {}", column.name, column.column_type);
    }
    info!(
        "Loaded {} rows with {} columns from {source_name}",
        dataset.len(),
        dataset.columns().len()
    );

    Ok(dataset)
}
