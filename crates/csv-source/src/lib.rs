//! CSV file loading for table-sync
//!
//! This crate reads a CSV file (or any reader) fully into a `sync_core::Dataset`,
//! inferring one type per column from the cells, so it can be reconciled
//! against a MySQL table.

mod load;

pub use load::{has_csv_extension, load_dataset, load_from_reader, table_name_from_path, Config};
