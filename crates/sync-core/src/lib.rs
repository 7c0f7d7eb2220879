//! Core types for the table-sync framework.
//!
//! This crate provides the foundational types shared by the loaders and
//! the sinks, including:
//!
//! - [`UniversalType`] - Closed set of scalar column types
//! - [`UniversalValue`] - Cell values
//! - [`Dataset`] - Ordered, typed columns and rows
//! - [`sanitize_identifier`] - Table/column name validation
//! - [`infer_primary_key`] - Primary key inference
//!
//! # Architecture
//!
//! ```text
//! sync-core (this crate)
//!    │
//!    ├─── csv-types              (CSV string → UniversalValue, type inference)
//!    ├─── mysql-types            (UniversalType → MySQL DDL, values → mysql_async)
//!    ├─── table-sync-csv-source  (CSV file → Dataset)
//!    └─── table-sync-mysql-sink  (Dataset → MySQL table reconciliation)
//! ```
//!
//! # Example
//!
//! ```rust
//! use sync_core::{infer_primary_key, Dataset, UniversalType, UniversalValue};
//!
//! let dataset = Dataset::builder()
//!     .column("id", UniversalType::Int64)
//!     .column("name", UniversalType::Text)
//!     .row(vec![UniversalValue::Int64(1), UniversalValue::Text("a".into())])
//!     .row(vec![UniversalValue::Int64(2), UniversalValue::Text("a".into())])
//!     .build()
//!     .unwrap();
//!
//! let key = infer_primary_key(&dataset).map(|c| c.name.as_str());
//! assert_eq!(key, Some("id"));
//! ```

pub mod dataset;
pub mod identifier;
pub mod key;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use dataset::{ColumnDefinition, Dataset, DatasetBuilder, DatasetError};
pub use identifier::{sanitize_identifier, IdentifierError};
pub use key::{eligible_columns, infer_primary_key};
pub use types::{ToDdl, UniversalType};
pub use values::{KeyRepr, UniversalValue};
