//! CSV type conversions for sync-core types.
//!
//! This crate turns raw CSV cells into sync-core values: it infers a
//! `UniversalType` per column and parses each cell against that type.
//!
//! # Modules
//!
//! - [`infer`] - column type inference over raw cells
//! - [`reverse`] - CSV string → UniversalValue conversion
//!
//! # Example
//!
//! ```
//! use csv_types::{csv_string_to_value, infer_column_type};
//! use sync_core::{UniversalType, UniversalValue};
//!
//! let ty = infer_column_type(["1", "2", ""]);
//! assert_eq!(ty, UniversalType::Int64);
//! assert_eq!(csv_string_to_value("", &ty).unwrap(), UniversalValue::Null);
//! ```

pub mod infer;
pub mod reverse;

pub use infer::infer_column_type;
pub use reverse::{
    csv_string_to_value, is_null_marker, parse_bool, parse_datetime, CsvParseError, NULL_MARKERS,
};
