//! Scalar column types for table-sync datasets.
//!
//! This module defines `UniversalType`, the closed set of scalar types a
//! dataset column can carry. Each sink defines its own mapping FROM
//! `UniversalType` TO its native column type via the `ToDdl` trait.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred scalar type of a dataset column.
///
/// The set is closed on purpose: sink crates map it with an exhaustive
/// `match`, so adding a variant breaks their build instead of silently
/// falling back to a default column type.
///
/// # Serialized Format
///
/// ```yaml
/// type: int64
/// type: date_time
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniversalType {
    /// 64-bit signed integer
    Int64,

    /// 64-bit IEEE 754 floating point
    Float64,

    /// Boolean value
    Bool,

    /// Date and time without timezone (microsecond precision)
    DateTime,

    /// Unbounded text; also the type of columns nothing else fits
    Text,
}

/// Trait for generating DDL statements from `UniversalType`.
///
/// Each sink-specific type crate implements this trait to generate
/// appropriate DDL for creating tables with the correct column types.
pub trait ToDdl {
    /// Generate DDL type definition for the given `UniversalType`.
    fn to_ddl(&self, sync_type: &UniversalType) -> String;
}

impl UniversalType {
    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime)
    }

    /// Name used in schema summaries and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::DateTime => "date_time",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for UniversalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
