//! Value representations for table-sync datasets.
//!
//! This module defines the scalar values held in dataset rows and the
//! hashable key view used for uniqueness checks.

use crate::types::UniversalType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Scalar cell value of a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniversalValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// Date/time without timezone
    DateTime(NaiveDateTime),

    /// String value
    Text(String),

    /// Null value
    Null,
}

/// Hashable view of a non-null value, used for uniqueness checks.
///
/// Floats are compared by bit pattern after folding `-0.0` into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRepr<'a> {
    Bool(bool),
    Int64(i64),
    Float64(u64),
    DateTime(NaiveDateTime),
    Text(&'a str),
}

impl UniversalValue {
    /// The type this value belongs to, or `None` for null.
    pub fn value_type(&self) -> Option<UniversalType> {
        match self {
            Self::Bool(_) => Some(UniversalType::Bool),
            Self::Int64(_) => Some(UniversalType::Int64),
            Self::Float64(_) => Some(UniversalType::Float64),
            Self::DateTime(_) => Some(UniversalType::DateTime),
            Self::Text(_) => Some(UniversalType::Text),
            Self::Null => None,
        }
    }

    /// Hashable representation, or `None` when the value is missing.
    pub fn key_repr(&self) -> Option<KeyRepr<'_>> {
        match self {
            Self::Bool(b) => Some(KeyRepr::Bool(*b)),
            Self::Int64(i) => Some(KeyRepr::Int64(*i)),
            Self::Float64(f) if f.is_nan() => None,
            Self::Float64(f) => {
                let folded = if *f == 0.0 { 0.0f64 } else { *f };
                Some(KeyRepr::Float64(folded.to_bits()))
            }
            Self::DateTime(dt) => Some(KeyRepr::DateTime(*dt)),
            Self::Text(s) => Some(KeyRepr::Text(s)),
            Self::Null => None,
        }
    }
}
