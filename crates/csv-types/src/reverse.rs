//! Reverse conversion: CSV string → UniversalValue.
//!
//! This module parses CSV cell strings into sync-core values once the
//! column type is known (see `infer` for how the type is chosen).

use chrono::{NaiveDate, NaiveDateTime};
use sync_core::{UniversalType, UniversalValue};

/// Cell contents read as missing, whatever the column type.
pub const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NULL", "null", "NaN", "nan", "None", "<NA>", "#N/A",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Error type for CSV parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse '{value}' as {expected_type}: {message}")]
pub struct CsvParseError {
    pub message: String,
    pub value: String,
    pub expected_type: UniversalType,
}

/// Check whether a cell should be read as null.
pub fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

/// Parse a boolean cell; only `true`/`false` in any case.
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse an ISO-style date or date-time cell; a bare date means midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a CSV string value according to the column type.
pub fn csv_string_to_value(
    value: &str,
    schema_type: &UniversalType,
) -> Result<UniversalValue, CsvParseError> {
    if is_null_marker(value) {
        return Ok(UniversalValue::Null);
    }

    let error = |message: &str| CsvParseError {
        message: message.to_string(),
        value: value.to_string(),
        expected_type: *schema_type,
    };

    match schema_type {
        UniversalType::Int64 => value
            .parse::<i64>()
            .map(UniversalValue::Int64)
            .map_err(|_| error("Invalid integer")),
        UniversalType::Float64 => value
            .parse::<f64>()
            .map(UniversalValue::Float64)
            .map_err(|_| error("Invalid float")),
        UniversalType::Bool => parse_bool(value)
            .map(UniversalValue::Bool)
            .ok_or_else(|| error("Invalid boolean value")),
        UniversalType::DateTime => parse_datetime(value)
            .map(UniversalValue::DateTime)
            .ok_or_else(|| error("Invalid date/time")),
        UniversalType::Text => Ok(UniversalValue::Text(value.to_string())),
    }
}
