//! Forward conversion: UniversalValue → MySQLValue
//!
//! This module implements `From<&UniversalValue>` for `MySQLValue`, converting
//! sync-core's values into bound parameters for INSERT operations.

use chrono::{Datelike, Timelike};
use mysql_async::Value;
use sync_core::UniversalValue;

/// MySQL value wrapper for type-safe conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct MySQLValue(pub Value);

impl MySQLValue {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<&UniversalValue> for MySQLValue {
    fn from(value: &UniversalValue) -> Self {
        match value {
            UniversalValue::Null => MySQLValue(Value::NULL),

            // Boolean - MySQL uses TINYINT(1)
            UniversalValue::Bool(b) => MySQLValue(Value::Int(i64::from(*b))),

            UniversalValue::Int64(i) => MySQLValue(Value::Int(*i)),
            UniversalValue::Float64(f) => MySQLValue(Value::Double(*f)),

            // DateTime - MySQL DATETIME, microsecond precision
            UniversalValue::DateTime(dt) => MySQLValue(Value::Date(
                dt.year() as u16,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                // leap-second nanos can exceed one second
                (dt.nanosecond() / 1000).min(999_999),
            )),

            UniversalValue::Text(s) => MySQLValue(Value::Bytes(s.clone().into_bytes())),
        }
    }
}

/// Convert a row of values into positional statement parameters.
pub fn row_to_params<'a, I>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = &'a UniversalValue>,
{
    values
        .into_iter()
        .map(|v| MySQLValue::from(v).into_inner())
        .collect()
}
