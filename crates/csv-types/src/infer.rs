//! Column type inference for CSV data.
//!
//! A column takes the narrowest type every non-null cell parses as, tried
//! in the order int64, float64, bool, date/time. Anything else is text, as
//! is a column with no non-null cells.

use crate::reverse::{is_null_marker, parse_bool, parse_datetime};
use sync_core::UniversalType;

/// Infer a column's type from its raw cells.
pub fn infer_column_type<'a, I>(cells: I) -> UniversalType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates = Candidates::default();
    let mut saw_value = false;

    for cell in cells {
        if is_null_marker(cell) {
            continue;
        }
        saw_value = true;
        candidates.narrow(cell);
        if candidates.exhausted() {
            return UniversalType::Text;
        }
    }

    if !saw_value {
        return UniversalType::Text;
    }
    candidates.best()
}

struct Candidates {
    int: bool,
    float: bool,
    boolean: bool,
    datetime: bool,
}

impl Default for Candidates {
    fn default() -> Self {
        Self {
            int: true,
            float: true,
            boolean: true,
            datetime: true,
        }
    }
}

impl Candidates {
    fn narrow(&mut self, cell: &str) {
        self.int = self.int && cell.parse::<i64>().is_ok();
        self.float = self.float && cell.parse::<f64>().is_ok();
        self.boolean = self.boolean && parse_bool(cell).is_some();
        self.datetime = self.datetime && parse_datetime(cell).is_some();
    }

    fn exhausted(&self) -> bool {
        !(self.int || self.float || self.boolean || self.datetime)
    }

    fn best(&self) -> UniversalType {
        if self.int {
            UniversalType::Int64
        } else if self.float {
            UniversalType::Float64
        } else if self.boolean {
            UniversalType::Bool
        } else if self.datetime {
            UniversalType::DateTime
        } else {
            UniversalType::Text
        }
    }
}
