//! Primary key inference.
//!
//! A column is eligible when every value is present and no value repeats.
//! When several columns are eligible the first numeric one wins, then the
//! first temporal one, then the first in column order. Booleans count as
//! numeric here.

use crate::dataset::{ColumnDefinition, Dataset};
use crate::types::UniversalType;
use std::collections::HashSet;

/// Pick the column to use as primary key, if any.
///
/// An empty dataset has no eligible column.
pub fn infer_primary_key(dataset: &Dataset) -> Option<&ColumnDefinition> {
    if dataset.is_empty() {
        return None;
    }

    let eligible = eligible_columns(dataset);

    if let [only] = eligible.as_slice() {
        return Some(*only);
    }

    eligible
        .iter()
        .find(|c| is_numeric_key(c.column_type))
        .or_else(|| eligible.iter().find(|c| c.column_type.is_temporal()))
        .or_else(|| eligible.first())
        .copied()
}

fn is_numeric_key(column_type: UniversalType) -> bool {
    column_type.is_numeric() || column_type == UniversalType::Bool
}

/// Columns whose values are all non-null and pairwise distinct.
pub fn eligible_columns(dataset: &Dataset) -> Vec<&ColumnDefinition> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .filter(|(index, _)| is_unique_and_present(dataset, *index))
        .map(|(_, column)| column)
        .collect()
}

fn is_unique_and_present(dataset: &Dataset, index: usize) -> bool {
    let mut seen = HashSet::with_capacity(dataset.len());
    for value in dataset.column_values(index) {
        match value.key_repr() {
            Some(repr) if seen.insert(repr) => {}
            _ => return false,
        }
    }
    true
}
