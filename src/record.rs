//! Output data model.
//!
//! One `Record` per INSERT batch: the target endpoint name plus one ordered
//! map per value row. Maps keep column declaration order (serde_json's
//! preserve_order feature), so the serialized field order is stable.

use serde::Serialize;
use serde_json::{Map, Value};

/// Column-name-to-value map for one row. Insertion order is column
/// declaration order.
pub type RowMapping = Map<String, Value>;

/// The parsed result of one INSERT batch.
#[derive(Debug, Serialize, PartialEq)]
pub struct Record {
    /// Table name from the `INSERT INTO` clause.
    pub endpoint: String,
    /// One mapping per value row, in source order.
    pub body: Vec<RowMapping>,
}

impl Record {
    /// Build a record by zipping `columns` with each row.
    ///
    /// Zipping truncates to the shorter side when a row's value count does
    /// not match the column count.
    pub fn from_rows(endpoint: String, columns: &[String], rows: Vec<Vec<String>>) -> Self {
        let body = rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(Value::String))
                    .collect()
            })
            .collect();

        Self { endpoint, body }
    }
}
