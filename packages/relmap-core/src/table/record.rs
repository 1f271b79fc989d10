//! Stored record.

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// One stored row: the row id plus one value per column in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(id: u64, values: Vec<Value>) -> Self {
        Self { id, values }
    }

    /// Value at the given column index.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}
