//! Core data types for the weight log
//!
//! - `Entry`: one recorded (date, weight) pair
//! - `CorruptPolicy`: what loading does with a slot it cannot parse

use serde::{Deserialize, Serialize};

/// A single recorded weigh-in
///
/// Entries are never edited after creation; the list only grows or is
/// cleared as a whole. The serialized shape is `{"date": "01/15", "weight": 70.5}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Month/day label the entry was recorded on
    pub date: String,
    /// Weight in the configured unit
    pub weight: f64,
}

impl Entry {
    pub fn new(date: impl Into<String>, weight: f64) -> Self {
        Self {
            date: date.into(),
            weight,
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.weight)
    }
}

/// Behaviour when the persisted slot holds something that is not an entry list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Surface a `StorageError::Corruption` and leave the slot untouched
    #[default]
    Fail,
    /// Log a warning and start from an empty list; the next save overwrites the slot
    Empty,
}

impl std::fmt::Display for CorruptPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptPolicy::Fail => write!(f, "fail"),
            CorruptPolicy::Empty => write!(f, "empty"),
        }
    }
}
