//! Date source and date labels
//!
//! Entries carry a month/day label rather than a timestamp. The clock and the
//! label format are injected so tests can pin the date.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use thiserror::Error;

/// Default label: two-digit month and day, e.g. `01/15`
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d";

/// Source of "today"
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("Date format is empty")]
    Empty,

    #[error("Invalid date format {0:?}")]
    Invalid(String),
}

/// Validated strftime pattern for entry labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self, DateFormatError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(DateFormatError::Empty);
        }
        // chrono panics when displaying an invalid pattern, so reject it here
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(DateFormatError::Invalid(pattern));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn label(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
