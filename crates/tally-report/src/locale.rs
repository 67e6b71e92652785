//! Month and weekday labels used by the rollup builders.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Weekday labels, Sunday first.
pub const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Immutable table of period labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    month_names: Vec<String>,
    weekday_names: Vec<String>,
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::new(
            ENGLISH_MONTHS.iter().map(|s| s.to_string()).collect(),
            ENGLISH_WEEKDAYS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl LocaleTable {
    /// Create a table from month names (January first) and weekday names
    /// (Sunday first).
    pub fn new(month_names: Vec<String>, weekday_names: Vec<String>) -> Self {
        Self {
            month_names,
            weekday_names,
        }
    }

    /// Label for a zero-based month. Falls back to the 1-based month number
    /// when the table has no entry.
    pub fn month_name(&self, month: u32) -> String {
        self.month_names
            .get(month as usize)
            .cloned()
            .unwrap_or_else(|| (month + 1).to_string())
    }

    /// Weekday label for a date. Falls back to the English name.
    pub fn weekday_name(&self, date: NaiveDate) -> String {
        let idx = date.weekday().num_days_from_sunday() as usize;
        self.weekday_names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| ENGLISH_WEEKDAYS[idx].to_string())
    }
}
