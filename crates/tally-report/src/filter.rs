//! Date-based partitioning of record collections.
//!
//! Date fields are stored verbatim. Month and year queries parse them;
//! exact-date queries compare the raw string. A value that does not parse
//! is silently left out of month/year queries.

use chrono::{Datelike, NaiveDate};

use crate::models::{CostRecord, SalesRecord};

/// Records that carry a date field.
pub trait Dated {
    /// Raw value of the record's date field.
    fn date_key(&self) -> &str;
}

impl Dated for SalesRecord {
    fn date_key(&self) -> &str {
        &self.sale_date
    }
}

impl Dated for CostRecord {
    fn date_key(&self) -> &str {
        &self.cost_date
    }
}

/// Parse a stored date value as a timezone-naive calendar date.
///
/// Only the first ten characters are considered, so both `2025-03-01` and
/// `2025-03-01T23:30:00Z` resolve to 1 March 2025.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let head = value.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Canonical `YYYY-MM-DD` string for a date.
pub fn canonical_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Read-only date queries over a borrowed collection.
pub struct DateFilter<'a, T> {
    records: &'a [T],
    key: fn(&T) -> &str,
}

impl<'a, T: Dated> DateFilter<'a, T> {
    /// Filter keyed by the record type's own date field.
    pub fn dated(records: &'a [T]) -> Self {
        Self::new(records, T::date_key)
    }
}

impl<'a, T> DateFilter<'a, T> {
    /// Filter keyed by an arbitrary date accessor.
    pub fn new(records: &'a [T], key: fn(&T) -> &str) -> Self {
        Self { records, key }
    }

    /// Records whose date falls in `month` (zero-based) of `year`.
    pub fn by_month(&self, month: u32, year: i32) -> Vec<&'a T> {
        self.matching(|date| date.month0() == month && date.year() == year)
    }

    /// Records whose date falls in `year`.
    pub fn by_year(&self, year: i32) -> Vec<&'a T> {
        self.matching(|date| date.year() == year)
    }

    /// Records whose raw date value equals `date` exactly.
    pub fn by_date(&self, date: &str) -> Vec<&'a T> {
        let key = self.key;
        self.records.iter().filter(|r| key(*r) == date).collect()
    }

    /// Number of records in the underlying collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, pred: impl Fn(NaiveDate) -> bool) -> Vec<&'a T> {
        let key = self.key;
        self.records
            .iter()
            .filter(|r| parse_calendar_date(key(*r)).is_some_and(&pred))
            .collect()
    }
}
