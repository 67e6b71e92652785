//! # tally-report
//!
//! Aggregation engine behind the Tally back-office dashboard.
//!
//! This crate provides:
//! - [`RecordParser`] - Normalise raw JSON sales/cost arrays into canonical records
//! - [`DateFilter`] - Partition records by exact date, month or year
//! - [`top_items`] / [`PeakHourTable`] - Ranked best sellers and busiest hours
//! - [`DailyRollupBuilder`] / [`MonthlyRollupBuilder`] - Per-day and per-month summaries
//! - [`PeriodSummary`] / [`YearlyTotals`] - Headline figures
//!
//! Everything after ingestion is a pure function over borrowed slices. Inputs
//! are never mutated, nothing is cached, and identical inputs always give
//! identical output. Callers that share input slices across threads must not
//! mutate them while a build is running.
//!
//! ## Example
//!
//! ```no_run
//! use tally_report::{DailyRollupBuilder, RecordParser};
//!
//! fn main() -> tally_report::Result<()> {
//!     let parser = RecordParser::new();
//!     let dine_in = parser.parse_sales_file("dine-in.json")?;
//!     let delivery = parser.parse_sales_file("delivery.json")?;
//!     let costs = parser.parse_costs_file("costs.json")?;
//!
//!     // March 2025 (months are zero-based)
//!     let days = DailyRollupBuilder::new(&dine_in, &delivery, &costs).build(2, 2025);
//!     for day in &days {
//!         println!("{} {}: profit {}", day.date, day.day, day.figures.profit);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod filter;
pub mod ingest;
pub mod locale;
pub mod models;
pub mod ranking;
pub mod rollup;
pub mod summary;
pub mod totals;

// Re-export main types
pub use error::{ReportError, Result};
pub use filter::{DateFilter, Dated, parse_calendar_date};
pub use ingest::RecordParser;
pub use locale::LocaleTable;
pub use models::{
    Channel, CostBreakdown, CostRecord, DayRollup, ItemSale, MonthRollup, PeakHour,
    PeakHourSummary, RollupFigures, SalesRecord,
};
pub use ranking::{PeakHourTable, PeakOrder, peak_hours, top_items};
pub use rollup::{DailyRollupBuilder, MonthlyRollupBuilder, RollupOptions, days_in_month};
pub use summary::{PeriodSummary, Rollup, YearlyTotals};
pub use totals::{Amount, per_order, sum_amounts, sum_by, sum_orders};
