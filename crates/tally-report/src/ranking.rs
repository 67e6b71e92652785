//! Ranked lists: best-selling items and busiest hours.
//!
//! Both aggregators merge nested lines from many records by key, summing
//! their figures, and keep groups in order of first appearance before
//! sorting. Sorts are stable, so ties stay in first-appearance order.

use std::collections::HashMap;

use tracing::trace;

use crate::models::{Channel, ItemSale, PeakHour, PeakHourSummary, SalesRecord};
use crate::totals::{finite_or_zero, per_order};

/// Default length of ranked lists.
pub const DEFAULT_LIMIT: usize = 5;

/// Merge item lines by menu name, summing quantity and revenue.
///
/// Groups are returned in order of first appearance.
pub fn merge_items<'a>(items: impl IntoIterator<Item = &'a ItemSale>) -> Vec<ItemSale> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut merged: Vec<ItemSale> = Vec::new();

    for item in items {
        match index.get(item.menu_name.as_str()) {
            Some(&i) => {
                merged[i].quantity_sold += finite_or_zero(item.quantity_sold);
                merged[i].total_sales += finite_or_zero(item.total_sales);
            }
            None => {
                index.insert(&item.menu_name, merged.len());
                merged.push(ItemSale {
                    menu_name: item.menu_name.clone(),
                    quantity_sold: finite_or_zero(item.quantity_sold),
                    total_sales: finite_or_zero(item.total_sales),
                });
            }
        }
    }

    merged
}

/// Best-selling items across `records`, by quantity sold, at most `limit`.
pub fn top_items(records: &[&SalesRecord], limit: usize) -> Vec<ItemSale> {
    let mut items = merge_items(records.iter().flat_map(|r| r.top_selling_items.iter()));
    trace!(groups = items.len(), limit, "ranking menu items");

    items.sort_by(|a, b| b.quantity_sold.total_cmp(&a.quantity_sold));
    items.truncate(limit);
    items
}

/// Ordering for a list of merged hour buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeakOrder {
    /// Ascending by the leading hour number, for a full timeline
    Chronological,
    /// Descending by order count, for a "busiest hours" list
    #[default]
    Busiest,
}

/// Hour buckets merged by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakHourTable {
    rows: Vec<PeakHourSummary>,
}

impl PeakHourTable {
    /// Merge hour buckets by label. The average per order is derived from
    /// the merged sums, not from the individual buckets.
    pub fn from_hours<'a>(hours: impl IntoIterator<Item = &'a PeakHour>) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<PeakHourSummary> = Vec::new();

        for hour in hours {
            match index.get(hour.hour_range.as_str()) {
                Some(&i) => {
                    rows[i].order_count = rows[i].order_count.saturating_add(hour.order_count);
                    rows[i].total_sales += finite_or_zero(hour.total_sales);
                }
                None => {
                    index.insert(&hour.hour_range, rows.len());
                    rows.push(PeakHourSummary {
                        hour_range: hour.hour_range.clone(),
                        order_count: hour.order_count,
                        total_sales: finite_or_zero(hour.total_sales),
                        avg_per_order: 0.0,
                    });
                }
            }
        }

        for row in &mut rows {
            row.avg_per_order = per_order(row.total_sales, row.order_count);
        }

        Self { rows }
    }

    /// Merge the hour buckets that `records` contribute to `channel`.
    pub fn from_records(records: &[&SalesRecord], channel: Channel) -> Self {
        Self::from_hours(records.iter().flat_map(|r| r.peak_hours_for(channel).iter()))
    }

    /// Every bucket, earliest hour first. Labels without a leading hour
    /// number go last.
    pub fn chronological(&self) -> Vec<PeakHourSummary> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| hour_sort_key(&r.hour_range));
        rows
    }

    /// The `limit` buckets with the most orders.
    pub fn busiest(&self, limit: usize) -> Vec<PeakHourSummary> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.order_count.cmp(&a.order_count));
        rows.truncate(limit);
        rows
    }

    /// Buckets in the requested order. `limit` only applies to
    /// [`PeakOrder::Busiest`].
    pub fn ordered(&self, order: PeakOrder, limit: usize) -> Vec<PeakHourSummary> {
        match order {
            PeakOrder::Chronological => self.chronological(),
            PeakOrder::Busiest => self.busiest(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Merge and order the hour buckets of `records` for `channel`.
pub fn peak_hours(
    records: &[&SalesRecord],
    channel: Channel,
    order: PeakOrder,
    limit: usize,
) -> Vec<PeakHourSummary> {
    PeakHourTable::from_records(records, channel).ordered(order, limit)
}

/// Integer hour from the leading digits of a bucket label (`"09:00"` → 9).
pub fn leading_hour(label: &str) -> Option<u32> {
    let label = label.trim_start();
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse().ok()
}

fn hour_sort_key(label: &str) -> (bool, u32) {
    match leading_hour(label) {
        Some(hour) => (false, hour),
        None => (true, 0),
    }
}
