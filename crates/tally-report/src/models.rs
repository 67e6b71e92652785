//! Data models for sales, costs and the rollups derived from them.
//!
//! Source records ([`SalesRecord`], [`CostRecord`]) are the canonical shape
//! produced by [`RecordParser`](crate::ingest::RecordParser). Everything
//! else in this module is a derived value object: built fresh per query and
//! never written back into the source collections.

use serde::{Deserialize, Serialize};

/// Sales channel a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Orders served in the restaurant
    DineIn,
    /// Orders delivered through a delivery platform
    Delivery,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DineIn => write!(f, "dine-in"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// One menu item line inside a sales record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSale {
    /// Menu item name (grouping key)
    pub menu_name: String,

    /// Units sold, possibly fractional (weighed or portioned items)
    pub quantity_sold: f64,

    /// Revenue from this item
    pub total_sales: f64,
}

impl ItemSale {
    pub fn new(menu_name: impl Into<String>, quantity_sold: f64, total_sales: f64) -> Self {
        Self {
            menu_name: menu_name.into(),
            quantity_sold,
            total_sales,
        }
    }
}

/// Orders and revenue for one hour bucket, as reported by a source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHour {
    /// Bucket label such as `"14:00"` or `"14:00-15:00"`
    pub hour_range: String,

    /// Orders placed in the bucket
    pub order_count: i64,

    /// Revenue in the bucket
    pub total_sales: f64,
}

impl PeakHour {
    pub fn new(hour_range: impl Into<String>, order_count: i64, total_sales: f64) -> Self {
        Self {
            hour_range: hour_range.into(),
            order_count,
            total_sales,
        }
    }
}

/// Merged hour bucket with the derived average per order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourSummary {
    pub hour_range: String,
    pub order_count: i64,
    pub total_sales: f64,
    pub avg_per_order: f64,
}

/// Dine-in or delivery sales for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Raw date value as received (usually `YYYY-MM-DD`)
    pub sale_date: String,

    /// Revenue for the day
    pub total_amount: f64,

    /// Number of orders for the day
    pub orders: i64,

    /// Items sold that day
    pub top_selling_items: Vec<ItemSale>,

    /// Hour buckets not tied to a channel
    pub peak_hours: Vec<PeakHour>,

    /// Hour buckets for dine-in orders only
    pub dine_in_peak_hours: Vec<PeakHour>,

    /// Hour buckets for delivery orders only
    pub delivery_peak_hours: Vec<PeakHour>,
}

impl SalesRecord {
    /// Create a record with the required fields.
    pub fn new(sale_date: impl Into<String>, total_amount: f64, orders: i64) -> Self {
        Self {
            sale_date: sale_date.into(),
            total_amount,
            orders,
            ..Self::default()
        }
    }

    /// Set the item lines.
    pub fn with_items(mut self, items: Vec<ItemSale>) -> Self {
        self.top_selling_items = items;
        self
    }

    /// Set the channel-independent hour buckets.
    pub fn with_peak_hours(mut self, hours: Vec<PeakHour>) -> Self {
        self.peak_hours = hours;
        self
    }

    /// Set the hour buckets for one channel.
    pub fn with_channel_peak_hours(mut self, channel: Channel, hours: Vec<PeakHour>) -> Self {
        match channel {
            Channel::DineIn => self.dine_in_peak_hours = hours,
            Channel::Delivery => self.delivery_peak_hours = hours,
        }
        self
    }

    /// Hour buckets this record contributes to `channel`.
    ///
    /// The channel-specific list wins when it is non-empty; otherwise the
    /// generic `peak_hours` list is used.
    pub fn peak_hours_for(&self, channel: Channel) -> &[PeakHour] {
        let specific = match channel {
            Channel::DineIn => &self.dine_in_peak_hours,
            Channel::Delivery => &self.delivery_peak_hours,
        };
        if specific.is_empty() {
            &self.peak_hours
        } else {
            specific
        }
    }
}

/// Operating costs for one calendar day.
///
/// The five sub-categories are informational. Their sum is never checked
/// against `total_amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    /// Raw date value as received (usually `YYYY-MM-DD`)
    pub cost_date: String,

    /// Total cost for the day
    pub total_amount: f64,

    pub total_raw_material_cost: f64,
    pub total_staff_cost: f64,
    pub total_owner_cost: f64,
    pub total_utility_cost: f64,
    pub total_other_cost: f64,
}

impl CostRecord {
    /// Create a record with a total and no sub-category breakdown.
    pub fn new(cost_date: impl Into<String>, total_amount: f64) -> Self {
        Self {
            cost_date: cost_date.into(),
            total_amount,
            ..Self::default()
        }
    }

    /// Set the sub-category costs: raw material, staff, owner, utility, other.
    pub fn with_breakdown(
        mut self,
        raw_material: f64,
        staff: f64,
        owner: f64,
        utility: f64,
        other: f64,
    ) -> Self {
        self.total_raw_material_cost = raw_material;
        self.total_staff_cost = staff;
        self.total_owner_cost = owner;
        self.total_utility_cost = utility;
        self.total_other_cost = other;
        self
    }
}

/// Figures shared by day and month rollups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupFigures {
    pub dine_in: f64,
    pub delivery: f64,
    pub total: f64,
    pub cost: f64,
    pub profit: f64,

    pub dine_in_orders: i64,
    pub delivery_orders: i64,
    pub total_orders: i64,

    pub dine_in_avg_per_order: f64,
    pub delivery_avg_per_order: f64,
    pub total_avg_per_order: f64,

    /// Best sellers from dine-in records
    pub top_items: Vec<ItemSale>,

    /// Best sellers from delivery records
    pub top_delivery_items: Vec<ItemSale>,

    /// Busiest hours over both channels
    pub peak_hours: Vec<PeakHourSummary>,
    pub dine_in_peak_hours: Vec<PeakHourSummary>,
    pub delivery_peak_hours: Vec<PeakHourSummary>,
}

impl RollupFigures {
    /// A period counts as active when it sold something or cost something.
    pub fn has_activity(&self) -> bool {
        self.total > 0.0 || self.cost > 0.0
    }
}

/// Summary of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRollup {
    /// Canonical `YYYY-MM-DD` date
    pub date: String,

    /// Weekday label from the locale table
    pub day: String,

    #[serde(flatten)]
    pub figures: RollupFigures,
}

/// Summary of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRollup {
    /// Zero-based month index (0 = January)
    pub month: u32,

    /// Month label from the locale table
    pub month_name: String,

    #[serde(flatten)]
    pub figures: RollupFigures,
}

/// Cost totals per sub-category over a set of cost records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub total_raw_material: f64,
    pub total_staff: f64,
    pub total_owner: f64,
    pub total_utility: f64,
    pub total_other: f64,
}

impl CostBreakdown {
    /// Sum of the five sub-categories.
    pub fn sum(&self) -> f64 {
        self.total_raw_material
            + self.total_staff
            + self.total_owner
            + self.total_utility
            + self.total_other
    }

    /// Each sub-category as a percentage of [`CostBreakdown::sum`].
    ///
    /// All zeros when the breakdown is empty.
    pub fn share_of(&self) -> CostBreakdown {
        let sum = self.sum();
        if sum <= 0.0 {
            return CostBreakdown::default();
        }
        let pct = |v: f64| v / sum * 100.0;
        CostBreakdown {
            total_raw_material: pct(self.total_raw_material),
            total_staff: pct(self.total_staff),
            total_owner: pct(self.total_owner),
            total_utility: pct(self.total_utility),
            total_other: pct(self.total_other),
        }
    }
}
