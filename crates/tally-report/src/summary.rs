//! Period summaries for the dashboard's headline cards.

use serde::{Deserialize, Serialize};

use crate::filter::DateFilter;
use crate::models::{CostBreakdown, CostRecord, DayRollup, MonthRollup, RollupFigures, SalesRecord};
use crate::totals::{per_order, sum_amounts, sum_orders};

/// A rollup for one labelled period.
pub trait Rollup {
    /// Display label of the period (date or month name).
    fn label(&self) -> &str;

    fn figures(&self) -> &RollupFigures;
}

impl Rollup for DayRollup {
    fn label(&self) -> &str {
        &self.date
    }

    fn figures(&self) -> &RollupFigures {
        &self.figures
    }
}

impl Rollup for MonthRollup {
    fn label(&self) -> &str {
        &self.month_name
    }

    fn figures(&self) -> &RollupFigures {
        &self.figures
    }
}

/// Totals across a set of rollups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub dine_in: f64,
    pub delivery: f64,
    pub total: f64,
    pub cost: f64,
    pub profit: f64,
    pub total_orders: i64,
    pub avg_per_order: f64,

    /// Profit as a percentage of sales, 0 without sales
    pub profit_margin: f64,

    /// Number of rollups summarised
    pub active_periods: usize,

    /// Label of the period with the highest sales
    pub best_period: Option<String>,
    pub best_period_total: f64,
}

impl PeriodSummary {
    /// Summarise `rollups`. On equal sales the earliest entry in the slice
    /// is reported as best.
    pub fn from_rollups<R: Rollup>(rollups: &[R]) -> Self {
        let mut summary = Self {
            active_periods: rollups.len(),
            ..Self::default()
        };

        for rollup in rollups {
            let f = rollup.figures();
            summary.dine_in += f.dine_in;
            summary.delivery += f.delivery;
            summary.cost += f.cost;
            summary.total_orders = summary.total_orders.saturating_add(f.total_orders);

            if summary.best_period.is_none() || f.total > summary.best_period_total {
                summary.best_period = Some(rollup.label().to_string());
                summary.best_period_total = f.total;
            }
        }

        summary.total = summary.dine_in + summary.delivery;
        summary.profit = summary.total - summary.cost;
        summary.avg_per_order = per_order(summary.total, summary.total_orders);
        summary.profit_margin = if summary.total > 0.0 {
            summary.profit / summary.total * 100.0
        } else {
            0.0
        };
        summary
    }
}

/// Whole-year totals straight from the source records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotals {
    pub year: i32,
    pub dine_in: f64,
    pub delivery: f64,
    pub total: f64,
    pub cost: f64,
    pub profit: f64,
    pub dine_in_orders: i64,
    pub delivery_orders: i64,
    pub cost_breakdown: CostBreakdown,
}

impl YearlyTotals {
    pub fn compute(
        dine_in: &[SalesRecord],
        delivery: &[SalesRecord],
        cost: &[CostRecord],
        year: i32,
    ) -> Self {
        let dine_in = DateFilter::dated(dine_in).by_year(year);
        let delivery = DateFilter::dated(delivery).by_year(year);
        let cost = DateFilter::dated(cost).by_year(year);

        let dine_in_total = sum_amounts(&dine_in);
        let delivery_total = sum_amounts(&delivery);
        let cost_total = sum_amounts(&cost);
        let total = dine_in_total + delivery_total;

        Self {
            year,
            dine_in: dine_in_total,
            delivery: delivery_total,
            total,
            cost: cost_total,
            profit: total - cost_total,
            dine_in_orders: sum_orders(&dine_in),
            delivery_orders: sum_orders(&delivery),
            cost_breakdown: CostBreakdown::from_records(&cost),
        }
    }
}
