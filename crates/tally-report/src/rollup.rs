//! Daily and monthly rollups over dine-in, delivery and cost records.
//!
//! Both builders share [`compute_figures`]; they only differ in how they
//! slice the source collections. Monthly figures are computed straight
//! from the month's records, never by adding up daily rollups, so monthly
//! rankings can differ from a sum over the same days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{DateFilter, canonical_date};
use crate::locale::LocaleTable;
use crate::models::{Channel, CostRecord, DayRollup, MonthRollup, RollupFigures, SalesRecord};
use crate::ranking::{DEFAULT_LIMIT, PeakHourTable, top_items};
use crate::totals::{per_order, sum_amounts, sum_orders};

/// Limits applied to the ranked lists inside a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupOptions {
    /// Maximum entries in `topItems` / `topDeliveryItems`
    pub top_items_limit: usize,

    /// Maximum entries in each peak-hour list
    pub peak_hours_limit: usize,
}

impl Default for RollupOptions {
    fn default() -> Self {
        Self {
            top_items_limit: DEFAULT_LIMIT,
            peak_hours_limit: DEFAULT_LIMIT,
        }
    }
}

impl RollupOptions {
    pub fn with_top_items_limit(mut self, limit: usize) -> Self {
        self.top_items_limit = limit;
        self
    }

    pub fn with_peak_hours_limit(mut self, limit: usize) -> Self {
        self.peak_hours_limit = limit;
        self
    }
}

/// Compute the figures for one period from its already-filtered records.
pub fn compute_figures(
    dine_in: &[&SalesRecord],
    delivery: &[&SalesRecord],
    cost: &[&CostRecord],
    options: &RollupOptions,
) -> RollupFigures {
    let dine_in_total = sum_amounts(dine_in);
    let delivery_total = sum_amounts(delivery);
    let cost_total = sum_amounts(cost);
    let total = dine_in_total + delivery_total;

    let dine_in_orders = sum_orders(dine_in);
    let delivery_orders = sum_orders(delivery);
    let total_orders = dine_in_orders.saturating_add(delivery_orders);

    let combined = PeakHourTable::from_hours(
        dine_in
            .iter()
            .flat_map(|r| r.peak_hours_for(Channel::DineIn).iter())
            .chain(
                delivery
                    .iter()
                    .flat_map(|r| r.peak_hours_for(Channel::Delivery).iter()),
            ),
    );
    let limit = options.peak_hours_limit;

    RollupFigures {
        dine_in: dine_in_total,
        delivery: delivery_total,
        total,
        cost: cost_total,
        profit: total - cost_total,
        dine_in_orders,
        delivery_orders,
        total_orders,
        dine_in_avg_per_order: per_order(dine_in_total, dine_in_orders),
        delivery_avg_per_order: per_order(delivery_total, delivery_orders),
        total_avg_per_order: per_order(total, total_orders),
        top_items: top_items(dine_in, options.top_items_limit),
        top_delivery_items: top_items(delivery, options.top_items_limit),
        peak_hours: combined.busiest(limit),
        dine_in_peak_hours: PeakHourTable::from_records(dine_in, Channel::DineIn).busiest(limit),
        delivery_peak_hours: PeakHourTable::from_records(delivery, Channel::Delivery)
            .busiest(limit),
    }
}

/// Number of days in a zero-based `month` of `year`, or 0 when the month
/// does not exist.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month > 11 {
        return 0;
    }
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month + 1, day).is_some())
        .unwrap_or(0)
}

/// Builds one [`DayRollup`] per active day of a month.
pub struct DailyRollupBuilder<'a> {
    dine_in: DateFilter<'a, SalesRecord>,
    delivery: DateFilter<'a, SalesRecord>,
    cost: DateFilter<'a, CostRecord>,
    options: RollupOptions,
    locale: LocaleTable,
}

impl<'a> DailyRollupBuilder<'a> {
    pub fn new(
        dine_in: &'a [SalesRecord],
        delivery: &'a [SalesRecord],
        cost: &'a [CostRecord],
    ) -> Self {
        Self {
            dine_in: DateFilter::dated(dine_in),
            delivery: DateFilter::dated(delivery),
            cost: DateFilter::dated(cost),
            options: RollupOptions::default(),
            locale: LocaleTable::default(),
        }
    }

    pub fn with_options(mut self, options: RollupOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_locale(mut self, locale: LocaleTable) -> Self {
        self.locale = locale;
        self
    }

    /// Rollups for every active day of zero-based `month` in `year`, most
    /// recent day first. Days without sales or cost are left out.
    pub fn build(&self, month: u32, year: i32) -> Vec<DayRollup> {
        let days = days_in_month(year, month);
        let mut rollups = Vec::new();

        for day in 1..=days {
            let Some(date) = NaiveDate::from_ymd_opt(year, month + 1, day) else {
                continue;
            };
            let key = canonical_date(date);

            let figures = compute_figures(
                &self.dine_in.by_date(&key),
                &self.delivery.by_date(&key),
                &self.cost.by_date(&key),
                &self.options,
            );
            if !figures.has_activity() {
                continue;
            }

            rollups.push(DayRollup {
                day: self.locale.weekday_name(date),
                date: key,
                figures,
            });
        }

        rollups.reverse();
        debug!(month, year, days, active = rollups.len(), "built daily rollups");
        rollups
    }
}

/// Builds one [`MonthRollup`] per active month of a year.
pub struct MonthlyRollupBuilder<'a> {
    dine_in: DateFilter<'a, SalesRecord>,
    delivery: DateFilter<'a, SalesRecord>,
    cost: DateFilter<'a, CostRecord>,
    options: RollupOptions,
    locale: LocaleTable,
}

impl<'a> MonthlyRollupBuilder<'a> {
    pub fn new(
        dine_in: &'a [SalesRecord],
        delivery: &'a [SalesRecord],
        cost: &'a [CostRecord],
    ) -> Self {
        Self {
            dine_in: DateFilter::dated(dine_in),
            delivery: DateFilter::dated(delivery),
            cost: DateFilter::dated(cost),
            options: RollupOptions::default(),
            locale: LocaleTable::default(),
        }
    }

    pub fn with_options(mut self, options: RollupOptions) -> Self {
        self.options = options;
        self
    }

    /// Month labels come from this table.
    pub fn with_locale(mut self, locale: LocaleTable) -> Self {
        self.locale = locale;
        self
    }

    /// Rollups for every active month of `year`, December first. Months
    /// without sales or cost are left out.
    pub fn build(&self, year: i32) -> Vec<MonthRollup> {
        let mut rollups: Vec<MonthRollup> = (0..12)
            .filter_map(|month| {
                let figures = compute_figures(
                    &self.dine_in.by_month(month, year),
                    &self.delivery.by_month(month, year),
                    &self.cost.by_month(month, year),
                    &self.options,
                );
                figures.has_activity().then(|| MonthRollup {
                    month,
                    month_name: self.locale.month_name(month),
                    figures,
                })
            })
            .collect();

        rollups.reverse();
        debug!(year, active = rollups.len(), "built monthly rollups");
        rollups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemSale, PeakHour};

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2025, 2), 31);
        assert_eq!(days_in_month(2025, 3), 30);
        assert_eq!(days_in_month(2025, 11), 31);
        assert_eq!(days_in_month(2025, 12), 0);
        assert_eq!(days_in_month(2025, u32::MAX), 0);
    }

    #[test]
    fn test_single_day_scenario() {
        let dine_in = vec![SalesRecord::new("2025-03-01", 1000.0, 10)];
        let delivery = vec![SalesRecord::new("2025-03-01", 500.0, 5)];
        let cost = vec![CostRecord::new("2025-03-01", 300.0)];

        let rollups = DailyRollupBuilder::new(&dine_in, &delivery, &cost).build(2, 2025);

        assert_eq!(rollups.len(), 1);
        let day = &rollups[0];
        assert_eq!(day.date, "2025-03-01");
        assert_eq!(day.day, "Saturday");
        assert_eq!(day.figures.total, 1500.0);
        assert_eq!(day.figures.cost, 300.0);
        assert_eq!(day.figures.profit, 1200.0);
        assert_eq!(day.figures.total_orders, 15);
        assert_eq!(day.figures.total_avg_per_order, 100.0);
        assert_eq!(day.figures.dine_in_avg_per_order, 100.0);
        assert_eq!(day.figures.delivery_avg_per_order, 100.0);
    }

    #[test]
    fn test_cost_only_day_is_emitted() {
        let cost = vec![CostRecord::new("2025-03-05", 80.0)];

        let rollups = DailyRollupBuilder::new(&[], &[], &cost).build(2, 2025);

        assert_eq!(rollups.len(), 1);
        assert_eq!(rollups[0].figures.profit, -80.0);
        assert_eq!(rollups[0].figures.total_avg_per_order, 0.0);
    }

    #[test]
    fn test_zero_activity_days_are_omitted() {
        let dine_in = vec![
            SalesRecord::new("2025-03-02", 0.0, 0),
            SalesRecord::new("2025-03-03", 10.0, 1),
        ];
        let cost = vec![CostRecord::new("2025-03-02", 0.0)];

        let rollups = DailyRollupBuilder::new(&dine_in, &[], &cost).build(2, 2025);

        let dates: Vec<_> = rollups.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025-03-03"]);
    }

    #[test]
    fn test_daily_sorted_most_recent_first() {
        let dine_in = vec![
            SalesRecord::new("2025-02-01", 1.0, 1),
            SalesRecord::new("2025-02-28", 1.0, 1),
            SalesRecord::new("2025-02-14", 1.0, 1),
        ];

        let rollups = DailyRollupBuilder::new(&dine_in, &[], &[]).build(1, 2025);

        let dates: Vec<_> = rollups.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025-02-28", "2025-02-14", "2025-02-01"]);
    }

    #[test]
    fn test_invalid_month_yields_nothing() {
        let dine_in = vec![SalesRecord::new("2025-03-01", 1.0, 1)];

        assert!(DailyRollupBuilder::new(&dine_in, &[], &[]).build(12, 2025).is_empty());
    }

    #[test]
    fn test_daily_peak_hours_per_channel() {
        let dine_in = vec![SalesRecord::new("2025-03-01", 300.0, 3).with_peak_hours(vec![
            PeakHour::new("12:00", 2, 200.0),
            PeakHour::new("18:00", 1, 100.0),
        ])];
        let delivery = vec![SalesRecord::new("2025-03-01", 400.0, 4)
            .with_peak_hours(vec![PeakHour::new("18:00", 4, 400.0)])];

        let rollups = DailyRollupBuilder::new(&dine_in, &delivery, &[]).build(2, 2025);
        let figures = &rollups[0].figures;

        assert_eq!(figures.peak_hours[0].hour_range, "18:00");
        assert_eq!(figures.peak_hours[0].order_count, 5);
        assert_eq!(figures.peak_hours[0].avg_per_order, 100.0);
        assert_eq!(figures.dine_in_peak_hours[0].hour_range, "12:00");
        assert_eq!(figures.delivery_peak_hours.len(), 1);
    }

    #[test]
    fn test_options_limit_ranked_lists() {
        let items = (1..=4).map(|i| ItemSale::new(format!("m{i}"), i as f64, 1.0)).collect();
        let dine_in = vec![SalesRecord::new("2025-03-01", 10.0, 1).with_items(items)];
        let options = RollupOptions::default().with_top_items_limit(2);

        let rollups = DailyRollupBuilder::new(&dine_in, &[], &[])
            .with_options(options)
            .build(2, 2025);

        assert_eq!(rollups[0].figures.top_items.len(), 2);
        assert_eq!(rollups[0].figures.top_items[0].menu_name, "m4");
        assert!(rollups[0].figures.top_delivery_items.is_empty());
    }

    #[test]
    fn test_monthly_rollups() {
        let dine_in = vec![
            SalesRecord::new("2025-01-10", 100.0, 2),
            SalesRecord::new("2025-01-20", 300.0, 2),
            SalesRecord::new("2025-06-01", 50.0, 1),
            SalesRecord::new("2024-06-01", 999.0, 1),
        ];
        let cost = vec![CostRecord::new("2025-03-31", 40.0)];

        let rollups = MonthlyRollupBuilder::new(&dine_in, &[], &cost).build(2025);

        let months: Vec<_> = rollups.iter().map(|r| r.month).collect();
        assert_eq!(months, [5, 2, 0]);
        assert_eq!(rollups[2].month_name, "January");
        assert_eq!(rollups[2].figures.total, 400.0);
        assert_eq!(rollups[2].figures.total_avg_per_order, 100.0);
        assert_eq!(rollups[1].figures.profit, -40.0);
    }

    #[test]
    fn test_monthly_uses_locale_labels() {
        let dine_in = vec![SalesRecord::new("2025-01-10", 100.0, 2)];
        let mut months: Vec<String> = (1..=12).map(|m| format!("M{m}")).collect();
        months[0] = "Janvier".to_string();
        let locale = LocaleTable::new(months, vec![]);

        let rollups = MonthlyRollupBuilder::new(&dine_in, &[], &[])
            .with_locale(locale)
            .build(2025);

        assert_eq!(rollups[0].month_name, "Janvier");
    }
}
