//! Integration tests for tally-report: raw JSON in, rollups out.

use serde_json::json;
use tally_report::{
    Channel, CostBreakdown, DailyRollupBuilder, DateFilter, ItemSale, MonthlyRollupBuilder,
    PeakHourTable, PeakOrder, PeriodSummary, RecordParser, RollupOptions, SalesRecord, top_items,
};
use tempfile::tempdir;

const DINE_IN_JSON: &str = r#"[
  {"saleDate": "2025-03-01", "totalAmount": 1000, "orders": 10,
   "topSellingItems": [{"menuName": "Fried Rice", "quantitySold": 3, "totalSales": 150}],
   "peakHours": [{"hourRange": "09:00", "orderCount": 2, "totalSales": 200},
                 {"hourRange": "14:00", "orderCount": 5, "totalSales": 1000}]},
  {"saleDate": "2025-03-01", "totalAmount": 0,
   "TopSellingItems": [{"MenuName": "Fried Rice", "QuantitySold": 3, "TotalSales": 150}]},
  {"saleDate": "2025-03-15", "totalAmount": 640, "orders": 8,
   "topSellingItems": [{"menuName": "Pad Thai", "quantitySold": 5, "totalSales": 400}]},
  {"saleDate": "2025-04-02", "totalAmount": 90, "orders": 1},
  {"saleDate": "sometime", "totalAmount": 5000, "orders": 50}
]"#;

const DELIVERY_JSON: &str = r#"[
  {"saleDate": "2025-03-01", "totalAmount": 500, "orders": 5,
   "deliveryPeakHours": [{"hourRange": "14:00", "orderCount": 3, "totalSales": 500}]}
]"#;

const COST_JSON: &str = r#"[
  {"costDate": "2025-03-01", "totalAmount": 300,
   "totalRawMaterialCost": 200, "totalStaffCost": 150},
  {"costDate": "2025-03-20", "totalAmount": 0}
]"#;

fn load() -> (Vec<SalesRecord>, Vec<SalesRecord>, Vec<tally_report::CostRecord>) {
    tally_core::init_test_logging();
    let parser = RecordParser::new();
    (
        parser.parse_sales_str(DINE_IN_JSON).unwrap(),
        parser.parse_sales_str(DELIVERY_JSON).unwrap(),
        parser.parse_costs_str(COST_JSON).unwrap(),
    )
}

#[test]
fn test_march_daily_rollups() {
    let (dine_in, delivery, cost) = load();

    let days = DailyRollupBuilder::new(&dine_in, &delivery, &cost).build(2, 2025);

    let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, ["2025-03-15", "2025-03-01"]);

    let first = &days[1].figures;
    assert_eq!(first.total, 1500.0);
    assert_eq!(first.cost, 300.0);
    assert_eq!(first.profit, 1200.0);
    assert_eq!(first.total_orders, 15);
    assert_eq!(first.total_avg_per_order, 100.0);

    // Both casings of the same item merged additively.
    assert_eq!(first.top_items, vec![ItemSale::new("Fried Rice", 6.0, 300.0)]);
    assert!(first.top_delivery_items.is_empty());

    // 14:00 gets 5 dine-in + 3 delivery orders.
    assert_eq!(first.peak_hours[0].hour_range, "14:00");
    assert_eq!(first.peak_hours[0].order_count, 8);
    assert_eq!(first.delivery_peak_hours[0].order_count, 3);
    assert_eq!(first.dine_in_peak_hours.len(), 2);
}

#[test]
fn test_zero_activity_day_is_absent() {
    let (dine_in, delivery, cost) = load();

    let days = DailyRollupBuilder::new(&dine_in, &delivery, &cost).build(2, 2025);

    assert!(days.iter().all(|d| d.date != "2025-03-20"));
    assert!(days.iter().all(|d| d.figures.total > 0.0 || d.figures.cost > 0.0));
}

#[test]
fn test_builders_are_idempotent() {
    let (dine_in, delivery, cost) = load();
    let daily = DailyRollupBuilder::new(&dine_in, &delivery, &cost);
    let monthly = MonthlyRollupBuilder::new(&dine_in, &delivery, &cost);

    assert_eq!(daily.build(2, 2025), daily.build(2, 2025));
    assert_eq!(monthly.build(2025), monthly.build(2025));
}

#[test]
fn test_average_invariant_holds_for_every_rollup() {
    let (dine_in, delivery, cost) = load();

    let days = DailyRollupBuilder::new(&dine_in, &delivery, &cost).build(2, 2025);
    let months = MonthlyRollupBuilder::new(&dine_in, &delivery, &cost).build(2025);

    for f in days.iter().map(|d| &d.figures).chain(months.iter().map(|m| &m.figures)) {
        let expected = if f.total_orders > 0 {
            f.total / f.total_orders as f64
        } else {
            0.0
        };
        assert!((f.total_avg_per_order - expected).abs() < 1e-9);
        assert_eq!(f.profit, f.total - f.cost);
    }
}

#[test]
fn test_monthly_rollups_are_independent_of_days() {
    let (dine_in, delivery, cost) = load();

    let months = MonthlyRollupBuilder::new(&dine_in, &delivery, &cost).build(2025);

    let labels: Vec<_> = months.iter().map(|m| m.month_name.as_str()).collect();
    assert_eq!(labels, ["April", "March"]);

    let march = &months[1].figures;
    assert_eq!(march.total, 2140.0);
    assert_eq!(march.total_orders, 23);
    assert_eq!(march.top_items[0], ItemSale::new("Fried Rice", 6.0, 300.0));
    assert_eq!(march.top_items[1], ItemSale::new("Pad Thai", 5.0, 400.0));
}

#[test]
fn test_unparsable_dates_never_reach_month_queries() {
    let (dine_in, _, _) = load();
    let filter = DateFilter::dated(&dine_in);

    assert_eq!(filter.by_year(2025).len(), 4);
    assert_eq!(filter.by_date("sometime").len(), 1);
}

#[test]
fn test_truncation_keeps_top_by_quantity() {
    let items: Vec<ItemSale> = [4.0, 9.0, 1.0, 7.0, 3.0, 8.0, 2.0]
        .iter()
        .map(|&q| ItemSale::new(format!("q{q}"), q, 0.0))
        .collect();
    let record = SalesRecord::new("2025-03-01", 0.0, 0).with_items(items);

    let top = top_items(&[&record], 5);

    let quantities: Vec<_> = top.iter().map(|i| i.quantity_sold).collect();
    assert_eq!(quantities, [9.0, 8.0, 7.0, 4.0, 3.0]);
}

#[test]
fn test_peak_hour_views_share_grouping() {
    let (dine_in, _, _) = load();
    let march_first = DateFilter::dated(&dine_in).by_date("2025-03-01");
    let table = PeakHourTable::from_records(&march_first, Channel::DineIn);

    let busiest: Vec<_> = table
        .ordered(PeakOrder::Busiest, 5)
        .into_iter()
        .map(|h| h.hour_range)
        .collect();
    let timeline: Vec<_> = table
        .ordered(PeakOrder::Chronological, 5)
        .into_iter()
        .map(|h| h.hour_range)
        .collect();

    assert_eq!(busiest, ["14:00", "09:00"]);
    assert_eq!(timeline, ["09:00", "14:00"]);
}

#[test]
fn test_cost_breakdown_for_month() {
    let (_, _, cost) = load();
    let march = DateFilter::dated(&cost).by_month(2, 2025);

    let breakdown = CostBreakdown::from_records(&march);

    assert_eq!(breakdown.total_raw_material, 200.0);
    assert_eq!(breakdown.total_staff, 150.0);
    // Sub-categories exceed the recorded total; reported as-is.
    assert_eq!(breakdown.sum(), 350.0);
}

#[test]
fn test_parse_files_from_disk() {
    let dir = tempdir().unwrap();
    let sales_path = dir.path().join("dine-in.json");
    let cost_path = dir.path().join("costs.json");
    std::fs::write(&sales_path, DINE_IN_JSON).unwrap();
    std::fs::write(&cost_path, COST_JSON).unwrap();

    let parser = RecordParser::new();
    let sales = parser.parse_sales_file(&sales_path).unwrap();
    let costs = parser.parse_costs_file(&cost_path).unwrap();

    assert_eq!(sales.len(), 5);
    assert_eq!(costs.len(), 2);

    let missing = parser.parse_sales_file(dir.path().join("nope.json")).unwrap_err();
    assert!(missing.friendly_message().starts_with("File not found"));
}

#[test]
fn test_rollups_serialize_in_dashboard_shape() {
    let parser = RecordParser::new();
    let raw = vec![json!({"saleDate": "2025-03-01", "totalAmount": 120, "orders": 3})];
    let dine_in = parser.parse_sales(&raw);

    let days = DailyRollupBuilder::new(&dine_in, &[], &[])
        .with_options(RollupOptions::default().with_peak_hours_limit(3))
        .build(2, 2025);
    let value = serde_json::to_value(&days).unwrap();

    assert_eq!(value[0]["date"], "2025-03-01");
    assert_eq!(value[0]["day"], "Saturday");
    assert_eq!(value[0]["dineInOrders"], 3);
    assert_eq!(value[0]["dineInAvgPerOrder"], 40.0);
    assert!(value[0]["deliveryPeakHours"].as_array().unwrap().is_empty());
}

#[test]
fn test_out_of_range_order_counts_saturate() {
    let parser = RecordParser::new();
    let raw = vec![
        json!({"saleDate": "2025-03-01", "totalAmount": 10, "orders": 1e300}),
        json!({"saleDate": "2025-03-01", "totalAmount": 10, "orders": 1e300}),
    ];
    let dine_in = parser.parse_sales(&raw);
    let delivery = parser.parse_sales(&raw);

    let days = DailyRollupBuilder::new(&dine_in, &delivery, &[]).build(2, 2025);
    let months = MonthlyRollupBuilder::new(&dine_in, &delivery, &[]).build(2025);
    let summary = PeriodSummary::from_rollups(&[months[0].clone(), months[0].clone()]);

    assert_eq!(days[0].figures.dine_in_orders, i64::MAX);
    assert_eq!(days[0].figures.total_orders, i64::MAX);
    assert_eq!(months[0].figures.total_orders, i64::MAX);
    assert_eq!(summary.total_orders, i64::MAX);
}

#[test]
fn test_fractional_quantities_sum_across_records() {
    let parser = RecordParser::new();
    let soup = json!({
        "saleDate": "2025-03-01",
        "topSellingItems": [{"menuName": "Soup", "quantitySold": 1.5}]
    });
    let raw = vec![soup.clone(), soup];
    let records = parser.parse_sales(&raw);
    let refs: Vec<&SalesRecord> = records.iter().collect();

    let top = top_items(&refs, 5);

    assert_eq!(top[0].quantity_sold, 3.0);
}
