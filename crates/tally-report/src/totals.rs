//! Summation over record collections.
//!
//! Non-finite contributions count as zero, so a single bad value can never
//! turn a total into `NaN`.

use crate::models::{CostBreakdown, CostRecord, SalesRecord};

/// Records that carry a `totalAmount` figure.
pub trait Amount {
    fn total_amount(&self) -> f64;
}

impl Amount for SalesRecord {
    fn total_amount(&self) -> f64 {
        self.total_amount
    }
}

impl Amount for CostRecord {
    fn total_amount(&self) -> f64 {
        self.total_amount
    }
}

/// Sum a numeric field across `records`.
pub fn sum_by<T>(records: &[&T], field: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(|r| finite_or_zero(field(*r))).sum()
}

/// Sum the `totalAmount` field across `records`.
pub fn sum_amounts<T: Amount>(records: &[&T]) -> f64 {
    sum_by(records, T::total_amount)
}

/// Sum the order counts of sales records.
pub fn sum_orders(records: &[&SalesRecord]) -> i64 {
    records.iter().map(|r| r.orders).fold(0, i64::saturating_add)
}

/// `amount / orders`, or 0 when there are no orders.
pub fn per_order(amount: f64, orders: i64) -> f64 {
    if orders > 0 {
        amount / orders as f64
    } else {
        0.0
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl CostBreakdown {
    /// Total each cost sub-category across `records`.
    pub fn from_records(records: &[&CostRecord]) -> Self {
        Self {
            total_raw_material: sum_by(records, |r| r.total_raw_material_cost),
            total_staff: sum_by(records, |r| r.total_staff_cost),
            total_owner: sum_by(records, |r| r.total_owner_cost),
            total_utility: sum_by(records, |r| r.total_utility_cost),
            total_other: sum_by(records, |r| r.total_other_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_amounts() {
        let a = SalesRecord::new("2025-03-01", 1000.0, 10);
        let b = SalesRecord::new("2025-03-02", 250.5, 3);

        assert_eq!(sum_amounts(&[&a, &b]), 1250.5);
        assert_eq!(sum_orders(&[&a, &b]), 13);
    }

    #[test]
    fn test_empty_collection_is_zero() {
        let empty: [&SalesRecord; 0] = [];
        assert_eq!(sum_amounts(&empty), 0.0);
        assert_eq!(sum_orders(&empty), 0);
    }

    #[test]
    fn test_non_finite_values_count_as_zero() {
        let a = CostRecord::new("2025-03-01", f64::NAN);
        let b = CostRecord::new("2025-03-01", 20.0);
        let c = CostRecord::new("2025-03-01", f64::INFINITY);

        assert_eq!(sum_amounts(&[&a, &b, &c]), 20.0);
    }

    #[test]
    fn test_per_order_never_divides_by_zero() {
        assert_eq!(per_order(1500.0, 15), 100.0);
        assert_eq!(per_order(1500.0, 0), 0.0);
        assert_eq!(per_order(0.0, 0), 0.0);
    }

    #[test]
    fn test_cost_breakdown_is_not_reconciled_with_total() {
        let a = CostRecord::new("2025-03-01", 300.0).with_breakdown(100.0, 80.0, 0.0, 20.0, 0.0);
        let b = CostRecord::new("2025-03-02", 50.0).with_breakdown(10.0, 0.0, 5.0, 0.0, 1.0);

        let breakdown = CostBreakdown::from_records(&[&a, &b]);

        assert_eq!(breakdown.total_raw_material, 110.0);
        assert_eq!(breakdown.total_staff, 80.0);
        assert_eq!(breakdown.total_owner, 5.0);
        assert_eq!(breakdown.total_utility, 20.0);
        assert_eq!(breakdown.total_other, 1.0);
        assert_eq!(breakdown.sum(), 216.0);
    }
}
