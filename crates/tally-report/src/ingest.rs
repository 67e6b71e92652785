//! Normalisation of raw JSON into canonical records.
//!
//! Upstream sources are inconsistent about casing: the same nested field
//! may arrive as `menuName` or `MenuName`, the same list as
//! `topSellingItems` or `TopSellingItems`. Every lookup here tries the
//! lower-camel name first and the upper-camel name second, so nothing past
//! this module has to care.
//!
//! Missing, null or non-numeric numbers become 0. Entries that are not JSON
//! objects, and nested lines without a name, are skipped.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ReportError, Result};
use crate::models::{CostRecord, ItemSale, PeakHour, SalesRecord};

/// Default date field of sales records.
pub const DEFAULT_SALES_DATE_FIELD: &str = "saleDate";

/// Default date field of cost records.
pub const DEFAULT_COST_DATE_FIELD: &str = "costDate";

/// Converts raw JSON arrays into [`SalesRecord`]s and [`CostRecord`]s.
#[derive(Debug, Clone)]
pub struct RecordParser {
    sales_date_field: String,
    cost_date_field: String,
}

impl RecordParser {
    /// Create a parser using the default date field names.
    pub fn new() -> Self {
        Self {
            sales_date_field: DEFAULT_SALES_DATE_FIELD.to_string(),
            cost_date_field: DEFAULT_COST_DATE_FIELD.to_string(),
        }
    }

    /// Use different field names for the sales and cost dates.
    pub fn with_date_fields(mut self, sales: impl Into<String>, cost: impl Into<String>) -> Self {
        self.sales_date_field = sales.into();
        self.cost_date_field = cost.into();
        self
    }

    /// Normalise an array of raw sales records.
    pub fn parse_sales(&self, values: &[Value]) -> Vec<SalesRecord> {
        let records: Vec<SalesRecord> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                let record = self.parse_sales_record(v);
                if record.is_none() {
                    trace!(index = i, "skipping non-object sales entry");
                }
                record
            })
            .collect();
        debug!(input = values.len(), parsed = records.len(), "normalised sales records");
        records
    }

    /// Normalise an array of raw cost records.
    pub fn parse_costs(&self, values: &[Value]) -> Vec<CostRecord> {
        let records: Vec<CostRecord> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                let record = self.parse_cost_record(v);
                if record.is_none() {
                    trace!(index = i, "skipping non-object cost entry");
                }
                record
            })
            .collect();
        debug!(input = values.len(), parsed = records.len(), "normalised cost records");
        records
    }

    /// Parse sales records from JSON text.
    pub fn parse_sales_str(&self, text: &str) -> Result<Vec<SalesRecord>> {
        Ok(self.parse_sales(&json_array(text)?))
    }

    /// Parse cost records from JSON text.
    pub fn parse_costs_str(&self, text: &str) -> Result<Vec<CostRecord>> {
        Ok(self.parse_costs(&json_array(text)?))
    }

    /// Read sales records from a JSON file.
    pub fn parse_sales_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SalesRecord>> {
        self.parse_sales_str(&read_file(path.as_ref())?)
    }

    /// Read cost records from a JSON file.
    pub fn parse_costs_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<CostRecord>> {
        self.parse_costs_str(&read_file(path.as_ref())?)
    }

    fn parse_sales_record(&self, value: &Value) -> Option<SalesRecord> {
        if !value.is_object() {
            return None;
        }

        Some(SalesRecord {
            sale_date: date_text(field(value, &self.sales_date_field)),
            total_amount: number(field(value, "totalAmount")),
            orders: count(field(value, "orders")),
            top_selling_items: lines(field(value, "topSellingItems"), parse_item),
            peak_hours: lines(field(value, "peakHours"), parse_peak_hour),
            dine_in_peak_hours: lines(field(value, "dineInPeakHours"), parse_peak_hour),
            delivery_peak_hours: lines(field(value, "deliveryPeakHours"), parse_peak_hour),
        })
    }

    fn parse_cost_record(&self, value: &Value) -> Option<CostRecord> {
        if !value.is_object() {
            return None;
        }

        Some(CostRecord {
            cost_date: date_text(field(value, &self.cost_date_field)),
            total_amount: number(field(value, "totalAmount")),
            total_raw_material_cost: number(field(value, "totalRawMaterialCost")),
            total_staff_cost: number(field(value, "totalStaffCost")),
            total_owner_cost: number(field(value, "totalOwnerCost")),
            total_utility_cost: number(field(value, "totalUtilityCost")),
            total_other_cost: number(field(value, "totalOtherCost")),
        })
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_item(value: &Value) -> Option<ItemSale> {
    Some(ItemSale {
        menu_name: label(field(value, "menuName"))?,
        quantity_sold: number(field(value, "quantitySold")),
        total_sales: number(field(value, "totalSales")),
    })
}

fn parse_peak_hour(value: &Value) -> Option<PeakHour> {
    Some(PeakHour {
        hour_range: label(field(value, "hourRange"))?,
        order_count: count(field(value, "orderCount")),
        total_sales: number(field(value, "totalSales")),
    })
}

/// Look up `name`, then its upper-camel variant. Null counts as absent.
fn field<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    let present = |key: &str| value.get(key).filter(|v| !v.is_null());
    present(name).or_else(|| present(upper_camel(name).as_str()))
}

fn upper_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Numeric value of a JSON number or numeric string; 0 otherwise.
fn number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn count(value: Option<&Value>) -> i64 {
    if let Some(Value::Number(n)) = value
        && let Some(i) = n.as_i64()
    {
        return i;
    }
    number(value).trunc() as i64
}

/// Non-empty text of a string or number value, kept verbatim.
fn label(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn date_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn lines<T>(value: Option<&Value>, parse: fn(&Value) -> Option<T>) -> Vec<T> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|v| v.is_object())
            .filter_map(parse)
            .collect(),
        _ => Vec::new(),
    }
}

fn json_array(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(values) => Ok(values),
        other => Err(ReportError::NotAnArray {
            found: json_type(&other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
