use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{RawRecord, Record};

/// Placeholder substituted for missing categorical fields.
pub const MISSING_SENTINEL: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns raw string rows into typed rows with a single missing-value
/// representation.
///
/// Exact-duplicate rows are removed first, once, before any per-row transform,
/// keeping the first occurrence and preserving input order. Every remaining
/// cell is then coerced: blanks become missing, categorical blanks become the
/// sentinel, and unparseable dates and numbers become missing rather than
/// failing the run. Deciding the fate of missing critical fields belongs to
/// the validator, not here.
///
/// Returns the typed rows and the number of duplicates removed.
pub fn normalize(raw: Vec<RawRecord>) -> (Vec<Record>, usize) {
    let before = raw.len();
    let mut seen = HashSet::new();
    let rows: Vec<Record> = raw
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .map(coerce)
        .collect();
    let duplicates_removed = before - rows.len();

    info!("Removed {duplicates_removed} duplicate rows");

    (rows, duplicates_removed)
}

fn coerce(raw: RawRecord) -> Record {
    Record {
        order_id: parse_or_missing(&raw.order_id),
        order_date: parse_date(&raw.order_date),
        customer_id: parse_or_missing(&raw.customer_id),
        customer_name: non_blank(raw.customer_name).unwrap_or_else(|| MISSING_SENTINEL.to_string()),
        region: non_blank(raw.region),
        category: non_blank(raw.category),
        product: non_blank(raw.product).unwrap_or_else(|| MISSING_SENTINEL.to_string()),
        unit_price: parse_or_missing::<Decimal>(&raw.unit_price),
        quantity: parse_or_missing::<i64>(&raw.quantity),
        sales: parse_or_missing::<Decimal>(&raw.sales),
        profit: parse_or_missing::<Decimal>(&raw.profit),
        payment_method: non_blank(raw.payment_method),
        margin_percent: None,
        discount: None,
    }
}

/// Empty and whitespace-only cells are the missing representation regardless
/// of source format.
fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_or_missing<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
