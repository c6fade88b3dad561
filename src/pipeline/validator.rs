use rust_decimal::Decimal;
use tracing::info;

use crate::models::Record;

/// Keeps only rows that satisfy the hard constraints: a parseable order date,
/// a positive unit price and a positive quantity.
///
/// Dropping is the only remedy here; there is no sentinel for a critical
/// field and no repair path. `profit` is deliberately not critical, so a row
/// with missing profit survives and the gap propagates into `margin_percent`
/// later. Drops are silent data loss, reported only in aggregate.
///
/// Returns the surviving rows and the number dropped.
pub fn validate(rows: Vec<Record>) -> (Vec<Record>, usize) {
    let before = rows.len();
    let kept: Vec<Record> = rows.into_iter().filter(is_valid).collect();
    let dropped = before - kept.len();

    info!("Dropped {dropped} invalid rows");

    (kept, dropped)
}

fn is_valid(row: &Record) -> bool {
    let Some(unit_price) = row.unit_price else {
        return false;
    };
    let Some(quantity) = row.quantity else {
        return false;
    };

    row.order_date.is_some() && unit_price > Decimal::ZERO && quantity > 0
}
