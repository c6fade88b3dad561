use rust_decimal::Decimal;

use crate::models::Record;

/// Unit prices strictly above this threshold earn the higher discount tier;
/// exactly on the threshold earns the lower one.
pub const DISCOUNT_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const DISCOUNT_HIGH: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
pub const DISCOUNT_LOW: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Derives `margin_percent` and `discount` for every row. Row-local, no
/// cross-row state, never drops.
///
/// `margin_percent` is `profit / sales * 100`; a missing profit propagates a
/// missing margin rather than erroring, and so does a ratio too extreme for
/// `Decimal` to represent. Sales is validated positive upstream, the zero
/// check only guards callers that skipped validation.
pub fn derive_metrics(rows: &mut [Record]) {
    for row in rows.iter_mut() {
        row.margin_percent = match (row.profit, row.sales) {
            (Some(profit), Some(sales)) if !sales.is_zero() => profit
                .checked_div(sales)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
            _ => None,
        };

        row.discount = row.unit_price.map(|unit_price| {
            if unit_price > DISCOUNT_THRESHOLD {
                DISCOUNT_HIGH
            } else {
                DISCOUNT_LOW
            }
        });
    }
}
