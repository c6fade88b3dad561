use rust_decimal::Decimal;
use tracing::warn;

use crate::models::Record;

/// Maximum absolute difference between a stated and a recomputed sales value
/// still considered equal, in currency units.
///
/// The tolerance is absolute, not relative: one cent of slack regardless of
/// transaction size, so it under-forgives very large transactions and
/// over-forgives sub-cent rounding. A fixed business constant, not a tunable.
pub const SALES_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Recomputes `sales` from `unit_price * quantity` and overwrites stated
/// values that drift beyond [`SALES_TOLERANCE`].
///
/// The computation is trusted over the stated value, unconditionally: every
/// mismatched row is corrected in place, never flagged or dropped. A missing
/// stated value counts as a mismatch and is repaired the same way. After this
/// stage `sales == unit_price * quantity` holds for every row whose product is
/// representable; this is the invariant's sole enforcer.
///
/// A product too large for `Decimal` leaves the stated value untouched: the
/// row keeps flowing, the run never aborts for row-level badness.
///
/// Returns the number of rows corrected.
pub fn reconcile(rows: &mut [Record]) -> usize {
    let mut corrected = 0;

    for row in rows.iter_mut() {
        let (Some(unit_price), Some(quantity)) = (row.unit_price, row.quantity) else {
            continue;
        };

        let Some(computed_sales) = unit_price.checked_mul(Decimal::from(quantity)) else {
            warn!(
                "Sales recomputation overflowed for order [{:?}], keeping stated value",
                row.order_id
            );
            continue;
        };

        let mismatch = match row.sales {
            Some(stated) => (stated - computed_sales).abs() > SALES_TOLERANCE,
            None => true,
        };

        if mismatch {
            row.sales = Some(computed_sales);
            corrected += 1;
        }
    }

    if corrected > 0 {
        warn!("Found {corrected} mismatched sales records, fixing");
    }

    corrected
}
