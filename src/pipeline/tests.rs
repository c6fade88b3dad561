use super::{
    CleanReport, DISCOUNT_HIGH, DISCOUNT_LOW, MISSING_SENTINEL, SALES_TOLERANCE, clean,
    derive_metrics, normalize, reconcile, validate,
};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::io::record_fields;
use crate::models::RawRecord;

fn raw_row(
    order_id: &str,
    order_date: &str,
    unit_price: &str,
    quantity: &str,
    sales: &str,
    profit: &str,
) -> RawRecord {
    RawRecord {
        order_id: order_id.to_string(),
        order_date: order_date.to_string(),
        customer_id: "1001".to_string(),
        customer_name: "Ada Park".to_string(),
        region: "North".to_string(),
        category: "Electronics".to_string(),
        product: "Laptop".to_string(),
        unit_price: unit_price.to_string(),
        quantity: quantity.to_string(),
        sales: sales.to_string(),
        profit: profit.to_string(),
        payment_method: "card".to_string(),
    }
}

fn raw_from_fields(fields: [String; 14]) -> RawRecord {
    let [
        order_id,
        order_date,
        customer_id,
        customer_name,
        region,
        category,
        product,
        unit_price,
        quantity,
        sales,
        profit,
        payment_method,
        _margin_percent,
        _discount,
    ] = fields;

    RawRecord {
        order_id,
        order_date,
        customer_id,
        customer_name,
        region,
        category,
        product,
        unit_price,
        quantity,
        sales,
        profit,
        payment_method,
    }
}

#[test]
fn test_normalize_fills_blank_categoricals_with_sentinel() {
    let mut raw = raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00");
    raw.customer_name = "   ".to_string();
    raw.product = String::new();

    let (rows, _) = normalize(vec![raw]);

    assert_eq!(rows[0].customer_name, MISSING_SENTINEL);
    assert_eq!(rows[0].product, MISSING_SENTINEL);
}

#[test]
fn test_normalize_coerces_unparseable_cells_to_missing() {
    let raw = raw_row("1", "not-a-date", "free", "many", "n/a", "  ");

    let (rows, _) = normalize(vec![raw]);

    assert!(rows[0].order_date.is_none());
    assert!(rows[0].unit_price.is_none());
    assert!(rows[0].quantity.is_none());
    assert!(rows[0].sales.is_none());
    assert!(rows[0].profit.is_none());
}

#[test]
fn test_normalize_parses_well_formed_cells() -> Result<()> {
    let raw = raw_row("7", "2023-06-30", "85.50", "2", "171.00", "34.20");

    let (rows, duplicates_removed) = normalize(vec![raw]);

    assert_eq!(duplicates_removed, 0);
    assert_eq!(rows[0].order_id, Some(7));
    assert_eq!(
        rows[0].order_date.map(|d| d.to_string()),
        Some("2023-06-30".to_string())
    );
    assert_eq!(rows[0].unit_price, Some(Decimal::from_str("85.50")?));
    assert_eq!(rows[0].quantity, Some(2));
    assert_eq!(rows[0].region.as_deref(), Some("North"));

    Ok(())
}

#[test]
fn test_normalize_removes_exact_duplicates_and_preserves_order() {
    let first = raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00");
    let second = raw_row("2", "2023-02-20", "30.00", "1", "30.00", "6.00");

    let (rows, duplicates_removed) =
        normalize(vec![first.clone(), second.clone(), first, second]);

    assert_eq!(duplicates_removed, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].order_id, Some(1));
    assert_eq!(rows[1].order_id, Some(2));
}

#[test]
fn test_normalize_keeps_unparseable_order_id_rows() {
    let raw = raw_row("not-an-id", "2023-01-15", "10.00", "2", "20.00", "4.00");

    let (rows, _) = normalize(vec![raw]);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].order_id.is_none());
}

#[test]
fn test_validate_drops_rows_missing_critical_fields() {
    let (rows, _) = normalize(vec![
        raw_row("1", "bad-date", "10.00", "2", "20.00", "4.00"),
        raw_row("2", "2023-01-15", "", "2", "20.00", "4.00"),
        raw_row("3", "2023-01-15", "10.00", "", "20.00", "4.00"),
        raw_row("4", "2023-01-15", "10.00", "2", "20.00", "4.00"),
    ]);

    let (kept, dropped) = validate(rows);

    assert_eq!(dropped, 3);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].order_id, Some(4));
}

#[test]
fn test_validate_drops_non_positive_price_and_quantity() {
    let (rows, _) = normalize(vec![
        raw_row("1", "2023-01-15", "-5.00", "2", "-10.00", "1.00"),
        raw_row("2", "2023-01-15", "0", "2", "0.00", "1.00"),
        raw_row("3", "2023-01-15", "10.00", "0", "0.00", "1.00"),
        raw_row("4", "2023-01-15", "10.00", "-3", "-30.00", "1.00"),
    ]);

    let (kept, dropped) = validate(rows);

    assert_eq!(dropped, 4);
    assert!(kept.is_empty());
}

#[test]
fn test_validate_keeps_rows_with_missing_profit() {
    let (rows, _) = normalize(vec![raw_row("1", "2023-01-15", "10.00", "2", "20.00", "")]);

    let (kept, dropped) = validate(rows);

    assert_eq!(dropped, 0);
    assert_eq!(kept.len(), 1);
    assert!(kept[0].profit.is_none());
}

#[test]
fn test_reconcile_overwrites_stated_sales_beyond_tolerance() -> Result<()> {
    let (rows, _) = normalize(vec![raw_row("1", "2023-01-15", "10", "3", "100", "5.00")]);
    let (mut rows, _) = validate(rows);

    let corrected = reconcile(&mut rows);

    assert_eq!(corrected, 1);
    assert_eq!(rows[0].sales, Some(Decimal::from_str("30")?));

    Ok(())
}

#[test]
fn test_reconcile_keeps_stated_sales_within_tolerance() -> Result<()> {
    // Differences of exactly 0.01 sit on the tolerance and are kept as stated
    let (rows, _) = normalize(vec![
        raw_row("1", "2023-01-15", "10.00", "3", "30.01", "5.00"),
        raw_row("2", "2023-01-15", "10.00", "3", "29.995", "5.00"),
    ]);
    let (mut rows, _) = validate(rows);

    let corrected = reconcile(&mut rows);

    assert_eq!(corrected, 0);
    assert_eq!(rows[0].sales, Some(Decimal::from_str("30.01")?));
    assert_eq!(rows[1].sales, Some(Decimal::from_str("29.995")?));

    Ok(())
}

#[test]
fn test_reconcile_repairs_missing_sales() -> Result<()> {
    let (rows, _) = normalize(vec![raw_row("1", "2023-01-15", "12.50", "4", "", "5.00")]);
    let (mut rows, _) = validate(rows);

    let corrected = reconcile(&mut rows);

    assert_eq!(corrected, 1);
    assert_eq!(rows[0].sales, Some(Decimal::from_str("50.00")?));

    Ok(())
}

#[test]
fn test_reconcile_keeps_stated_sales_when_recomputation_overflows() -> Result<()> {
    // Near the top of Decimal's range the product of price and quantity is
    // not representable; the row must flow through untouched, not abort the run
    let (rows, _) = normalize(vec![raw_row(
        "1",
        "2023-01-15",
        "50000000000000000000000000000",
        "2",
        "1.00",
        "5.00",
    )]);
    let (mut rows, dropped) = validate(rows);

    assert_eq!(dropped, 0);

    let corrected = reconcile(&mut rows);

    assert_eq!(corrected, 0);
    assert_eq!(rows[0].sales, Some(Decimal::from_str("1.00")?));

    Ok(())
}

#[test]
fn test_metrics_margin_overflow_propagates_as_missing() {
    let (rows, _) = normalize(vec![raw_row(
        "1",
        "2023-01-15",
        "0.0001",
        "1",
        "0.0001",
        "79000000000000000000000000000",
    )]);
    let (mut rows, _) = validate(rows);
    reconcile(&mut rows);

    derive_metrics(&mut rows);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].margin_percent.is_none());
}

#[test]
fn test_metrics_computes_margin_and_propagates_missing_profit() -> Result<()> {
    let (rows, _) = normalize(vec![
        raw_row("1", "2023-01-15", "30.00", "2", "60.00", "15.00"),
        raw_row("2", "2023-01-15", "30.00", "2", "60.00", ""),
    ]);
    let (mut rows, _) = validate(rows);
    reconcile(&mut rows);

    derive_metrics(&mut rows);

    assert_eq!(rows[0].margin_percent, Some(Decimal::from_str("25")?));
    assert!(rows[1].margin_percent.is_none());

    Ok(())
}

#[test]
fn test_metrics_discount_boundary_is_exclusive_at_threshold() -> Result<()> {
    let (rows, _) = normalize(vec![
        raw_row("1", "2023-01-15", "1000.00", "1", "1000.00", "10.00"),
        raw_row("2", "2023-01-15", "1000.01", "1", "1000.01", "10.00"),
        raw_row("3", "2023-01-15", "5.00", "1", "5.00", "1.00"),
    ]);
    let (mut rows, _) = validate(rows);
    reconcile(&mut rows);

    derive_metrics(&mut rows);

    assert_eq!(rows[0].discount, Some(DISCOUNT_LOW));
    assert_eq!(rows[1].discount, Some(DISCOUNT_HIGH));
    assert_eq!(rows[2].discount, Some(DISCOUNT_LOW));

    Ok(())
}

#[test]
fn test_clean_reports_accurate_counts() {
    let duplicate = raw_row("2", "2023-02-20", "30.00", "1", "30.00", "6.00");
    let raw = vec![
        raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00"),
        duplicate.clone(),
        duplicate,
        raw_row("3", "bad-date", "10.00", "2", "20.00", "4.00"),
        raw_row("4", "2023-03-01", "10.00", "3", "100.00", "5.00"),
    ];

    let (rows, report) = clean(raw);

    assert_eq!(
        report,
        CleanReport {
            rows_loaded: 5,
            duplicates_removed: 1,
            rows_dropped: 1,
            mismatches_corrected: 1,
            rows_out: 3,
            columns_out: 14,
        }
    );
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_clean_output_satisfies_invariants() {
    let raw = vec![
        raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00"),
        raw_row("2", "2023-02-20", "1500.00", "1", "9999.00", "6.00"),
        raw_row("3", "2023-03-01", "-1.00", "2", "-2.00", "1.00"),
        raw_row("4", "bad", "10.00", "2", "20.00", ""),
        raw_row("5", "2023-04-01", "0.01", "5", "", ""),
    ];

    let (rows, _) = clean(raw);

    for row in &rows {
        let unit_price = row.unit_price.unwrap();
        let quantity = row.quantity.unwrap();
        let sales = row.sales.unwrap();

        assert!(unit_price > Decimal::ZERO);
        assert!(quantity > 0);
        assert!((sales - unit_price * Decimal::from(quantity)).abs() <= SALES_TOLERANCE);
        assert!(!row.customer_name.is_empty());
        assert!(!row.product.is_empty());
        assert!(row.discount.is_some());
    }
}

#[test]
fn test_clean_is_idempotent() {
    let raw = vec![
        raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00"),
        raw_row("1", "2023-01-15", "10.00", "2", "20.00", "4.00"),
        raw_row("2", "2023-02-20", "1500.00", "1", "9999.00", "6.00"),
        raw_row("3", "2023-03-01", "60.00", "3", "180.00", ""),
        raw_row("4", "bad-date", "10.00", "2", "20.00", "4.00"),
    ];

    let (first_pass, _) = clean(raw);

    let round_tripped: Vec<RawRecord> = first_pass
        .iter()
        .map(|row| raw_from_fields(record_fields(row)))
        .collect();
    let (second_pass, report) = clean(round_tripped);

    assert_eq!(report.duplicates_removed, 0);
    assert_eq!(report.rows_dropped, 0);
    assert_eq!(report.mismatches_corrected, 0);
    assert_eq!(second_pass, first_pass);
}

#[test]
fn test_clean_preserves_row_order() {
    let raw = vec![
        raw_row("10", "2023-01-15", "10.00", "2", "20.00", "4.00"),
        raw_row("11", "2023-02-20", "30.00", "1", "30.00", "6.00"),
        raw_row("12", "2023-03-01", "40.00", "2", "80.00", "8.00"),
    ];

    let (rows, _) = clean(raw);

    let ids: Vec<_> = rows.iter().map(|row| row.order_id).collect();
    assert_eq!(ids, vec![Some(10), Some(11), Some(12)]);
}

#[test]
fn test_clean_handles_empty_table() {
    let (rows, report) = clean(Vec::new());

    assert!(rows.is_empty());
    assert_eq!(report.rows_loaded, 0);
    assert_eq!(report.rows_out, 0);
}
