use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{CustomerId, OrderId};

/// Columns the input file must carry. Extra columns are ignored; a missing
/// column is a structural failure, not a row-level one.
pub const INPUT_COLUMNS: [&str; 12] = [
    "order_id",
    "order_date",
    "customer_id",
    "customer_name",
    "region",
    "category",
    "product",
    "unit_price",
    "quantity",
    "sales",
    "profit",
    "payment_method",
];

/// Columns emitted by the writers: every input column plus the two derived
/// metrics. Working values used during reconciliation never appear here.
pub const OUTPUT_COLUMNS: [&str; 14] = [
    "order_id",
    "order_date",
    "customer_id",
    "customer_name",
    "region",
    "category",
    "product",
    "unit_price",
    "quantity",
    "sales",
    "profit",
    "payment_method",
    "margin_percent",
    "discount",
];

/// Represents a single row from the input CSV file, exactly as the source
/// provides it.
///
/// Every field is kept as a raw string so that malformed cell content reaches
/// the normalizer instead of failing deserialization; only structural problems
/// (wrong column set) are rejected at load time. `Eq` and `Hash` cover all
/// twelve fields, which is what makes exact-duplicate removal a set operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawRecord {
    pub order_id: String,
    pub order_date: String,
    pub customer_id: String,
    pub customer_name: String,
    pub region: String,
    pub category: String,
    pub product: String,
    pub unit_price: String,
    pub quantity: String,
    pub sales: String,
    pub profit: String,
    pub payment_method: String,
}

/// A typed transaction row flowing through the cleaning stages.
///
/// Missing-ness is carried in the type: a cell that was blank or failed to
/// parse is `None`, never a magic value. Stages fill, drop, or repair these
/// fields; the validator guarantees that `order_date`, `unit_price` and
/// `quantity` are `Some` for every row it lets through.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub order_id: Option<OrderId>,
    pub order_date: Option<NaiveDate>,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub region: Option<String>,
    pub category: Option<String>,
    pub product: String,
    pub unit_price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub sales: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub payment_method: Option<String>,
    pub margin_percent: Option<Decimal>,
    pub discount: Option<Decimal>,
}
