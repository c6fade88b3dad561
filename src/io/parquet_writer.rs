use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use crate::models::{PipelineError, Record};

/// Writes the cleaned table as a parquet file for columnar analytic
/// consumers, logically identical to the CSV output.
///
/// Money and metric columns are stored as `Float64`, dates as `Date32`;
/// missing cells become nulls.
pub fn write_parquet(path: &Path, rows: &[Record]) -> Result<(), PipelineError> {
    let schema = Arc::new(output_schema());
    let batch = RecordBatch::try_new(schema.clone(), output_columns(rows))?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    info!("Cleaned data saved to {}", path.display());

    Ok(())
}

fn output_schema() -> Schema {
    Schema::new(vec![
        Field::new("order_id", DataType::UInt64, true),
        Field::new("order_date", DataType::Date32, true),
        Field::new("customer_id", DataType::UInt64, true),
        Field::new("customer_name", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, true),
        Field::new("category", DataType::Utf8, true),
        Field::new("product", DataType::Utf8, false),
        Field::new("unit_price", DataType::Float64, true),
        Field::new("quantity", DataType::Int64, true),
        Field::new("sales", DataType::Float64, true),
        Field::new("profit", DataType::Float64, true),
        Field::new("payment_method", DataType::Utf8, true),
        Field::new("margin_percent", DataType::Float64, true),
        Field::new("discount", DataType::Float64, true),
    ])
}

fn output_columns(rows: &[Record]) -> Vec<ArrayRef> {
    vec![
        Arc::new(UInt64Array::from(
            rows.iter().map(|row| row.order_id).collect::<Vec<_>>(),
        )),
        Arc::new(Date32Array::from(
            rows.iter()
                .map(|row| row.order_date.map(days_since_epoch))
                .collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            rows.iter().map(|row| row.customer_id).collect::<Vec<_>>(),
        )),
        Arc::new(
            rows.iter()
                .map(|row| Some(row.customer_name.clone()))
                .collect::<StringArray>(),
        ),
        Arc::new(
            rows.iter()
                .map(|row| row.region.clone())
                .collect::<StringArray>(),
        ),
        Arc::new(
            rows.iter()
                .map(|row| row.category.clone())
                .collect::<StringArray>(),
        ),
        Arc::new(
            rows.iter()
                .map(|row| Some(row.product.clone()))
                .collect::<StringArray>(),
        ),
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|row| to_float(row.unit_price))
                .collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            rows.iter().map(|row| row.quantity).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|row| to_float(row.sales)).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|row| to_float(row.profit)).collect::<Vec<_>>(),
        )),
        Arc::new(
            rows.iter()
                .map(|row| row.payment_method.clone())
                .collect::<StringArray>(),
        ),
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|row| to_float(row.margin_percent))
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|row| to_float(row.discount))
                .collect::<Vec<_>>(),
        )),
    ]
}

fn to_float(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|decimal| decimal.to_f64())
}

// chrono's NaiveDate::default is the Unix epoch, which is also Date32's
// reference point.
fn days_since_epoch(date: NaiveDate) -> i32 {
    date.signed_duration_since(NaiveDate::default()).num_days() as i32
}
