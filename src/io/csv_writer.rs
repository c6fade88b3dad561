use std::fmt::Display;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::models::{OUTPUT_COLUMNS, PipelineError, Record};

/// Writes the cleaned table as row-oriented CSV, one output column set, in
/// table order. Missing cells serialize as empty strings.
pub fn write_csv(path: &Path, rows: &[Record]) -> Result<(), PipelineError> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(OUTPUT_COLUMNS)?;

    for row in rows {
        writer.write_record(record_fields(row))?;
    }

    writer.flush()?;

    info!("Cleaned data saved to {}", path.display());

    Ok(())
}

/// The fourteen output cells of a record, rendered for tabular text output.
pub fn record_fields(record: &Record) -> [String; 14] {
    [
        render(&record.order_id),
        render(&record.order_date),
        render(&record.customer_id),
        record.customer_name.clone(),
        render(&record.region),
        render(&record.category),
        record.product.clone(),
        render(&record.unit_price),
        render(&record.quantity),
        render(&record.sales),
        render(&record.profit),
        render(&record.payment_method),
        render(&record.margin_percent),
        render(&record.discount),
    ]
}

fn render<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
