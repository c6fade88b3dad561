mod metrics;
mod normalizer;
mod reconciler;
#[cfg(test)]
mod tests;
mod validator;

use tracing::info;

pub use metrics::{DISCOUNT_HIGH, DISCOUNT_LOW, DISCOUNT_THRESHOLD, derive_metrics};
pub use normalizer::{MISSING_SENTINEL, normalize};
pub use reconciler::{SALES_TOLERANCE, reconcile};
pub use validator::validate;

use crate::models::{OUTPUT_COLUMNS, RawRecord, Record};

/// Per-run diagnostics emitted alongside the cleaned table.
///
/// This is the observability contract of a run: the caller gets the counts as
/// a value instead of having to scrape them out of process-wide logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub rows_dropped: usize,
    pub mismatches_corrected: usize,
    pub rows_out: usize,
    pub columns_out: usize,
}

/// Runs the full cleaning pipeline over a raw table.
///
/// Pure and deterministic, no configuration: normalize, validate, reconcile,
/// derive metrics, in that order, each stage consuming the previous stage's
/// table whole. Running the result through again changes nothing.
pub fn clean(raw: Vec<RawRecord>) -> (Vec<Record>, CleanReport) {
    info!("Starting data cleaning");

    let rows_loaded = raw.len();
    let (rows, duplicates_removed) = normalize(raw);
    let (mut rows, rows_dropped) = validate(rows);
    let mismatches_corrected = reconcile(&mut rows);
    derive_metrics(&mut rows);

    let report = CleanReport {
        rows_loaded,
        duplicates_removed,
        rows_dropped,
        mismatches_corrected,
        rows_out: rows.len(),
        columns_out: OUTPUT_COLUMNS.len(),
    };

    info!(
        "Data cleaning complete, final dataset shape: {} rows x {} columns",
        report.rows_out, report.columns_out
    );

    (rows, report)
}
