use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::models::{INPUT_COLUMNS, PipelineError, RawRecord};

/// Reads the raw table from a CSV file.
///
/// Header names are matched, not positions, so column order is free and extra
/// columns are ignored. A missing required column, an unreadable file or a
/// file with zero data rows aborts the run; a row that fails to deserialize
/// (wrong arity, broken quoting) is skipped with a warning, matching the
/// pipeline's row-level recovery policy.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, PipelineError> {
    info!("Loading raw data from {}", path.display());

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    check_header(reader.headers()?)?;

    let mut rows = Vec::new();

    for result in reader.deserialize::<RawRecord>() {
        match result {
            Ok(row) => rows.push(row),
            Err(error) => warn!("Skipping malformed CSV row: {error}"),
        }
    }

    if rows.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    info!("Loaded {} rows and {} columns", rows.len(), INPUT_COLUMNS.len());

    Ok(rows)
}

fn check_header(headers: &StringRecord) -> Result<(), PipelineError> {
    for name in INPUT_COLUMNS {
        if !headers.iter().any(|header| header == name) {
            return Err(PipelineError::MissingColumn {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
