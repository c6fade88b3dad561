use thiserror::Error;

/// Structural failures that abort a run.
///
/// Everything cell- or row-shaped is recovered inside the pipeline (coerced to
/// missing, or the row is dropped); these variants are the cases where there is
/// no row to put a repaired value into.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input is missing required column [{name}]")]
    MissingColumn { name: String },
    #[error("Input contains no data rows")]
    EmptyInput,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
