mod errors;
mod record;

pub use errors::PipelineError;
pub use record::{INPUT_COLUMNS, OUTPUT_COLUMNS, RawRecord, Record};
