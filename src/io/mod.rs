mod csv_writer;
mod loader;
mod parquet_writer;

pub use csv_writer::{record_fields, write_csv};
pub use loader::load_records;
pub use parquet_writer::write_parquet;
