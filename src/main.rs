mod io;
mod models;
mod pipeline;
mod types;

use std::fs::create_dir_all;
use std::io::stderr;
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::io::{load_records, write_csv, write_parquet};
use crate::pipeline::clean;

const CSV_OUTPUT: &str = "sales_clean.csv";
const PARQUET_OUTPUT: &str = "sales_clean.parquet";

fn main() -> Result<()> {
    //NOTE: Two positional arguments do not justify pulling in clap; revisit if the CLI grows flags.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: sales-pipeline [input].csv [output_dir] [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let input = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);
    let log_level = args
        .get(3)
        .map(|s| parse_log_level(s))
        .unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let timer = Instant::now();
    let raw = load_records(input)?;
    let (rows, report) = clean(raw);

    create_dir_all(output_dir)?;
    write_csv(&output_dir.join(CSV_OUTPUT), &rows)?;
    write_parquet(&output_dir.join(PARQUET_OUTPUT), &rows)?;

    info!(
        "Run finished in {:?}: {} rows loaded, {} duplicates removed, {} rows dropped, {} sales corrected, {} rows x {} columns written",
        timer.elapsed(),
        report.rows_loaded,
        report.duplicates_removed,
        report.rows_dropped,
        report.mismatches_corrected,
        report.rows_out,
        report.columns_out
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // Diagnostics go to stderr so stdout stays clean for redirection
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
