use clap::Parser;
use std::path::PathBuf;

/// Ingest CNAB fixed-width transaction files
#[derive(Parser, Debug)]
#[command(name = "cnab-engine")]
#[command(about = "Ingest CNAB fixed-width transaction files", long_about = None)]
pub struct CliArgs {
    /// Input CNAB file path
    #[arg(value_name = "INPUT", help = "Path to the input CNAB file")]
    pub input_file: PathBuf,

    /// Write a per-store balance summary CSV to stdout after ingestion
    #[arg(long = "summary", help = "Print per-store balances as CSV")]
    pub summary: bool,
}
