//! CNAB Engine CLI
//!
//! Command-line interface for ingesting CNAB fixed-width transaction files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- cnab.txt
//! cargo run -- --summary cnab.txt > balances.csv
//! ```
//!
//! The program reads the CNAB file, validates and ingests every record into
//! the in-memory store, and reports the outcome. With `--summary`, the
//! per-store balances are written to stdout as CSV.
//!
//! # Exit Codes
//!
//! - 0: File accepted and fully processed
//! - 1: Error (file not found, invalid line lengths, malformed record, etc.)

use cnab_engine::{
    cli, read_cnab_lines, write_store_summaries_csv, CnabProcessor, InMemoryDatabase, StoreService,
};
use std::process;

fn main() {
    let args = cli::parse_args();

    if let Err(message) = run(&args) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), String> {
    let lines = read_cnab_lines(&args.input_file).map_err(|e| e.to_string())?;

    let db = InMemoryDatabase::new();
    let mut processor = CnabProcessor::new(db.store_repository(), db.transaction_repository());

    let outcome = processor.parse_batch(lines).map_err(|e| e.to_string())?;
    if !outcome.success {
        return Err(outcome.message);
    }

    eprintln!(
        "{} ({} transactions)",
        outcome.message, outcome.total_processed
    );

    if args.summary {
        let summaries = StoreService::new(db.store_repository())
            .get_all()
            .map_err(|e| e.to_string())?;
        let mut output = std::io::stdout();
        write_store_summaries_csv(&summaries, &mut output).map_err(|e| e.to_string())?;
    }

    Ok(())
}
