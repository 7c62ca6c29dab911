//! File input and CSV output
//!
//! - [`reader`] - CNAB flat-file reading with the 80 -> 81 padding rule
//! - [`writer`] - store summary CSV output

pub mod reader;
pub mod writer;

pub use reader::read_cnab_lines;
pub use writer::write_store_summaries_csv;
