//! CNAB record parsing
//!
//! - [`line`] - fixed-width decoding of a single record into raw fields
//! - [`validate`] - batch line-shape validation by exact length

pub mod line;
pub mod validate;

pub use line::{decode_line, ParsedLine};
pub use validate::{partition_lines, LINE_LENGTH};
