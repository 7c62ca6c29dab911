//! Batch line-shape validation
//!
//! Splits a batch of raw lines into valid and invalid sets by exact length
//! before any decoding or persistence happens. A CNAB record is valid only
//! at exactly 81 characters (80 data characters plus the trailing pad applied
//! by the reader); every other length is rejected outright, never repaired.

/// Exact character count of a valid CNAB record
pub const LINE_LENGTH: usize = 81;

/// Partition raw lines into (valid, invalid) by exact-length check
///
/// Relative order is preserved within each partition. No side effects; the
/// caller decides whether any invalid line blocks the batch.
pub fn partition_lines<I, S>(lines: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut valid_lines = Vec::new();
    let mut invalid_lines = Vec::new();

    for line in lines {
        let line = line.into();
        if line.chars().count() == LINE_LENGTH {
            valid_lines.push(line);
        } else {
            invalid_lines.push(line);
        }
    }

    (valid_lines, invalid_lines)
}
