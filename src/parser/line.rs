//! Fixed-width CNAB line decoder
//!
//! Decodes one 81-character CNAB record (80 data characters plus one trailing
//! pad) into structured fields by byte position, not by delimiter.
//!
//! # Record Layout
//!
//! | Field       | Offset | Width | Rule                                   |
//! |-------------|--------|-------|----------------------------------------|
//! | type code   | 0      | 1     | integer 1-9                            |
//! | date        | 1      | 8     | `yyyymmdd`                             |
//! | amount      | 9      | 10    | integer, implicit 2 decimals (/100)    |
//! | CPF         | 19     | 11    | trim                                   |
//! | card number | 30     | 12    | trim                                   |
//! | time        | 42     | 6     | `hhmmss`                               |
//! | owner name  | 48     | 14    | trim                                   |
//! | store name  | 62     | 19    | trim                                   |
//!
//! All functions are pure (no I/O) for easy testing. Store resolution and
//! entity construction happen in the batch processor; the decoder only
//! produces raw decoded fields.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::types::{CnabError, TransactionType};

/// Raw decoded fields of one CNAB record
///
/// The occurrence timestamp is the date and time fields combined into one
/// instant. String fields are trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// Transaction category, already range-checked against the 1-9 codes
    pub tx_type: TransactionType,
    /// Date and time combined
    pub occurred_at: NaiveDateTime,
    /// Positive fixed-point amount with two decimal places
    pub amount: Decimal,
    /// Trimmed tax id
    pub cpf: String,
    /// Trimmed masked card number
    pub card_number: String,
    /// Time-of-day component
    pub time: NaiveTime,
    /// Trimmed store owner name
    pub owner_name: String,
    /// Trimmed store name (the natural key for store resolution)
    pub store_name: String,
}

/// Decode a single CNAB line into its raw fields
///
/// The line is expected to have passed shape validation (exactly 81
/// characters), but the decoder does not assume it: any field access past
/// the end of the line fails with [`CnabError::LineTooShort`], and malformed
/// content fails with [`CnabError::FieldParse`] or
/// [`CnabError::InvalidTypeCode`].
///
/// # Errors
///
/// Returns an error if the line is shorter than the maximum required
/// offset+width, or if the type code, date, amount, or time fields do not
/// parse.
pub fn decode_line(line: &str) -> Result<ParsedLine, CnabError> {
    let code: u8 = parse_numeric(field(line, 0, 1)?, "type code")?;
    let tx_type = TransactionType::from_code(code)?;

    let date_raw = field(line, 1, 8)?;
    let date = NaiveDate::parse_from_str(date_raw, "%Y%m%d")
        .map_err(|e| CnabError::field_parse("date", date_raw, e))?;

    let cents: i64 = parse_numeric(field(line, 9, 10)?, "amount")?;
    let amount = Decimal::new(cents, 2);

    let cpf = field(line, 19, 11)?.trim().to_string();
    let card_number = field(line, 30, 12)?.trim().to_string();

    let time_raw = field(line, 42, 6)?;
    let time = NaiveTime::parse_from_str(time_raw, "%H%M%S")
        .map_err(|e| CnabError::field_parse("time", time_raw, e))?;

    let owner_name = field(line, 48, 14)?.trim().to_string();
    let store_name = field(line, 62, 19)?.trim().to_string();

    Ok(ParsedLine {
        tx_type,
        occurred_at: date.and_time(time),
        amount,
        cpf,
        card_number,
        time,
        owner_name,
        store_name,
    })
}

/// Extract a fixed-width field by byte position
///
/// Fails with [`CnabError::LineTooShort`] when the range falls outside the
/// line (or lands inside a multi-byte character, which cannot occur in a
/// well-formed CNAB record).
fn field(line: &str, offset: usize, width: usize) -> Result<&str, CnabError> {
    line.get(offset..offset + width)
        .ok_or(CnabError::LineTooShort {
            expected: offset + width,
            actual: line.chars().count(),
        })
}

fn parse_numeric<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, CnabError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CnabError::field_parse(name, raw, e))
}
