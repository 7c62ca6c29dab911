//! Error types for the CNAB engine
//!
//! This module defines all error types that can occur during CNAB file
//! ingestion and entity management. Errors are designed to be descriptive
//! and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Line Decode Errors**: Short lines, malformed field content
//! - **Domain Validation Errors**: Invariant violations at entity construction
//! - **Storage Errors**: Failures surfaced from the persistence layer

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the CNAB engine
///
/// This enum represents all possible errors that can occur during
/// file ingestion and entity management. Each variant includes relevant
/// context to help diagnose and resolve the issue.
///
/// Not-found conditions are deliberately absent: repository and service
/// lookups report them as `Ok(None)`, never as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CnabError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents ingestion from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the input file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Line is too short for a fixed-offset field access
    ///
    /// Raised by the decoder when a substring range falls outside the line.
    /// Shape validation normally catches these before decoding begins.
    #[error("Line too short: need at least {expected} characters, got {actual}")]
    LineTooShort {
        /// Minimum length required for the failed field access
        expected: usize,
        /// Actual length of the line
        actual: usize,
    },

    /// A fixed-width field failed to parse
    ///
    /// Covers non-numeric type codes and amounts as well as malformed
    /// `yyyymmdd` dates and `hhmmss` times. Aborts the remaining batch.
    #[error("Failed to parse {field} from '{value}': {message}")]
    FieldParse {
        /// Name of the field that failed
        field: String,
        /// The raw substring that failed to parse
        value: String,
        /// Description of the parse failure
        message: String,
    },

    /// Transaction type code outside the defined 1-9 range
    #[error("Invalid transaction type code {code}, expected 1-9")]
    InvalidTypeCode {
        /// The out-of-range code
        code: u8,
    },

    /// Transaction amount must be strictly positive
    #[error("Invalid amount {amount}, must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// CPF must be exactly 11 characters and non-blank
    #[error("Invalid CPF '{cpf}', must be 11 characters")]
    InvalidCpf {
        /// The rejected CPF value
        cpf: String,
    },

    /// Card number must be non-blank
    #[error("Invalid card number, card number is required")]
    MissingCardNumber,

    /// Store name or owner name shorter than the 3-character minimum
    #[error("Invalid {field} '{value}', too short, minimum 3 characters")]
    NameTooShort {
        /// Which name field failed ("name" or "owner name")
        field: String,
        /// The rejected value
        value: String,
    },

    /// Store name or owner name longer than the 100-character maximum
    #[error("Invalid {field}, too long, maximum 100 characters (got {len})")]
    NameTooLong {
        /// Which name field failed ("name" or "owner name")
        field: String,
        /// Length of the rejected value
        len: usize,
    },

    /// Persistence failure surfaced from a repository
    ///
    /// Logged at the repository boundary, then propagated as-is.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },
}

impl From<std::io::Error> for CnabError {
    fn from(error: std::io::Error) -> Self {
        CnabError::Io {
            message: error.to_string(),
        }
    }
}

// Helper constructors for the variants with owned context

impl CnabError {
    /// Create a FieldParse error
    pub fn field_parse(field: &str, value: &str, message: impl ToString) -> Self {
        CnabError::FieldParse {
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an InvalidCpf error
    pub fn invalid_cpf(cpf: &str) -> Self {
        CnabError::InvalidCpf {
            cpf: cpf.to_string(),
        }
    }

    /// Create a NameTooShort error
    pub fn name_too_short(field: &str, value: &str) -> Self {
        CnabError::NameTooShort {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a NameTooLong error
    pub fn name_too_long(field: &str, len: usize) -> Self {
        CnabError::NameTooLong {
            field: field.to_string(),
            len,
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl ToString) -> Self {
        CnabError::Storage {
            message: message.to_string(),
        }
    }
}
