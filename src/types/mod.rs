//! Core data types for the CNAB engine
//!
//! This module contains the domain entities and error types:
//! - [`Transaction`] and [`TransactionType`] - financial movements and their
//!   income/expense classification
//! - [`Store`] - the merchant entity transactions are grouped under
//! - [`CnabError`] - all error types used throughout the system

pub mod error;
pub mod store;
pub mod transaction;

pub use error::CnabError;
pub use store::Store;
pub use transaction::{Transaction, TransactionType};
