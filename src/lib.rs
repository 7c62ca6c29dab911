//! CNAB Engine Library
//! # Overview
//!
//! This library ingests fixed-width CNAB flat files describing financial
//! transactions for multiple stores, parses and validates each line,
//! persists transactions and derived store records through repository ports,
//! and exposes CRUD + aggregation services over the resulting data.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Domain entities ([`Store`], [`Transaction`]) and errors
//! - [`parser`] - Fixed-width line decoding and batch shape validation
//! - [`core`] - Business logic components:
//!   - [`core::processor`] - Batch ingestion orchestration
//!   - [`core::traits`] - Repository ports
//!   - [`core::memory`] - Shared in-memory persistence
//!   - [`core::services`] - CRUD and admin aggregation services
//! - [`io`] - CNAB file reading and summary CSV output
//! - [`cli`] - CLI argument parsing
//!
//! # Transaction Classification
//!
//! The CNAB format defines nine transaction categories with numeric codes
//! 1-9. Debit, Credit, LoanReceipt, Sales, TedReceipt, and DocReceipt are
//! income; Bill, Financing, and Rent are expense. A store's balance is the
//! sum of its transactions' signed amounts and is always computed on demand,
//! never stored.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod parser;
pub mod types;

pub use crate::core::{
    AdminService, CnabProcessor, InMemoryDatabase, ParseOutcome, StoreRepository, StoreService,
    StoreSummary, TransactionInput, TransactionRepository, TransactionService,
};
pub use io::{read_cnab_lines, write_store_summaries_csv};
pub use parser::{decode_line, partition_lines, ParsedLine};
pub use types::{CnabError, Store, Transaction, TransactionType};
