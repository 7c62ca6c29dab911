//! Business logic components
//!
//! - [`traits`] - repository ports for stores and transactions
//! - [`memory`] - shared in-memory persistence implementing the ports
//! - [`processor`] - the CNAB batch ingestion pipeline
//! - [`services`] - CRUD and admin aggregation services

pub mod memory;
pub mod processor;
pub mod services;
pub mod traits;

pub use memory::{InMemoryDatabase, InMemoryStoreRepository, InMemoryTransactionRepository};
pub use processor::{CnabProcessor, ParseOutcome};
pub use services::{AdminService, StoreService, StoreSummary, TransactionInput, TransactionService};
pub use traits::{StoreRepository, TransactionRepository};
