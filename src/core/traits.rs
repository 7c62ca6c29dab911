//! Repository ports for store and transaction persistence
//!
//! These traits are the only seam between the domain pipeline and the
//! persistence layer. Not-found is reported as `Ok(None)`, never as an
//! error; persistence failures surface as [`CnabError::Storage`] and are
//! logged at the repository boundary before propagating.
//!
//! [`CnabError::Storage`]: crate::types::CnabError

use uuid::Uuid;

use crate::types::{CnabError, Store, Transaction};

/// Persistence port for stores
///
/// Reads return stores with their owned transaction collections loaded, so
/// `Store::balance` is computable on any returned value.
pub trait StoreRepository {
    /// Get all stores with their transactions loaded
    fn get_all(&self) -> Result<Vec<Store>, CnabError>;

    /// Get a store by id, `Ok(None)` when absent
    fn get_by_id(&self, id: Uuid) -> Result<Option<Store>, CnabError>;

    /// Get a store by exact name match, `Ok(None)` when absent
    ///
    /// The name is the natural key used by batch ingestion's get-or-create.
    fn get_by_name(&self, name: &str) -> Result<Option<Store>, CnabError>;

    /// Persist a new store
    fn add(&mut self, store: Store) -> Result<Store, CnabError>;

    /// Persist changes to an existing store
    fn update(&mut self, store: Store) -> Result<Store, CnabError>;

    /// Delete a store by id, cascading to its owned transactions
    ///
    /// Deleting an unknown id is a no-op.
    fn delete(&mut self, id: Uuid) -> Result<(), CnabError>;
}

/// Persistence port for transactions
pub trait TransactionRepository {
    /// Get all transactions
    fn get_all(&self) -> Result<Vec<Transaction>, CnabError>;

    /// Get a transaction by id, `Ok(None)` when absent
    fn get_by_id(&self, id: Uuid) -> Result<Option<Transaction>, CnabError>;

    /// Persist a new transaction
    fn add(&mut self, transaction: Transaction) -> Result<Transaction, CnabError>;

    /// Persist changes to an existing transaction
    fn update(&mut self, transaction: Transaction) -> Result<Transaction, CnabError>;

    /// Delete a transaction by id; deleting an unknown id is a no-op
    fn delete(&mut self, id: Uuid) -> Result<(), CnabError>;
}
