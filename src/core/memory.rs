//! In-memory persistence for stores and transactions
//!
//! This module provides a shared in-memory database and repository handles
//! implementing the persistence ports. Both repositories operate on the same
//! underlying maps so that store reads can load the store's owned
//! transactions and store deletes can cascade to them.
//!
//! The database serializes individual repository calls behind a mutex, but
//! the get-or-create pattern built on top of it remains read-then-write:
//! concurrent batch ingestion against a brand-new store name can still
//! create duplicates, and callers are expected to serialize batches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, warn};
use uuid::Uuid;

use crate::core::traits::{StoreRepository, TransactionRepository};
use crate::types::{CnabError, Store, Transaction};

#[derive(Debug, Default)]
struct DbInner {
    stores: HashMap<Uuid, Store>,
    transactions: HashMap<Uuid, Transaction>,
}

/// Shared in-memory database
///
/// Cheap to clone; all clones and the repository handles derived from them
/// operate on the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    inner: Arc<Mutex<DbInner>>,
}

impl InMemoryDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository handle over the store map
    pub fn store_repository(&self) -> InMemoryStoreRepository {
        InMemoryStoreRepository { db: self.clone() }
    }

    /// Repository handle over the transaction map
    pub fn transaction_repository(&self) -> InMemoryTransactionRepository {
        InMemoryTransactionRepository { db: self.clone() }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DbInner>, CnabError> {
        self.inner
            .lock()
            .map_err(|_| CnabError::storage("database mutex poisoned"))
    }
}

/// Clone a store without its loaded transaction collection
///
/// The maps hold detached entities; the transactions map is the single
/// source of truth and reads hydrate the collection from it.
fn detached(store: &Store) -> Result<Store, CnabError> {
    Store::with_id(store.id(), store.name(), store.owner_name())
}

/// Hydrate a store with its owned transactions (Include-style read)
fn hydrated(store: &Store, inner: &DbInner) -> Result<Store, CnabError> {
    let mut store = detached(store)?;
    let mut owned: Vec<Transaction> = inner
        .transactions
        .values()
        .filter(|t| t.store_id() == store.id())
        .cloned()
        .collect();
    owned.sort_by_key(|t| (t.occurred_at(), t.id()));
    store.set_transactions(owned);
    Ok(store)
}

/// In-memory implementation of the store persistence port
#[derive(Debug, Clone)]
pub struct InMemoryStoreRepository {
    db: InMemoryDatabase,
}

impl StoreRepository for InMemoryStoreRepository {
    fn get_all(&self) -> Result<Vec<Store>, CnabError> {
        let inner = self.db.lock()?;

        if inner.stores.is_empty() {
            warn!("No stores found");
        }

        let mut stores = inner
            .stores
            .values()
            .map(|s| hydrated(s, &inner))
            .collect::<Result<Vec<_>, _>>()?;
        stores.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(stores)
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<Store>, CnabError> {
        let inner = self.db.lock()?;

        match inner.stores.get(&id) {
            Some(store) => Ok(Some(hydrated(store, &inner)?)),
            None => {
                warn!("No store found with id {id}");
                Ok(None)
            }
        }
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Store>, CnabError> {
        let inner = self.db.lock()?;

        // Exact name match, no transaction loading: callers of the natural
        // key lookup only need the store record itself.
        let store = inner.stores.values().find(|s| s.name() == name).cloned();
        if store.is_none() {
            warn!("No store found with name {name}");
        }
        Ok(store)
    }

    fn add(&mut self, store: Store) -> Result<Store, CnabError> {
        let mut inner = self.db.lock()?;
        inner.stores.insert(store.id(), detached(&store)?);
        Ok(store)
    }

    fn update(&mut self, store: Store) -> Result<Store, CnabError> {
        let mut inner = self.db.lock()?;
        inner.stores.insert(store.id(), detached(&store)?);
        Ok(store)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), CnabError> {
        let mut inner = self.db.lock()?;

        if inner.stores.remove(&id).is_some() {
            // Application-level cascade: the owned transactions go with the
            // store.
            inner.transactions.retain(|_, t| t.store_id() != id);
        }
        Ok(())
    }
}

/// In-memory implementation of the transaction persistence port
#[derive(Debug, Clone)]
pub struct InMemoryTransactionRepository {
    db: InMemoryDatabase,
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn get_all(&self) -> Result<Vec<Transaction>, CnabError> {
        let inner = self.db.lock()?;

        if inner.transactions.is_empty() {
            warn!("No transactions found");
        }

        let mut transactions: Vec<Transaction> = inner.transactions.values().cloned().collect();
        transactions.sort_by_key(|t| (t.occurred_at(), t.id()));
        Ok(transactions)
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<Transaction>, CnabError> {
        let inner = self.db.lock()?;

        let transaction = inner.transactions.get(&id).cloned();
        if transaction.is_none() {
            warn!("No transaction found with id {id}");
        }
        Ok(transaction)
    }

    fn add(&mut self, transaction: Transaction) -> Result<Transaction, CnabError> {
        let mut inner = self.db.lock()?;

        // Referential integrity: a transaction cannot outlive or precede its
        // store. Mirrors a foreign-key violation in a real store.
        if !inner.stores.contains_key(&transaction.store_id()) {
            let err = CnabError::storage(format!(
                "cannot add transaction {}: unknown store {}",
                transaction.id(),
                transaction.store_id()
            ));
            error!("Error when adding a new transaction: {err}");
            return Err(err);
        }

        inner.transactions.insert(transaction.id(), transaction.clone());
        Ok(transaction)
    }

    fn update(&mut self, transaction: Transaction) -> Result<Transaction, CnabError> {
        let mut inner = self.db.lock()?;
        inner.transactions.insert(transaction.id(), transaction.clone());
        Ok(transaction)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), CnabError> {
        let mut inner = self.db.lock()?;
        inner.transactions.remove(&id);
        Ok(())
    }
}
