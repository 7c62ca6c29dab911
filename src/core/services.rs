//! CRUD and aggregation services over the repository ports
//!
//! Thin pass-throughs with the miss policy of the surrounding system:
//! get-by-id on an unknown id is `Ok(None)` with an error-level log, adding
//! or updating a transaction whose store does not exist returns `Ok(None)`
//! without persisting, and deletes are idempotent (a miss logs but does not
//! raise).

use chrono::{NaiveDateTime, NaiveTime};
use log::error;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::traits::{StoreRepository, TransactionRepository};
use crate::types::{CnabError, Store, Transaction, TransactionType};

/// Read model for a store, carrying the computed balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    /// Store identifier
    pub id: Uuid,
    /// Store name
    pub name: String,
    /// Owner name
    pub owner_name: String,
    /// Balance computed from the owned transactions at read time
    pub balance: Decimal,
}

impl StoreSummary {
    fn from_store(store: &Store) -> Self {
        StoreSummary {
            id: store.id(),
            name: store.name().to_string(),
            owner_name: store.owner_name().to_string(),
            balance: store.balance(),
        }
    }
}

/// Input fields for creating or updating a transaction
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Owning store (must already exist)
    pub store_id: Uuid,
    /// Transaction category
    pub tx_type: TransactionType,
    /// Occurrence instant
    pub occurred_at: NaiveDateTime,
    /// Positive amount
    pub amount: Decimal,
    /// 11-character tax id
    pub cpf: String,
    /// Masked card number
    pub card_number: String,
    /// Time-of-day component
    pub time: NaiveTime,
}

/// Store CRUD service
pub struct StoreService<S> {
    stores: S,
}

impl<S: StoreRepository> StoreService<S> {
    /// Create a service over the given repository
    pub fn new(stores: S) -> Self {
        StoreService { stores }
    }

    /// List all stores with computed balances
    pub fn get_all(&self) -> Result<Vec<StoreSummary>, CnabError> {
        let stores = self.stores.get_all()?;
        Ok(stores.iter().map(StoreSummary::from_store).collect())
    }

    /// Get one store by id; `Ok(None)` when absent
    pub fn get_by_id(&self, id: Uuid) -> Result<Option<StoreSummary>, CnabError> {
        match self.stores.get_by_id(id)? {
            Some(store) => Ok(Some(StoreSummary::from_store(&store))),
            None => {
                error!("Store not found");
                Ok(None)
            }
        }
    }

    /// Create a store from validated input
    ///
    /// # Errors
    ///
    /// Returns a domain validation error for a bad name or owner name.
    pub fn add(&mut self, name: &str, owner_name: &str) -> Result<StoreSummary, CnabError> {
        let store = Store::new(name, owner_name)?;
        let store = self.stores.add(store)?;
        Ok(StoreSummary::from_store(&store))
    }

    /// Update a store's details; `Ok(None)` when the id is unknown
    ///
    /// # Errors
    ///
    /// Returns a domain validation error for a bad name or owner name.
    pub fn update(
        &mut self,
        id: Uuid,
        name: &str,
        owner_name: &str,
    ) -> Result<Option<StoreSummary>, CnabError> {
        let Some(mut store) = self.stores.get_by_id(id)? else {
            error!("Store not found");
            return Ok(None);
        };

        store.update_details(name, owner_name)?;
        let store = self.stores.update(store)?;
        Ok(Some(StoreSummary::from_store(&store)))
    }

    /// Delete a store by id, cascading to its transactions; idempotent
    pub fn delete(&mut self, id: Uuid) -> Result<(), CnabError> {
        if self.stores.get_by_id(id)?.is_none() {
            error!("Store not found");
        }
        self.stores.delete(id)
    }

    /// Computed balance of one store; zero (with a log) when absent
    pub fn balance(&self, id: Uuid) -> Result<Decimal, CnabError> {
        match self.stores.get_by_id(id)? {
            Some(store) => Ok(store.balance()),
            None => {
                error!("Store not found");
                Ok(Decimal::ZERO)
            }
        }
    }
}

/// Transaction CRUD service
///
/// Holds both ports: adding a transaction requires the referenced store to
/// exist.
pub struct TransactionService<S, T> {
    stores: S,
    transactions: T,
}

impl<S, T> TransactionService<S, T>
where
    S: StoreRepository,
    T: TransactionRepository,
{
    /// Create a service over the given repositories
    pub fn new(stores: S, transactions: T) -> Self {
        TransactionService {
            stores,
            transactions,
        }
    }

    /// List all transactions
    pub fn get_all(&self) -> Result<Vec<Transaction>, CnabError> {
        self.transactions.get_all()
    }

    /// Get one transaction by id; `Ok(None)` when absent
    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Transaction>, CnabError> {
        let transaction = self.transactions.get_by_id(id)?;
        if transaction.is_none() {
            error!("Transaction not found");
        }
        Ok(transaction)
    }

    /// Create a transaction for an existing store
    ///
    /// Returns `Ok(None)` without persisting when the referenced store does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if the input violates an entity
    /// invariant.
    pub fn add(&mut self, input: TransactionInput) -> Result<Option<Transaction>, CnabError> {
        if self.stores.get_by_id(input.store_id)?.is_none() {
            error!("Store not found");
            return Ok(None);
        }

        let transaction = Transaction::new(
            input.tx_type,
            input.occurred_at,
            input.amount,
            &input.cpf,
            &input.card_number,
            input.time,
            input.store_id,
        )?;

        let transaction = self.transactions.add(transaction)?;
        Ok(Some(transaction))
    }

    /// Update a transaction's mutable fields; `Ok(None)` when the id is
    /// unknown
    ///
    /// The store reference in the input is ignored: a transaction never
    /// moves between stores.
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if the input violates an entity
    /// invariant.
    pub fn update(
        &mut self,
        id: Uuid,
        input: TransactionInput,
    ) -> Result<Option<Transaction>, CnabError> {
        let Some(mut transaction) = self.transactions.get_by_id(id)? else {
            error!("Transaction not found");
            return Ok(None);
        };

        transaction.update_details(
            input.tx_type,
            input.occurred_at,
            input.amount,
            &input.cpf,
            &input.card_number,
            input.time,
        )?;

        let transaction = self.transactions.update(transaction)?;
        Ok(Some(transaction))
    }

    /// Delete a transaction by id; idempotent
    pub fn delete(&mut self, id: Uuid) -> Result<(), CnabError> {
        if self.transactions.get_by_id(id)?.is_none() {
            error!("Transaction not found");
        }
        self.transactions.delete(id)
    }
}

/// Aggregation service for the admin surface
pub struct AdminService<S, T> {
    stores: S,
    transactions: T,
}

impl<S, T> AdminService<S, T>
where
    S: StoreRepository,
    T: TransactionRepository,
{
    /// Create a service over the given repositories
    pub fn new(stores: S, transactions: T) -> Self {
        AdminService {
            stores,
            transactions,
        }
    }

    /// Total balance across all stores
    pub fn total_balance(&self) -> Result<Decimal, CnabError> {
        let stores = self.stores.get_all()?;
        Ok(stores.iter().map(Store::balance).sum())
    }

    /// Number of stores
    pub fn store_count(&self) -> Result<usize, CnabError> {
        Ok(self.stores.get_all()?.len())
    }

    /// Number of transactions
    pub fn transaction_count(&self) -> Result<usize, CnabError> {
        Ok(self.transactions.get_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::InMemoryDatabase;
    use chrono::NaiveDate;

    fn occurrence() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(15, 34, 53)
            .unwrap()
    }

    fn input(store_id: Uuid, tx_type: TransactionType, cents: i64) -> TransactionInput {
        TransactionInput {
            store_id,
            tx_type,
            occurred_at: occurrence(),
            amount: Decimal::new(cents, 2),
            cpf: "00962067601".to_string(),
            card_number: "74753****315".to_string(),
            time: occurrence().time(),
        }
    }

    fn store_service(db: &InMemoryDatabase) -> StoreService<crate::core::memory::InMemoryStoreRepository> {
        StoreService::new(db.store_repository())
    }

    fn transaction_service(
        db: &InMemoryDatabase,
    ) -> TransactionService<
        crate::core::memory::InMemoryStoreRepository,
        crate::core::memory::InMemoryTransactionRepository,
    > {
        TransactionService::new(db.store_repository(), db.transaction_repository())
    }

    #[test]
    fn test_store_crud_round_trip() {
        let db = InMemoryDatabase::new();
        let mut service = store_service(&db);

        let created = service.add("JOHN'S Bar", "JOHN DOE").unwrap();
        assert_eq!(created.balance, Decimal::ZERO);

        let fetched = service.get_by_id(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = service
            .update(created.id, "MARY'S Pub", "MARY MAJOR")
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "MARY'S Pub");

        service.delete(created.id).unwrap();
        assert!(service.get_by_id(created.id).unwrap().is_none());
    }

    #[test]
    fn test_store_get_by_id_miss_is_none() {
        let db = InMemoryDatabase::new();
        let service = store_service(&db);
        assert!(service.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_store_update_miss_is_none() {
        let db = InMemoryDatabase::new();
        let mut service = store_service(&db);
        let result = service.update(Uuid::new_v4(), "JOHN'S Bar", "JOHN DOE").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_store_delete_is_idempotent() {
        let db = InMemoryDatabase::new();
        let mut service = store_service(&db);
        assert!(service.delete(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_store_add_rejects_invalid_input() {
        let db = InMemoryDatabase::new();
        let mut service = store_service(&db);
        assert!(service.add("AB", "JOHN DOE").is_err());
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_balance_missing_store_is_zero() {
        let db = InMemoryDatabase::new();
        let service = store_service(&db);
        assert_eq!(service.balance(Uuid::new_v4()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_summaries_carry_computed_balance() {
        let db = InMemoryDatabase::new();
        let mut stores = store_service(&db);
        let mut transactions = transaction_service(&db);

        let summary = stores.add("JOHN'S Bar", "JOHN DOE").unwrap();
        transactions
            .add(input(summary.id, TransactionType::Debit, 10000))
            .unwrap()
            .unwrap();
        transactions
            .add(input(summary.id, TransactionType::Bill, 5000))
            .unwrap()
            .unwrap();

        let all = stores.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].balance, Decimal::new(5000, 2));
        assert_eq!(stores.balance(summary.id).unwrap(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_transaction_add_unknown_store_is_none_and_unpersisted() {
        let db = InMemoryDatabase::new();
        let mut service = transaction_service(&db);

        let result = service
            .add(input(Uuid::new_v4(), TransactionType::Debit, 10000))
            .unwrap();

        assert!(result.is_none());
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_transaction_update_and_delete_contracts() {
        let db = InMemoryDatabase::new();
        let mut stores = store_service(&db);
        let mut service = transaction_service(&db);

        let store = stores.add("JOHN'S Bar", "JOHN DOE").unwrap();
        let transaction = service
            .add(input(store.id, TransactionType::Debit, 10000))
            .unwrap()
            .unwrap();

        let updated = service
            .update(transaction.id(), input(store.id, TransactionType::Rent, 20000))
            .unwrap()
            .unwrap();
        assert_eq!(updated.tx_type(), TransactionType::Rent);
        assert_eq!(updated.signed_amount(), Decimal::new(-20000, 2));

        // Update miss
        assert!(service
            .update(Uuid::new_v4(), input(store.id, TransactionType::Debit, 100))
            .unwrap()
            .is_none());

        // Idempotent delete
        service.delete(transaction.id()).unwrap();
        service.delete(transaction.id()).unwrap();
        assert!(service.get_by_id(transaction.id()).unwrap().is_none());
    }

    #[test]
    fn test_admin_aggregates() {
        let db = InMemoryDatabase::new();
        let mut stores = store_service(&db);
        let mut transactions = transaction_service(&db);

        let bar = stores.add("JOHN'S Bar", "JOHN DOE").unwrap();
        let pub_ = stores.add("MARY'S Pub", "MARY MAJOR").unwrap();
        transactions
            .add(input(bar.id, TransactionType::Debit, 10000))
            .unwrap()
            .unwrap();
        transactions
            .add(input(pub_.id, TransactionType::Rent, 30000))
            .unwrap()
            .unwrap();

        let admin = AdminService::new(db.store_repository(), db.transaction_repository());
        assert_eq!(admin.total_balance().unwrap(), Decimal::new(-20000, 2));
        assert_eq!(admin.store_count().unwrap(), 2);
        assert_eq!(admin.transaction_count().unwrap(), 2);
    }

    #[test]
    fn test_admin_aggregates_empty() {
        let db = InMemoryDatabase::new();
        let admin = AdminService::new(db.store_repository(), db.transaction_repository());
        assert_eq!(admin.total_balance().unwrap(), Decimal::ZERO);
        assert_eq!(admin.store_count().unwrap(), 0);
        assert_eq!(admin.transaction_count().unwrap(), 0);
    }
}
