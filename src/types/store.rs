//! Store entity for the CNAB engine
//!
//! A store is the merchant/payee aggregation point that transactions are
//! grouped under. The store owns its transactions in the domain sense:
//! deleting a store removes them, and the balance is always a computed view
//! over the owned collection, never a stored field.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::types::error::CnabError;
use crate::types::transaction::Transaction;

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;

/// Merchant/payee entity owning a collection of transactions
///
/// Name and owner name are validated at construction and on every details
/// update: non-blank, 3 to 100 characters. The `transactions` collection is
/// the loaded view of the store's owned transactions; repositories populate
/// it on reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    id: Uuid,
    name: String,
    owner_name: String,
    transactions: Vec<Transaction>,
}

impl Store {
    /// Create a new store with a fresh id
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if the name or owner name is blank,
    /// shorter than 3 characters, or longer than 100.
    pub fn new(name: &str, owner_name: &str) -> Result<Self, CnabError> {
        Self::with_id(Uuid::new_v4(), name, owner_name)
    }

    /// Create a store with a caller-supplied id (rehydration)
    ///
    /// # Errors
    ///
    /// Same validation as [`Store::new`].
    pub fn with_id(id: Uuid, name: &str, owner_name: &str) -> Result<Self, CnabError> {
        Self::validate(name, owner_name)?;

        Ok(Store {
            id,
            name: name.to_string(),
            owner_name: owner_name.to_string(),
            transactions: Vec::new(),
        })
    }

    /// Append a transaction to the owned collection
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Replace the loaded transaction collection
    ///
    /// Used by repositories when hydrating a store together with its
    /// transactions.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Current balance: the sum of owned transactions' signed amounts
    ///
    /// Recomputed on every call from the live collection; zero for a store
    /// with no transactions. This value is never persisted.
    pub fn balance(&self) -> Decimal {
        self.transactions
            .iter()
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Update name and owner name after revalidation
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if either value is invalid; neither
    /// field changes in that case.
    pub fn update_details(&mut self, name: &str, owner_name: &str) -> Result<(), CnabError> {
        Self::validate(name, owner_name)?;
        self.name = name.to_string();
        self.owner_name = owner_name.to_string();
        Ok(())
    }

    fn validate(name: &str, owner_name: &str) -> Result<(), CnabError> {
        Self::validate_name("name", name)?;
        Self::validate_name("owner name", owner_name)
    }

    fn validate_name(field: &str, value: &str) -> Result<(), CnabError> {
        let len = value.chars().count();
        if value.trim().is_empty() || len < NAME_MIN {
            return Err(CnabError::name_too_short(field, value));
        }
        if len > NAME_MAX {
            return Err(CnabError::name_too_long(field, len));
        }
        Ok(())
    }

    /// Unique identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Store name (the natural key used during batch ingestion)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner name
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// The loaded transaction collection
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
