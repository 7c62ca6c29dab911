//! CNAB batch ingestion pipeline
//!
//! The processor orchestrates validate -> decode -> resolve store -> persist
//! for a batch of raw lines. The pipeline is strictly sequential: line N's
//! store resolution and persistence complete before line N+1 begins, which
//! is what keeps the at-least-one-store-per-name behavior of get-or-create
//! from degrading further.
//!
//! # Failure Policy
//!
//! Shape validation is all-or-nothing and happens before any persistence
//! I/O: a single invalid-length line blocks the whole file and nothing is
//! written. Past that gate, the per-line decode/persist loop is fail-fast
//! with no batch-level rollback; transactions persisted for earlier lines
//! stay persisted when a later line aborts the batch.

use serde::Serialize;

use crate::core::traits::{StoreRepository, TransactionRepository};
use crate::parser::{decode_line, partition_lines};
use crate::types::{CnabError, Store, Transaction};

/// Result of ingesting one CNAB file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    /// Whether the file was accepted and fully processed
    pub success: bool,
    /// Number of transactions persisted
    pub total_processed: usize,
    /// Human-readable outcome description
    pub message: String,
}

/// Batch processor over a pair of repository ports
///
/// Owns the repositories for the duration of ingestion; all persistence
/// goes through the ports, so any backing implementation works.
pub struct CnabProcessor<S, T> {
    stores: S,
    transactions: T,
}

impl<S, T> CnabProcessor<S, T>
where
    S: StoreRepository,
    T: TransactionRepository,
{
    /// Create a processor over the given repositories
    pub fn new(stores: S, transactions: T) -> Self {
        CnabProcessor {
            stores,
            transactions,
        }
    }

    /// Ingest a batch of raw lines
    ///
    /// Partitions the lines by shape first; if any line has an invalid
    /// length the whole file is rejected with a failure outcome and zero
    /// processed count, regardless of how many valid lines exist. Otherwise
    /// every line is processed in input order.
    ///
    /// An empty batch is a success with zero processed.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding, domain validation, or persistence fails
    /// for any line once processing has begun. Shape rejection is not an
    /// error: it is reported in the outcome.
    pub fn parse_batch<I>(&mut self, lines: I) -> Result<ParseOutcome, CnabError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let (valid_lines, invalid_lines) = partition_lines(lines);

        if !invalid_lines.is_empty() {
            return Ok(ParseOutcome {
                success: false,
                total_processed: 0,
                message: format!(
                    "Invalid line lengths detected in {} lines.",
                    invalid_lines.len()
                ),
            });
        }

        let total_processed = self.process_valid_lines(&valid_lines)?;

        Ok(ParseOutcome {
            success: true,
            total_processed,
            message: "File processed successfully.".to_string(),
        })
    }

    /// Process pre-validated lines in order, returning the count persisted
    ///
    /// # Errors
    ///
    /// The first decode, validation, or persistence failure propagates
    /// immediately and aborts the remaining lines.
    pub fn process_valid_lines(&mut self, valid_lines: &[String]) -> Result<usize, CnabError> {
        let mut total_processed = 0;

        for line in valid_lines {
            let transaction = self.parse_line(line)?;
            self.transactions.add(transaction)?;
            total_processed += 1;
        }

        Ok(total_processed)
    }

    /// Decode one line and build its transaction entity
    ///
    /// Resolves (or creates) the store named by the line, then constructs a
    /// validated transaction owned by it. The transaction is not persisted
    /// here; that is the batch loop's job.
    ///
    /// # Errors
    ///
    /// Returns an error on decode failure or domain invariant violation.
    pub fn parse_line(&mut self, line: &str) -> Result<Transaction, CnabError> {
        let parsed = decode_line(line)?;
        let store = self.get_or_create_store(&parsed.store_name, &parsed.owner_name)?;

        Transaction::new(
            parsed.tx_type,
            parsed.occurred_at,
            parsed.amount,
            &parsed.cpf,
            &parsed.card_number,
            parsed.time,
            store.id(),
        )
    }

    /// Look up a store by exact name, creating it on first sight
    ///
    /// A hit returns the stored record unchanged: the owner name from the
    /// current line is not applied to an existing store (first-seen owner
    /// wins). A miss constructs a new store, which is where the name/owner
    /// length invariants apply, and persists it before returning.
    ///
    /// Read-then-write: not atomic against concurrent ingestion of the same
    /// new name. Callers serialize batches when that matters.
    ///
    /// # Errors
    ///
    /// Returns an error on domain validation or persistence failure.
    pub fn get_or_create_store(
        &mut self,
        store_name: &str,
        owner_name: &str,
    ) -> Result<Store, CnabError> {
        match self.stores.get_by_name(store_name)? {
            Some(store) => Ok(store),
            None => {
                let store = Store::new(store_name, owner_name)?;
                self.stores.add(store)
            }
        }
    }
}
