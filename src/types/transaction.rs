//! Transaction-related types for the CNAB engine
//!
//! This module defines the transaction type classification and the validated
//! transaction entity used throughout the system.
//!
//! # Classification
//!
//! The CNAB format defines nine transaction categories with fixed numeric
//! codes 1-9. Six of them are income (they increase a store's balance), the
//! remaining three are expense. The rule is fixed, not configurable, and is
//! the sole input to [`Transaction::signed_amount`] and to balance
//! aggregation.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::CnabError;

/// Transaction categories defined by the CNAB format
///
/// Discriminants match the single-digit codes used in the fixed-width file.
/// The enum is closed: a raw integer only becomes a `TransactionType` through
/// the fallible [`TransactionType::from_code`] conversion at the decode
/// boundary, so undefined codes cannot exist past that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionType {
    /// Debit card payment received by the store
    Debit = 1,
    /// Bill payment made by the store
    Bill = 2,
    /// Financing installment paid by the store
    Financing = 3,
    /// Credit card payment received by the store
    Credit = 4,
    /// Loan funds received by the store
    LoanReceipt = 5,
    /// Sales proceeds received by the store
    Sales = 6,
    /// TED wire transfer received by the store
    TedReceipt = 7,
    /// DOC wire transfer received by the store
    DocReceipt = 8,
    /// Rent payment made by the store
    Rent = 9,
}

impl TransactionType {
    /// Convert a raw numeric code into a transaction type
    ///
    /// This is the only system boundary where integers become types; codes
    /// outside 1-9 are rejected with a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`CnabError::InvalidTypeCode`] if the code is not defined.
    pub fn from_code(code: u8) -> Result<Self, CnabError> {
        match code {
            1 => Ok(TransactionType::Debit),
            2 => Ok(TransactionType::Bill),
            3 => Ok(TransactionType::Financing),
            4 => Ok(TransactionType::Credit),
            5 => Ok(TransactionType::LoanReceipt),
            6 => Ok(TransactionType::Sales),
            7 => Ok(TransactionType::TedReceipt),
            8 => Ok(TransactionType::DocReceipt),
            9 => Ok(TransactionType::Rent),
            _ => Err(CnabError::InvalidTypeCode { code }),
        }
    }

    /// The numeric code of this type as written in the file
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this type is income-classified
    ///
    /// Income types contribute their amount positively to the store balance;
    /// everything else is expense.
    pub fn is_income(self) -> bool {
        matches!(
            self,
            TransactionType::Debit
                | TransactionType::Credit
                | TransactionType::LoanReceipt
                | TransactionType::Sales
                | TransactionType::TedReceipt
                | TransactionType::DocReceipt
        )
    }

    /// Whether this type is expense-classified (the negation of income)
    pub fn is_expense(self) -> bool {
        !self.is_income()
    }
}

/// A single financial movement belonging to a store
///
/// Constructed only through the validating constructors, so every reachable
/// value satisfies the domain invariants: amount strictly positive, CPF
/// exactly 11 characters, card number non-blank. The id and owning store
/// reference are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: Uuid,
    tx_type: TransactionType,
    occurred_at: NaiveDateTime,
    amount: Decimal,
    cpf: String,
    card_number: String,
    time: NaiveTime,
    store_id: Uuid,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if any invariant fails; no entity
    /// is produced in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tx_type: TransactionType,
        occurred_at: NaiveDateTime,
        amount: Decimal,
        cpf: &str,
        card_number: &str,
        time: NaiveTime,
        store_id: Uuid,
    ) -> Result<Self, CnabError> {
        Self::with_id(
            Uuid::new_v4(),
            tx_type,
            occurred_at,
            amount,
            cpf,
            card_number,
            time,
            store_id,
        )
    }

    /// Create a transaction with a caller-supplied id (rehydration)
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if any invariant fails.
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: Uuid,
        tx_type: TransactionType,
        occurred_at: NaiveDateTime,
        amount: Decimal,
        cpf: &str,
        card_number: &str,
        time: NaiveTime,
        store_id: Uuid,
    ) -> Result<Self, CnabError> {
        Self::validate(amount, cpf, card_number)?;

        Ok(Transaction {
            id,
            tx_type,
            occurred_at,
            amount,
            cpf: cpf.to_string(),
            card_number: card_number.to_string(),
            time,
            store_id,
        })
    }

    /// Amount with polarity applied per the income/expense classification
    ///
    /// Derived on every call, never stored.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Whether this transaction's type is income-classified
    pub fn is_income(&self) -> bool {
        self.tx_type.is_income()
    }

    /// Whether this transaction's type is expense-classified
    pub fn is_expense(&self) -> bool {
        self.tx_type.is_expense()
    }

    /// Update the mutable fields after revalidation
    ///
    /// The id and store reference are immutable; everything else is replaced
    /// atomically (no field is changed if validation fails).
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if any invariant fails.
    pub fn update_details(
        &mut self,
        tx_type: TransactionType,
        occurred_at: NaiveDateTime,
        amount: Decimal,
        cpf: &str,
        card_number: &str,
        time: NaiveTime,
    ) -> Result<(), CnabError> {
        Self::validate(amount, cpf, card_number)?;

        self.tx_type = tx_type;
        self.occurred_at = occurred_at;
        self.amount = amount;
        self.cpf = cpf.to_string();
        self.card_number = card_number.to_string();
        self.time = time;

        Ok(())
    }

    fn validate(amount: Decimal, cpf: &str, card_number: &str) -> Result<(), CnabError> {
        if amount <= Decimal::ZERO {
            return Err(CnabError::InvalidAmount { amount });
        }
        if cpf.trim().is_empty() || cpf.chars().count() != 11 {
            return Err(CnabError::invalid_cpf(cpf));
        }
        if card_number.trim().is_empty() {
            return Err(CnabError::MissingCardNumber);
        }
        Ok(())
    }

    /// Unique identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Transaction category
    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    /// Occurrence instant (date and time combined)
    pub fn occurred_at(&self) -> NaiveDateTime {
        self.occurred_at
    }

    /// Monetary amount, always positive
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// 11-character tax id
    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    /// Masked card number
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Time-of-day component of the occurrence
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Owning store reference (non-owning back-reference)
    pub fn store_id(&self) -> Uuid {
        self.store_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn occurrence() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(15, 34, 53)
            .unwrap()
    }

    fn build(tx_type: TransactionType, amount: Decimal) -> Result<Transaction, CnabError> {
        Transaction::new(
            tx_type,
            occurrence(),
            amount,
            "00962067601",
            "74753****315",
            occurrence().time(),
            Uuid::new_v4(),
        )
    }

    #[rstest]
    #[case(1, TransactionType::Debit)]
    #[case(2, TransactionType::Bill)]
    #[case(3, TransactionType::Financing)]
    #[case(4, TransactionType::Credit)]
    #[case(5, TransactionType::LoanReceipt)]
    #[case(6, TransactionType::Sales)]
    #[case(7, TransactionType::TedReceipt)]
    #[case(8, TransactionType::DocReceipt)]
    #[case(9, TransactionType::Rent)]
    fn test_from_code_round_trips(#[case] code: u8, #[case] expected: TransactionType) {
        let tx_type = TransactionType::from_code(code).unwrap();
        assert_eq!(tx_type, expected);
        assert_eq!(tx_type.code(), code);
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    #[case(255)]
    fn test_from_code_rejects_undefined(#[case] code: u8) {
        let err = TransactionType::from_code(code).unwrap_err();
        assert_eq!(err, CnabError::InvalidTypeCode { code });
    }

    #[rstest]
    #[case::debit(TransactionType::Debit, true)]
    #[case::bill(TransactionType::Bill, false)]
    #[case::financing(TransactionType::Financing, false)]
    #[case::credit(TransactionType::Credit, true)]
    #[case::loan_receipt(TransactionType::LoanReceipt, true)]
    #[case::sales(TransactionType::Sales, true)]
    #[case::ted_receipt(TransactionType::TedReceipt, true)]
    #[case::doc_receipt(TransactionType::DocReceipt, true)]
    #[case::rent(TransactionType::Rent, false)]
    fn test_income_expense_classification(#[case] tx_type: TransactionType, #[case] income: bool) {
        assert_eq!(tx_type.is_income(), income);
        assert_eq!(tx_type.is_expense(), !income);
    }

    #[rstest]
    #[case::income_positive(TransactionType::Debit, Decimal::new(14200, 2), Decimal::new(14200, 2))]
    #[case::expense_negative(TransactionType::Rent, Decimal::new(14200, 2), Decimal::new(-14200, 2))]
    #[case::bill_negative(TransactionType::Bill, Decimal::new(5000, 2), Decimal::new(-5000, 2))]
    fn test_signed_amount(
        #[case] tx_type: TransactionType,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        let transaction = build(tx_type, amount).unwrap();
        assert_eq!(transaction.signed_amount(), expected);
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-100, 2))]
    fn test_rejects_non_positive_amount(#[case] amount: Decimal) {
        let err = build(TransactionType::Debit, amount).unwrap_err();
        assert_eq!(err, CnabError::InvalidAmount { amount });
    }

    #[rstest]
    #[case::too_short("123")]
    #[case::too_long("009620676011234")]
    #[case::blank("           ")]
    #[case::empty("")]
    fn test_rejects_bad_cpf(#[case] cpf: &str) {
        let err = Transaction::new(
            TransactionType::Debit,
            occurrence(),
            Decimal::ONE,
            cpf,
            "74753****315",
            occurrence().time(),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert!(matches!(err, CnabError::InvalidCpf { .. }));
    }

    #[test]
    fn test_rejects_blank_card_number() {
        let err = Transaction::new(
            TransactionType::Debit,
            occurrence(),
            Decimal::ONE,
            "00962067601",
            "   ",
            occurrence().time(),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err, CnabError::MissingCardNumber);
    }

    #[test]
    fn test_update_details_replaces_mutable_fields() {
        let mut transaction = build(TransactionType::Debit, Decimal::new(14200, 2)).unwrap();
        let id = transaction.id();
        let store_id = transaction.store_id();

        let new_occurrence = NaiveDate::from_ymd_opt(2019, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        transaction
            .update_details(
                TransactionType::Rent,
                new_occurrence,
                Decimal::new(30000, 2),
                "11111111111",
                "1234****5678",
                new_occurrence.time(),
            )
            .unwrap();

        assert_eq!(transaction.tx_type(), TransactionType::Rent);
        assert_eq!(transaction.amount(), Decimal::new(30000, 2));
        assert_eq!(transaction.cpf(), "11111111111");
        assert_eq!(transaction.signed_amount(), Decimal::new(-30000, 2));
        // Immutable after creation
        assert_eq!(transaction.id(), id);
        assert_eq!(transaction.store_id(), store_id);
    }

    #[test]
    fn test_update_details_rejects_and_leaves_fields_untouched() {
        let mut transaction = build(TransactionType::Debit, Decimal::new(14200, 2)).unwrap();
        let before = transaction.clone();

        let result = transaction.update_details(
            TransactionType::Rent,
            occurrence(),
            Decimal::ZERO,
            "00962067601",
            "74753****315",
            occurrence().time(),
        );

        assert!(result.is_err());
        assert_eq!(transaction, before);
    }
}
