//! Bank ledger domain types.

use chrono::NaiveDate;
use copro_shared::types::{BankAccountId, OperationId, lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bank account of the building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Account ID.
    #[serde(default)]
    pub id: BankAccountId,
    /// Display name (e.g. "Compte courant").
    pub name: String,
    /// Bank holding the account.
    #[serde(default)]
    pub bank: String,
    /// Balance before the first recorded operation.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub initial_balance: Decimal,
}

impl BankAccount {
    /// Creates an account with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self {
            id: BankAccountId::new(),
            name: name.into(),
            bank: String::new(),
            initial_balance,
        }
    }
}

/// Direction of a bank operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// A single bank operation.
///
/// `amount` is always positive; the sign comes from `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID.
    #[serde(default)]
    pub id: OperationId,
    /// Account the operation was booked on.
    pub account_id: BankAccountId,
    /// Income or expense.
    pub kind: OperationKind,
    /// Positive amount.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// Accounting category code (e.g. "601").
    #[serde(default)]
    pub category_code: String,
    /// Value date.
    pub date: NaiveDate,
    /// Free label.
    #[serde(default)]
    pub label: String,
}

impl Operation {
    /// Creates an operation with a fresh ID.
    #[must_use]
    pub fn new(
        account_id: BankAccountId,
        kind: OperationKind,
        amount: Decimal,
        category_code: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: OperationId::new(),
            account_id,
            kind,
            amount,
            category_code: category_code.into(),
            date,
            label: String::new(),
        }
    }

    /// Amount with its balance effect: positive for income, negative for expense.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            OperationKind::Income => self.amount,
            OperationKind::Expense => -self.amount,
        }
    }
}
