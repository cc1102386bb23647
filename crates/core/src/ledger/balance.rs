//! Account balance and running balance calculations.

use copro_shared::types::BankAccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{BankAccount, Operation, OperationKind};

/// Account balance after a set of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: BankAccountId,
    /// Balance before any operation.
    pub initial: Decimal,
    /// Total income.
    pub income_total: Decimal,
    /// Total expense.
    pub expense_total: Decimal,
    /// `initial + income_total - expense_total`.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Creates a balance with no operation applied.
    #[must_use]
    pub fn new(account: &BankAccount) -> Self {
        Self {
            account_id: account.id,
            initial: account.initial_balance,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
            balance: account.initial_balance,
        }
    }

    /// Applies one operation.
    pub fn apply(&mut self, operation: &Operation) {
        match operation.kind {
            OperationKind::Income => self.income_total += operation.amount,
            OperationKind::Expense => self.expense_total += operation.amount,
        }
        self.balance = self.initial + self.income_total - self.expense_total;
    }
}

/// Running balance information for a statement line.
///
/// - `sequence`: 1 for the first operation, then +1 per line
/// - `previous_balance`: balance before this operation
/// - `current_balance`: balance after this operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position of the line in the statement.
    pub sequence: u64,
    /// Balance before this operation.
    pub previous_balance: Decimal,
    /// Balance after this operation.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Balance before the first operation.
    #[must_use]
    pub fn opening(initial: Decimal) -> Self {
        Self {
            sequence: 0,
            previous_balance: initial,
            current_balance: initial,
        }
    }

    /// Creates the running balance of the next line.
    ///
    /// `current[N] = previous[N] + change` and `previous[N] = current[N-1]`.
    #[must_use]
    pub fn next_entry(&self, change: Decimal) -> Self {
        Self {
            sequence: self.sequence + 1,
            previous_balance: self.current_balance,
            current_balance: self.current_balance + change,
        }
    }
}

/// One statement line: an operation and the balance around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The operation.
    pub operation: Operation,
    /// Balance before and after.
    pub running: RunningBalance,
}

/// Account statement in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Account name.
    pub account_name: String,
    /// Lines sorted by date.
    pub lines: Vec<StatementLine>,
    /// Balance after the last line.
    pub balance: AccountBalance,
}
