//! Ledger service for operation validation and account statements.
//!
//! Pure business logic: callers pass the current collections and get new
//! values back.

use copro_shared::types::BankAccountId;
use rust_decimal::Decimal;

use super::balance::{AccountBalance, RunningBalance, Statement, StatementLine};
use super::error::LedgerError;
use super::types::{BankAccount, Operation};

/// Ledger service for bank operations.
pub struct LedgerService;

impl LedgerService {
    /// Validates an operation before it is recorded.
    ///
    /// 1. The amount must be strictly positive
    /// 2. The account must exist
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation to validate
    /// * `account_exists` - Function telling whether an account ID is known
    pub fn validate_operation<A>(operation: &Operation, account_exists: A) -> Result<(), LedgerError>
    where
        A: Fn(BankAccountId) -> bool,
    {
        if operation.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if operation.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if !account_exists(operation.account_id) {
            return Err(LedgerError::UnknownAccount(operation.account_id));
        }
        Ok(())
    }

    /// Computes the balance of an account over its operations.
    ///
    /// Operations booked on other accounts are ignored.
    #[must_use]
    pub fn balance(account: &BankAccount, operations: &[Operation]) -> AccountBalance {
        operations
            .iter()
            .filter(|op| op.account_id == account.id)
            .fold(AccountBalance::new(account), |mut balance, op| {
                balance.apply(op);
                balance
            })
    }

    /// Builds the statement of an account.
    ///
    /// Lines are sorted by date; operations sharing a date keep their
    /// recording order.
    #[must_use]
    pub fn statement(account: &BankAccount, operations: &[Operation]) -> Statement {
        let mut own: Vec<&Operation> = operations
            .iter()
            .filter(|op| op.account_id == account.id)
            .collect();
        own.sort_by_key(|op| op.date);

        let mut running = RunningBalance::opening(account.initial_balance);
        let mut balance = AccountBalance::new(account);
        let lines = own
            .into_iter()
            .map(|op| {
                running = running.next_entry(op.signed_amount());
                balance.apply(op);
                StatementLine {
                    operation: op.clone(),
                    running,
                }
            })
            .collect();

        Statement {
            account_name: account.name.clone(),
            lines,
            balance,
        }
    }
}
