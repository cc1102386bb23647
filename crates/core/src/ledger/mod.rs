//! Bank ledger of the building.
//!
//! - Bank accounts and income/expense operations
//! - Account balances and dated statements with running balances
//! - Monthly grid per category code

pub mod balance;
pub mod error;
pub mod grid;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{AccountBalance, RunningBalance, Statement, StatementLine};
pub use error::LedgerError;
pub use grid::{GridRow, MonthlyGrid, MonthlySums};
pub use service::LedgerService;
pub use types::{BankAccount, Operation, OperationKind};
