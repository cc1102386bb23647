//! Ledger error types.

use copro_shared::AppError;
use copro_shared::types::{BankAccountId, OperationId};
use thiserror::Error;

/// Errors that can occur while recording bank operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Operation amount cannot be zero.
    #[error("Operation amount cannot be zero")]
    ZeroAmount,

    /// Operation amount cannot be negative.
    #[error("Operation amount cannot be negative")]
    NegativeAmount,

    /// Account not found.
    #[error("Bank account not found: {0}")]
    UnknownAccount(BankAccountId),

    /// Operation not found.
    #[error("Operation not found: {0}")]
    UnknownOperation(OperationId),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ZeroAmount | LedgerError::NegativeAmount => {
                Self::Validation(err.to_string())
            }
            LedgerError::UnknownAccount(_) | LedgerError::UnknownOperation(_) => {
                Self::NotFound(err.to_string())
            }
        }
    }
}
