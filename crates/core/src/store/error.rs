//! Store error types.

use copro_shared::AppError;
use thiserror::Error;

/// Errors raised by collection reducers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this ID.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (e.g. "Owner").
        kind: &'static str,
        /// The missing ID.
        id: String,
    },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
        }
    }
}
