//! Ownership error types.

use copro_shared::AppError;
use copro_shared::types::{LotId, OwnerId};
use thiserror::Error;

/// Errors raised while assigning lots to owners.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// Owner not found.
    #[error("Owner not found: {0}")]
    UnknownOwner(OwnerId),

    /// Lot not found.
    #[error("Lot not found: {0}")]
    UnknownLot(LotId),

    /// Lot is already held by another owner.
    #[error("Lot {lot_id} is already assigned to owner {owner_id}")]
    LotAlreadyAssigned {
        /// The contested lot.
        lot_id: LotId,
        /// The current holder.
        owner_id: OwnerId,
    },

    /// Lot has no owner to release.
    #[error("Lot {0} is not assigned")]
    LotNotAssigned(LotId),
}

impl From<OwnershipError> for AppError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::UnknownOwner(_) | OwnershipError::UnknownLot(_) => {
                Self::NotFound(err.to_string())
            }
            OwnershipError::LotAlreadyAssigned { .. } => Self::Conflict(err.to_string()),
            OwnershipError::LotNotAssigned(_) => Self::BusinessRule(err.to_string()),
        }
    }
}
