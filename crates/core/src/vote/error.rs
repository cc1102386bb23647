//! Assembly error types.

use copro_shared::AppError;
use copro_shared::types::{OwnerId, ResolutionId};
use thiserror::Error;

/// Errors raised while recording attendance and ballots.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    /// Owner is not a voter (unknown or common areas).
    #[error("Unknown voter: {0}")]
    UnknownVoter(OwnerId),

    /// Resolution not found.
    #[error("Resolution not found: {0}")]
    UnknownResolution(ResolutionId),

    /// Voter is neither present, voting by mail nor represented.
    #[error("Owner {0} is not a voter of record")]
    NotVoterOfRecord(OwnerId),

    /// An owner cannot hold their own proxy.
    #[error("Owner {0} cannot hold their own proxy")]
    SelfProxy(OwnerId),

    /// Proxy holder must attend in person.
    #[error("Proxy holder {0} is not present")]
    ProxyHolderNotPresent(OwnerId),
}

impl From<VoteError> for AppError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::UnknownVoter(_) | VoteError::UnknownResolution(_) => {
                Self::NotFound(err.to_string())
            }
            VoteError::NotVoterOfRecord(_)
            | VoteError::SelfProxy(_)
            | VoteError::ProxyHolderNotPresent(_) => Self::BusinessRule(err.to_string()),
        }
    }
}
