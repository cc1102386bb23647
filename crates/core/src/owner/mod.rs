//! Owners, lots and the owner↔lot ownership join.

pub mod error;
pub mod service;
pub mod types;

pub use error::OwnershipError;
pub use service::OwnershipService;
pub use types::{Contact, Lot, LotPatch, LotType, Owner, OwnerPatch, Ownership};
