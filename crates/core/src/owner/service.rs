//! Lot assignment and weight resolution.

use copro_shared::types::{LotId, OwnerId};

use super::error::OwnershipError;
use super::types::{Lot, Owner, Ownership};

/// Ownership service for business logic.
pub struct OwnershipService;

impl OwnershipService {
    /// Assigns a lot to an owner, returning the new ownership collection.
    ///
    /// A lot held by a different owner is a conflict unless `force` is set,
    /// in which case the lot moves. Assigning a lot to its current holder
    /// leaves the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OwnershipError::UnknownOwner` / `UnknownLot` for dangling ids
    /// and `OwnershipError::LotAlreadyAssigned` on an unforced conflict.
    pub fn assign_lot(
        ownerships: &[Ownership],
        owners: &[Owner],
        lots: &[Lot],
        lot_id: LotId,
        owner_id: OwnerId,
        force: bool,
    ) -> Result<Vec<Ownership>, OwnershipError> {
        if !owners.iter().any(|o| o.id == owner_id) {
            return Err(OwnershipError::UnknownOwner(owner_id));
        }
        if !lots.iter().any(|l| l.id == lot_id) {
            return Err(OwnershipError::UnknownLot(lot_id));
        }

        match Self::holder_of(ownerships, lot_id) {
            Some(current) if current == owner_id => Ok(ownerships.to_vec()),
            Some(current) if !force => Err(OwnershipError::LotAlreadyAssigned {
                lot_id,
                owner_id: current,
            }),
            _ => {
                let mut next: Vec<Ownership> = ownerships
                    .iter()
                    .filter(|o| o.lot_id != lot_id)
                    .copied()
                    .collect();
                next.push(Ownership { owner_id, lot_id });
                Ok(next)
            }
        }
    }

    /// Removes the assignment of a lot.
    ///
    /// # Errors
    ///
    /// Returns `OwnershipError::LotNotAssigned` if nobody holds the lot.
    pub fn release_lot(
        ownerships: &[Ownership],
        lot_id: LotId,
    ) -> Result<Vec<Ownership>, OwnershipError> {
        if Self::holder_of(ownerships, lot_id).is_none() {
            return Err(OwnershipError::LotNotAssigned(lot_id));
        }
        Ok(ownerships
            .iter()
            .filter(|o| o.lot_id != lot_id)
            .copied()
            .collect())
    }

    /// Returns the current holder of a lot.
    #[must_use]
    pub fn holder_of(ownerships: &[Ownership], lot_id: LotId) -> Option<OwnerId> {
        ownerships
            .iter()
            .find(|o| o.lot_id == lot_id)
            .map(|o| o.owner_id)
    }

    /// Returns the lots held by an owner.
    #[must_use]
    pub fn lots_of(ownerships: &[Ownership], owner_id: OwnerId) -> Vec<LotId> {
        ownerships
            .iter()
            .filter(|o| o.owner_id == owner_id)
            .map(|o| o.lot_id)
            .collect()
    }

    /// Resolves each owner's effective weight.
    ///
    /// An owner holding at least one lot weighs the sum of its lots'
    /// tantièmes; an owner with no lot keeps its stored weight.
    #[must_use]
    pub fn resolve_weights(owners: &[Owner], lots: &[Lot], ownerships: &[Ownership]) -> Vec<Owner> {
        owners
            .iter()
            .map(|owner| {
                let held: Vec<&Lot> = ownerships
                    .iter()
                    .filter(|o| o.owner_id == owner.id)
                    .filter_map(|o| lots.iter().find(|l| l.id == o.lot_id))
                    .collect();

                if held.is_empty() {
                    owner.clone()
                } else {
                    Owner {
                        tantiemes: held
                            .iter()
                            .fold(0u32, |acc, l| acc.saturating_add(l.tantiemes)),
                        ..owner.clone()
                    }
                }
            })
            .collect()
    }

    /// Sum of the weights of all non-common owners (conventionally 1000).
    #[must_use]
    pub fn weight_total(owners: &[Owner]) -> u64 {
        owners
            .iter()
            .filter(|o| !o.is_common)
            .map(|o| u64::from(o.tantiemes))
            .sum()
    }
}
