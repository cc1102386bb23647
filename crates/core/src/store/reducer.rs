//! Collection reducers over identified records.
//!
//! Each reducer takes the current collection and returns a new one; the
//! input is never mutated.

use std::fmt::Display;

use copro_shared::types::{BankAccountId, BudgetItemId, LotId, OperationId, OwnerId};

use super::error::StoreError;
use crate::budget::BudgetItem;
use crate::ledger::{BankAccount, Operation};
use crate::owner::{Lot, Owner};

/// A record addressed by a typed ID.
pub trait Identified: Clone {
    /// ID type.
    type Id: Copy + PartialEq + Display;

    /// Record kind used in error messages.
    const KIND: &'static str;

    /// Returns the record's ID.
    fn id(&self) -> Self::Id;
}

macro_rules! identified {
    ($record:ty, $id:ty, $kind:literal) => {
        impl Identified for $record {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

identified!(Owner, OwnerId, "Owner");
identified!(Lot, LotId, "Lot");
identified!(BudgetItem, BudgetItemId, "Budget item");
identified!(BankAccount, BankAccountId, "Bank account");
identified!(Operation, OperationId, "Operation");

fn not_found<T: Identified>(id: T::Id) -> StoreError {
    StoreError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

/// Looks up a record.
pub fn find<T: Identified>(records: &[T], id: T::Id) -> Result<&T, StoreError> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

/// Returns the collection with `record` appended.
#[must_use]
pub fn added<T: Identified>(records: &[T], record: T) -> Vec<T> {
    let mut next = records.to_vec();
    next.push(record);
    next
}

/// Returns the collection with the record `id` rewritten by `update`.
pub fn replaced<T, F>(records: &[T], id: T::Id, update: F) -> Result<Vec<T>, StoreError>
where
    T: Identified,
    F: FnOnce(&T) -> T,
{
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found::<T>(id))?;
    let mut next = records.to_vec();
    next[index] = update(&records[index]);
    Ok(next)
}

/// Returns the collection without the record `id`.
pub fn removed<T: Identified>(records: &[T], id: T::Id) -> Result<Vec<T>, StoreError> {
    find(records, id)?;
    Ok(records.iter().filter(|r| r.id() != id).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::OwnerPatch;

    #[test]
    fn test_reducers_leave_input_untouched() {
        let owners = vec![Owner::new("Martin", 100)];
        let durand = Owner::new("Durand", 200);
        let durand_id = durand.id;

        let grown = added(&owners, durand);
        assert_eq!(owners.len(), 1);
        assert_eq!(grown.len(), 2);

        let patch = OwnerPatch {
            name: Some("Durand-Petit".to_string()),
            ..OwnerPatch::default()
        };
        let renamed = replaced(&grown, durand_id, |o| o.patched(&patch)).unwrap();
        assert_eq!(grown[1].name, "Durand");
        assert_eq!(renamed[1].name, "Durand-Petit");
        assert_eq!(renamed[1].id, durand_id);

        let shrunk = removed(&renamed, durand_id).unwrap();
        assert_eq!(shrunk.len(), 1);
        assert_eq!(renamed.len(), 2);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let lots = vec![Lot::new("A1", 100)];
        let missing = LotId::new();

        let err = removed(&lots, missing).unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                kind: "Lot",
                id: missing.to_string()
            }
        );
        assert!(replaced(&lots, missing, Clone::clone).is_err());
        assert!(find(&lots, missing).is_err());
        assert!(find(&lots, lots[0].id).is_ok());
    }
}
