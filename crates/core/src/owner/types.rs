//! Owner and lot data types.

use copro_shared::types::{LotId, OwnerId, lenient};
use serde::{Deserialize, Serialize};

use crate::budget::BudgetCategory;

/// Contact details of an owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// A unit holder of the association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner ID.
    #[serde(default)]
    pub id: OwnerId,
    /// Display name.
    pub name: String,
    /// Ownership weight in tantièmes.
    ///
    /// Overridden by the sum of the assigned lots' tantièmes when the owner
    /// holds at least one lot.
    #[serde(default, deserialize_with = "lenient::weight")]
    pub tantiemes: u32,
    /// Exempt from special (syndic upkeep) charges.
    #[serde(default)]
    pub exo_gest: bool,
    /// Exempt from cleaning charges.
    #[serde(default)]
    pub exo_men: bool,
    /// Common area, excluded from every divisor.
    #[serde(default)]
    pub is_common: bool,
    /// Contact details.
    #[serde(default)]
    pub contact: Contact,
}

impl Owner {
    /// Creates a non-exempt owner with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, tantiemes: u32) -> Self {
        Self {
            id: OwnerId::new(),
            name: name.into(),
            tantiemes,
            exo_gest: false,
            exo_men: false,
            is_common: false,
            contact: Contact::default(),
        }
    }

    /// Returns true if the owner pays nothing in this charge category.
    #[must_use]
    pub const fn is_exempt_from(&self, category: BudgetCategory) -> bool {
        match category {
            BudgetCategory::Special => self.exo_gest,
            BudgetCategory::Cleaning => self.exo_men,
            BudgetCategory::General | BudgetCategory::Works => false,
        }
    }

    /// Returns a copy of this owner with the patch applied.
    #[must_use]
    pub fn patched(&self, patch: &OwnerPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            tantiemes: patch.tantiemes.unwrap_or(self.tantiemes),
            exo_gest: patch.exo_gest.unwrap_or(self.exo_gest),
            exo_men: patch.exo_men.unwrap_or(self.exo_men),
            is_common: patch.is_common.unwrap_or(self.is_common),
            contact: patch.contact.clone().unwrap_or_else(|| self.contact.clone()),
        }
    }
}

/// Partial update of an owner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerPatch {
    /// New display name.
    pub name: Option<String>,
    /// New stored weight.
    #[serde(default, deserialize_with = "lenient::optional_weight")]
    pub tantiemes: Option<u32>,
    /// New special-charges exemption.
    pub exo_gest: Option<bool>,
    /// New cleaning exemption.
    pub exo_men: Option<bool>,
    /// New common-area flag.
    pub is_common: Option<bool>,
    /// New contact details.
    pub contact: Option<Contact>,
}

/// Kind of physical unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotType {
    /// Apartment.
    #[default]
    Apartment,
    /// Cellar.
    Cellar,
    /// Parking space.
    Parking,
    /// Anything else (shop, storage room).
    Other,
}

/// A physical unit of the building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    /// Lot ID.
    #[serde(default)]
    pub id: LotId,
    /// Lot number as printed on the title deed.
    pub number: String,
    /// Lot name.
    #[serde(default)]
    pub name: String,
    /// Tantièmes attached to the lot.
    #[serde(default, deserialize_with = "lenient::weight")]
    pub tantiemes: u32,
    /// Kind of unit.
    #[serde(default)]
    pub lot_type: LotType,
}

impl Lot {
    /// Creates an apartment lot with a fresh ID.
    #[must_use]
    pub fn new(number: impl Into<String>, tantiemes: u32) -> Self {
        let number = number.into();
        Self {
            id: LotId::new(),
            name: format!("Lot {number}"),
            number,
            tantiemes,
            lot_type: LotType::Apartment,
        }
    }

    /// Returns a copy of this lot with the patch applied.
    #[must_use]
    pub fn patched(&self, patch: &LotPatch) -> Self {
        Self {
            id: self.id,
            number: patch.number.clone().unwrap_or_else(|| self.number.clone()),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            tantiemes: patch.tantiemes.unwrap_or(self.tantiemes),
            lot_type: patch.lot_type.unwrap_or(self.lot_type),
        }
    }
}

/// Partial update of a lot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotPatch {
    /// New lot number.
    pub number: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New tantièmes.
    #[serde(default, deserialize_with = "lenient::optional_weight")]
    pub tantiemes: Option<u32>,
    /// New kind.
    pub lot_type: Option<LotType>,
}

/// Assignment of a lot to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    /// The holder.
    pub owner_id: OwnerId,
    /// The held lot.
    pub lot_id: LotId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exemptions_per_category() {
        let mut owner = Owner::new("Martin", 120);
        owner.exo_gest = true;

        assert!(owner.is_exempt_from(BudgetCategory::Special));
        assert!(!owner.is_exempt_from(BudgetCategory::Cleaning));
        assert!(!owner.is_exempt_from(BudgetCategory::General));
        assert!(!owner.is_exempt_from(BudgetCategory::Works));
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let owner = Owner::new("Durand", 200);
        let patch = OwnerPatch {
            exo_men: Some(true),
            ..OwnerPatch::default()
        };

        let patched = owner.patched(&patch);
        assert_eq!(patched.id, owner.id);
        assert_eq!(patched.name, "Durand");
        assert_eq!(patched.tantiemes, 200);
        assert!(patched.exo_men);
    }

    #[test]
    fn test_owner_from_form_json() {
        let owner: Owner =
            serde_json::from_str(r#"{"name": "Petit", "tantiemes": "85", "exo_men": true}"#)
                .unwrap();
        assert_eq!(owner.tantiemes, 85);
        assert!(owner.exo_men);
        assert!(!owner.is_common);
    }

    #[test]
    fn test_lot_patch() {
        let lot = Lot::new("12", 80);
        let patched = lot.patched(&LotPatch {
            lot_type: Some(LotType::Cellar),
            tantiemes: Some(5),
            ..LotPatch::default()
        });
        assert_eq!(patched.number, "12");
        assert_eq!(patched.tantiemes, 5);
        assert_eq!(patched.lot_type, LotType::Cellar);
    }
}
