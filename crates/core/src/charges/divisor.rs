//! Category divisors.

use serde::{Deserialize, Serialize};

use crate::budget::BudgetCategory;
use crate::owner::Owner;

/// Sum of the tantièmes of the owners paying each charge category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divisors {
    /// General charges divisor.
    pub div_gen: u64,
    /// Special charges divisor (owners without `exo_gest`).
    pub div_spe: u64,
    /// Cleaning divisor (owners without `exo_men`).
    pub div_men: u64,
    /// Works divisor.
    pub div_tra: u64,
}

impl Divisors {
    /// Computes the divisors of a set of owners.
    ///
    /// Common areas are skipped; an owner adds its weight to every category
    /// it is not exempt from. A fully exempted category has divisor 0.
    #[must_use]
    pub fn from_owners(owners: &[Owner]) -> Self {
        owners
            .iter()
            .filter(|o| !o.is_common)
            .fold(Self::default(), |acc, owner| {
                let share = |category| {
                    if owner.is_exempt_from(category) {
                        0
                    } else {
                        u64::from(owner.tantiemes)
                    }
                };
                Self {
                    div_gen: acc.div_gen + share(BudgetCategory::General),
                    div_spe: acc.div_spe + share(BudgetCategory::Special),
                    div_men: acc.div_men + share(BudgetCategory::Cleaning),
                    div_tra: acc.div_tra + share(BudgetCategory::Works),
                }
            })
    }

    /// Returns the divisor of one category.
    #[must_use]
    pub const fn for_category(&self, category: BudgetCategory) -> u64 {
        match category {
            BudgetCategory::General => self.div_gen,
            BudgetCategory::Special => self.div_spe,
            BudgetCategory::Cleaning => self.div_men,
            BudgetCategory::Works => self.div_tra,
        }
    }
}
