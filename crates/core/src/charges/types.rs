//! Call-for-funds data types.

use copro_shared::types::{BudgetItemId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::divisor::Divisors;
use crate::budget::{BudgetCategory, Scenario};
use crate::fiscal::BillingPeriod;
use crate::water::WaterCost;

/// One owner's call for funds, collapsed to category subtotals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCall {
    /// Owner ID.
    pub owner_id: OwnerId,
    /// Owner display name.
    pub owner_name: String,
    /// Weight used for the allocation.
    pub tantiemes: u32,
    /// Share of general charges.
    pub part_general: Decimal,
    /// Share of special charges.
    pub part_special: Decimal,
    /// Share of cleaning charges.
    pub part_cleaning: Decimal,
    /// Share of works.
    pub part_works: Decimal,
    /// Sum of the four shares.
    pub sub_total: Decimal,
    /// Water cost of the period.
    pub water_cost: Decimal,
    /// Amount due.
    pub total: Decimal,
}

/// Column totals of a call table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTotals {
    /// Total general shares.
    pub part_general: Decimal,
    /// Total special shares.
    pub part_special: Decimal,
    /// Total cleaning shares.
    pub part_cleaning: Decimal,
    /// Total works shares.
    pub part_works: Decimal,
    /// Total of subtotals.
    pub sub_total: Decimal,
    /// Total water cost.
    pub water_cost: Decimal,
    /// Grand total called.
    pub total: Decimal,
}

impl CallTotals {
    /// Adds one row to the running totals.
    #[must_use]
    pub fn plus(self, call: &OwnerCall) -> Self {
        Self {
            part_general: self.part_general.saturating_add(call.part_general),
            part_special: self.part_special.saturating_add(call.part_special),
            part_cleaning: self.part_cleaning.saturating_add(call.part_cleaning),
            part_works: self.part_works.saturating_add(call.part_works),
            sub_total: self.sub_total.saturating_add(call.sub_total),
            water_cost: self.water_cost.saturating_add(call.water_cost),
            total: self.total.saturating_add(call.total),
        }
    }
}

/// Calls for funds of every paying owner for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTable {
    /// Scenario the budget was read under.
    pub scenario: Scenario,
    /// Billing period.
    pub period: BillingPeriod,
    /// Divisors used.
    pub divisors: Divisors,
    /// One row per non-common owner.
    pub rows: Vec<OwnerCall>,
    /// Column totals.
    pub totals: CallTotals,
}

/// One budget line as it appears on an owner's statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Budget item ID.
    pub item_id: BudgetItemId,
    /// Budget line name.
    pub line_name: String,
    /// Unapportioned scenario amount.
    pub base_amount: Decimal,
    /// Owner's share of the line.
    pub allocated_amount: Decimal,
}

/// One category of an itemized statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    /// Charge category.
    pub category: BudgetCategory,
    /// Printed label.
    pub label: String,
    /// True when the owner is exempt (allocations forced to zero).
    pub exempt: bool,
    /// Divisor of the category.
    pub divisor: u64,
    /// Lines of the category.
    pub lines: Vec<ChargeLine>,
    /// Sum of the unapportioned amounts.
    pub base_total: Decimal,
    /// Sum of the owner's allocations.
    pub subtotal: Decimal,
}

/// Itemized charges of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedCharges {
    /// Owner ID.
    pub owner_id: OwnerId,
    /// Owner display name.
    pub owner_name: String,
    /// Weight used for the allocation.
    pub tantiemes: u32,
    /// Scenario the budget was read under.
    pub scenario: Scenario,
    /// Billing period.
    pub period: BillingPeriod,
    /// Per-category detail in statement order.
    pub categories: Vec<CategoryDetail>,
    /// Sum of the category subtotals.
    pub sub_total: Decimal,
    /// Water cost breakdown.
    pub water: WaterCost,
    /// Amount due.
    pub total: Decimal,
}
