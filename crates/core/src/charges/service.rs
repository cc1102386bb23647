//! Charge allocation service.

use rust_decimal::Decimal;

use super::divisor::Divisors;
use super::types::{CallTable, CallTotals, CategoryDetail, ChargeLine, DetailedCharges, OwnerCall};
use crate::budget::{BudgetCategory, BudgetItem, BudgetService, CategoryTotals, Scenario};
use crate::fiscal::BillingPeriod;
use crate::owner::Owner;
use crate::water::WaterCost;

/// Charge service for business logic.
///
/// Every function is pure: identical inputs give identical outputs, so the
/// call table can be recomputed on every change.
pub struct ChargeService;

impl ChargeService {
    /// Owner's pro-rata share of an amount.
    ///
    /// `amount × weight / divisor × ratio`, where ratio is 1 for annual and
    /// 0.25 for quarterly billing. A zero divisor (nobody pays the category)
    /// yields zero. Products beyond the `Decimal` range saturate.
    #[must_use]
    pub fn quote_share(amount: Decimal, weight: u32, divisor: u64, ratio: Decimal) -> Decimal {
        if divisor == 0 {
            return Decimal::ZERO;
        }
        amount
            .saturating_mul(Decimal::from(weight))
            .checked_div(Decimal::from(divisor))
            .unwrap_or(Decimal::ZERO)
            .saturating_mul(ratio)
    }

    /// Share of one category for an owner, zero when exempt.
    fn category_part(
        owner: &Owner,
        category: BudgetCategory,
        amount: Decimal,
        divisors: &Divisors,
        ratio: Decimal,
    ) -> Decimal {
        if owner.is_exempt_from(category) {
            Decimal::ZERO
        } else {
            Self::quote_share(
                amount,
                owner.tantiemes,
                divisors.for_category(category),
                ratio,
            )
        }
    }

    /// Computes one owner's call for funds.
    #[must_use]
    pub fn owner_call(
        owner: &Owner,
        items: &[BudgetItem],
        divisors: &Divisors,
        water: &WaterCost,
        scenario: Scenario,
        period: BillingPeriod,
    ) -> OwnerCall {
        let totals = BudgetService::category_totals(items, scenario);
        Self::call_from_totals(owner, &totals, divisors, water, period.ratio())
    }

    fn call_from_totals(
        owner: &Owner,
        totals: &CategoryTotals,
        divisors: &Divisors,
        water: &WaterCost,
        ratio: Decimal,
    ) -> OwnerCall {
        let part = |category| {
            Self::category_part(owner, category, totals.get(category), divisors, ratio)
        };

        let part_general = part(BudgetCategory::General);
        let part_special = part(BudgetCategory::Special);
        let part_cleaning = part(BudgetCategory::Cleaning);
        let part_works = part(BudgetCategory::Works);
        let sub_total = part_general
            .saturating_add(part_special)
            .saturating_add(part_cleaning)
            .saturating_add(part_works);

        OwnerCall {
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            tantiemes: owner.tantiemes,
            part_general,
            part_special,
            part_cleaning,
            part_works,
            sub_total,
            water_cost: water.total,
            total: sub_total.saturating_add(water.total),
        }
    }

    /// Builds the call table of every non-common owner.
    ///
    /// Owners must already carry their resolved weights. `water_for` supplies
    /// each owner's water cost for the period.
    #[must_use]
    pub fn call_table<W>(
        owners: &[Owner],
        items: &[BudgetItem],
        scenario: Scenario,
        period: BillingPeriod,
        water_for: W,
    ) -> CallTable
    where
        W: Fn(&Owner) -> WaterCost,
    {
        let divisors = Divisors::from_owners(owners);
        let totals = BudgetService::category_totals(items, scenario);
        let ratio = period.ratio();

        let rows: Vec<OwnerCall> = owners
            .iter()
            .filter(|o| !o.is_common)
            .map(|owner| Self::call_from_totals(owner, &totals, &divisors, &water_for(owner), ratio))
            .collect();

        let totals = rows.iter().fold(CallTotals::default(), CallTotals::plus);

        CallTable {
            scenario,
            period,
            divisors,
            rows,
            totals,
        }
    }

    /// Computes one owner's itemized charges.
    ///
    /// Exempt categories still list their lines with the base amounts, with
    /// every allocation forced to zero.
    #[must_use]
    pub fn detailed_charges(
        owner: &Owner,
        items: &[BudgetItem],
        divisors: &Divisors,
        water: &WaterCost,
        scenario: Scenario,
        period: BillingPeriod,
    ) -> DetailedCharges {
        let ratio = period.ratio();

        let categories: Vec<CategoryDetail> = BudgetCategory::ALL
            .into_iter()
            .map(|category| {
                let lines: Vec<ChargeLine> = BudgetService::items_in(items, category)
                    .map(|item| {
                        let base_amount = item.amount(scenario);
                        ChargeLine {
                            item_id: item.id,
                            line_name: item.name.clone(),
                            base_amount,
                            allocated_amount: Self::category_part(
                                owner,
                                category,
                                base_amount,
                                divisors,
                                ratio,
                            ),
                        }
                    })
                    .collect();

                CategoryDetail {
                    category,
                    label: category.label().to_string(),
                    exempt: owner.is_exempt_from(category),
                    divisor: divisors.for_category(category),
                    base_total: saturating_sum(lines.iter().map(|l| l.base_amount)),
                    subtotal: saturating_sum(lines.iter().map(|l| l.allocated_amount)),
                    lines,
                }
            })
            .collect();

        let sub_total = saturating_sum(categories.iter().map(|c| c.subtotal));

        DetailedCharges {
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            tantiemes: owner.tantiemes,
            scenario,
            period,
            categories,
            sub_total,
            water: *water,
            total: sub_total.saturating_add(water.total),
        }
    }
}

fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
