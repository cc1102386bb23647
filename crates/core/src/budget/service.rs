//! Category total calculation.

use rust_decimal::Decimal;

use super::types::{BudgetCategory, BudgetItem, CategoryTotals, Scenario};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Sums the scenario amount of a list of budget lines.
    ///
    /// An empty list totals zero.
    #[must_use]
    pub fn category_total<'a, I>(items: I, scenario: Scenario) -> Decimal
    where
        I: IntoIterator<Item = &'a BudgetItem>,
    {
        items
            .into_iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.amount(scenario)))
    }

    /// Returns the lines of one category.
    pub fn items_in(
        items: &[BudgetItem],
        category: BudgetCategory,
    ) -> impl Iterator<Item = &BudgetItem> {
        items.iter().filter(move |item| item.category == category)
    }

    /// Computes the scenario total of every category.
    #[must_use]
    pub fn category_totals(items: &[BudgetItem], scenario: Scenario) -> CategoryTotals {
        let total_of = |category| Self::category_total(Self::items_in(items, category), scenario);

        let general = total_of(BudgetCategory::General);
        let special = total_of(BudgetCategory::Special);
        let cleaning = total_of(BudgetCategory::Cleaning);
        let works = total_of(BudgetCategory::Works);

        CategoryTotals {
            general,
            special,
            cleaning,
            works,
            total: general
                .saturating_add(special)
                .saturating_add(cleaning)
                .saturating_add(works),
        }
    }
}
