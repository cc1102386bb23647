//! Budget data types.

use copro_shared::types::{BudgetItemId, lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Charge category a budget line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    /// General charges, shared by every owner.
    General,
    /// Special charges (syndic upkeep), waived by `exo_gest`.
    Special,
    /// Cleaning charges, waived by `exo_men`.
    Cleaning,
    /// Works, shared by every owner.
    Works,
}

impl BudgetCategory {
    /// All categories in statement order.
    pub const ALL: [Self; 4] = [Self::General, Self::Special, Self::Cleaning, Self::Works];

    /// Returns the label printed on statements.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "Charges générales",
            Self::Special => "Charges spéciales",
            Self::Cleaning => "Ménage",
            Self::Works => "Travaux",
        }
    }
}

/// Which of the three parallel amounts of a budget line is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Actual spending of the prior year.
    #[serde(rename = "actual")]
    Actual,
    /// Forecast for the current year.
    #[default]
    #[serde(rename = "forecast")]
    Forecast,
    /// Forecast for the next year.
    #[serde(rename = "forecast_next")]
    ForecastNextYear,
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actual" => Ok(Self::Actual),
            "forecast" => Ok(Self::Forecast),
            "forecast_next" | "forecast_next_year" => Ok(Self::ForecastNextYear),
            _ => Err(format!("Unknown scenario: {s}")),
        }
    }
}

/// A named expense line of the budget.
///
/// The category is fixed at creation; recategorizing means deleting and
/// recreating the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID.
    #[serde(default)]
    pub id: BudgetItemId,
    /// Charge category.
    pub category: BudgetCategory,
    /// Line name.
    pub name: String,
    /// Actual amount of the prior year.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub actual: Decimal,
    /// Forecast for the current year.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub forecast: Decimal,
    /// Forecast for the next year.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub forecast_next: Decimal,
}

impl BudgetItem {
    /// Creates a line with all three amounts set to `forecast`.
    #[must_use]
    pub fn new(category: BudgetCategory, name: impl Into<String>, forecast: Decimal) -> Self {
        Self {
            id: BudgetItemId::new(),
            category,
            name: name.into(),
            actual: forecast,
            forecast,
            forecast_next: forecast,
        }
    }

    /// Returns the amount under a scenario.
    #[must_use]
    pub const fn amount(&self, scenario: Scenario) -> Decimal {
        match scenario {
            Scenario::Actual => self.actual,
            Scenario::Forecast => self.forecast,
            Scenario::ForecastNextYear => self.forecast_next,
        }
    }

    /// Returns a copy with the patch applied. The category never changes.
    #[must_use]
    pub fn patched(&self, patch: &BudgetItemPatch) -> Self {
        Self {
            id: self.id,
            category: self.category,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            actual: patch.actual.unwrap_or(self.actual),
            forecast: patch.forecast.unwrap_or(self.forecast),
            forecast_next: patch.forecast_next.unwrap_or(self.forecast_next),
        }
    }
}

/// Partial update of a budget line. There is deliberately no category field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetItemPatch {
    /// New line name.
    pub name: Option<String>,
    /// New actual amount.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub actual: Option<Decimal>,
    /// New forecast.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub forecast: Option<Decimal>,
    /// New next-year forecast.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub forecast_next: Option<Decimal>,
}

/// Scenario totals of the four categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// General charges total.
    pub general: Decimal,
    /// Special charges total.
    pub special: Decimal,
    /// Cleaning total.
    pub cleaning: Decimal,
    /// Works total.
    pub works: Decimal,
    /// Sum of the four categories.
    pub total: Decimal,
}

impl CategoryTotals {
    /// Returns the total of one category.
    #[must_use]
    pub const fn get(&self, category: BudgetCategory) -> Decimal {
        match category {
            BudgetCategory::General => self.general,
            BudgetCategory::Special => self.special,
            BudgetCategory::Cleaning => self.cleaning,
            BudgetCategory::Works => self.works,
        }
    }
}
