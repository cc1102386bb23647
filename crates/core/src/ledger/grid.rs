//! Monthly grid of bank operations.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Operation, OperationKind};

/// Twelve monthly sums and their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySums {
    /// January to December.
    pub months: [Decimal; 12],
    /// Sum of the twelve months.
    pub total: Decimal,
}

impl MonthlySums {
    fn add(&mut self, month0: usize, amount: Decimal) {
        self.months[month0] += amount;
        self.total += amount;
    }

    fn minus(&self, other: &Self) -> Self {
        let mut months = self.months;
        for (month, sub) in months.iter_mut().zip(other.months) {
            *month -= sub;
        }
        Self {
            months,
            total: self.total - other.total,
        }
    }
}

/// One row of the grid: a kind and a category code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// Income or expense.
    pub kind: OperationKind,
    /// Accounting category code.
    pub category_code: String,
    /// Monthly sums for this row.
    pub sums: MonthlySums,
}

/// Per-category monthly sums for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGrid {
    /// Calendar year.
    pub year: i32,
    /// Rows sorted by kind then category code.
    pub rows: Vec<GridRow>,
    /// Column totals of income rows.
    pub income: MonthlySums,
    /// Column totals of expense rows.
    pub expense: MonthlySums,
    /// Income minus expense, per month.
    pub net: MonthlySums,
}

impl MonthlyGrid {
    /// Builds the grid from operations, ignoring those outside `year`.
    #[must_use]
    pub fn build<'a, I>(operations: I, year: i32) -> Self
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let mut rows: BTreeMap<(OperationKind, String), MonthlySums> = BTreeMap::new();
        let mut income = MonthlySums::default();
        let mut expense = MonthlySums::default();

        for op in operations.into_iter().filter(|op| op.date.year() == year) {
            let month0 = op.date.month0() as usize;
            rows.entry((op.kind, op.category_code.clone()))
                .or_default()
                .add(month0, op.amount);
            match op.kind {
                OperationKind::Income => income.add(month0, op.amount),
                OperationKind::Expense => expense.add(month0, op.amount),
            }
        }

        Self {
            year,
            rows: rows
                .into_iter()
                .map(|((kind, category_code), sums)| GridRow {
                    kind,
                    category_code,
                    sums,
                })
                .collect(),
            net: income.minus(&expense),
            income,
            expense,
        }
    }
}
