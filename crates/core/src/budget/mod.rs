//! Budget line items and category totals.

pub mod service;
pub mod types;


pub use service::BudgetService;
pub use types::{BudgetCategory, BudgetItem, BudgetItemPatch, CategoryTotals, Scenario};
