//! Pro-rata charge allocation.
//!
//! This module turns the budget into calls for funds:
//! - Divisors per charge category
//! - Quote-share of an amount for one owner
//! - Per-owner call breakdown and the full call table
//! - Itemized charges for statements

pub mod divisor;
pub mod service;
pub mod types;


pub use divisor::Divisors;
pub use service::ChargeService;
pub use types::{
    CallTable, CallTotals, CategoryDetail, ChargeLine, DetailedCharges, OwnerCall,
};
