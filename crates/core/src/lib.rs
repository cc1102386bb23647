//! Core business logic for Copro.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `owner` - Owners, lots and lot assignment
//! - `budget` - Budget lines and category totals
//! - `charges` - Divisors, quote-shares and calls for funds
//! - `water` - Water forecasts and per-owner water cost
//! - `fiscal` - Quarters and billing periods
//! - `ledger` - Bank accounts, statements and monthly grid
//! - `vote` - General assembly attendance and vote tallies
//! - `store` - Dataset snapshot and collection reducers

pub mod budget;
pub mod charges;
pub mod fiscal;
pub mod ledger;
pub mod owner;
pub mod store;
pub mod vote;
pub mod water;
