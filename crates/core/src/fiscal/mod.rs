//! Billing periods of the association's fiscal year.

pub mod period;

pub use period::{BillingPeriod, Quarter};
