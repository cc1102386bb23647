//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{lenient, parse_amount, parse_weight};
pub use id::*;
