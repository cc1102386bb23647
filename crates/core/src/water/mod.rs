//! Water-meter previsions and per-owner water cost.

pub mod service;
pub mod types;

pub use service::WaterService;
pub use types::{WaterCost, WaterPrevision};
