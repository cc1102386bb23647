//! In-memory store: the dataset snapshot and its collection reducers.

pub mod dataset;
pub mod error;
pub mod reducer;

pub use dataset::Dataset;
pub use error::StoreError;
pub use reducer::{Identified, added, find, removed, replaced};
