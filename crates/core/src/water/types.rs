//! Water data types.

use copro_shared::types::{LotId, lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::Quarter;

/// Water amounts forecast for one lot over one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterPrevision {
    /// Metered lot.
    pub lot_id: LotId,
    /// Quarter covered.
    pub quarter: Quarter,
    /// Meter subscription.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub subscription: Decimal,
    /// Forecast consumption.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub consumption: Decimal,
    /// Regularization against the previous reading.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub regularization: Decimal,
}

impl WaterPrevision {
    /// Returns subscription + consumption + regularization.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subscription + self.consumption + self.regularization
    }
}

/// Water cost of an owner over a billing period, by component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterCost {
    /// Subscription total.
    pub subscription: Decimal,
    /// Consumption total.
    pub consumption: Decimal,
    /// Regularization total.
    pub regularization: Decimal,
    /// Sum of the three components.
    pub total: Decimal,
}

impl WaterCost {
    /// Adds one prevision to the running cost.
    #[must_use]
    pub fn plus(self, prevision: &WaterPrevision) -> Self {
        Self {
            subscription: self.subscription + prevision.subscription,
            consumption: self.consumption + prevision.consumption,
            regularization: self.regularization + prevision.regularization,
            total: self.total + prevision.total(),
        }
    }
}
