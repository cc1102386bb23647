//! Water cost apportionment.

use copro_shared::types::LotId;

use super::types::{WaterCost, WaterPrevision};
use crate::fiscal::BillingPeriod;

/// Water service for business logic.
pub struct WaterService;

impl WaterService {
    /// Computes an owner's water cost from the previsions of its lots.
    ///
    /// Only previsions of the given lots falling in the period's quarters
    /// count; a lot or quarter without a prevision contributes zero.
    #[must_use]
    pub fn owner_cost(
        previsions: &[WaterPrevision],
        lots: &[LotId],
        period: BillingPeriod,
    ) -> WaterCost {
        let quarters = period.quarters();
        previsions
            .iter()
            .filter(|p| lots.contains(&p.lot_id) && quarters.contains(&p.quarter))
            .fold(WaterCost::default(), WaterCost::plus)
    }

    /// Inserts or replaces the prevision for its (lot, quarter) pair.
    #[must_use]
    pub fn upsert(previsions: &[WaterPrevision], prevision: WaterPrevision) -> Vec<WaterPrevision> {
        let mut next: Vec<WaterPrevision> = previsions
            .iter()
            .filter(|p| !(p.lot_id == prevision.lot_id && p.quarter == prevision.quarter))
            .cloned()
            .collect();
        next.push(prevision);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::Quarter;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn prevision(lot_id: LotId, quarter: Quarter, consumption: Decimal) -> WaterPrevision {
        WaterPrevision {
            lot_id,
            quarter,
            subscription: dec!(10),
            consumption,
            regularization: dec!(-2.5),
        }
    }

    #[test]
    fn test_owner_cost_for_quarter() {
        let lot_a = LotId::new();
        let lot_b = LotId::new();
        let other = LotId::new();
        let previsions = vec![
            prevision(lot_a, Quarter::Q1, dec!(40)),
            prevision(lot_b, Quarter::Q1, dec!(15)),
            prevision(lot_a, Quarter::Q2, dec!(100)),
            prevision(other, Quarter::Q1, dec!(999)),
        ];

        let cost = WaterService::owner_cost(
            &previsions,
            &[lot_a, lot_b],
            BillingPeriod::Quarter(Quarter::Q1),
        );

        assert_eq!(cost.subscription, dec!(20));
        assert_eq!(cost.consumption, dec!(55));
        assert_eq!(cost.regularization, dec!(-5));
        assert_eq!(cost.total, dec!(70));
    }

    #[test]
    fn test_owner_cost_annual_sums_quarters() {
        let lot = LotId::new();
        let previsions = vec![
            prevision(lot, Quarter::Q1, dec!(40)),
            prevision(lot, Quarter::Q3, dec!(60)),
        ];

        let cost = WaterService::owner_cost(&previsions, &[lot], BillingPeriod::Annual);
        assert_eq!(cost.total, dec!(115));
    }

    #[test]
    fn test_missing_previsions_cost_zero() {
        let cost = WaterService::owner_cost(&[], &[LotId::new()], BillingPeriod::Annual);
        assert_eq!(cost, WaterCost::default());
    }

    #[test]
    fn test_upsert_replaces_same_lot_and_quarter() {
        let lot = LotId::new();
        let first = WaterService::upsert(&[], prevision(lot, Quarter::Q1, dec!(40)));
        let second = WaterService::upsert(&first, prevision(lot, Quarter::Q1, dec!(55)));
        let third = WaterService::upsert(&second, prevision(lot, Quarter::Q2, dec!(5)));

        assert_eq!(second.len(), 1);
        assert_eq!(second[0].consumption, dec!(55));
        assert_eq!(third.len(), 2);
    }
}
