//! The building's complete dataset.
//!
//! `Dataset` is an immutable snapshot: each mutation returns the next
//! snapshot, so readers holding the previous one never see a partial update.

use copro_shared::AppResult;
use copro_shared::types::{BankAccountId, BudgetItemId, LotId, OperationId, OwnerId, ResolutionId};
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::reducer::{added, find, removed, replaced};
use crate::budget::{BudgetItem, BudgetItemPatch, BudgetService, CategoryTotals, Scenario};
use crate::charges::{CallTable, ChargeService, DetailedCharges, Divisors};
use crate::fiscal::BillingPeriod;
use crate::ledger::{BankAccount, LedgerService, MonthlyGrid, Operation, Statement};
use crate::owner::{Lot, LotPatch, Owner, OwnerPatch, Ownership, OwnershipService};
use crate::vote::{
    AttendanceSummary, BallotChoice, Presence, Resolution, ResolutionTally, VoteSession, Voter,
};
use crate::water::{WaterCost, WaterPrevision, WaterService};

/// Every collection of one building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Owners, with their stored weights.
    pub owners: Vec<Owner>,
    /// Lots.
    pub lots: Vec<Lot>,
    /// Owner ↔ lot assignments.
    pub ownerships: Vec<Ownership>,
    /// Budget lines.
    pub budget_items: Vec<BudgetItem>,
    /// Water forecasts per lot and quarter.
    pub water_previsions: Vec<WaterPrevision>,
    /// Bank accounts.
    pub accounts: Vec<BankAccount>,
    /// Bank operations.
    pub operations: Vec<Operation>,
    /// Current general assembly.
    pub assembly: VoteSession,
}

// ---------------------------------------------------------------------------
// Owners and lots
// ---------------------------------------------------------------------------

impl Dataset {
    /// Owners with weights resolved from their lots.
    #[must_use]
    pub fn resolved_owners(&self) -> Vec<Owner> {
        OwnershipService::resolve_weights(&self.owners, &self.lots, &self.ownerships)
    }

    /// One owner with its resolved weight.
    pub fn resolved_owner(&self, owner_id: OwnerId) -> Result<Owner, StoreError> {
        let owner = find(&self.owners, owner_id)?;
        Ok(
            OwnershipService::resolve_weights(std::slice::from_ref(owner), &self.lots, &self.ownerships)
                .into_iter()
                .next()
                .unwrap_or_else(|| owner.clone()),
        )
    }

    /// Lots held by an owner.
    #[must_use]
    pub fn lots_of(&self, owner_id: OwnerId) -> Vec<LotId> {
        OwnershipService::lots_of(&self.ownerships, owner_id)
    }

    /// Adds an owner.
    #[must_use]
    pub fn with_owner(&self, owner: Owner) -> Self {
        Self {
            owners: added(&self.owners, owner),
            ..self.clone()
        }
    }

    /// Patches an owner.
    pub fn update_owner(&self, owner_id: OwnerId, patch: &OwnerPatch) -> Result<Self, StoreError> {
        Ok(Self {
            owners: replaced(&self.owners, owner_id, |o| o.patched(patch))?,
            ..self.clone()
        })
    }

    /// Deletes an owner together with its lot assignments and assembly records.
    pub fn delete_owner(&self, owner_id: OwnerId) -> Result<Self, StoreError> {
        Ok(Self {
            owners: removed(&self.owners, owner_id)?,
            ownerships: self
                .ownerships
                .iter()
                .filter(|o| o.owner_id != owner_id)
                .copied()
                .collect(),
            assembly: self.assembly.without_owner(owner_id),
            ..self.clone()
        })
    }

    /// Adds a lot.
    #[must_use]
    pub fn with_lot(&self, lot: Lot) -> Self {
        Self {
            lots: added(&self.lots, lot),
            ..self.clone()
        }
    }

    /// Patches a lot.
    pub fn update_lot(&self, lot_id: LotId, patch: &LotPatch) -> Result<Self, StoreError> {
        Ok(Self {
            lots: replaced(&self.lots, lot_id, |l| l.patched(patch))?,
            ..self.clone()
        })
    }

    /// Deletes a lot together with its assignment and water forecasts.
    pub fn delete_lot(&self, lot_id: LotId) -> Result<Self, StoreError> {
        Ok(Self {
            lots: removed(&self.lots, lot_id)?,
            ownerships: self
                .ownerships
                .iter()
                .filter(|o| o.lot_id != lot_id)
                .copied()
                .collect(),
            water_previsions: self
                .water_previsions
                .iter()
                .filter(|p| p.lot_id != lot_id)
                .cloned()
                .collect(),
            ..self.clone()
        })
    }

    /// Assigns a lot to an owner.
    pub fn assign_lot(&self, lot_id: LotId, owner_id: OwnerId, force: bool) -> AppResult<Self> {
        let ownerships = OwnershipService::assign_lot(
            &self.ownerships,
            &self.owners,
            &self.lots,
            lot_id,
            owner_id,
            force,
        )?;
        Ok(Self {
            ownerships,
            ..self.clone()
        })
    }

    /// Releases a lot from its owner.
    pub fn release_lot(&self, lot_id: LotId) -> AppResult<Self> {
        find(&self.lots, lot_id)?;
        Ok(Self {
            ownerships: OwnershipService::release_lot(&self.ownerships, lot_id)?,
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// Budget, water and charges
// ---------------------------------------------------------------------------

impl Dataset {
    /// Adds a budget line.
    #[must_use]
    pub fn with_budget_item(&self, item: BudgetItem) -> Self {
        Self {
            budget_items: added(&self.budget_items, item),
            ..self.clone()
        }
    }

    /// Patches a budget line.
    pub fn update_budget_item(
        &self,
        item_id: BudgetItemId,
        patch: &BudgetItemPatch,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            budget_items: replaced(&self.budget_items, item_id, |i| i.patched(patch))?,
            ..self.clone()
        })
    }

    /// Deletes a budget line.
    pub fn delete_budget_item(&self, item_id: BudgetItemId) -> Result<Self, StoreError> {
        Ok(Self {
            budget_items: removed(&self.budget_items, item_id)?,
            ..self.clone()
        })
    }

    /// Category totals of the budget.
    #[must_use]
    pub fn category_totals(&self, scenario: Scenario) -> CategoryTotals {
        BudgetService::category_totals(&self.budget_items, scenario)
    }

    /// Inserts or replaces a water forecast.
    pub fn upsert_water(&self, prevision: WaterPrevision) -> Result<Self, StoreError> {
        find(&self.lots, prevision.lot_id)?;
        Ok(Self {
            water_previsions: WaterService::upsert(&self.water_previsions, prevision),
            ..self.clone()
        })
    }

    /// Water cost of an owner over a period.
    #[must_use]
    pub fn water_cost(&self, owner_id: OwnerId, period: BillingPeriod) -> WaterCost {
        WaterService::owner_cost(&self.water_previsions, &self.lots_of(owner_id), period)
    }

    /// Divisors of the current owners.
    #[must_use]
    pub fn divisors(&self) -> Divisors {
        Divisors::from_owners(&self.resolved_owners())
    }

    /// Calls for funds of every paying owner.
    #[must_use]
    pub fn call_table(&self, scenario: Scenario, period: BillingPeriod) -> CallTable {
        ChargeService::call_table(
            &self.resolved_owners(),
            &self.budget_items,
            scenario,
            period,
            |owner| self.water_cost(owner.id, period),
        )
    }

    /// Itemized charges of one owner.
    pub fn detailed_charges(
        &self,
        owner_id: OwnerId,
        scenario: Scenario,
        period: BillingPeriod,
    ) -> Result<DetailedCharges, StoreError> {
        let owner = self.resolved_owner(owner_id)?;
        Ok(ChargeService::detailed_charges(
            &owner,
            &self.budget_items,
            &self.divisors(),
            &self.water_cost(owner_id, period),
            scenario,
            period,
        ))
    }
}

// ---------------------------------------------------------------------------
// Bank ledger
// ---------------------------------------------------------------------------

impl Dataset {
    /// Adds a bank account.
    #[must_use]
    pub fn with_account(&self, account: BankAccount) -> Self {
        Self {
            accounts: added(&self.accounts, account),
            ..self.clone()
        }
    }

    /// Records a bank operation.
    pub fn record_operation(&self, operation: Operation) -> AppResult<Self> {
        LedgerService::validate_operation(&operation, |id| {
            self.accounts.iter().any(|a| a.id == id)
        })?;
        Ok(Self {
            operations: added(&self.operations, operation),
            ..self.clone()
        })
    }

    /// Deletes a bank operation.
    pub fn delete_operation(&self, operation_id: OperationId) -> Result<Self, StoreError> {
        Ok(Self {
            operations: removed(&self.operations, operation_id)?,
            ..self.clone()
        })
    }

    /// Dated statement of an account.
    pub fn statement(&self, account_id: BankAccountId) -> Result<Statement, StoreError> {
        let account = find(&self.accounts, account_id)?;
        Ok(LedgerService::statement(account, &self.operations))
    }

    /// Monthly grid of an account for one year.
    pub fn monthly_grid(&self, account_id: BankAccountId, year: i32) -> Result<MonthlyGrid, StoreError> {
        find(&self.accounts, account_id)?;
        Ok(MonthlyGrid::build(
            self.operations.iter().filter(|op| op.account_id == account_id),
            year,
        ))
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

impl Dataset {
    fn with_assembly(&self, assembly: VoteSession) -> Self {
        Self {
            assembly,
            ..self.clone()
        }
    }

    /// Voters with their attendance.
    #[must_use]
    pub fn voters(&self) -> Vec<Voter> {
        self.assembly.voters(&self.resolved_owners())
    }

    /// Attendance sheet totals.
    #[must_use]
    pub fn attendance_summary(&self) -> AttendanceSummary {
        self.assembly.attendance_summary(&self.resolved_owners())
    }

    /// Records an owner's presence.
    pub fn set_presence(
        &self,
        owner_id: OwnerId,
        presence: Presence,
        proxy_holder: Option<OwnerId>,
    ) -> AppResult<Self> {
        let assembly = self
            .assembly
            .set_presence(&self.owners, owner_id, presence, proxy_holder)?;
        Ok(self.with_assembly(assembly))
    }

    /// Adds a resolution to the agenda.
    #[must_use]
    pub fn with_resolution(&self, resolution: Resolution) -> Self {
        self.with_assembly(self.assembly.add_resolution(resolution))
    }

    /// Records a ballot.
    pub fn record_ballot(
        &self,
        resolution_id: ResolutionId,
        owner_id: OwnerId,
        choice: BallotChoice,
    ) -> AppResult<Self> {
        let assembly = self
            .assembly
            .record_ballot(&self.owners, resolution_id, owner_id, choice)?;
        Ok(self.with_assembly(assembly))
    }

    /// Clears a ballot.
    pub fn clear_ballot(&self, resolution_id: ResolutionId, owner_id: OwnerId) -> AppResult<Self> {
        let assembly = self.assembly.clear_ballot(resolution_id, owner_id)?;
        Ok(self.with_assembly(assembly))
    }

    /// Drops the ballots of one resolution.
    pub fn reset_resolution(&self, resolution_id: ResolutionId) -> AppResult<Self> {
        let assembly = self.assembly.reset_resolution(resolution_id)?;
        Ok(self.with_assembly(assembly))
    }

    /// Drops every ballot.
    #[must_use]
    pub fn reset_ballots(&self) -> Self {
        self.with_assembly(self.assembly.reset_all())
    }

    /// Tallies every resolution against `total_weight`.
    #[must_use]
    pub fn tally(&self, total_weight: u64) -> Vec<ResolutionTally> {
        self.assembly.tally_all(&self.resolved_owners(), total_weight)
    }
}
