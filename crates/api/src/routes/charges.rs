//! Charge allocation routes: divisors, call table and itemized charges.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use copro_core::budget::Scenario;
use copro_core::charges::{CallTable, DetailedCharges, Divisors};
use copro_core::fiscal::{BillingPeriod, Quarter};
use copro_core::owner::OwnershipService;
use copro_shared::types::OwnerId;
use serde::{Deserialize, Serialize};

use super::budget::ScenarioQuery;
use crate::{ApiError, ApiResult, AppState};

/// Creates the charge routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charges/divisors", get(divisors))
        .route("/charges/calls", get(call_table))
        .route("/charges/calls/{owner_id}", get(detailed_charges))
}

/// Query string selecting scenario and billing period.
#[derive(Debug, Default, Deserialize)]
pub struct CallQuery {
    /// Budget scenario.
    pub scenario: Option<String>,
    /// `Q1`..`Q4`; absent or `annual` bills the whole year.
    pub quarter: Option<String>,
}

impl CallQuery {
    fn resolve(self) -> ApiResult<(Scenario, BillingPeriod)> {
        let scenario = ScenarioQuery {
            scenario: self.scenario,
        }
        .scenario()?;
        let quarter = match self.quarter.as_deref().map(str::trim) {
            None | Some("" | "annual") => None,
            Some(q) => Some(q.parse::<Quarter>().map_err(ApiError::validation)?),
        };
        Ok((scenario, BillingPeriod::from_quarter(quarter)))
    }
}

/// Divisors with the building's weight total.
#[derive(Debug, Serialize)]
pub struct DivisorsResponse {
    /// Per-category divisors.
    #[serde(flatten)]
    pub divisors: Divisors,
    /// Weight of every non-common owner.
    pub weight_total: u64,
    /// Configured weight of the building.
    pub expected_total: u64,
}

/// GET `/charges/divisors` - Divisor of each charge category.
async fn divisors(State(state): State<AppState>) -> Json<DivisorsResponse> {
    let data = state.store.read().await;
    let owners = data.resolved_owners();

    Json(DivisorsResponse {
        divisors: Divisors::from_owners(&owners),
        weight_total: OwnershipService::weight_total(&owners),
        expected_total: state.total_weight(),
    })
}

/// GET `/charges/calls?scenario=&quarter=` - Call for funds of every owner.
async fn call_table(
    State(state): State<AppState>,
    Query(query): Query<CallQuery>,
) -> ApiResult<Json<CallTable>> {
    let (scenario, period) = query.resolve()?;
    let data = state.store.read().await;
    Ok(Json(data.call_table(scenario, period)))
}

/// GET `/charges/calls/{owner_id}?scenario=&quarter=` - Itemized charges of one owner.
async fn detailed_charges(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
    Query(query): Query<CallQuery>,
) -> ApiResult<Json<DetailedCharges>> {
    let (scenario, period) = query.resolve()?;
    let data = state.store.read().await;
    Ok(Json(data.detailed_charges(owner_id, scenario, period)?))
}
