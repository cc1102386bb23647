//! Budget and water forecast routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use copro_core::budget::{BudgetItem, BudgetItemPatch, CategoryTotals, Scenario};
use copro_core::store::find;
use copro_core::water::WaterPrevision;
use copro_shared::types::BudgetItemId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiError, ApiResult, AppState};

/// Creates the budget and water routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget/items", get(list_items).post(create_item))
        .route(
            "/budget/items/{item_id}",
            patch(update_item).delete(delete_item),
        )
        .route("/budget/totals", get(totals))
        .route("/water/previsions", get(list_previsions).put(upsert_prevision))
}

/// Query string selecting a budget scenario.
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioQuery {
    /// `actual`, `forecast` (default) or `forecast_next`.
    pub scenario: Option<String>,
}

impl ScenarioQuery {
    /// Parses the scenario, defaulting to the forecast.
    pub fn scenario(&self) -> ApiResult<Scenario> {
        match self.scenario.as_deref() {
            None | Some("") => Ok(Scenario::default()),
            Some(s) => s.parse().map_err(ApiError::validation),
        }
    }
}

/// Category totals of one scenario.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Scenario read.
    pub scenario: Scenario,
    /// Per-category totals.
    #[serde(flatten)]
    pub totals: CategoryTotals,
}

/// GET `/budget/items` - List budget lines.
async fn list_items(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    Json(json!({ "items": data.budget_items }))
}

/// POST `/budget/items` - Create a budget line.
async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<BudgetItem>,
) -> ApiResult<(StatusCode, Json<BudgetItem>)> {
    let item = BudgetItem {
        id: BudgetItemId::new(),
        ..payload
    };
    let item_id = item.id;
    let data = state.update(|d| d.with_budget_item(item)).await;

    info!(%item_id, "Budget item created");
    Ok((StatusCode::CREATED, Json(find(&data.budget_items, item_id)?.clone())))
}

/// PATCH `/budget/items/{item_id}` - Update amounts or name of a budget line.
async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<BudgetItemId>,
    Json(patch): Json<BudgetItemPatch>,
) -> ApiResult<Json<BudgetItem>> {
    let data = state
        .apply(|d| d.update_budget_item(item_id, &patch))
        .await?;

    info!(%item_id, "Budget item updated");
    Ok(Json(find(&data.budget_items, item_id)?.clone()))
}

/// DELETE `/budget/items/{item_id}` - Delete a budget line.
async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<BudgetItemId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.delete_budget_item(item_id)).await?;

    info!(%item_id, "Budget item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/budget/totals?scenario=` - Category totals.
async fn totals(
    State(state): State<AppState>,
    Query(query): Query<ScenarioQuery>,
) -> ApiResult<Json<TotalsResponse>> {
    let scenario = query.scenario()?;
    let data = state.store.read().await;

    Ok(Json(TotalsResponse {
        scenario,
        totals: data.category_totals(scenario),
    }))
}

/// GET `/water/previsions` - List water forecasts.
async fn list_previsions(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    Json(json!({ "previsions": data.water_previsions }))
}

/// PUT `/water/previsions` - Insert or replace the forecast of a lot and quarter.
async fn upsert_prevision(
    State(state): State<AppState>,
    Json(prevision): Json<WaterPrevision>,
) -> ApiResult<Json<WaterPrevision>> {
    state
        .commit(|d| d.upsert_water(prevision.clone()))
        .await?;

    info!(lot_id = %prevision.lot_id, quarter = %prevision.quarter, "Water prevision saved");
    Ok(Json(prevision))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use copro_core::owner::Lot;
    use copro_core::store::Dataset;
    use serde_json::json;

    use crate::test_support::{app, send};

    #[tokio::test]
    async fn test_budget_items_and_totals() {
        let (_, app) = app(Dataset::default());

        let (status, item) = send(
            &app,
            "POST",
            "/api/v1/budget/items",
            Some(json!({ "category": "general", "name": "Assurance", "forecast": "1 200,50", "actual": 1100 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        send(
            &app,
            "POST",
            "/api/v1/budget/items",
            Some(json!({ "category": "cleaning", "name": "Ménage", "forecast": "oops" })),
        )
        .await;

        let (_, totals) = send(&app, "GET", "/api/v1/budget/totals", None).await;
        assert_eq!(totals["scenario"], "forecast");
        assert_eq!(totals["general"], "1200.50");
        assert_eq!(totals["cleaning"], "0");

        let (_, totals) = send(&app, "GET", "/api/v1/budget/totals?scenario=actual", None).await;
        assert_eq!(totals["total"], "1100");

        let (status, body) = send(&app, "GET", "/api/v1/budget/totals?scenario=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let uri = format!("/api/v1/budget/items/{}", item["id"].as_str().unwrap());
        let (status, patched) = send(&app, "PATCH", &uri, Some(json!({ "forecast": 900, "category": "works" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["forecast"], "900");
        assert_eq!(patched["category"], "general");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_water_upsert() {
        let lot = Lot::new("A1", 100);
        let lot_id = lot.id.to_string();
        let (state, app) = app(Dataset::default().with_lot(lot));

        for consumption in ["40", "55.5"] {
            let (status, _) = send(
                &app,
                "PUT",
                "/api/v1/water/previsions",
                Some(json!({ "lot_id": lot_id, "quarter": "Q1", "consumption": consumption })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(state.store.read().await.water_previsions.len(), 1);

        let (_, list) = send(&app, "GET", "/api/v1/water/previsions", None).await;
        assert_eq!(list["previsions"][0]["consumption"], "55.5");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/water/previsions",
            Some(json!({ "lot_id": "0191c3a0-0000-7000-8000-000000000000", "quarter": "Q2" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
