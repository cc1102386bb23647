//! Owner and lot routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
};
use copro_core::owner::{Lot, LotPatch, Owner, OwnerPatch, OwnershipService};
use copro_core::store::{Dataset, find};
use copro_shared::types::{LotId, OwnerId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiResult, AppState};

/// Creates the owner and lot routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/owners", get(list_owners).post(create_owner))
        .route(
            "/owners/{owner_id}",
            get(get_owner).patch(update_owner).delete(delete_owner),
        )
        .route("/lots", get(list_lots).post(create_lot))
        .route("/lots/{lot_id}", patch(update_lot).delete(delete_lot))
        .route("/lots/{lot_id}/owner", put(assign_lot).delete(release_lot))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// An owner with resolved weight and held lots.
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    /// Owner record, tantièmes resolved from lots.
    #[serde(flatten)]
    pub owner: Owner,
    /// Lots held.
    pub lots: Vec<LotId>,
}

/// A lot with its current holder.
#[derive(Debug, Serialize)]
pub struct LotResponse {
    /// Lot record.
    #[serde(flatten)]
    pub lot: Lot,
    /// Current holder, if any.
    pub owner_id: Option<OwnerId>,
}

/// Request body for assigning a lot.
#[derive(Debug, Deserialize)]
pub struct AssignLotRequest {
    /// New holder.
    pub owner_id: OwnerId,
    /// Move the lot even if another owner holds it.
    #[serde(default)]
    pub force: bool,
}

fn owner_response(data: &Dataset, owner: Owner) -> OwnerResponse {
    OwnerResponse {
        lots: data.lots_of(owner.id),
        owner,
    }
}

fn lot_response(data: &Dataset, lot: Lot) -> LotResponse {
    LotResponse {
        owner_id: OwnershipService::holder_of(&data.ownerships, lot.id),
        lot,
    }
}

// ============================================================================
// Owners
// ============================================================================

/// GET `/owners` - List owners with resolved weights.
async fn list_owners(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    let resolved = data.resolved_owners();
    let weight_total = OwnershipService::weight_total(&resolved);
    let owners: Vec<OwnerResponse> = resolved
        .into_iter()
        .map(|o| owner_response(&data, o))
        .collect();

    Json(json!({ "owners": owners, "weight_total": weight_total }))
}

/// POST `/owners` - Create an owner.
async fn create_owner(
    State(state): State<AppState>,
    Json(payload): Json<Owner>,
) -> ApiResult<(StatusCode, Json<OwnerResponse>)> {
    let owner = Owner {
        id: OwnerId::new(),
        ..payload
    };
    let owner_id = owner.id;
    let data = state.update(|d| d.with_owner(owner)).await;

    info!(%owner_id, "Owner created");
    let owner = data.resolved_owner(owner_id)?;
    Ok((StatusCode::CREATED, Json(owner_response(&data, owner))))
}

/// GET `/owners/{owner_id}` - Get one owner.
async fn get_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
) -> ApiResult<Json<OwnerResponse>> {
    let data = state.store.read().await;
    let owner = data.resolved_owner(owner_id)?;
    Ok(Json(owner_response(&data, owner)))
}

/// PATCH `/owners/{owner_id}` - Update some fields of an owner.
async fn update_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
    Json(patch): Json<OwnerPatch>,
) -> ApiResult<Json<OwnerResponse>> {
    let data = state.apply(|d| d.update_owner(owner_id, &patch)).await?;

    info!(%owner_id, "Owner updated");
    let owner = data.resolved_owner(owner_id)?;
    Ok(Json(owner_response(&data, owner)))
}

/// DELETE `/owners/{owner_id}` - Delete an owner and its lot assignments.
async fn delete_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.delete_owner(owner_id)).await?;

    info!(%owner_id, "Owner deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Lots
// ============================================================================

/// GET `/lots` - List lots with their holders.
async fn list_lots(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    let lots: Vec<LotResponse> = data
        .lots
        .iter()
        .cloned()
        .map(|l| lot_response(&data, l))
        .collect();

    Json(json!({ "lots": lots }))
}

/// POST `/lots` - Create a lot.
async fn create_lot(
    State(state): State<AppState>,
    Json(payload): Json<Lot>,
) -> ApiResult<(StatusCode, Json<LotResponse>)> {
    let lot = Lot {
        id: LotId::new(),
        ..payload
    };
    let lot_id = lot.id;
    let data = state.update(|d| d.with_lot(lot)).await;

    info!(%lot_id, "Lot created");
    let lot = find(&data.lots, lot_id)?.clone();
    Ok((StatusCode::CREATED, Json(lot_response(&data, lot))))
}

/// PATCH `/lots/{lot_id}` - Update some fields of a lot.
async fn update_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<LotId>,
    Json(patch): Json<LotPatch>,
) -> ApiResult<Json<LotResponse>> {
    let data = state.apply(|d| d.update_lot(lot_id, &patch)).await?;

    info!(%lot_id, "Lot updated");
    let lot = find(&data.lots, lot_id)?.clone();
    Ok(Json(lot_response(&data, lot)))
}

/// DELETE `/lots/{lot_id}` - Delete a lot, its assignment and water forecasts.
async fn delete_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<LotId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.delete_lot(lot_id)).await?;

    info!(%lot_id, "Lot deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT `/lots/{lot_id}/owner` - Assign a lot to an owner.
async fn assign_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<LotId>,
    Json(payload): Json<AssignLotRequest>,
) -> ApiResult<Json<LotResponse>> {
    let data = state
        .apply(|d| d.assign_lot(lot_id, payload.owner_id, payload.force))
        .await?;

    info!(%lot_id, owner_id = %payload.owner_id, force = payload.force, "Lot assigned");
    let lot = find(&data.lots, lot_id)?.clone();
    Ok(Json(lot_response(&data, lot)))
}

/// DELETE `/lots/{lot_id}/owner` - Release a lot.
async fn release_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<LotId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.release_lot(lot_id)).await?;

    info!(%lot_id, "Lot released");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use copro_core::store::Dataset;
    use serde_json::json;

    use crate::test_support::{app, send};

    #[tokio::test]
    async fn test_owner_lifecycle_with_lots() {
        let (state, app) = app(Dataset::default());

        let (status, owner) = send(
            &app,
            "POST",
            "/api/v1/owners",
            Some(json!({ "name": "Martin", "tantiemes": "80", "exo_men": true })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(owner["tantiemes"], 80);
        let owner_id = owner["id"].as_str().unwrap().to_string();

        let (_, lot_a) = send(&app, "POST", "/api/v1/lots", Some(json!({ "number": "A1", "tantiemes": 100 }))).await;
        let (_, lot_b) = send(&app, "POST", "/api/v1/lots", Some(json!({ "number": "C1", "tantiemes": "25" }))).await;
        let lot_a = lot_a["id"].as_str().unwrap().to_string();
        let lot_b = lot_b["id"].as_str().unwrap().to_string();

        for lot in [&lot_a, &lot_b] {
            let (status, body) = send(
                &app,
                "PUT",
                &format!("/api/v1/lots/{lot}/owner"),
                Some(json!({ "owner_id": owner_id })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["owner_id"], owner_id.as_str());
        }

        let (status, body) = send(&app, "GET", &format!("/api/v1/owners/{owner_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tantiemes"], 125);
        assert_eq!(body["lots"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/owners/{owner_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.read().await.ownerships.is_empty());

        let (status, body) = send(&app, "GET", &format!("/api/v1/owners/{owner_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_assign_conflict_and_force() {
        let (_, app) = app(Dataset::default());
        let (_, a) = send(&app, "POST", "/api/v1/owners", Some(json!({ "name": "A" }))).await;
        let (_, b) = send(&app, "POST", "/api/v1/owners", Some(json!({ "name": "B" }))).await;
        let (_, lot) = send(&app, "POST", "/api/v1/lots", Some(json!({ "number": "1", "tantiemes": 10 }))).await;
        let uri = format!("/api/v1/lots/{}/owner", lot["id"].as_str().unwrap());

        let (status, _) = send(&app, "PUT", &uri, Some(json!({ "owner_id": a["id"] }))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "owner_id": b["id"] }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CONFLICT");

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "owner_id": b["id"], "force": true }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["owner_id"], b["id"]);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_patch_lot_and_list() {
        let (_, app) = app(Dataset::default());
        let (_, lot) = send(&app, "POST", "/api/v1/lots", Some(json!({ "number": "P3", "lot_type": "parking" }))).await;
        let uri = format!("/api/v1/lots/{}", lot["id"].as_str().unwrap());

        let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "tantiemes": "12,0" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tantiemes"], 12);
        assert_eq!(body["number"], "P3");

        let (_, list) = send(&app, "GET", "/api/v1/lots", None).await;
        assert_eq!(list["lots"].as_array().unwrap().len(), 1);
        assert!(list["lots"][0]["owner_id"].is_null());
    }
}
