//! General assembly routes: attendance, resolutions, ballots and tallies.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
};
use copro_core::store::Dataset;
use copro_core::vote::{Article, AttendanceSummary, BallotChoice, Presence, Resolution};
use copro_shared::types::{OwnerId, ResolutionId};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiResult, AppState};

/// Creates the assembly routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assembly/voters", get(list_voters))
        .route("/assembly/voters/{owner_id}/presence", put(set_presence))
        .route("/assembly/attendance", get(attendance))
        .route(
            "/assembly/resolutions",
            get(list_resolutions).post(create_resolution),
        )
        .route(
            "/assembly/resolutions/{resolution_id}/ballots/{owner_id}",
            put(record_ballot).delete(clear_ballot),
        )
        .route(
            "/assembly/resolutions/{resolution_id}/ballots",
            delete(reset_resolution),
        )
        .route("/assembly/ballots", delete(reset_ballots))
        .route("/assembly/tally", get(tally))
}

/// Request body for setting an owner's presence.
#[derive(Debug, Deserialize)]
pub struct PresenceRequest {
    /// Presence mode.
    pub presence: Presence,
    /// Proxy holder, with `proxy` presence.
    #[serde(default)]
    pub proxy_holder: Option<OwnerId>,
}

/// Request body for adding a resolution.
#[derive(Debug, Deserialize)]
pub struct ResolutionRequest {
    /// Short title.
    pub title: String,
    /// Full text.
    #[serde(default)]
    pub description: String,
    /// Majority rule, article 24 by default.
    #[serde(default)]
    pub article: Article,
}

/// Request body for a ballot.
#[derive(Debug, Deserialize)]
pub struct BallotRequest {
    /// Choice.
    pub choice: BallotChoice,
}

/// GET `/assembly/voters` - Owners with attendance and eligibility.
async fn list_voters(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    Json(json!({ "voters": data.voters() }))
}

/// PUT `/assembly/voters/{owner_id}/presence` - Record attendance.
async fn set_presence(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
    Json(payload): Json<PresenceRequest>,
) -> ApiResult<Json<AttendanceSummary>> {
    let data = state
        .apply(|d| d.set_presence(owner_id, payload.presence, payload.proxy_holder))
        .await?;

    info!(%owner_id, presence = ?payload.presence, "Presence recorded");
    Ok(Json(data.attendance_summary()))
}

/// GET `/assembly/attendance` - Attendance sheet totals.
async fn attendance(State(state): State<AppState>) -> Json<AttendanceSummary> {
    let data = state.store.read().await;
    Json(data.attendance_summary())
}

/// GET `/assembly/resolutions` - Agenda.
async fn list_resolutions(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    Json(json!({ "resolutions": data.assembly.resolutions }))
}

/// POST `/assembly/resolutions` - Add a resolution to the agenda.
async fn create_resolution(
    State(state): State<AppState>,
    Json(payload): Json<ResolutionRequest>,
) -> (StatusCode, Json<Resolution>) {
    let resolution = Resolution {
        description: payload.description,
        ..Resolution::new(payload.title, payload.article)
    };
    drop(state.update(|d| d.with_resolution(resolution.clone())).await);

    info!(resolution_id = %resolution.id, article = %resolution.article, "Resolution added");
    (StatusCode::CREATED, Json(resolution))
}

/// PUT `/assembly/resolutions/{resolution_id}/ballots/{owner_id}` - Record a ballot.
async fn record_ballot(
    State(state): State<AppState>,
    Path((resolution_id, owner_id)): Path<(ResolutionId, OwnerId)>,
    Json(payload): Json<BallotRequest>,
) -> ApiResult<StatusCode> {
    state
        .commit(|d| d.record_ballot(resolution_id, owner_id, payload.choice))
        .await?;

    info!(%resolution_id, %owner_id, choice = ?payload.choice, "Ballot recorded");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/assembly/resolutions/{resolution_id}/ballots/{owner_id}` - Clear a ballot.
async fn clear_ballot(
    State(state): State<AppState>,
    Path((resolution_id, owner_id)): Path<(ResolutionId, OwnerId)>,
) -> ApiResult<StatusCode> {
    state
        .commit(|d| d.clear_ballot(resolution_id, owner_id))
        .await?;

    info!(%resolution_id, %owner_id, "Ballot cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/assembly/resolutions/{resolution_id}/ballots` - Reset one resolution.
async fn reset_resolution(
    State(state): State<AppState>,
    Path(resolution_id): Path<ResolutionId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.reset_resolution(resolution_id)).await?;

    info!(%resolution_id, "Resolution ballots reset");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/assembly/ballots` - Reset every resolution.
async fn reset_ballots(State(state): State<AppState>) -> StatusCode {
    drop(state.update(Dataset::reset_ballots).await);

    info!("All ballots reset");
    StatusCode::NO_CONTENT
}

/// GET `/assembly/tally` - Outcome of every resolution.
async fn tally(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    Json(json!({
        "total_weight": state.total_weight(),
        "tallies": data.tally(state.total_weight()),
    }))
}
