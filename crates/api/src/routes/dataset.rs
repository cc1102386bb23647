//! Snapshot export.

use axum::{Json, Router, extract::State, routing::get};
use copro_core::store::Dataset;

use crate::AppState;

/// GET `/dataset` - The whole dataset, in the seed file format.
async fn export(State(state): State<AppState>) -> Json<Dataset> {
    Json(state.store.read().await.clone())
}

/// Creates the export route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dataset", get(export))
}
