//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod assembly;
pub mod budget;
pub mod charges;
pub mod dataset;
pub mod health;
pub mod owners;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(owners::routes())
        .merge(budget::routes())
        .merge(charges::routes())
        .merge(accounts::routes())
        .merge(assembly::routes())
        .merge(dataset::routes())
}
