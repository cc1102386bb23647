//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Association served.
    pub copro: String,
    /// Currency of every amount served.
    pub currency: String,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        copro: state.config.name.clone(),
        currency: state.config.currency.clone(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use copro_core::store::Dataset;

    use crate::test_support::{app, send};

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app(Dataset::default());

        let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["copro"], "Copropriété");
        assert_eq!(body["currency"], "EUR");
    }
}
