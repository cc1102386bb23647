//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the building's dataset
//! - Shared application state
//! - Error responses

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use copro_core::store::Dataset;
use copro_shared::{AppError, CoproConfig};
use tokio::sync::{RwLock, RwLockWriteGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current dataset snapshot.
    pub store: Arc<RwLock<Dataset>>,
    /// Association settings.
    pub config: Arc<CoproConfig>,
}

impl AppState {
    /// Creates state around an initial dataset.
    #[must_use]
    pub fn new(dataset: Dataset, config: CoproConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(dataset)),
            config: Arc::new(config),
        }
    }

    /// Tantièmes of the whole building.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        u64::from(self.config.total_weight)
    }

    /// Replaces the dataset with the snapshot returned by an infallible `f`.
    pub async fn update<F>(&self, f: F) -> RwLockWriteGuard<'_, Dataset>
    where
        F: FnOnce(&Dataset) -> Dataset,
    {
        let mut guard = self.store.write().await;
        let next = f(&guard);
        *guard = next;
        guard
    }

    /// Replaces the dataset with the snapshot returned by `f`.
    ///
    /// The write lock is held for the whole call, so concurrent writers are
    /// serialized. On error the dataset is left unchanged. The returned guard
    /// lets the caller read the new snapshot before releasing the lock.
    pub async fn apply<F, E>(&self, f: F) -> ApiResult<RwLockWriteGuard<'_, Dataset>>
    where
        F: FnOnce(&Dataset) -> Result<Dataset, E>,
        E: Into<AppError>,
    {
        let mut guard = self.store.write().await;
        let next = f(&guard).map_err(|e| ApiError(e.into()))?;
        *guard = next;
        Ok(guard)
    }

    /// Like [`apply`](Self::apply), releasing the lock right away.
    pub async fn commit<F, E>(&self, f: F) -> ApiResult<()>
    where
        F: FnOnce(&Dataset) -> Result<Dataset, E>,
        E: Into<AppError>,
    {
        self.apply(f).await.map(drop)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
