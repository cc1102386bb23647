//! Helpers for driving the router in tests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use copro_core::store::Dataset;
use copro_shared::CoproConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

/// Builds state and router around a dataset.
pub fn app(dataset: Dataset) -> (AppState, Router) {
    let state = AppState::new(dataset, CoproConfig::default());
    (state.clone(), create_router(state))
}

/// Sends one request and returns the status and JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
