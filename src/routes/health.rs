//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::ApiResponse;
use crate::graphql::documents;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub graphql: String,
    pub booking_poller: String,
}

/// Liveness probe. Returns OK while the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe: checks the GraphQL endpoint answers.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let token = state.config.graphql_service_token.as_deref();
    let graphql_status = match state
        .graphql
        .execute::<_, Value>(token, documents::HEALTH, json!({}))
        .await
    {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, endpoint = state.graphql.endpoint(), "GraphQL health check failed");
            format!("error: {}", e.code().to_ascii_lowercase())
        }
    };

    let poller = state.booking_watch.current();
    let booking_poller = match (poller.enabled, poller.last_error) {
        (false, _) => "disabled".to_string(),
        (true, Some(_)) => "error".to_string(),
        (true, None) => "running".to_string(),
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        graphql: graphql_status,
        booking_poller,
    })
}
