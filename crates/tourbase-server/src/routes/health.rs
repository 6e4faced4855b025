//! Health endpoints
//!
//! - `/healthz` - liveness probe, always 200 while the server runs
//! - `/readyz` - readiness probe, checks that the store answers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn healthz() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: None,
    })
}

pub async fn readyz(State(state): State<AppState>) -> Response {
    // Any store round trip will do; the slug does not need to exist
    match state.tenant_store().get_tenant_by_slug("readyz-probe").await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready".to_string(),
                message: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "not_ready".to_string(),
                message: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}
