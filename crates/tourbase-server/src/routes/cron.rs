//! Scheduler-triggered email queue drain
//!
//! `GET /api/cron/emails` with `Authorization: Bearer <CRON_SECRET>`.
//! Fails closed: an unconfigured secret or a mismatched credential yields
//! 401 with no processing performed.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, info};

use crate::state::AppState;

pub async fn process_emails(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let secret = state.config().cron_secret.as_str();

    // Unconfigured secret disables the endpoint entirely
    if secret.is_empty() {
        return unauthorized();
    }

    match bearer_token(&headers) {
        Some(token) if token == secret => {}
        _ => return unauthorized(),
    }

    match state.email_processor().drain().await {
        Ok(processed) => {
            info!(processed, "Email queue drained");
            (StatusCode::OK, Json(json!({ "processed": processed }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Email queue drain failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "drain_failed"})),
            )
                .into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "unauthorized"})),
    )
        .into_response()
}
