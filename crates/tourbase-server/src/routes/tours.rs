//! Tenant-scoped tour endpoints
//!
//! The tenant comes from the path slug; every store call below carries the
//! resolved tenant ID, so a cross-tenant tour reference is a plain 404.
//! Mutations append an audit entry before responding; an audit write failure
//! fails the request rather than being swallowed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use uuid::Uuid;

use tourbase_core::{
    audit::NewAuditEntry,
    tenant::Tenant,
    tour::{NewTour, Tour, TourId, TourPatch},
};

use crate::error::ApiError;
use crate::middleware::RequestContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTourRequest {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
}

async fn resolve_tenant(state: &AppState, slug: &str) -> Result<Tenant, ApiError> {
    state
        .tenant_store()
        .get_tenant_by_slug(slug)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn list_tours(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Tour>>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    let tours = state.tenant_store().get_tours(tenant.id).await?;
    Ok(Json(tours))
}

pub async fn get_tour(
    State(state): State<AppState>,
    Path((slug, tour_slug)): Path<(String, String)>,
) -> Result<Json<Tour>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    let tour = state
        .tenant_store()
        .get_tour_by_slug(tenant.id, &tour_slug)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(tour))
}

pub async fn create_tour(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<Tour>), ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;

    let tour = state
        .tenant_store()
        .create_tour(NewTour {
            tenant_id: tenant.id,
            slug: body.slug,
            title: body.title,
            description: body.description,
            price_cents: body.price_cents,
            currency: body.currency,
            duration_days: body.duration_days,
        })
        .await?;

    let mut entry = NewAuditEntry::new(tenant.id, "tour.create", "tour", tour.id.to_string())
        .with_after(serde_json::to_value(&tour).map_err(tourbase_core::Error::from)?);
    if let Some(ip) = &ctx.client_ip {
        entry = entry.with_ip(ip.clone());
    }
    state.audit_store().log_action(entry).await?;

    Ok((StatusCode::CREATED, Json(tour)))
}

pub async fn update_tour(
    State(state): State<AppState>,
    Path((slug, tour_id)): Path<(String, String)>,
    Extension(ctx): Extension<RequestContext>,
    Json(patch): Json<TourPatch>,
) -> Result<Json<Tour>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;

    let tour_id = tour_id
        .parse::<Uuid>()
        .map(TourId::from_uuid)
        .map_err(|e| ApiError::BadRequest(format!("Invalid tour id: {}", e)))?;

    let before = state
        .tenant_store()
        .get_tour(tenant.id, tour_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let updated = state
        .tenant_store()
        .update_tour(tenant.id, tour_id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut entry = NewAuditEntry::new(tenant.id, "tour.update", "tour", updated.id.to_string())
        .with_before(serde_json::to_value(&before).map_err(tourbase_core::Error::from)?)
        .with_after(serde_json::to_value(&updated).map_err(tourbase_core::Error::from)?);
    if let Some(ip) = &ctx.client_ip {
        entry = entry.with_ip(ip.clone());
    }
    state.audit_store().log_action(entry).await?;

    Ok(Json(updated))
}
